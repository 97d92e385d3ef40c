use crate::ast::Literal;
use crate::catalog::{leaf, CandidateShape, Catalog, DecodeRule, LeafDecoder, Param};
use crate::context::Environment;
use crate::errors::ResolveError;
use crate::native::{Color, Native};
use crate::resolvable::Args;

fn parse_color(text: &str) -> Option<Color> {
    Color::named(text).or_else(|| Color::from_hex(text))
}

fn color_literal(literal: &Literal) -> Result<Native, String> {
    match literal {
        Literal::String(text) => parse_color(text.trim())
            .map(Native::Color)
            .ok_or_else(|| format!("`{}` is not a color name or hex code", text)),
        other => Err(format!(
            "expected a color string, found {} {}",
            other.kind(),
            other
        )),
    }
}

/// `"#FF0000"` and `"red"` both decode straight to a `Color`.
pub const COLOR: LeafDecoder = LeafDecoder::new("Color", color_literal, color_literal);

/// Wire literals must be hex so that a bare case name falls through to the
/// name-only cases. Attribute values may still name a color.
fn hex_literal(literal: &Literal) -> Result<Native, String> {
    match literal {
        Literal::String(text) => Color::from_hex(text.trim())
            .map(Native::Color)
            .ok_or_else(|| format!("`{}` is not a hex color code", text)),
        other => Err(format!(
            "expected a hex color string, found {} {}",
            other.kind(),
            other
        )),
    }
}

const HEX: LeafDecoder = LeafDecoder::new("HexColor", hex_literal, color_literal);

fn from_string(args: &Args<'_>) -> Result<Native, ResolveError> {
    Ok(Native::Color(args.value(0)?))
}

fn from_components(args: &Args<'_>) -> Result<Native, ResolveError> {
    Ok(Native::Color(Color::rgba(
        args.value(0)?,
        args.value(1)?,
        args.value(2)?,
        args.value(3)?,
    )))
}

fn opacity(args: &Args<'_>) -> Result<Native, ResolveError> {
    let base: Color = args.value(0)?;
    Ok(Native::Color(base.with_opacity(args.value(1)?)))
}

// Semantic colors follow the color scheme.

fn primary(args: &Args<'_>) -> Result<Native, ResolveError> {
    let dark = args.environment().is_some_and(Environment::is_dark);
    Ok(Native::Color(if dark { Color::WHITE } else { Color::BLACK }))
}

fn secondary(args: &Args<'_>) -> Result<Native, ResolveError> {
    let dark = args.environment().is_some_and(Environment::is_dark);
    Ok(Native::Color(if dark {
        Color::rgba(0.92, 0.92, 0.96, 0.6)
    } else {
        Color::rgba(0.24, 0.24, 0.26, 0.6)
    }))
}

define_cases!(named_cases, color_named: Color {
    "red" => Color::RED,
    "orange" => Color::ORANGE,
    "yellow" => Color::YELLOW,
    "green" => Color::GREEN,
    "blue" => Color::BLUE,
    "purple" => Color::PURPLE,
    "pink" => Color::PINK,
    "white" => Color::WHITE,
    "gray" => Color::GRAY,
    "black" => Color::BLACK,
    "clear" => Color::CLEAR,
});

pub fn color() -> Catalog {
    Catalog::new("Color")
        .with_literal(COLOR)
        .shape(CandidateShape::initializer(
            vec![Param::positional(HEX)],
            from_string,
        ))
        .shape(CandidateShape::initializer(
            vec![
                Param::labeled("red", leaf::FLOAT),
                Param::labeled("green", leaf::FLOAT),
                Param::labeled("blue", leaf::FLOAT),
                Param::labeled("opacity", leaf::FLOAT).with_default(1.0),
            ],
            from_components,
        ))
        .shape(CandidateShape::instance_method(
            DecodeRule::ty("Color"),
            "opacity",
            vec![Param::positional(leaf::FLOAT)],
            opacity,
        ))
        .shapes_from(named_cases())
        .shape(CandidateShape::case("primary", primary).contextual())
        .shape(CandidateShape::case("secondary", secondary).contextual())
}
