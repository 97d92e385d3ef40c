use super::color::COLOR;
use crate::ast::Literal;
use crate::catalog::{
    leaf, Availability, CandidateShape, Catalog, DecodeRule, LeafDecoder, Param, Platform, Version,
};
use crate::errors::ResolveError;
use crate::native::{Color, Material, Native, Paint};
use crate::resolvable::Args;

/// A bare color string paints solid.
fn paint_literal(literal: &Literal) -> Result<Native, String> {
    match COLOR.decode_literal(literal)? {
        Native::Color(color) => Ok(Native::Paint(Paint::Solid(color))),
        other => Err(format!("expected a color, found {}", other.kind())),
    }
}

fn solid(args: &Args<'_>) -> Result<Native, ResolveError> {
    Ok(Native::Paint(Paint::Solid(args.value(0)?)))
}

fn tinted(args: &Args<'_>) -> Result<Native, ResolveError> {
    Ok(Native::Paint(Paint::Tinted(args.value(0)?)))
}

fn gradient(args: &Args<'_>) -> Result<Native, ResolveError> {
    let stops: Vec<Color> = args.value(0)?;
    if stops.is_empty() {
        return Err(ResolveError::InvalidValue {
            shape: args.shape().to_string(),
            reason: "a gradient needs at least one stop".to_string(),
        });
    }
    Ok(Native::Paint(Paint::Gradient(stops)))
}

fn opacity(args: &Args<'_>) -> Result<Native, ResolveError> {
    let base: Paint = args.value(0)?;
    Ok(Native::Paint(Paint::Opacity {
        base: Box::new(base),
        amount: args.value(1)?,
    }))
}

define_cases!(material_cases, material_named: Paint {
    "ultraThinMaterial" => Paint::Material(Material::UltraThin),
    "thinMaterial" => Paint::Material(Material::Thin),
    "regularMaterial" => Paint::Material(Material::Regular),
    "thickMaterial" => Paint::Material(Material::Thick),
    "ultraThickMaterial" => Paint::Material(Material::UltraThick),
});

pub fn paint() -> Catalog {
    Catalog::new("Paint")
        .with_literal(LeafDecoder::new("Paint", paint_literal, paint_literal))
        .shape(CandidateShape::enum_case(
            "solid",
            vec![Param::positional(DecodeRule::ty("Color"))],
            solid,
        ))
        .shape(CandidateShape::enum_case(
            "tinted",
            vec![Param::positional(DecodeRule::ty("Color"))],
            tinted,
        ))
        .shape(CandidateShape::enum_case(
            "gradient",
            vec![Param::labeled(
                "stops",
                DecodeRule::list(DecodeRule::ty("Color")),
            )],
            gradient,
        ))
        .shape(CandidateShape::instance_method(
            DecodeRule::ty("Paint"),
            "opacity",
            vec![Param::positional(leaf::FLOAT)],
            opacity,
        ))
        .shape(
            CandidateShape::case("windowBackground", |_| {
                Ok(Native::Paint(Paint::WindowBackground))
            })
            .available(
                Availability::only([Platform::Macos])
                    .introduced(Platform::Macos, Version::new(14, 0, 0)),
            ),
        )
        .shapes_from(material_cases())
}
