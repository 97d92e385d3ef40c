//! Modifier catalogs, keyed by the modifier name that tags the wire node.

use crate::ast::Literal;
use crate::catalog::{leaf, Builder, CandidateShape, Catalog, DecodeRule, Param};
use crate::errors::ResolveError;
use crate::native::{EdgeSet, Modifier, Native};
use crate::resolvable::Args;

fn length() -> DecodeRule {
    DecodeRule::ty("Length")
}

fn optional_length(label: &str) -> Param {
    Param::labeled(label, DecodeRule::optional(length())).with_default(Literal::None)
}

fn alignment_param() -> Param {
    Param::labeled("alignment", DecodeRule::ty("Alignment")).with_default("center")
}

fn modifier(value: Modifier) -> Result<Native, ResolveError> {
    Ok(Native::Modifier(value))
}

// ── frame ───────────────────────────────────────────────────────────

fn frame(args: &Args<'_>) -> Result<Native, ResolveError> {
    modifier(Modifier::Frame {
        width: args.optional(0),
        height: args.optional(1),
        alignment: args.value(2)?,
    })
}

fn flex_frame(args: &Args<'_>) -> Result<Native, ResolveError> {
    modifier(Modifier::FlexFrame {
        max_width: args.optional(0),
        max_height: args.optional(1),
        alignment: args.value(2)?,
    })
}

// ── padding ─────────────────────────────────────────────────────────

fn padding(args: &Args<'_>) -> Result<Native, ResolveError> {
    modifier(Modifier::Padding {
        edges: args.value(0)?,
        length: args.optional(1),
    })
}

fn uniform_padding(args: &Args<'_>) -> Result<Native, ResolveError> {
    modifier(Modifier::Padding {
        edges: EdgeSet::ALL,
        length: Some(args.value(0)?),
    })
}

// ── single-value modifiers ──────────────────────────────────────────

fn foreground_style(args: &Args<'_>) -> Result<Native, ResolveError> {
    modifier(Modifier::ForegroundStyle(args.value(0)?))
}

fn background(args: &Args<'_>) -> Result<Native, ResolveError> {
    modifier(Modifier::Background(args.value(0)?))
}

fn opacity(args: &Args<'_>) -> Result<Native, ResolveError> {
    modifier(Modifier::Opacity(args.value(0)?))
}

fn font(args: &Args<'_>) -> Result<Native, ResolveError> {
    modifier(Modifier::Font(args.value(0)?))
}

fn font_weight(args: &Args<'_>) -> Result<Native, ResolveError> {
    modifier(Modifier::FontWeight(args.value(0)?))
}

fn corner_radius(args: &Args<'_>) -> Result<Native, ResolveError> {
    modifier(Modifier::CornerRadius(args.value(0)?))
}

fn offset(args: &Args<'_>) -> Result<Native, ResolveError> {
    modifier(Modifier::Offset {
        x: args.value(0)?,
        y: args.value(1)?,
    })
}

fn single(name: &str, param: DecodeRule, builder: Builder) -> Catalog {
    Catalog::new(name).shape(CandidateShape::initializer(
        vec![Param::positional(param)],
        builder,
    ))
}

pub fn all() -> Vec<Catalog> {
    vec![
        Catalog::new("frame")
            .shape(CandidateShape::initializer(
                vec![
                    optional_length("width"),
                    optional_length("height"),
                    alignment_param(),
                ],
                frame,
            ))
            .shape(CandidateShape::initializer(
                vec![
                    optional_length("maxWidth"),
                    optional_length("maxHeight"),
                    alignment_param(),
                ],
                flex_frame,
            )),
        // A lone length goes first so that a lone attribute binds as an amount.
        Catalog::new("padding")
            .shape(CandidateShape::initializer(
                vec![Param::positional(length())],
                uniform_padding,
            ))
            .shape(CandidateShape::initializer(
                vec![
                    Param::positional(DecodeRule::ty("EdgeSet")).with_default("all"),
                    Param::positional(DecodeRule::optional(length())).with_default(Literal::None),
                ],
                padding,
            )),
        single("foregroundStyle", DecodeRule::ty("Paint"), foreground_style),
        single("background", DecodeRule::ty("Paint"), background),
        single("opacity", leaf::FLOAT.into(), opacity),
        single("font", DecodeRule::ty("Font"), font),
        single("fontWeight", DecodeRule::ty("FontWeight"), font_weight),
        single("cornerRadius", length(), corner_radius),
        Catalog::new("offset").shape(CandidateShape::initializer(
            vec![
                Param::labeled("x", length()).with_default(0_i64),
                Param::labeled("y", length()).with_default(0_i64),
            ],
            offset,
        )),
    ]
}
