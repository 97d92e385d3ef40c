use super::named;
use crate::ast::Literal;
use crate::catalog::{
    leaf, Availability, CandidateShape, Catalog, DecodeRule, LeafDecoder, Param, Platform, Version,
};
use crate::errors::ResolveError;
use crate::native::{Font, FontDesign, FontWeight, Native, TextStyle};
use crate::resolvable::Args;

// ── Font ────────────────────────────────────────────────────────────

fn system(args: &Args<'_>) -> Result<Native, ResolveError> {
    Ok(Native::Font(Font::System {
        size: args.value(0)?,
        weight: args.optional(1),
        design: args.optional(2),
    }))
}

/// Older runtimes have no font designs; keep size and weight.
fn system_without_design(args: &Args<'_>) -> Result<Native, ResolveError> {
    Ok(Native::Font(Font::System {
        size: args.value(0)?,
        weight: args.optional(1),
        design: None,
    }))
}

fn weight(args: &Args<'_>) -> Result<Native, ResolveError> {
    let base: Font = args.value(0)?;
    Ok(Native::Font(base.weight(args.value(1)?)))
}

const fn style(style: TextStyle) -> Font {
    Font::Style {
        style,
        weight: None,
    }
}

define_cases!(text_style_cases, text_style_named: Font {
    "largeTitle" => style(TextStyle::LargeTitle),
    "title" => style(TextStyle::Title),
    "title2" => style(TextStyle::Title2),
    "title3" => style(TextStyle::Title3),
    "headline" => style(TextStyle::Headline),
    "subheadline" => style(TextStyle::Subheadline),
    "body" => style(TextStyle::Body),
    "callout" => style(TextStyle::Callout),
    "footnote" => style(TextStyle::Footnote),
    "caption" => style(TextStyle::Caption),
    "caption2" => style(TextStyle::Caption2),
});

fn font_literal(literal: &Literal) -> Result<Native, String> {
    named(literal, "Font", text_style_named)
}

pub fn font() -> Catalog {
    Catalog::new("Font")
        .with_literal(LeafDecoder::new("Font", font_literal, font_literal))
        .shape(
            CandidateShape::static_function(
                "system",
                vec![
                    Param::labeled("size", leaf::FLOAT),
                    Param::labeled("weight", DecodeRule::optional(DecodeRule::ty("FontWeight")))
                        .with_default(Literal::None),
                    Param::labeled("design", DecodeRule::optional(DecodeRule::ty("FontDesign")))
                        .with_default(Literal::None),
                ],
                system,
            )
            .available(
                Availability::everywhere()
                    .introduced(Platform::Ios, Version::new(16, 1, 0))
                    .introduced(Platform::Macos, Version::new(13, 0, 0)),
            )
            .fallback(system_without_design),
        )
        .shape(CandidateShape::instance_method(
            DecodeRule::ty("Font"),
            "weight",
            vec![Param::positional(DecodeRule::ty("FontWeight"))],
            weight,
        ))
        .shapes_from(text_style_cases())
}

// ── FontWeight / FontDesign ─────────────────────────────────────────

define_cases!(font_weight_cases, font_weight_named: FontWeight {
    "ultraLight" => FontWeight::UltraLight,
    "thin" => FontWeight::Thin,
    "light" => FontWeight::Light,
    "regular" => FontWeight::Regular,
    "medium" => FontWeight::Medium,
    "semibold" => FontWeight::Semibold,
    "bold" => FontWeight::Bold,
    "heavy" => FontWeight::Heavy,
    "black" => FontWeight::Black,
});

fn font_weight_literal(literal: &Literal) -> Result<Native, String> {
    named(literal, "FontWeight", font_weight_named)
}

pub fn font_weight() -> Catalog {
    Catalog::new("FontWeight")
        .with_literal(LeafDecoder::new(
            "FontWeight",
            font_weight_literal,
            font_weight_literal,
        ))
        .shapes_from(font_weight_cases())
}

define_cases!(font_design_cases, font_design_named: FontDesign {
    "default" => FontDesign::Default,
    "serif" => FontDesign::Serif,
    "rounded" => FontDesign::Rounded,
    "monospaced" => FontDesign::Monospaced,
});

fn font_design_literal(literal: &Literal) -> Result<Native, String> {
    named(literal, "FontDesign", font_design_named)
}

pub fn font_design() -> Catalog {
    Catalog::new("FontDesign")
        .with_literal(LeafDecoder::new(
            "FontDesign",
            font_design_literal,
            font_design_literal,
        ))
        .shapes_from(font_design_cases())
}
