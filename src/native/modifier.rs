use serde::Serialize;

use super::style::{Alignment, EdgeSet, Font, FontWeight, Paint};

/// A resolved view modifier, ready for the rendering pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Modifier {
    Frame {
        width: Option<f64>,
        height: Option<f64>,
        alignment: Alignment,
    },
    FlexFrame {
        max_width: Option<f64>,
        max_height: Option<f64>,
        alignment: Alignment,
    },
    Padding {
        edges: EdgeSet,
        length: Option<f64>,
    },
    ForegroundStyle(Paint),
    Background(Paint),
    Opacity(f64),
    Font(Font),
    FontWeight(FontWeight),
    CornerRadius(f64),
    Offset {
        x: f64,
        y: f64,
    },
}

impl Modifier {
    pub fn name(&self) -> &'static str {
        match self {
            Modifier::Frame { .. } | Modifier::FlexFrame { .. } => "frame",
            Modifier::Padding { .. } => "padding",
            Modifier::ForegroundStyle(_) => "foregroundStyle",
            Modifier::Background(_) => "background",
            Modifier::Opacity(_) => "opacity",
            Modifier::Font(_) => "font",
            Modifier::FontWeight(_) => "fontWeight",
            Modifier::CornerRadius(_) => "cornerRadius",
            Modifier::Offset { .. } => "offset",
        }
    }
}
