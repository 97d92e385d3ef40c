use serde::{Serialize, Serializer};

// ── Color ───────────────────────────────────────────────────────────

/// An sRGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub opacity: f64,
}

impl Color {
    pub const fn rgba(red: f64, green: f64, blue: f64, opacity: f64) -> Self {
        Self {
            red,
            green,
            blue,
            opacity,
        }
    }

    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const ORANGE: Color = Color::rgb(1.0, 0.5, 0.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const PURPLE: Color = Color::rgb(0.5, 0.0, 0.5);
    pub const PINK: Color = Color::rgb(1.0, 0.75, 0.8);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub fn named(name: &str) -> Option<Self> {
        Some(match name {
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
            _ => return None,
        })
    }

    /// `#RGB`, `#RRGGBB` or `#RRGGBBAA`; the leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| f64::from(v) / 255.0);
        match digits.len() {
            3 => {
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                Self::from_hex(&expanded)
            }
            6 => Some(Color::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            8 => Some(Color::rgba(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                channel(&digits[6..8])?,
            )),
            _ => None,
        }
    }

    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            opacity: (self.opacity * opacity).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_hex(&self) -> String {
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            byte(self.red),
            byte(self.green),
            byte(self.blue),
            byte(self.opacity)
        )
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

// ── Paint ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Material {
    UltraThin,
    Thin,
    Regular,
    Thick,
    UltraThick,
}

/// What a shape or text is filled with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Paint {
    Solid(Color),
    Tinted(Color),
    Gradient(Vec<Color>),
    Material(Material),
    WindowBackground,
    Opacity { base: Box<Paint>, amount: f64 },
}

// ── Fonts ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FontWeight {
    UltraLight,
    Thin,
    Light,
    Regular,
    Medium,
    Semibold,
    Bold,
    Heavy,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FontDesign {
    Default,
    Serif,
    Rounded,
    Monospaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TextStyle {
    LargeTitle,
    Title,
    Title2,
    Title3,
    Headline,
    Subheadline,
    Body,
    Callout,
    Footnote,
    Caption,
    Caption2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Font {
    System {
        size: f64,
        weight: Option<FontWeight>,
        design: Option<FontDesign>,
    },
    Style {
        style: TextStyle,
        weight: Option<FontWeight>,
    },
}

impl Font {
    pub fn weight(self, weight: FontWeight) -> Self {
        match self {
            Font::System { size, design, .. } => Font::System {
                size,
                weight: Some(weight),
                design,
            },
            Font::Style { style, .. } => Font::Style {
                style,
                weight: Some(weight),
            },
        }
    }
}

// ── Layout ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    #[default]
    Center,
    Leading,
    Trailing,
    Top,
    Bottom,
    TopLeading,
    TopTrailing,
    BottomLeading,
    BottomTrailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeSet {
    pub top: bool,
    pub leading: bool,
    pub bottom: bool,
    pub trailing: bool,
}

impl EdgeSet {
    const fn new(top: bool, leading: bool, bottom: bool, trailing: bool) -> Self {
        Self {
            top,
            leading,
            bottom,
            trailing,
        }
    }

    pub const ALL: EdgeSet = EdgeSet::new(true, true, true, true);
    pub const HORIZONTAL: EdgeSet = EdgeSet::new(false, true, false, true);
    pub const VERTICAL: EdgeSet = EdgeSet::new(true, false, true, false);
    pub const TOP: EdgeSet = EdgeSet::new(true, false, false, false);
    pub const LEADING: EdgeSet = EdgeSet::new(false, true, false, false);
    pub const BOTTOM: EdgeSet = EdgeSet::new(false, false, true, false);
    pub const TRAILING: EdgeSet = EdgeSet::new(false, false, false, true);
}
