use serde::Serialize;

pub mod modifier;
pub mod style;

pub use modifier::Modifier;
pub use style::{Alignment, Color, EdgeSet, Font, FontDesign, FontWeight, Material, Paint, TextStyle};

/// Every concrete value a catalog builder can produce.
///
/// A closed sum type instead of type-erased storage: builders match on the
/// variant they expect, and anything else is a resolution error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Native {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Native>),
    Color(Color),
    Paint(Paint),
    Font(Font),
    FontWeight(FontWeight),
    FontDesign(FontDesign),
    TextStyle(TextStyle),
    Alignment(Alignment),
    EdgeSet(EdgeSet),
    Modifier(Modifier),
}

impl Native {
    pub fn kind(&self) -> &'static str {
        match self {
            Native::None => "nil",
            Native::Bool(_) => "Bool",
            Native::Int(_) => "Int",
            Native::Float(_) => "Double",
            Native::String(_) => "String",
            Native::List(_) => "Array",
            Native::Color(_) => "Color",
            Native::Paint(_) => "Paint",
            Native::Font(_) => "Font",
            Native::FontWeight(_) => "FontWeight",
            Native::FontDesign(_) => "FontDesign",
            Native::TextStyle(_) => "TextStyle",
            Native::Alignment(_) => "Alignment",
            Native::EdgeSet(_) => "EdgeSet",
            Native::Modifier(_) => "Modifier",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Native::None)
    }
}

/// Typed extraction out of a resolved `Native`.
pub trait FromNative: Sized {
    const KIND: &'static str;

    fn from_native(native: &Native) -> Option<Self>;
}

macro_rules! define_from_native {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromNative for $ty {
                const KIND: &'static str = stringify!($variant);

                fn from_native(native: &Native) -> Option<Self> {
                    match native {
                        Native::$variant(value) => Some(value.clone()),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Native {
                fn from(value: $ty) -> Self {
                    Native::$variant(value)
                }
            }
        )*
    }
}

define_from_native! {
    bool => Bool,
    i64 => Int,
    String => String,
    Color => Color,
    Paint => Paint,
    Font => Font,
    FontWeight => FontWeight,
    FontDesign => FontDesign,
    TextStyle => TextStyle,
    Alignment => Alignment,
    EdgeSet => EdgeSet,
    Modifier => Modifier,
}

impl FromNative for f64 {
    const KIND: &'static str = "Double";

    fn from_native(native: &Native) -> Option<Self> {
        match native {
            Native::Float(x) => Some(*x),
            Native::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl From<f64> for Native {
    fn from(value: f64) -> Self {
        Native::Float(value)
    }
}

impl<T: FromNative> FromNative for Vec<T> {
    const KIND: &'static str = "Array";

    fn from_native(native: &Native) -> Option<Self> {
        match native {
            Native::List(items) => items.iter().map(T::from_native).collect(),
            _ => None,
        }
    }
}

impl FromNative for Native {
    const KIND: &'static str = "Any";

    fn from_native(native: &Native) -> Option<Self> {
        Some(native.clone())
    }
}
