//! The built-in style vocabulary: one catalog per value type and one per
//! modifier, in the candidate order the decoder tries them.

use crate::ast::Literal;
use crate::native::Native;

/// Generates a name lookup for a closed set of parameterless cases plus the
/// matching `CandidateShape::case` list, keeping both in declaration order.
macro_rules! define_cases {
    ($shapes:ident, $lookup:ident: $ty:ty { $($name:literal => $value:expr),* $(,)? }) => {
        pub fn $lookup(name: &str) -> Option<$ty> {
            match name {
                $($name => Some($value),)*
                _ => None,
            }
        }

        fn $shapes() -> Vec<$crate::catalog::CandidateShape> {
            vec![$($crate::catalog::CandidateShape::case($name, |_| Ok($crate::native::Native::from($value)))),*]
        }
    };
}

pub mod color;
pub mod font;
pub mod layout;
pub mod modifiers;
pub mod paint;

use super::Catalog;

pub fn types() -> Vec<Catalog> {
    vec![
        layout::length(),
        layout::alignment(),
        layout::edge_set(),
        color::color(),
        paint::paint(),
        font::font(),
        font::font_weight(),
        font::font_design(),
    ]
}

pub fn modifiers() -> Vec<Catalog> {
    modifiers::all()
}

/// Literal decoding for case-named types: `"bold"` reads as `.bold`.
pub(crate) fn named<T: Into<Native>>(
    literal: &Literal,
    type_name: &str,
    lookup: fn(&str) -> Option<T>,
) -> Result<Native, String> {
    match literal {
        Literal::String(name) => lookup(name.trim())
            .map(Into::into)
            .ok_or_else(|| format!("`{}` is not a `{}` case", name, type_name)),
        other => Err(format!(
            "expected a `{}` case name, found {} {}",
            type_name,
            other.kind(),
            other
        )),
    }
}
