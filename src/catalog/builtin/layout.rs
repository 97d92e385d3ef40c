use super::named;
use crate::ast::Literal;
use crate::catalog::{leaf, Catalog, LeafDecoder};
use crate::native::{Alignment, EdgeSet, Native};

define_cases!(length_cases, length_named: f64 {
    "infinity" => f64::INFINITY,
});

/// Points. Bare numbers decode directly.
pub fn length() -> Catalog {
    Catalog::new("Length")
        .with_literal(leaf::FLOAT)
        .shapes_from(length_cases())
}

define_cases!(alignment_cases, alignment_named: Alignment {
    "center" => Alignment::Center,
    "leading" => Alignment::Leading,
    "trailing" => Alignment::Trailing,
    "top" => Alignment::Top,
    "bottom" => Alignment::Bottom,
    "topLeading" => Alignment::TopLeading,
    "topTrailing" => Alignment::TopTrailing,
    "bottomLeading" => Alignment::BottomLeading,
    "bottomTrailing" => Alignment::BottomTrailing,
});

fn alignment_literal(literal: &Literal) -> Result<Native, String> {
    named(literal, "Alignment", alignment_named)
}

pub fn alignment() -> Catalog {
    Catalog::new("Alignment")
        .with_literal(LeafDecoder::new("Alignment", alignment_literal, alignment_literal))
        .shapes_from(alignment_cases())
}

define_cases!(edge_set_cases, edge_set_named: EdgeSet {
    "all" => EdgeSet::ALL,
    "horizontal" => EdgeSet::HORIZONTAL,
    "vertical" => EdgeSet::VERTICAL,
    "top" => EdgeSet::TOP,
    "leading" => EdgeSet::LEADING,
    "bottom" => EdgeSet::BOTTOM,
    "trailing" => EdgeSet::TRAILING,
});

fn edge_set_literal(literal: &Literal) -> Result<Native, String> {
    named(literal, "EdgeSet", edge_set_named)
}

pub fn edge_set() -> Catalog {
    Catalog::new("EdgeSet")
        .with_literal(LeafDecoder::new("EdgeSet", edge_set_literal, edge_set_literal))
        .shapes_from(edge_set_cases())
}
