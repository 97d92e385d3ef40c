use crate::ast::Literal;
use crate::native::Native;

pub type LeafFn = fn(&Literal) -> Result<Native, String>;

/// Decoding rule for a value that needs no catalog lookup.
///
/// Wire literals are matched strictly so that shape disambiguation stays
/// predictable; attribute values arrive as strings from the live element and
/// are parsed leniently.
#[derive(Clone, Copy)]
pub struct LeafDecoder {
    pub name: &'static str,
    literal: LeafFn,
    attribute: LeafFn,
}

impl LeafDecoder {
    pub const fn new(name: &'static str, literal: LeafFn, attribute: LeafFn) -> Self {
        Self {
            name,
            literal,
            attribute,
        }
    }

    pub fn decode_literal(&self, literal: &Literal) -> Result<Native, String> {
        (self.literal)(literal)
    }

    pub fn decode_attribute(&self, literal: &Literal) -> Result<Native, String> {
        (self.attribute)(literal)
    }
}

impl PartialEq for LeafDecoder {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl std::fmt::Debug for LeafDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LeafDecoder({})", self.name)
    }
}

fn mismatch(expected: &str, found: &Literal) -> String {
    format!("expected `{}`, found {} {}", expected, found.kind(), found)
}

fn bool_literal(literal: &Literal) -> Result<Native, String> {
    match literal {
        Literal::Bool(b) => Ok(Native::Bool(*b)),
        other => Err(mismatch("Bool", other)),
    }
}

/// A present attribute with no value (`<Text hidden />`) reads as `true`.
fn bool_attribute(literal: &Literal) -> Result<Native, String> {
    match literal {
        Literal::String(s) => match s.trim() {
            "" | "true" => Ok(Native::Bool(true)),
            "false" => Ok(Native::Bool(false)),
            _ => Err(mismatch("Bool", literal)),
        },
        other => bool_literal(other),
    }
}

fn int_literal(literal: &Literal) -> Result<Native, String> {
    match literal {
        Literal::Int(i) => Ok(Native::Int(*i)),
        other => Err(mismatch("Int", other)),
    }
}

fn int_attribute(literal: &Literal) -> Result<Native, String> {
    match literal {
        Literal::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Native::Int)
            .map_err(|_| mismatch("Int", literal)),
        other => int_literal(other),
    }
}

fn float_literal(literal: &Literal) -> Result<Native, String> {
    match literal {
        Literal::Float(x) => Ok(Native::Float(*x)),
        Literal::Int(i) => Ok(Native::Float(*i as f64)),
        other => Err(mismatch("Double", other)),
    }
}

fn float_attribute(literal: &Literal) -> Result<Native, String> {
    match literal {
        Literal::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .map(Native::Float)
            .ok_or_else(|| mismatch("Double", literal)),
        other => float_literal(other),
    }
}

fn string_literal(literal: &Literal) -> Result<Native, String> {
    match literal {
        Literal::String(s) => Ok(Native::String(s.clone())),
        other => Err(mismatch("String", other)),
    }
}

pub const BOOL: LeafDecoder = LeafDecoder::new("Bool", bool_literal, bool_attribute);
pub const INT: LeafDecoder = LeafDecoder::new("Int", int_literal, int_attribute);
pub const FLOAT: LeafDecoder = LeafDecoder::new("Double", float_literal, float_attribute);
/// Attribute values are already strings, so both paths take them as is.
pub const STRING: LeafDecoder = LeafDecoder::new("String", string_literal, string_literal);
