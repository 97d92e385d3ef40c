pub mod availability;
pub mod builtin;
pub mod leaf;

pub use availability::{filter_for_platform, Availability, Platform, RuntimeGate, Version};
pub use leaf::LeafDecoder;

use crate::ast::Literal;
use crate::errors::ResolveError;
use crate::native::Native;
use crate::resolvable::Args;

/// Produces the concrete value of a shape from its resolved children.
pub type Builder = fn(&Args<'_>) -> Result<Native, ResolveError>;

/// How one parameter's argument is decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeRule {
    Leaf(LeafDecoder),
    /// A nested type, looked up by name in the registry.
    Type(String),
    List(Box<DecodeRule>),
    /// `nil` decodes to `Native::None`, anything else through the inner rule.
    Optional(Box<DecodeRule>),
}

impl DecodeRule {
    pub fn ty(name: impl Into<String>) -> Self {
        DecodeRule::Type(name.into())
    }

    pub fn list(rule: DecodeRule) -> Self {
        DecodeRule::List(Box::new(rule))
    }

    pub fn optional(rule: DecodeRule) -> Self {
        DecodeRule::Optional(Box::new(rule))
    }
}

impl From<LeafDecoder> for DecodeRule {
    fn from(leaf: LeafDecoder) -> Self {
        DecodeRule::Leaf(leaf)
    }
}

impl std::fmt::Display for DecodeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeRule::Leaf(leaf) => write!(f, "{}", leaf.name),
            DecodeRule::Type(name) => write!(f, "{}", name),
            DecodeRule::List(inner) => write!(f, "[{}]", inner),
            DecodeRule::Optional(inner) => write!(f, "{}?", inner),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// `None` binds positionally.
    pub label: Option<String>,
    pub rule: DecodeRule,
    pub default: Option<Literal>,
}

impl Param {
    pub fn positional(rule: impl Into<DecodeRule>) -> Self {
        Self {
            label: None,
            rule: rule.into(),
            default: None,
        }
    }

    pub fn labeled(label: impl Into<String>, rule: impl Into<DecodeRule>) -> Self {
        Self {
            label: Some(label.into()),
            rule: rule.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Literal>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// The label as written in diagnostics (`_` for positional parameters).
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or("_")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    EnumCase { name: String },
    /// Matched by name against a trailing selector string, after every
    /// parameterized shape has failed.
    ParameterlessCase { name: String },
    Initializer,
    StaticFunction { identifier: String },
    /// The base value is bound as the first positional parameter.
    InstanceMethod { base: DecodeRule, method: String },
}

/// One statically known way to construct a catalog's type.
#[derive(Clone)]
pub struct CandidateShape {
    pub kind: ShapeKind,
    pub params: Vec<Param>,
    /// Selector strings that pick this shape out of the catalog.
    pub keys: Vec<String>,
    pub availability: Availability,
    pub builder: Builder,
    /// Used instead of `builder` when the runtime gate fails.
    pub fallback: Option<Builder>,
    /// The builder reads the environment, so the shape is never folded to a constant.
    pub contextual: bool,
}

impl CandidateShape {
    fn new(kind: ShapeKind, params: Vec<Param>, keys: Vec<String>, builder: Builder) -> Self {
        Self {
            kind,
            params,
            keys,
            availability: Availability::everywhere(),
            builder,
            fallback: None,
            contextual: false,
        }
    }

    pub fn enum_case(name: &str, params: Vec<Param>, builder: Builder) -> Self {
        Self::new(
            ShapeKind::EnumCase {
                name: name.to_string(),
            },
            params,
            vec![name.to_string()],
            builder,
        )
    }

    pub fn case(name: &str, builder: Builder) -> Self {
        Self::new(
            ShapeKind::ParameterlessCase {
                name: name.to_string(),
            },
            Vec::new(),
            vec![name.to_string()],
            builder,
        )
    }

    pub fn initializer(params: Vec<Param>, builder: Builder) -> Self {
        Self::new(ShapeKind::Initializer, params, Vec::new(), builder)
    }

    pub fn static_function(identifier: &str, params: Vec<Param>, builder: Builder) -> Self {
        Self::new(
            ShapeKind::StaticFunction {
                identifier: identifier.to_string(),
            },
            params,
            vec![identifier.to_string()],
            builder,
        )
    }

    pub fn instance_method(base: DecodeRule, method: &str, params: Vec<Param>, builder: Builder) -> Self {
        let mut all_params = Vec::with_capacity(params.len() + 1);
        all_params.push(Param::positional(base.clone()));
        all_params.extend(params);
        Self::new(
            ShapeKind::InstanceMethod {
                base,
                method: method.to_string(),
            },
            all_params,
            vec![method.to_string()],
            builder,
        )
    }

    pub fn available(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn fallback(mut self, fallback: Builder) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn keyed_by<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn contextual(mut self) -> Self {
        self.contextual = true;
        self
    }

    pub fn is_parameterless(&self) -> bool {
        matches!(self.kind, ShapeKind::ParameterlessCase { .. })
    }

    pub fn case_name(&self) -> Option<&str> {
        match &self.kind {
            ShapeKind::ParameterlessCase { name } => Some(name),
            _ => None,
        }
    }

    pub fn is_keyed_by(&self, selector: &str) -> bool {
        self.keys.iter().any(|k| k == selector)
    }

    /// The shape as it appears in diagnostics, e.g. `.system(size:weight:design:)`.
    pub fn label(&self, type_name: &str) -> String {
        let clause = |params: &[Param]| -> String {
            params
                .iter()
                .map(|p| format!("{}:", p.display_label()))
                .collect()
        };
        match &self.kind {
            ShapeKind::EnumCase { name } => format!(".{}({})", name, clause(&self.params)),
            ShapeKind::ParameterlessCase { name } => format!(".{}", name),
            ShapeKind::Initializer => format!("{}({})", type_name, clause(&self.params)),
            ShapeKind::StaticFunction { identifier } => {
                format!(".{}({})", identifier, clause(&self.params))
            }
            ShapeKind::InstanceMethod { base, method } => {
                format!("{}.{}({})", base, method, clause(self.params.get(1..).unwrap_or_default()))
            }
        }
    }
}

impl std::fmt::Debug for CandidateShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateShape")
            .field("kind", &self.kind)
            .field("params", &self.params)
            .field("keys", &self.keys)
            .field("availability", &self.availability)
            .field("fallback", &self.fallback.is_some())
            .field("contextual", &self.contextual)
            .finish()
    }
}

/// The ordered candidate list for one target type.
///
/// Order is the disambiguation rule: the first structurally matching shape
/// wins, so shapes are never sorted or deduplicated.
#[derive(Debug, Clone)]
pub struct Catalog {
    type_name: String,
    literal: Option<LeafDecoder>,
    shapes: Vec<CandidateShape>,
}

impl Catalog {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            literal: None,
            shapes: Vec::new(),
        }
    }

    /// Decode bare literals and attribute values directly into this type.
    pub fn with_literal(mut self, literal: LeafDecoder) -> Self {
        self.literal = Some(literal);
        self
    }

    pub fn shape(mut self, shape: CandidateShape) -> Self {
        self.shapes.push(shape);
        self
    }

    pub fn shapes_from(mut self, shapes: impl IntoIterator<Item = CandidateShape>) -> Self {
        self.shapes.extend(shapes);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn literal(&self) -> Option<&LeafDecoder> {
        self.literal.as_ref()
    }

    pub fn shapes(&self) -> &[CandidateShape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn for_platform(mut self, platform: Platform) -> Self {
        self.shapes = filter_for_platform(self.shapes, platform);
        self
    }
}
