use serde::{Deserialize, Serialize};

pub mod reader;

pub use reader::AstReader;

/// Tag of a member-access call (`Type.member(...)` / `.member(...)`).
pub const MEMBER_ACCESS: &str = ".";

/// Tag of an `attr("name")` reference.
pub const ATTRIBUTE_REFERENCE: &str = "__attr__";

/// Diagnostic metadata attached to a node by the stylesheet compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub file: Option<String>,
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub module: Option<String>,
    pub source: Option<String>,
}

impl Annotations {
    pub fn is_empty(&self) -> bool {
        *self == Annotations::default()
    }
}

/// A primitive that decodes without any catalog lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Literal {
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::None => "nil",
            Literal::Bool(_) => "bool",
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::String(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::None => write!(f, "nil"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Float(x) => write!(f, "{}", x),
            Literal::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

/// The value carried by an argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Literal(Literal),
    Node(CallNode),
    /// `attr("name")`, bound to a live element attribute at resolution time.
    Attribute {
        name: String,
        annotations: Annotations,
    },
    List(Vec<Value>),
}

impl Value {
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Value::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Literal(literal) => literal.kind(),
            Value::Node(_) => "call",
            Value::Attribute { .. } => "attribute reference",
            Value::List(_) => "list",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Literal(literal) => write!(f, "{}", literal),
            Value::Node(node) => write!(f, "{}", node),
            Value::Attribute { name, .. } => write!(f, "attr(\"{}\")", name),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub label: Option<String>,
    pub value: Value,
}

impl Argument {
    pub fn positional(value: Value) -> Self {
        Self { label: None, value }
    }

    pub fn labeled(label: impl Into<String>, value: Value) -> Self {
        Self {
            label: Some(label.into()),
            value,
        }
    }

    pub fn is_labeled(&self) -> bool {
        self.label.is_some()
    }
}

impl std::fmt::Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}: {}", label, self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

/// One serialized call expression: `[tag, annotations, [selector, arguments...]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallNode {
    pub tag: String,
    pub annotations: Annotations,
    /// `None` means "the target's own type".
    pub selector: Option<String>,
    pub arguments: Vec<Argument>,
}

impl CallNode {
    pub fn member(selector: Option<&str>, arguments: Vec<Argument>) -> Self {
        Self {
            tag: MEMBER_ACCESS.to_string(),
            annotations: Annotations::default(),
            selector: selector.map(str::to_string),
            arguments,
        }
    }

    pub fn is_member_access(&self) -> bool {
        self.tag == MEMBER_ACCESS
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }
}

impl std::fmt::Display for CallNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_member_access() {
            write!(f, ".{}", self.selector.as_deref().unwrap_or(""))?;
        } else {
            write!(f, "{}", self.tag)?;
        }
        write!(f, "(")?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
