use std::path::Path;
use thiserror::Error;

use crate::ast::Annotations;
use crate::catalog::{Platform, Version};

/// Structural violations of the wire format. Never retried.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("invalid stylesheet JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed node at {path}: {message}")]
    MalformedNode { path: String, message: String },
}

impl WireError {
    pub(crate) fn malformed(path: &str, message: impl Into<String>) -> Self {
        WireError::MalformedNode {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// Why a single candidate shape did not match.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("missing required argument `{0}`")]
    MissingArgument(String),

    #[error("unknown labeled argument `{0}`")]
    UnknownArgument(String),

    #[error("got multiple values for argument `{0}`")]
    DuplicateArgument(String),

    #[error("expected at most {expected} positional arguments, got {found}")]
    TooManyArguments { expected: usize, found: usize },

    #[error("incorrect value passed to argument `{label}`: expected `{expected}` but got `{found}`")]
    IncorrectValue {
        label: String,
        expected: String,
        found: String,
    },

    #[error("`{type_name}` cannot be bound to attribute `{attribute}`")]
    NotAttributeDecodable { type_name: String, attribute: String },

    #[error("no case named `{name}`, expected one of {}", quoted_list(.expected))]
    UnknownCase { name: String, expected: Vec<String> },

    #[error("expected a case name")]
    MissingCaseName,

    #[error("unknown type `{0}`")]
    UnknownType(String),

    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),

    #[error("default for argument `{label}` is not a constant `{expected}`")]
    InvalidDefault { label: String, expected: String },

    #[error("argument `{label}`:\n{failures}")]
    Nested {
        label: String,
        failures: Box<MultipleFailures>,
    },
}

fn quoted_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("`{}`", item))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One attempted candidate and the reason it failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub shape: String,
    pub error: DecodeError,
}

/// Terminal decode failure for one node: every attempted candidate, in attempt order.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct MultipleFailures {
    pub type_name: String,
    pub entries: Vec<Failure>,
    pub annotations: Annotations,
}

impl MultipleFailures {
    pub fn new(type_name: impl Into<String>, entries: Vec<Failure>, annotations: Annotations) -> Self {
        Self {
            type_name: type_name.into(),
            entries,
            annotations,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn shapes(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.shape.as_str()).collect()
    }

    /// Render the failure pointing back at the stylesheet source.
    pub fn report(&self) -> String {
        let line = self.annotations.line.unwrap_or(0);
        let line_num = line.to_string();
        let pad = line_num.len();
        let gutter = format!(" {:>pad$} |", "", pad = pad);

        let mut out = String::new();
        out.push_str(&gutter);
        out.push('\n');
        out.push_str(&format!(
            " {} | {}\n",
            line_num,
            self.annotations.source.as_deref().unwrap_or("").trim()
        ));
        let message = self.to_string();
        let mut lines = message.lines();
        if let Some(first) = lines.next() {
            out.push_str(&format!("{} ^ {}\n", gutter, first));
        }
        for rest in lines {
            out.push_str(&format!("{}   {}\n", gutter, rest));
        }
        out.push_str(&format!(
            "\nin {} ({}:{})",
            self.annotations.module.as_deref().unwrap_or(""),
            self.annotations.file.as_deref().unwrap_or(""),
            line
        ));
        out
    }
}

impl std::fmt::Display for MultipleFailures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no matching shape for `{}`", self.type_name)?;
        for entry in &self.entries {
            write!(f, "\n  `{}` failed:", entry.shape)?;
            for line in entry.error.to_string().lines() {
                write!(f, "\n    {}", line)?;
            }
        }
        Ok(())
    }
}

/// Resolution-time failures. Local to the value (or subtree) that failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("attribute `{name}` is missing or invalid: {reason}")]
    MissingOrInvalidAttribute { name: String, reason: String },

    #[error("`{shape}` requires {platform} {required}, running {actual}")]
    UnsupportedOnRuntime {
        shape: String,
        platform: Platform,
        required: Version,
        actual: Version,
    },

    #[error("argument {index} of `{shape}` expected `{expected}` but resolved to `{found}`")]
    ArgumentType {
        shape: String,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{shape}` has no argument {index}")]
    MissingArgument { shape: String, index: usize },

    #[error("`{shape}`: {reason}")]
    InvalidValue { shape: String, reason: String },

    #[error("expected `{expected}` but resolved to `{found}`")]
    UnexpectedValue {
        expected: &'static str,
        found: &'static str,
    },
}

pub fn print_error(file: &Path, err: &anyhow::Error) {
    if let Some(failures) = err.chain().find_map(|e| e.downcast_ref::<MultipleFailures>()) {
        eprintln!("error: cannot decode `{}`", failures.type_name);
        eprintln!("{}", failures.report());
    } else {
        let message = err
            .chain()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(": ");
        eprintln!("error: {}", message);
        eprintln!("  --> {}", file.display());
    }
}
