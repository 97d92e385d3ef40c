use std::collections::{BTreeMap, HashMap};

use crate::ast::Literal;
use crate::catalog::{Platform, Version};

/// Read access to a live element's attributes.
///
/// Lookups must be pure reads. Two resolutions of the same tree see whatever
/// the store holds at the time of each lookup; callers that need a consistent
/// view across all leaves must pass a snapshot.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<Literal>;
}

impl AttributeSource for HashMap<String, Literal> {
    fn attribute(&self, name: &str) -> Option<Literal> {
        self.get(name).cloned()
    }
}

impl AttributeSource for BTreeMap<String, Literal> {
    fn attribute(&self, name: &str) -> Option<Literal> {
        self.get(name).cloned()
    }
}

/// A plain attribute snapshot, e.g. one element of a rendered document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    attributes: BTreeMap<String, Literal>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Literal>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Literal> {
        self.attributes.remove(name)
    }
}

impl AttributeSource for Element {
    fn attribute(&self, name: &str) -> Option<Literal> {
        self.attributes.get(name).cloned()
    }
}

/// Ambient state shared by every element: the running OS and environment values.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub platform: Platform,
    pub runtime_version: Version,
    values: BTreeMap<String, Literal>,
}

impl Environment {
    pub fn new(platform: Platform, runtime_version: Version) -> Self {
        Self {
            platform,
            runtime_version,
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn value(&self, key: &str) -> Option<&Literal> {
        self.values.get(key)
    }

    pub fn values(&self) -> &BTreeMap<String, Literal> {
        &self.values
    }

    pub fn is_dark(&self) -> bool {
        self.value("colorScheme").and_then(Literal::as_str) == Some("dark")
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Platform::Ios, Version::new(18, 0, 0))
    }
}

/// Everything a resolution may read. Borrowed for the duration of one call.
#[derive(Clone, Copy)]
pub struct ResolutionContext<'a> {
    pub element: &'a dyn AttributeSource,
    pub environment: &'a Environment,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(element: &'a dyn AttributeSource, environment: &'a Environment) -> Self {
        Self {
            element,
            environment,
        }
    }
}

impl std::fmt::Debug for ResolutionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionContext")
            .field("environment", self.environment)
            .finish_non_exhaustive()
    }
}
