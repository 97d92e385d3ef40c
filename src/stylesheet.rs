use std::collections::BTreeMap;

use serde_json::Value as Json;

use crate::ast::AstReader;
use crate::context::ResolutionContext;
use crate::decoder::Decoder;
use crate::errors::{MultipleFailures, ResolveError, WireError};
use crate::native::Modifier;
use crate::registry::Registry;
use crate::resolvable::Resolvable;

/// A modifier that failed to decode and was left out of its class.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub class: String,
    pub index: usize,
    pub failures: MultipleFailures,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "class `{}`, modifier {}: {}", self.class, self.index, self.failures)
    }
}

/// Decoded stylesheet: class name to its modifiers, in source order.
///
/// Decoding happens once in `parse`; every element using a class resolves
/// the same trees against its own attributes.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    classes: BTreeMap<String, Vec<Resolvable>>,
}

impl Stylesheet {
    /// Wire errors abort the whole document. A modifier that fails to decode
    /// only drops itself; the rest of its class survives.
    pub fn parse(bytes: &[u8], registry: &Registry) -> Result<(Self, Vec<Diagnostic>), WireError> {
        let json: Json = serde_json::from_slice(bytes)?;
        let entries = json
            .as_object()
            .ok_or_else(|| WireError::malformed("$", "expected an object mapping class names to modifiers"))?;

        let decoder = Decoder::new(registry);
        let mut classes = BTreeMap::new();
        let mut diagnostics = Vec::new();

        for (class, nodes) in entries {
            let path = format!("$.{}", class);
            let nodes = nodes
                .as_array()
                .ok_or_else(|| WireError::malformed(&path, "expected an array of modifier nodes"))?;

            let mut modifiers = Vec::with_capacity(nodes.len());
            for (index, json) in nodes.iter().enumerate() {
                let node = AstReader::read_node(json, &format!("{}[{}]", path, index))?;
                match decoder.decode_modifier(&node) {
                    Ok(modifier) => modifiers.push(modifier),
                    Err(failures) => {
                        log::warn!("Dropping modifier {} of class `{}`: {}", index, class, failures);
                        diagnostics.push(Diagnostic {
                            class: class.clone(),
                            index,
                            failures,
                        });
                    }
                }
            }
            classes.insert(class.clone(), modifiers);
        }

        log::info!(
            "Loaded stylesheet with {} classes for {} ({} diagnostics)",
            classes.len(),
            registry.platform(),
            diagnostics.len()
        );
        Ok((Self { classes }, diagnostics))
    }

    pub fn class(&self, name: &str) -> Option<&[Resolvable]> {
        self.classes.get(name).map(Vec::as_slice)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Attributes any modifier of `name` reads.
    pub fn attribute_names(&self, name: &str) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for modifier in self.class(name).unwrap_or_default() {
            for attribute in modifier.attribute_names() {
                if !names.contains(&attribute) {
                    names.push(attribute);
                }
            }
        }
        names
    }

    /// Resolve each modifier of one class independently. Unknown classes
    /// resolve to nothing.
    pub fn resolve_class(
        &self,
        name: &str,
        ctx: &ResolutionContext<'_>,
    ) -> Vec<Result<Modifier, ResolveError>> {
        self.class(name)
            .unwrap_or_default()
            .iter()
            .map(|modifier| modifier.resolve_as::<Modifier>(ctx))
            .collect()
    }

    /// Resolve a space-separated class list in order, skipping what fails.
    pub fn modifiers(&self, classes: &str, ctx: &ResolutionContext<'_>) -> Vec<Modifier> {
        let mut resolved = Vec::new();
        for class in classes.split_whitespace() {
            if !self.classes.contains_key(class) {
                log::warn!("Unknown class `{}`", class);
                continue;
            }
            for (index, result) in self.resolve_class(class, ctx).into_iter().enumerate() {
                match result {
                    Ok(modifier) => resolved.push(modifier),
                    Err(err) => log::warn!("Skipping modifier {} of class `{}`: {}", index, class, err),
                }
            }
        }
        resolved
    }
}
