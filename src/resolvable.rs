use crate::catalog::{Builder, LeafDecoder, RuntimeGate};
use crate::context::{Environment, ResolutionContext};
use crate::errors::ResolveError;
use crate::native::{FromNative, Native};

/// A decoded value that may still depend on the element it is applied to.
///
/// Built once by the decoder and never mutated; `resolve` may be called any
/// number of times, with any context, from any thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolvable {
    Constant(Native),
    AttributeBound(AttributeBinding),
    Deferred(Deferred),
}

impl Resolvable {
    pub fn constant(value: impl Into<Native>) -> Self {
        Resolvable::Constant(value.into())
    }

    pub fn as_constant(&self) -> Option<&Native> {
        match self {
            Resolvable::Constant(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Resolvable::Constant(_))
    }

    pub fn resolve(&self, ctx: &ResolutionContext<'_>) -> Result<Native, ResolveError> {
        match self {
            Resolvable::Constant(value) => Ok(value.clone()),
            Resolvable::AttributeBound(binding) => binding.resolve(ctx),
            Resolvable::Deferred(deferred) => deferred.resolve(ctx),
        }
    }

    pub fn resolve_as<T: FromNative>(&self, ctx: &ResolutionContext<'_>) -> Result<T, ResolveError> {
        let native = self.resolve(ctx)?;
        T::from_native(&native).ok_or(ResolveError::UnexpectedValue {
            expected: T::KIND,
            found: native.kind(),
        })
    }

    /// Attributes this tree reads, in first-use order. A change to any other
    /// attribute cannot change the resolved value.
    pub fn attribute_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_attribute_names(&mut names);
        names
    }

    fn collect_attribute_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Resolvable::Constant(_) => {}
            Resolvable::AttributeBound(binding) => {
                if !names.contains(&binding.name.as_str()) {
                    names.push(&binding.name);
                }
            }
            Resolvable::Deferred(deferred) => {
                for child in &deferred.children {
                    child.collect_attribute_names(names);
                }
            }
        }
    }
}

/// `attr("name")`: decoded from the element when resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBinding {
    pub name: String,
    pub decoder: LeafDecoder,
    pub default: Option<Native>,
}

impl AttributeBinding {
    pub fn new(name: impl Into<String>, decoder: LeafDecoder, default: Option<Native>) -> Self {
        Self {
            name: name.into(),
            decoder,
            default,
        }
    }

    pub fn resolve(&self, ctx: &ResolutionContext<'_>) -> Result<Native, ResolveError> {
        let reason = match ctx.element.attribute(&self.name) {
            Some(literal) => match self.decoder.decode_attribute(&literal) {
                Ok(value) => return Ok(value),
                Err(reason) => reason,
            },
            None => "attribute is not set".to_string(),
        };

        match &self.default {
            Some(default) => {
                log::debug!("Attribute `{}` fell back to default: {}", self.name, reason);
                Ok(default.clone())
            }
            None => Err(ResolveError::MissingOrInvalidAttribute {
                name: self.name.clone(),
                reason,
            }),
        }
    }
}

/// A matched shape: its builder plus the decoded children it is applied to.
#[derive(Clone)]
pub struct Deferred {
    pub shape: String,
    builder: Builder,
    fallback: Option<Builder>,
    gate: Option<RuntimeGate>,
    pub children: Vec<Resolvable>,
}

impl Deferred {
    pub fn new(shape: impl Into<String>, builder: Builder, children: Vec<Resolvable>) -> Self {
        Self {
            shape: shape.into(),
            builder,
            fallback: None,
            gate: None,
            children,
        }
    }

    pub fn with_gate(mut self, gate: Option<RuntimeGate>, fallback: Option<Builder>) -> Self {
        self.gate = gate;
        self.fallback = fallback;
        self
    }

    pub fn gate(&self) -> Option<&RuntimeGate> {
        self.gate.as_ref()
    }

    fn select_builder(&self, environment: &Environment) -> Result<Builder, ResolveError> {
        let Some(gate) = &self.gate else {
            return Ok(self.builder);
        };
        match gate.check(environment) {
            Ok(()) => Ok(self.builder),
            Err(required) => match self.fallback {
                Some(fallback) => {
                    log::debug!(
                        "`{}` needs {} {}, using fallback on {}",
                        self.shape,
                        environment.platform,
                        required,
                        environment.runtime_version
                    );
                    Ok(fallback)
                }
                None => Err(ResolveError::UnsupportedOnRuntime {
                    shape: self.shape.clone(),
                    platform: environment.platform,
                    required,
                    actual: environment.runtime_version,
                }),
            },
        }
    }

    pub fn resolve(&self, ctx: &ResolutionContext<'_>) -> Result<Native, ResolveError> {
        let builder = self.select_builder(ctx.environment)?;
        let children: Vec<Result<Native, ResolveError>> =
            self.children.iter().map(|child| child.resolve(ctx)).collect();
        builder(&Args::new(&self.shape, &children, Some(ctx.environment)))
    }
}

impl PartialEq for Deferred {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && self.gate == other.gate
            && self.fallback.is_some() == other.fallback.is_some()
            && self.children == other.children
    }
}

impl std::fmt::Debug for Deferred {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred")
            .field("shape", &self.shape)
            .field("gate", &self.gate)
            .field("fallback", &self.fallback.is_some())
            .field("children", &self.children)
            .finish()
    }
}

/// Resolved children as seen by a builder.
///
/// A child that failed to resolve only fails the builder if the builder asks
/// for it with `value`; `optional` treats the failure as an absent argument.
pub struct Args<'a> {
    shape: &'a str,
    children: &'a [Result<Native, ResolveError>],
    environment: Option<&'a Environment>,
}

impl<'a> Args<'a> {
    pub fn new(
        shape: &'a str,
        children: &'a [Result<Native, ResolveError>],
        environment: Option<&'a Environment>,
    ) -> Self {
        Self {
            shape,
            children,
            environment,
        }
    }

    pub fn shape(&self) -> &str {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// `None` while folding constants at decode time.
    pub fn environment(&self) -> Option<&Environment> {
        self.environment
    }

    pub fn get(&self, index: usize) -> Result<&Native, ResolveError> {
        match self.children.get(index) {
            Some(Ok(value)) => Ok(value),
            Some(Err(err)) => Err(err.clone()),
            None => Err(ResolveError::MissingArgument {
                shape: self.shape.to_string(),
                index,
            }),
        }
    }

    pub fn value<T: FromNative>(&self, index: usize) -> Result<T, ResolveError> {
        let native = self.get(index)?;
        T::from_native(native).ok_or_else(|| ResolveError::ArgumentType {
            shape: self.shape.to_string(),
            index,
            expected: T::KIND,
            found: native.kind(),
        })
    }

    pub fn optional<T: FromNative>(&self, index: usize) -> Option<T> {
        match self.children.get(index) {
            None | Some(Ok(Native::None)) => None,
            Some(Ok(native)) => {
                let value = T::from_native(native);
                if value.is_none() {
                    log::warn!(
                        "Ignoring argument {} of `{}`: expected `{}`, got `{}`",
                        index,
                        self.shape,
                        T::KIND,
                        native.kind()
                    );
                }
                value
            }
            Some(Err(err)) => {
                log::warn!("Ignoring argument {} of `{}`: {}", index, self.shape, err);
                None
            }
        }
    }

    /// Every child, failing on the first one that did not resolve.
    pub fn all(&self) -> Result<Vec<Native>, ResolveError> {
        (0..self.children.len())
            .map(|i| self.get(i).cloned())
            .collect()
    }
}
