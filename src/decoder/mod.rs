//! Decodes wire nodes against a catalog's ordered candidate shapes.

mod bind;
mod param;

use crate::ast::{Argument, CallNode, Literal, Value};
use crate::catalog::{CandidateShape, Catalog};
use crate::errors::{DecodeError, Failure, MultipleFailures, ResolveError};
use crate::native::Native;
use crate::registry::Registry;
use crate::resolvable::{Args, Deferred, Resolvable};

pub struct Decoder<'r> {
    registry: &'r Registry,
}

impl<'r> Decoder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Decode `node` as a value of the registered type `type_id`.
    pub fn decode_type(&self, node: &CallNode, type_id: &str) -> Result<Resolvable, MultipleFailures> {
        match self.registry.catalog(type_id) {
            Some(catalog) => self.decode(node, catalog),
            None => Err(single_failure(
                type_id,
                DecodeError::UnknownType(type_id.to_string()),
                node,
            )),
        }
    }

    /// Decode a modifier node; its tag names the modifier catalog.
    pub fn decode_modifier(&self, node: &CallNode) -> Result<Resolvable, MultipleFailures> {
        match self.registry.modifier(&node.tag) {
            Some(catalog) => self.decode(node, catalog),
            None => Err(single_failure(
                &node.tag,
                DecodeError::UnknownModifier(node.tag.clone()),
                node,
            )),
        }
    }

    /// Try every candidate in catalog order and return the first match.
    ///
    /// Parameterless cases are only considered once every parameterized
    /// shape has failed. On total failure every attempt is reported, in order.
    pub fn decode(&self, node: &CallNode, catalog: &Catalog) -> Result<Resolvable, MultipleFailures> {
        let type_name = catalog.type_name();
        let candidates = select_candidates(node, catalog);
        let mut failures = Vec::new();

        for shape in candidates.iter().filter(|shape| !shape.is_parameterless()) {
            let label = shape.label(type_name);
            log::debug!("Trying `{}` for {}", label, node);
            match self.decode_shape(node, shape, &label) {
                Ok(value) => {
                    log::debug!("Matched `{}`", label);
                    return Ok(value);
                }
                Err(error) => {
                    log::debug!("`{}` did not match: {}", label, error);
                    failures.push(Failure { shape: label, error });
                }
            }
        }

        let cases: Vec<&CandidateShape> = candidates
            .iter()
            .copied()
            .filter(|shape| shape.is_parameterless())
            .collect();
        if !cases.is_empty() {
            match trailing_case_name(node) {
                Some(name) => match cases.iter().find(|shape| shape.case_name() == Some(name)) {
                    Some(shape) => {
                        log::debug!("Matched case `.{}` of `{}`", name, type_name);
                        return Ok(finish(shape.label(type_name), shape, Vec::new()));
                    }
                    None => failures.push(Failure {
                        shape: name.to_string(),
                        error: DecodeError::UnknownCase {
                            name: name.to_string(),
                            expected: cases
                                .iter()
                                .filter_map(|shape| shape.case_name())
                                .map(str::to_string)
                                .collect(),
                        },
                    }),
                },
                None => failures.push(Failure {
                    shape: "_".to_string(),
                    error: DecodeError::MissingCaseName,
                }),
            }
        }

        Err(MultipleFailures::new(
            type_name,
            failures,
            node.annotations.clone(),
        ))
    }

    fn decode_shape(
        &self,
        node: &CallNode,
        shape: &CandidateShape,
        label: &str,
    ) -> Result<Resolvable, DecodeError> {
        let bindings = bind::bind_arguments(&shape.params, &node.arguments)?;
        let children = shape
            .params
            .iter()
            .zip(bindings)
            .map(|(param, binding)| self.decode_param(param, binding))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(finish(label.to_string(), shape, children))
    }
}

fn single_failure(type_name: &str, error: DecodeError, node: &CallNode) -> MultipleFailures {
    MultipleFailures::new(
        type_name,
        vec![Failure {
            shape: type_name.to_string(),
            error,
        }],
        node.annotations.clone(),
    )
}

/// A selector naming a keyed shape narrows the list; the type's own name
/// and unknown selectors leave it whole.
fn select_candidates<'c>(node: &CallNode, catalog: &'c Catalog) -> Vec<&'c CandidateShape> {
    let all = catalog.shapes();
    if let Some(selector) = node.selector.as_deref() {
        if selector != catalog.type_name() {
            let keyed: Vec<&CandidateShape> =
                all.iter().filter(|shape| shape.is_keyed_by(selector)).collect();
            if !keyed.is_empty() {
                return keyed;
            }
        }
    }
    all.iter().collect()
}

fn trailing_case_name(node: &CallNode) -> Option<&str> {
    match node.arguments.as_slice() {
        [] => node.selector.as_deref(),
        [Argument {
            label: None,
            value: Value::Literal(Literal::String(name)),
        }] => Some(name),
        _ => None,
    }
}

/// Fold to a constant when nothing is left to resolve. Gated and contextual
/// shapes always stay deferred; so does a shape whose builder rejects its
/// constant children, so the error surfaces at resolution.
fn finish(label: String, shape: &CandidateShape, children: Vec<Resolvable>) -> Resolvable {
    let gate = shape.availability.runtime_gate();
    if gate.is_none() && !shape.contextual {
        let constants: Option<Vec<Result<Native, ResolveError>>> = children
            .iter()
            .map(|child| child.as_constant().cloned().map(Ok))
            .collect();
        if let Some(constants) = constants {
            if let Ok(value) = (shape.builder)(&Args::new(&label, &constants, None)) {
                return Resolvable::Constant(value);
            }
        }
    }
    Resolvable::Deferred(Deferred::new(label, shape.builder, children).with_gate(gate, shape.fallback))
}
