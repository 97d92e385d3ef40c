use super::bind::Binding;
use super::Decoder;
use crate::ast::{Literal, Value};
use crate::catalog::{DecodeRule, LeafDecoder, Param};
use crate::errors::{DecodeError, ResolveError};
use crate::native::Native;
use crate::resolvable::{Args, AttributeBinding, Deferred, Resolvable};

fn incorrect(label: &str, rule: &DecodeRule, value: &Value) -> DecodeError {
    DecodeError::IncorrectValue {
        label: label.to_string(),
        expected: rule.to_string(),
        found: value.to_string(),
    }
}

fn build_list(args: &Args<'_>) -> Result<Native, ResolveError> {
    args.all().map(Native::List)
}

impl Decoder<'_> {
    pub(super) fn decode_param(
        &self,
        param: &Param,
        binding: Binding<'_>,
    ) -> Result<Resolvable, DecodeError> {
        let label = param.display_label();
        match binding {
            Binding::Given(value) => {
                self.decode_value(&param.rule, value, label, param.default.as_ref())
            }
            Binding::Default(literal) => self
                .decode_default(&param.rule, label, literal)
                .map(Resolvable::Constant),
        }
    }

    /// Defaults are decoded through the parameter's own rule and must come out constant.
    fn decode_default(
        &self,
        rule: &DecodeRule,
        label: &str,
        literal: &Literal,
    ) -> Result<Native, DecodeError> {
        let invalid = || DecodeError::InvalidDefault {
            label: label.to_string(),
            expected: rule.to_string(),
        };
        match self.decode_value(rule, &Value::Literal(literal.clone()), label, None) {
            Ok(Resolvable::Constant(value)) => Ok(value),
            _ => Err(invalid()),
        }
    }

    fn decode_value(
        &self,
        rule: &DecodeRule,
        value: &Value,
        label: &str,
        default: Option<&Literal>,
    ) -> Result<Resolvable, DecodeError> {
        match (rule, value) {
            (DecodeRule::Optional(_), Value::Literal(Literal::None)) => {
                Ok(Resolvable::Constant(Native::None))
            }
            (_, Value::Attribute { name, .. }) => self.bind_attribute(rule, name, label, default),
            (DecodeRule::Optional(inner), _) => self.decode_value(inner, value, label, default),

            (DecodeRule::Leaf(leaf), Value::Literal(literal)) => leaf
                .decode_literal(literal)
                .map(Resolvable::Constant)
                .map_err(|_| incorrect(label, rule, value)),

            (DecodeRule::Type(type_id), Value::Node(node)) => {
                let catalog = self
                    .registry
                    .catalog(type_id)
                    .ok_or_else(|| DecodeError::UnknownType(type_id.clone()))?;
                self.decode(node, catalog)
                    .map_err(|failures| DecodeError::Nested {
                        label: label.to_string(),
                        failures: Box::new(failures),
                    })
            }
            (DecodeRule::Type(type_id), Value::Literal(literal)) => {
                let catalog = self
                    .registry
                    .catalog(type_id)
                    .ok_or_else(|| DecodeError::UnknownType(type_id.clone()))?;
                catalog
                    .literal()
                    .ok_or_else(|| incorrect(label, rule, value))?
                    .decode_literal(literal)
                    .map(Resolvable::Constant)
                    .map_err(|_| incorrect(label, rule, value))
            }

            (DecodeRule::List(inner), Value::List(items)) => {
                let children = items
                    .iter()
                    .map(|item| self.decode_value(inner, item, label, None))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(finish_list(rule, children))
            }

            _ => Err(incorrect(label, rule, value)),
        }
    }

    fn bind_attribute(
        &self,
        rule: &DecodeRule,
        attribute: &str,
        label: &str,
        default: Option<&Literal>,
    ) -> Result<Resolvable, DecodeError> {
        let not_decodable = || DecodeError::NotAttributeDecodable {
            type_name: rule.to_string(),
            attribute: attribute.to_string(),
        };
        let mut target = rule;
        while let DecodeRule::Optional(inner) = target {
            target = inner;
        }
        let decoder: LeafDecoder = match target {
            DecodeRule::Leaf(leaf) => *leaf,
            DecodeRule::Type(type_id) => *self
                .registry
                .catalog(type_id)
                .and_then(|catalog| catalog.literal())
                .ok_or_else(not_decodable)?,
            DecodeRule::List(_) | DecodeRule::Optional(_) => return Err(not_decodable()),
        };
        // The default is decoded through the full rule so an optional's `nil` stays valid.
        let default = default
            .map(|literal| self.decode_default(rule, label, literal))
            .transpose()?;
        Ok(Resolvable::AttributeBound(AttributeBinding::new(
            attribute, decoder, default,
        )))
    }
}

fn finish_list(rule: &DecodeRule, children: Vec<Resolvable>) -> Resolvable {
    let constants: Option<Vec<Native>> = children
        .iter()
        .map(|child| child.as_constant().cloned())
        .collect();
    match constants {
        Some(values) => Resolvable::Constant(Native::List(values)),
        None => Resolvable::Deferred(Deferred::new(rule.to_string(), build_list, children)),
    }
}
