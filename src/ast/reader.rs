use serde_json::Value as Json;

use super::{Annotations, Argument, CallNode, Literal, Value, ATTRIBUTE_REFERENCE, MEMBER_ACCESS};
use crate::errors::WireError;

type Result<T> = std::result::Result<T, WireError>;

/// Decodes stylesheet JSON into `CallNode` trees. Knows nothing about target types.
pub struct AstReader;

impl AstReader {
    /// Read one node from raw bytes.
    pub fn read(bytes: &[u8]) -> Result<CallNode> {
        let json: Json = serde_json::from_slice(bytes)?;
        Self::read_node(&json, "$")
    }

    pub fn read_str(source: &str) -> Result<CallNode> {
        Self::read(source.as_bytes())
    }

    /// Read a node from an already-parsed JSON value. `path` is only used for diagnostics.
    pub fn read_node(json: &Json, path: &str) -> Result<CallNode> {
        let elements = json
            .as_array()
            .ok_or_else(|| WireError::malformed(path, "expected a `[tag, annotations, arguments]` node"))?;
        if elements.len() != 3 {
            return Err(WireError::malformed(
                path,
                format!("expected 3 node elements, found {}", elements.len()),
            ));
        }

        let tag = Self::read_tag(&elements[0], &format!("{}[0]", path))?;
        let annotations = Self::read_annotations(&elements[1], &format!("{}[1]", path))?;
        if tag == ATTRIBUTE_REFERENCE {
            return Err(WireError::malformed(
                path,
                "attribute references are only valid in argument position",
            ));
        }

        let args_path = format!("{}[2]", path);
        let raw_args = elements[2]
            .as_array()
            .ok_or_else(|| WireError::malformed(&args_path, "missing nested argument container"))?;

        let (selector, rest) = match raw_args.split_first() {
            Some((Json::Null, rest)) => (None, rest),
            Some((Json::String(s), rest)) => (Some(s.clone()), rest),
            _ => (None, raw_args.as_slice()),
        };
        let offset = raw_args.len() - rest.len();

        let mut arguments = Vec::with_capacity(rest.len());
        for (i, raw) in rest.iter().enumerate() {
            let arg_path = format!("{}[{}]", args_path, i + offset);
            arguments.push(Self::read_argument(raw, &arg_path)?);
        }

        Ok(CallNode {
            tag,
            annotations,
            selector,
            arguments,
        })
    }

    fn read_tag(json: &Json, path: &str) -> Result<String> {
        match json {
            Json::Null => Ok(MEMBER_ACCESS.to_string()),
            Json::String(tag) => Ok(tag.clone()),
            other => Err(WireError::malformed(
                path,
                format!("node tag must be a string or null, found {}", json_kind(other)),
            )),
        }
    }

    fn read_annotations(json: &Json, path: &str) -> Result<Annotations> {
        match json {
            Json::Null => Ok(Annotations::default()),
            Json::Object(_) => serde_json::from_value(json.clone())
                .map_err(|e| WireError::malformed(path, format!("invalid annotations: {}", e))),
            other => Err(WireError::malformed(
                path,
                format!("annotations must be an object or null, found {}", json_kind(other)),
            )),
        }
    }

    /// `{"label": ..., "value": ...}` pairs, or a bare positional value.
    fn read_argument(json: &Json, path: &str) -> Result<Argument> {
        let Json::Object(fields) = json else {
            return Ok(Argument::positional(Self::read_value(json, path)?));
        };

        if let Some(unexpected) = fields.keys().find(|k| *k != "label" && *k != "value") {
            return Err(WireError::malformed(
                path,
                format!("unexpected key `{}` in argument", unexpected),
            ));
        }
        let raw_value = fields
            .get("value")
            .ok_or_else(|| WireError::malformed(path, "argument is missing `value`"))?;
        let label = match fields.get("label") {
            None | Some(Json::Null) => None,
            Some(Json::String(label)) => Some(label.clone()),
            Some(other) => {
                return Err(WireError::malformed(
                    path,
                    format!("argument label must be a string, found {}", json_kind(other)),
                ))
            }
        };
        let value = Self::read_value(raw_value, &format!("{}.value", path))?;

        Ok(Argument { label, value })
    }

    pub fn read_value(json: &Json, path: &str) -> Result<Value> {
        match json {
            Json::Null => Ok(Value::Literal(Literal::None)),
            Json::Bool(b) => Ok(Value::Literal(Literal::Bool(*b))),
            Json::Number(n) => Ok(Value::Literal(match n.as_i64() {
                Some(i) => Literal::Int(i),
                None => Literal::Float(n.as_f64().unwrap_or(f64::NAN)),
            })),
            Json::String(s) => Ok(Value::Literal(Literal::String(s.clone()))),
            Json::Array(items) => {
                if let Some((name, annotations)) = Self::attribute_reference(items, path)? {
                    return Ok(Value::Attribute { name, annotations });
                }
                if is_node_shaped(items) {
                    return Ok(Value::Node(Self::read_node(json, path)?));
                }
                let mut values = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    values.push(Self::read_value(item, &format!("{}[{}]", path, i))?);
                }
                Ok(Value::List(values))
            }
            Json::Object(_) => Err(WireError::malformed(
                path,
                "objects are only valid as `{label, value}` arguments",
            )),
        }
    }

    fn attribute_reference(items: &[Json], path: &str) -> Result<Option<(String, Annotations)>> {
        match items {
            [Json::String(tag), annotations, name] if tag == ATTRIBUTE_REFERENCE => {
                let annotations = Self::read_annotations(annotations, &format!("{}[1]", path))?;
                let name = name.as_str().ok_or_else(|| {
                    WireError::malformed(
                        &format!("{}[2]", path),
                        "attribute reference needs a string attribute name",
                    )
                })?;
                Ok(Some((name.to_string(), annotations)))
            }
            _ => Ok(None),
        }
    }
}

fn is_node_shaped(items: &[Json]) -> bool {
    matches!(
        items,
        [Json::String(_) | Json::Null, Json::Object(_) | Json::Null, Json::Array(_)]
    )
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
