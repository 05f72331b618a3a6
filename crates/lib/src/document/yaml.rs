//! The parsing/serialization collaborator seam.
//!
//! The core consumes already-parsed nodes and produces a tree for
//! re-emission; `serde_yaml` plays the parser/serializer collaborator.
//! Comments are attached through the block API, never parsed: comment-line
//! textual formatting is outside the core.

use serde_yaml::{Mapping, Value as YamlValue};

use super::{Document, DocumentError, DocumentSettings, Key, Node, Payload, Section, Value};
use crate::route::Route;

impl Document {
    /// Parses YAML text into a document.
    ///
    /// The document root must be a mapping (or null, for an empty
    /// document).
    pub fn from_yaml_str(text: &str, settings: DocumentSettings) -> crate::Result<Self> {
        let value: YamlValue = serde_yaml::from_str(text)?;
        Self::from_yaml_value(&value, settings)
    }

    /// Builds a document from an already-parsed YAML node tree.
    pub fn from_yaml_value(value: &YamlValue, settings: DocumentSettings) -> crate::Result<Self> {
        match value {
            YamlValue::Null => Ok(Document::with_settings(settings)),
            YamlValue::Mapping(mapping) => {
                let mut document = Document::with_settings(settings);
                for (yaml_key, yaml_value) in mapping {
                    let key = yaml_key_to_key(yaml_key)?;
                    document.set(&Route::from_key(key), yaml_to_node(yaml_value)?)?;
                }
                Ok(document)
            }
            YamlValue::Tagged(tagged) => Self::from_yaml_value(&tagged.value, settings),
            other => Err(DocumentError::UnsupportedValue {
                reason: format!("document root must be a mapping, found {}", yaml_kind(other)),
            }
            .into()),
        }
    }

    /// Converts the live tree into a YAML node tree for the serializer
    /// collaborator. Comments are not represented in the output nodes.
    pub fn to_yaml_value(&self) -> YamlValue {
        section_to_yaml(self.root())
    }

    /// Serializes the live tree to YAML text.
    pub fn to_yaml_string(&self) -> crate::Result<String> {
        Ok(serde_yaml::to_string(&self.to_yaml_value())?)
    }

    /// Converts to a JSON string representation for human-readable output.
    pub fn to_json_string(&self) -> String {
        section_to_json(self.root()).to_string()
    }
}

fn yaml_kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "bool",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "sequence",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged",
    }
}

fn yaml_key_to_key(value: &YamlValue) -> Result<Key, DocumentError> {
    match value {
        YamlValue::String(s) => Ok(Key::Str(s.clone())),
        YamlValue::Bool(b) => Ok(Key::Bool(*b)),
        YamlValue::Number(n) => n.as_i64().map(Key::Int).ok_or_else(|| {
            DocumentError::UnsupportedKey {
                reason: format!("numeric key {n} does not fit a 64-bit signed integer"),
            }
        }),
        other => Err(DocumentError::UnsupportedKey {
            reason: format!("{} keys are not supported", yaml_kind(other)),
        }),
    }
}

fn yaml_to_node(value: &YamlValue) -> Result<Node, DocumentError> {
    match value {
        YamlValue::Mapping(mapping) => {
            let entries = mapping
                .iter()
                .map(|(k, v)| Ok((yaml_key_to_key(k)?, yaml_to_node(v)?)))
                .collect::<Result<Vec<_>, DocumentError>>()?;
            Ok(Node::Mapping(entries))
        }
        YamlValue::Tagged(tagged) => yaml_to_node(&tagged.value),
        other => Ok(Node::Value(yaml_to_value(other)?)),
    }
}

fn yaml_to_value(value: &YamlValue) -> Result<Value, DocumentError> {
    match value {
        YamlValue::Null => Ok(Value::Null),
        YamlValue::Bool(b) => Ok(Value::Bool(*b)),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(DocumentError::UnsupportedValue {
                    reason: format!("number {n} is out of representable range"),
                })
            }
        }
        YamlValue::String(s) => Ok(Value::Str(s.clone())),
        YamlValue::Sequence(items) => Ok(Value::List(
            items
                .iter()
                .map(yaml_to_value)
                .collect::<Result<Vec<_>, _>>()?,
        )),
        YamlValue::Tagged(tagged) => yaml_to_value(&tagged.value),
        // A mapping nested inside a sequence has no terminal representation:
        // mappings are sections, and sections exist only at block level.
        YamlValue::Mapping(_) => Err(DocumentError::UnsupportedValue {
            reason: "mapping nested inside a sequence".to_string(),
        }),
    }
}

fn key_to_yaml(key: &Key) -> YamlValue {
    match key {
        Key::Str(s) => YamlValue::String(s.clone()),
        Key::Int(i) => YamlValue::Number((*i).into()),
        Key::Bool(b) => YamlValue::Bool(*b),
    }
}

fn value_to_yaml(value: &Value) -> YamlValue {
    match value {
        Value::Null => YamlValue::Null,
        Value::Bool(b) => YamlValue::Bool(*b),
        Value::Int(i) => YamlValue::Number((*i).into()),
        Value::Float(f) => YamlValue::Number((*f).into()),
        Value::Str(s) => YamlValue::String(s.clone()),
        Value::List(items) => YamlValue::Sequence(items.iter().map(value_to_yaml).collect()),
    }
}

fn section_to_yaml(section: &Section) -> YamlValue {
    let mut mapping = Mapping::new();
    for (key, block) in section.iter() {
        let value = match block.payload() {
            Payload::Section(nested) => section_to_yaml(nested),
            Payload::Terminal(terminal) => value_to_yaml(terminal),
        };
        mapping.insert(key_to_yaml(key), value);
    }
    YamlValue::Mapping(mapping)
}

fn section_to_json(section: &Section) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (key, block) in section.iter() {
        let value = match block.payload() {
            Payload::Section(nested) => section_to_json(nested),
            Payload::Terminal(terminal) => terminal.to_json(),
        };
        map.insert(key.to_string(), value);
    }
    serde_json::Value::Object(map)
}
