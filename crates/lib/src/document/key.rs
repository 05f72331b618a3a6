//! Key types for document sections.
//!
//! Sections map [`Key`]s to blocks. A document is either string-keyed
//! (every key coerced to its text form) or object-keyed (typed keys
//! preserved); the mode is fixed per document at construction and applied
//! by [`KeyMode::adapt`] before every map lookup and insert.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single component of a route and a single child name in a section.
///
/// Keys are heterogeneous: configuration formats commonly key sections by
/// strings, but integer and boolean keys appear in object-keyed documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Text key.
    Str(String),
    /// Integer key.
    Int(i64),
    /// Boolean key.
    Bool(bool),
}

impl Key {
    /// Returns the key's type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Key::Str(_) => "string",
            Key::Int(_) => "int",
            Key::Bool(_) => "bool",
        }
    }

    /// Returns the string form if this is a text key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => write!(f, "{s}"),
            Key::Int(i) => write!(f, "{i}"),
            Key::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(value.into())
    }
}

impl From<bool> for Key {
    fn from(value: bool) -> Self {
        Key::Bool(value)
    }
}

/// How a document stores its keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyMode {
    /// All keys are coerced to their text form before use.
    #[default]
    String,
    /// Typed keys are preserved as given.
    Object,
}

impl KeyMode {
    /// Adapts a key to this mode.
    ///
    /// Adaptation is idempotent: adapting an already-adapted key returns it
    /// unchanged.
    pub fn adapt(&self, key: Key) -> Key {
        match self {
            KeyMode::String => match key {
                Key::Str(_) => key,
                other => Key::Str(other.to_string()),
            },
            KeyMode::Object => key,
        }
    }
}
