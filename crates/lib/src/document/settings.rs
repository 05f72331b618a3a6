//! Per-document configuration.

use serde::{Deserialize, Serialize};

use super::KeyMode;

/// Settings fixed per document at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentSettings {
    route_separator: char,
    key_mode: KeyMode,
    use_defaults: bool,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            route_separator: '.',
            key_mode: KeyMode::String,
            use_defaults: true,
        }
    }
}

impl DocumentSettings {
    /// Default settings: `.` separator, string keys, defaults overlay on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to change the route separator character.
    pub fn with_route_separator(mut self, separator: char) -> Self {
        self.route_separator = separator;
        self
    }

    /// Builder method to change the key mode.
    pub fn with_key_mode(mut self, key_mode: KeyMode) -> Self {
        self.key_mode = key_mode;
        self
    }

    /// Builder method to enable or disable the defaults overlay on reads.
    pub fn with_use_defaults(mut self, use_defaults: bool) -> Self {
        self.use_defaults = use_defaults;
        self
    }

    /// The single-character separator used by string-form routes.
    pub fn route_separator(&self) -> char {
        self.route_separator
    }

    /// How keys are stored.
    pub fn key_mode(&self) -> KeyMode {
        self.key_mode
    }

    /// Whether reads fall back to the defaults document.
    pub fn use_defaults(&self) -> bool {
        self.use_defaults
    }
}
