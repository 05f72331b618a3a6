//!
//! Canopy: layered, route-addressed configuration documents.
//! This library provides a structured document model for hierarchical,
//! key-ordered configuration data, with transparent defaults and schema
//! migration.
//!
//! ## Core Concepts
//!
//! * **Routes (`route::Route`)**: Ordered key sequences addressing nested content, parseable from separator-joined strings.
//! * **Blocks (`document::Block`)**: The value+comments unit stored at one key, either a terminal value or a nested section.
//! * **Sections (`document::Section`)**: Ordered key-to-block mappings forming the document tree, each carrying its absolute route.
//! * **Documents (`document::Document`)**: The entry point pairing a live tree with settings and an optional defaults document; reads fall back to defaults transparently.
//! * **Versioning (`version::Versioning`)**: Pluggable strategies (manual, automatic) that supply document versions built from a segment `Pattern`.
//! * **Reconciliation (`reconcile`)**: The migration pass that relocates, merges, and re-stamps a live document to match a newer defaults schema, preserving user values and comments.
//!
//! The YAML engine is a collaborator, not part of the core: `serde_yaml`
//! node trees go in and come out at the `document::yaml` seam.
//!
//! ## Quick Start
//!
//! ```
//! use canopy::{Document, DocumentSettings, route};
//!
//! let defaults = Document::from_yaml_str(
//!     "server:\n  host: localhost\n  port: 8080\n",
//!     DocumentSettings::default(),
//! )?;
//!
//! let mut live = Document::from_yaml_str("server:\n  port: 9090\n", DocumentSettings::default())?;
//! live.set_defaults(defaults)?;
//!
//! assert_eq!(live.get_as::<i64>(&route!["server", "port"]), Some(9090));
//! assert_eq!(live.get_as::<&str>(&route!["server", "host"]), Some("localhost"));
//! # Ok::<(), canopy::Error>(())
//! ```

pub mod document;
pub mod reconcile;
pub mod route;
pub mod version;

/// Re-export the main entry-point types for easier access.
pub use document::{
    Block, Comments, Document, DocumentSettings, Key, KeyMode, Node, Section, Value,
};
pub use route::Route;

/// Result type used throughout the Canopy library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Canopy library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured document-tree errors from the document module
    #[error(transparent)]
    Document(document::DocumentError),

    /// Structured versioning errors from the version module
    #[error(transparent)]
    Version(version::VersionError),

    /// Errors from the YAML collaborator
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Document(_) => "document",
            Error::Version(_) => "version",
            Error::Yaml(_) => "yaml",
        }
    }

    /// Check if this error is a caller error (invalid argument).
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::Document(document_err) => document_err.is_invalid_argument(),
            _ => false,
        }
    }

    /// Check if this error indicates malformed defaults data.
    pub fn is_malformed_schema(&self) -> bool {
        match self {
            Error::Version(version_err) => version_err.is_malformed_schema(),
            _ => false,
        }
    }
}
