//! Error types for document tree operations.
//!
//! Route resolution misses are not errors: absence is a routine outcome,
//! represented as `None` and consumed pervasively by the defaults overlay.
//! The variants here cover caller errors (invalid arguments) and failed
//! value coercions.

use thiserror::Error;

use super::{CommentKind, CommentPosition, KeyMode};

/// Structured error types for document operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DocumentError {
    /// An empty route was given where a concrete slot is required.
    #[error("cannot address content with an empty route")]
    EmptyRoute,

    /// The document root was named as the source of a relocation.
    #[error("the document root cannot be relocated as a value")]
    RootRelocation,

    /// A live document and its defaults document disagree on key mode.
    #[error("key mode mismatch: live document uses {live:?}, defaults document uses {defaults:?}")]
    KeyModeMismatch { live: KeyMode, defaults: KeyMode },

    /// A value could not be coerced to the requested type.
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A comment line's kind is not allowed at the targeted position.
    #[error("comment kind {kind:?} is not allowed at position {position:?}")]
    InvalidCommentKind {
        position: CommentPosition,
        kind: CommentKind,
    },

    /// An operation that requires a defaults document ran without one.
    #[error("no defaults document is attached")]
    MissingDefaults,

    /// Input from the parsing collaborator used a key the document model
    /// cannot represent.
    #[error("unsupported key: {reason}")]
    UnsupportedKey { reason: String },

    /// Input from the parsing collaborator used a value shape the document
    /// model cannot represent.
    #[error("unsupported value: {reason}")]
    UnsupportedValue { reason: String },
}

impl DocumentError {
    /// Check if this error is a caller error (invalid argument).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            DocumentError::EmptyRoute
                | DocumentError::RootRelocation
                | DocumentError::KeyModeMismatch { .. }
                | DocumentError::InvalidCommentKind { .. }
                | DocumentError::MissingDefaults
        )
    }

    /// Check if this error is a failed value coercion.
    pub fn is_type_error(&self) -> bool {
        matches!(self, DocumentError::TypeMismatch { .. })
    }
}

// Conversion from DocumentError to the main Error type
impl From<DocumentError> for crate::Error {
    fn from(err: DocumentError) -> Self {
        crate::Error::Document(err)
    }
}
