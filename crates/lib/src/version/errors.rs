//! Error types for versioning and version-marker handling.
//!
//! Everything here is either a configuration error in the pattern itself or
//! a malformed-schema condition: a defaults document whose version marker is
//! missing or unparsable cannot be reconciled against and must fail fast,
//! never be silently patched.

use thiserror::Error;

/// Structured error types for version operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum VersionError {
    /// A segment was declared with `min > max`.
    #[error("invalid segment bounds: min {min} exceeds max {max}")]
    SegmentBounds { min: i64, max: i64 },

    /// A pattern was declared with no segments.
    #[error("a version pattern requires at least one segment")]
    EmptyPattern,

    /// A version string does not match the active pattern.
    #[error("version string '{text}' does not match the pattern: {reason}")]
    Malformed { text: String, reason: String },

    /// Advancing would overflow the most significant segment: the defaults
    /// claim a version the pattern cannot express.
    #[error("version overflow: no version can follow the pattern's maximum (segment max {max})")]
    Overflow { max: i64 },

    /// Two versions built from different patterns were combined.
    #[error("pattern mismatch between document and defaults versions")]
    PatternMismatch,

    /// The defaults document carries no version marker.
    #[error("defaults document is missing its version marker at route '{route}'")]
    MissingMarker { route: String },

    /// A version marker exists but is not a string value.
    #[error("version marker at route '{route}' is not a string value")]
    MarkerNotString { route: String },

    /// Writing the version marker back into the document failed.
    #[error("failed to write version marker: {reason}")]
    MarkerWrite { reason: String },
}

impl VersionError {
    /// Check if this error indicates malformed defaults data rather than a
    /// caller error.
    pub fn is_malformed_schema(&self) -> bool {
        matches!(
            self,
            VersionError::Malformed { .. }
                | VersionError::Overflow { .. }
                | VersionError::MissingMarker { .. }
                | VersionError::MarkerNotString { .. }
        )
    }
}

// Conversion from VersionError to the main Error type
impl From<VersionError> for crate::Error {
    fn from(err: VersionError) -> Self {
        crate::Error::Version(err)
    }
}
