//! Versioning strategies: where document versions come from.
//!
//! The reconciliation engine is strategy-agnostic; it sees only the
//! [`Versioning`] trait. Two strategies exist:
//!
//! - [`Manual`]: both versions are supplied and parsed once, up front.
//!   Document content is ignored; use this when the document's own content
//!   does not reliably carry a version marker.
//! - [`Automatic`]: both versions are read from a configured route in the
//!   respective documents at the moment they are requested, through one
//!   shared [`Pattern`]; it can also stamp the live document with a version
//!   after a successful reconciliation.

use std::fmt;

use super::{Pattern, Version, VersionError};
use crate::{
    document::{Document, Value},
    route::Route,
};

/// Supplies the live and defaults document versions to the reconciliation
/// engine.
pub trait Versioning: fmt::Debug {
    /// The live document's version, or `None` when the document predates
    /// versioning ("before first version").
    fn document_version(&self, document: &Document) -> Result<Option<Version>, VersionError>;

    /// The defaults document's version. A defaults document without an
    /// obtainable version is malformed.
    fn defaults_version(&self, defaults: &Document) -> Result<Version, VersionError>;

    /// The first version the pattern can express.
    fn first_version(&self) -> Version;

    /// Stamps `version` into the live document.
    ///
    /// Runs strictly after a successful reconciliation pass, never before:
    /// a partially-migrated document must not report itself current. The
    /// default implementation is a no-op for strategies with no marker to
    /// write.
    fn write_version(
        &self,
        document: &mut Document,
        version: &Version,
    ) -> Result<(), VersionError> {
        let _ = (document, version);
        Ok(())
    }
}

/// Fixed, pre-parsed versions; document content is never consulted.
#[derive(Debug, Clone)]
pub struct Manual {
    document: Option<Version>,
    defaults: Version,
}

impl Manual {
    /// Builds a manual strategy from pre-parsed versions.
    ///
    /// Both versions (when the document version is present) must come from
    /// the same pattern; they are compared during reconciliation.
    pub fn new(document: Option<Version>, defaults: Version) -> Result<Self, VersionError> {
        if let Some(document) = &document
            && document.pattern() != defaults.pattern()
        {
            return Err(VersionError::PatternMismatch);
        }
        Ok(Self { document, defaults })
    }
}

impl Versioning for Manual {
    fn document_version(&self, _document: &Document) -> Result<Option<Version>, VersionError> {
        Ok(self.document.clone())
    }

    fn defaults_version(&self, _defaults: &Document) -> Result<Version, VersionError> {
        Ok(self.defaults.clone())
    }

    fn first_version(&self) -> Version {
        self.defaults.pattern().first()
    }
}

/// Versions read on demand from a marker route inside each document.
#[derive(Debug, Clone)]
pub struct Automatic {
    pattern: Pattern,
    route: Route,
}

impl Automatic {
    /// Builds an automatic strategy reading markers at `route` through
    /// `pattern`.
    pub fn new(pattern: Pattern, route: Route) -> Self {
        Self { pattern, route }
    }

    /// The marker route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Reads and parses the marker in `document`'s own tree.
    ///
    /// Deliberately overlay-free: falling back to defaults here would make
    /// an unversioned live document appear versioned.
    fn read_marker(&self, document: &Document) -> Result<Option<Version>, VersionError> {
        let route = document.adapt_route(&self.route);
        let Some(block) = document.root().resolve(&route) else {
            return Ok(None);
        };
        match block.as_value() {
            Some(Value::Str(text)) => self.pattern.parse(text).map(Some),
            _ => Err(VersionError::MarkerNotString {
                route: route.to_string(),
            }),
        }
    }
}

impl Versioning for Automatic {
    fn document_version(&self, document: &Document) -> Result<Option<Version>, VersionError> {
        self.read_marker(document)
    }

    fn defaults_version(&self, defaults: &Document) -> Result<Version, VersionError> {
        self.read_marker(defaults)?
            .ok_or_else(|| VersionError::MissingMarker {
                route: self.route.to_string(),
            })
    }

    fn first_version(&self) -> Version {
        self.pattern.first()
    }

    fn write_version(
        &self,
        document: &mut Document,
        version: &Version,
    ) -> Result<(), VersionError> {
        document
            .set(&self.route, version.to_string())
            .map_err(|err| VersionError::MarkerWrite {
                reason: err.to_string(),
            })?;
        Ok(())
    }
}
