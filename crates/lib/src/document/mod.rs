//! Document-level API: the live tree plus the defaults overlay.
//!
//! [`Document`] is the entry point for all tree operations. It pairs a live
//! [`Section`] tree with per-document [`DocumentSettings`] and, optionally,
//! an owned defaults document. The defaults document is a full `Document`
//! itself and may carry its own defaults; that recursion is the overlay
//! chain.
//!
//! # Reads and the overlay
//!
//! The read path resolves in the live tree first. On a miss, or when a
//! value is present but cannot be coerced to the requested type or shape,
//! the identical call is delegated to the defaults document, recursively.
//! Externally the live document appears to contain the union of its own
//! keys and its defaults' keys, with live values winning. Aggregate reads
//! union both sides: defaults contribute the keys the live tree is missing,
//! not overridden values.
//!
//! Writes always target the live tree; defaults are lookup-only.
//!
//! # Usage
//!
//! ```
//! use canopy::{Document, route};
//!
//! let mut defaults = Document::new();
//! defaults.set(&route!["server", "port"], 8080)?;
//!
//! let mut live = Document::new();
//! live.set_defaults(defaults)?;
//!
//! // Absent in live, present in defaults
//! assert_eq!(live.get_as::<i64>(&route!["server", "port"]), Some(8080));
//!
//! // Live value wins once set
//! live.set(&route!["server", "port"], 9090)?;
//! assert_eq!(live.get_as::<i64>(&route!["server", "port"]), Some(9090));
//! # Ok::<(), canopy::Error>(())
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// Submodules
pub mod block;
pub mod comment;
pub mod errors;
pub mod key;
pub mod section;
pub mod settings;
pub mod value;
pub mod yaml;

// Convenience re-exports for core document types
pub use block::{Block, Node, Payload};
pub use comment::{CommentKind, CommentLine, CommentPosition, Comments};
pub use errors::DocumentError;
pub use key::{Key, KeyMode};
pub use section::Section;
pub use settings::DocumentSettings;
pub use value::Value;

use crate::route::Route;

/// A configuration document: settings, a live section tree, and an optional
/// defaults document consulted by the read path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    settings: DocumentSettings,
    root: Section,
    defaults: Option<Box<Document>>,
}

impl Document {
    /// An empty document with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty document with the given settings.
    pub fn with_settings(settings: DocumentSettings) -> Self {
        Self {
            settings,
            root: Section::root(),
            defaults: None,
        }
    }

    /// The document's settings.
    pub fn settings(&self) -> &DocumentSettings {
        &self.settings
    }

    /// The live root section.
    pub fn root(&self) -> &Section {
        &self.root
    }

    /// Mutable access to the live root section.
    ///
    /// Operations through the raw section bypass key adaptation and the
    /// overlay; most callers want the `Document` methods instead.
    pub fn root_mut(&mut self) -> &mut Section {
        &mut self.root
    }

    /// Attaches a defaults document.
    ///
    /// The two documents must agree on key mode: route resolution walks
    /// both trees with the same adapted keys.
    pub fn set_defaults(&mut self, defaults: Document) -> Result<(), DocumentError> {
        if defaults.settings.key_mode() != self.settings.key_mode() {
            return Err(DocumentError::KeyModeMismatch {
                live: self.settings.key_mode(),
                defaults: defaults.settings.key_mode(),
            });
        }
        self.defaults = Some(Box::new(defaults));
        Ok(())
    }

    /// The attached defaults document, if any.
    pub fn defaults(&self) -> Option<&Document> {
        self.defaults.as_deref()
    }

    /// Detaches and returns the defaults document.
    pub fn remove_defaults(&mut self) -> Option<Document> {
        self.defaults.take().map(|boxed| *boxed)
    }

    /// The defaults counterpart of the section at `route`: the section at
    /// the same route in the defaults tree, if both exist.
    pub fn defaults_section(&self, route: &Route) -> Option<&Section> {
        let route = self.adapt_route(route);
        self.defaults.as_deref()?.root.get_section(&route)
    }

    /// Parses a string-form route using this document's separator.
    pub fn parse_route(&self, text: &str) -> Route {
        self.adapt_route(&Route::parse(text, self.settings.route_separator()))
    }

    /// Adapts every component of `route` to this document's key mode.
    ///
    /// Idempotent; applied by every `Document` operation before touching
    /// the trees.
    pub fn adapt_route(&self, route: &Route) -> Route {
        let mode = self.settings.key_mode();
        route
            .components()
            .map(|key| mode.adapt(key.clone()))
            .collect()
    }

    /// Returns `true` if `route` resolves in the live tree or, with the
    /// overlay enabled, in the defaults chain.
    pub fn contains(&self, route: &Route) -> bool {
        let route = self.adapt_route(route);
        if self.root.contains(&route) {
            return true;
        }
        self.overlay()
            .is_some_and(|defaults| defaults.contains(&route))
    }

    /// The terminal value at `route`.
    ///
    /// Falls back to the defaults chain when the live tree has no block
    /// there, or has a section where a value was asked for.
    pub fn get(&self, route: &Route) -> Option<&Value> {
        let route = self.adapt_route(route);
        if let Some(value) = self.root.get(&route) {
            return Some(value);
        }
        self.overlay()?.get(&route)
    }

    /// The value at `route` coerced to `T`, with overlay fallback on
    /// absence and on failed coercion.
    pub fn get_as<'a, T>(&'a self, route: &Route) -> Option<T>
    where
        T: TryFrom<&'a Value, Error = DocumentError>,
    {
        let route = self.adapt_route(route);
        if let Some(value) = self.root.get(&route)
            && let Ok(coerced) = T::try_from(value)
        {
            return Some(coerced);
        }
        self.overlay()?.get_as(&route)
    }

    /// The value at `route` coerced to `T`, or `default` when absent or
    /// not coercible anywhere in the chain.
    ///
    /// This is the primitive every type-specific accessor reduces to.
    pub fn get_as_or<'a, T>(&'a self, route: &Route, default: T) -> T
    where
        T: TryFrom<&'a Value, Error = DocumentError>,
    {
        self.get_as(route).unwrap_or(default)
    }

    /// The section at `route`, falling back to the defaults chain when the
    /// live tree has no section there.
    pub fn get_section(&self, route: &Route) -> Option<&Section> {
        let route = self.adapt_route(route);
        if let Some(section) = self.root.get_section(&route) {
            return Some(section);
        }
        self.overlay()?.get_section(&route)
    }

    /// Direct keys of the root, unioned with defaults keys the live tree
    /// is missing.
    pub fn keys(&self) -> Vec<Key> {
        let mut out: Vec<Key> = self.root.keys().cloned().collect();
        if let Some(defaults) = self.overlay() {
            for key in defaults.keys() {
                if !out.contains(&key) {
                    out.push(key);
                }
            }
        }
        out
    }

    /// Routes of the live tree unioned with defaults-only routes.
    pub fn routes(&self, deep: bool) -> Vec<Route> {
        let mut out = self.root.routes(deep);
        if let Some(defaults) = self.overlay() {
            for route in defaults.routes(deep) {
                if !out.contains(&route) {
                    out.push(route);
                }
            }
        }
        out
    }

    /// Terminal values by route, live values winning, defaults filling in
    /// the routes the live tree is missing.
    pub fn route_mapped_values(&self, deep: bool) -> IndexMap<Route, &Value> {
        let mut out = self.root.route_mapped_values(deep);
        if let Some(defaults) = self.overlay() {
            for (route, value) in defaults.route_mapped_values(deep) {
                out.entry(route).or_insert(value);
            }
        }
        out
    }

    /// Assigns content at `route` in the live tree. See [`Section::set`]
    /// for the shape-dispatch rules.
    pub fn set(
        &mut self,
        route: &Route,
        node: impl Into<Node>,
    ) -> Result<Option<Block>, DocumentError> {
        let route = self.adapt_route(route);
        let node = node.into().adapt_keys(self.settings.key_mode());
        self.root.set(&route, node)
    }

    /// Detaches and returns the live block at `route`.
    pub fn remove(&mut self, route: &Route) -> Option<Block> {
        let route = self.adapt_route(route);
        self.root.remove(&route)
    }

    /// Removes every child of the live root.
    pub fn clear(&mut self) {
        self.root.clear();
    }

    /// Returns the live section at `route`, creating it if needed.
    pub fn create_section(&mut self, route: &Route) -> &mut Section {
        let route = self.adapt_route(route);
        self.root.create_section(&route)
    }

    /// Emptiness of the live tree (the overlay does not count).
    pub fn is_empty(&self, deep: bool) -> bool {
        self.root.is_empty(deep)
    }

    /// Relocates the live block at `from` to `to`, with full re-parenting
    /// semantics: the moved subtree's routes are rewritten recursively and
    /// comments travel with their blocks.
    ///
    /// An absent source is a silent structural no-op (`Ok(false)`).
    /// Relocating the document root is rejected.
    pub fn move_route(&mut self, from: &Route, to: &Route) -> Result<bool, DocumentError> {
        let from = self.adapt_route(from);
        if from.is_empty() {
            return Err(DocumentError::RootRelocation);
        }
        let to = self.adapt_route(to);
        let Some(block) = self.root.remove(&from) else {
            return Ok(false);
        };
        self.root.set(&to, block)?;
        Ok(true)
    }

    /// The next document in the overlay chain, when the overlay applies.
    fn overlay(&self) -> Option<&Document> {
        if !self.settings.use_defaults() {
            return None;
        }
        self.defaults.as_deref()
    }

    pub(crate) fn reconcile_parts(&mut self) -> (&mut Section, Option<&Document>) {
        (&mut self.root, self.defaults.as_deref())
    }
}
