//! Route types for hierarchical document access.
//!
//! A [`Route`] is an ordered, immutable sequence of [`Key`] components
//! addressing a nested location in a document tree. Routes have two
//! equivalent representations: the component sequence itself, and a single
//! string with components joined by a configurable single-character
//! separator.
//!
//! There is no escaping in the string form: a key that contains the
//! separator character cannot be represented there and requires the
//! component form (the [`route!`] macro or [`Route::from_components`]).
//!
//! # Usage
//!
//! ```
//! use canopy::{Route, route};
//!
//! // Parse from a separator-joined string
//! let parsed = Route::parse("user.profile.name", '.');
//!
//! // Build from components (heterogeneous keys allowed)
//! let built = route!["user", "profile", "name"];
//! assert_eq!(parsed, built);
//!
//! // Compose
//! let child = built.child("length");
//! assert_eq!(child.parent(), Some(built));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::Key;

/// An ordered, immutable sequence of key components addressing nested
/// content.
///
/// The empty route addresses the document root itself; it is valid as a
/// resolution starting point but not as a slot to assign into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    components: Vec<Key>,
}

impl Route {
    /// The empty route, addressing the document root.
    pub fn root() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// A single-component route.
    pub fn from_key(key: impl Into<Key>) -> Self {
        Self {
            components: vec![key.into()],
        }
    }

    /// Builds a route from an already-collected component sequence.
    pub fn from_components(components: Vec<Key>) -> Self {
        Self { components }
    }

    /// Parses a separator-joined route string.
    ///
    /// Empty components (leading, trailing, or consecutive separators) are
    /// filtered out, so `".a..b."` parses the same as `"a.b"`. Every parsed
    /// component is a string key; typed keys only exist in component form.
    pub fn parse(text: &str, separator: char) -> Self {
        Self {
            components: text
                .split(separator)
                .filter(|component| !component.is_empty())
                .map(Key::from)
                .collect(),
        }
    }

    /// Joins the components into the string form using `separator`.
    ///
    /// Keys containing the separator character round-trip incorrectly by
    /// construction; callers holding such keys must stay in component form.
    pub fn join(&self, separator: char) -> String {
        let mut out = String::new();
        for (i, key) in self.components.iter().enumerate() {
            if i > 0 {
                out.push(separator);
            }
            out.push_str(&key.to_string());
        }
        out
    }

    /// Returns a new route with `key` appended.
    pub fn child(&self, key: impl Into<Key>) -> Route {
        let mut components = self.components.clone();
        components.push(key.into());
        Self { components }
    }

    /// Returns a new route with all of `other`'s components appended.
    pub fn concat(&self, other: &Route) -> Route {
        let mut components = self.components.clone();
        components.extend(other.components.iter().cloned());
        Self { components }
    }

    /// Returns the parent route, or `None` for the root and for
    /// single-component routes whose parent is the root.
    pub fn parent(&self) -> Option<Route> {
        if self.components.len() < 2 {
            return None;
        }
        Some(Self {
            components: self.components[..self.components.len() - 1].to_vec(),
        })
    }

    /// The number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if the route has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The component at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Key> {
        self.components.get(index)
    }

    /// The final component, i.e. the name of the addressed slot.
    pub fn name(&self) -> Option<&Key> {
        self.components.last()
    }

    /// Iterates over the components in order.
    pub fn components(&self) -> impl Iterator<Item = &Key> {
        self.components.iter()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            write!(f, "(root)")
        } else {
            write!(f, "{}", self.join('.'))
        }
    }
}

impl From<Key> for Route {
    fn from(key: Key) -> Self {
        Self::from_key(key)
    }
}

impl From<&str> for Route {
    fn from(key: &str) -> Self {
        Self::from_key(key)
    }
}

impl FromIterator<Key> for Route {
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}

/// Constructs a [`Route`] from key components.
///
/// Components may be anything convertible into a [`Key`], so typed keys and
/// separator-bearing strings are both representable:
///
/// ```
/// use canopy::route;
///
/// let strings = route!["user", "profile"];
/// let mixed = route!["servers", 3, "enabled"];
/// let empty = route![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! route {
    () => {
        $crate::route::Route::root()
    };
    ($($component:expr),+ $(,)?) => {
        $crate::route::Route::from_components(
            vec![$($crate::document::Key::from($component)),+],
        )
    };
}
