//! Sections: ordered key-to-block mappings forming the document tree.
//!
//! A [`Section`] owns its children exclusively; parent and root links are
//! expressed structurally through the denormalized [`Route`] every section
//! carries. The route always equals the concatenation of all ancestor names
//! down to the section, so every relocation rewrites it recursively for the
//! moved subtree; that recursive rewrite is the most delicate invariant in
//! the tree and lives in [`Section::rebase`].
//!
//! All operations here are local to the live tree. The defaults overlay is
//! layered on top by [`Document`](super::Document).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Block, Key, KeyMode, Node, Payload, Value, errors::DocumentError};
use crate::route::Route;

/// An ordered mapping from key to block, with its absolute route.
///
/// The document root is a section with the empty route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    route: Route,
    children: IndexMap<Key, Block>,
}

impl Section {
    /// An empty root section.
    pub fn root() -> Self {
        Self::default()
    }

    /// An empty section at the given absolute route.
    pub fn with_route(route: Route) -> Self {
        Self {
            route,
            children: IndexMap::new(),
        }
    }

    /// The section's absolute route from the document root (empty for the
    /// root itself).
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// The section's own name: the final component of its route.
    pub fn name(&self) -> Option<&Key> {
        self.route.name()
    }

    /// The number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Emptiness check.
    ///
    /// Shallow (`deep == false`): the section has no children at all. Deep:
    /// every child is itself a deeply empty section. A single terminal
    /// child of any value, including explicit null, makes it non-empty.
    pub fn is_empty(&self, deep: bool) -> bool {
        if self.children.is_empty() {
            return true;
        }
        if !deep {
            return false;
        }
        self.children.values().all(|block| match &block.payload {
            Payload::Section(section) => section.is_empty(true),
            Payload::Terminal(_) => false,
        })
    }

    /// Iterates over direct `(key, block)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Block)> {
        self.children.iter()
    }

    /// Iterates over direct keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.children.keys()
    }

    /// Returns `true` if a block exists at `route`.
    pub fn contains(&self, route: &Route) -> bool {
        self.resolve(route).is_some()
    }

    /// Resolves a route to the block it addresses.
    ///
    /// Walks the components one at a time; a missing intermediate or a
    /// terminal block in an intermediate position yields `None`. Absence is
    /// a routine outcome, never an error.
    pub fn resolve(&self, route: &Route) -> Option<&Block> {
        let name = route.name()?;
        let mut section = self;
        for i in 0..route.len() - 1 {
            section = section.children.get(route.get(i)?)?.as_section()?;
        }
        section.children.get(name)
    }

    /// Mutable variant of [`Section::resolve`].
    pub fn resolve_mut(&mut self, route: &Route) -> Option<&mut Block> {
        let name = route.name()?;
        let mut section = self;
        for i in 0..route.len() - 1 {
            section = section
                .children
                .get_mut(route.get(i)?)?
                .as_section_mut()?;
        }
        section.children.get_mut(name)
    }

    /// The terminal value at `route`, if the route resolves to one.
    pub fn get(&self, route: &Route) -> Option<&Value> {
        self.resolve(route)?.as_value()
    }

    /// The nested section at `route`. The empty route addresses `self`.
    pub fn get_section(&self, route: &Route) -> Option<&Section> {
        if route.is_empty() {
            return Some(self);
        }
        self.resolve(route)?.as_section()
    }

    /// Mutable variant of [`Section::get_section`].
    pub fn get_section_mut(&mut self, route: &Route) -> Option<&mut Section> {
        if route.is_empty() {
            return Some(self);
        }
        self.resolve_mut(route)?.as_section_mut()
    }

    /// Assigns content at `route`, creating every missing intermediate
    /// section along the way and returning the previous occupant.
    ///
    /// Intermediates that exist as terminal blocks are replaced by empty
    /// sections that inherit their comments. At the leaf, dispatch follows
    /// the input shape, in priority order:
    ///
    /// 1. a section block is re-rooted under `route` (its own route and
    ///    every descendant's route are rewritten recursively), then
    ///    inserted;
    /// 2. any other pre-built block is inserted as-is, comments traveling
    ///    with it;
    /// 3. a nested mapping is materialized into sections recursively;
    /// 4. a plain value becomes a terminal block.
    ///
    /// In every case the new block inherits the previous occupant's
    /// comments unless it already carries its own. Overwrites keep the
    /// key's position in the section order.
    pub fn set(
        &mut self,
        route: &Route,
        node: impl Into<Node>,
    ) -> Result<Option<Block>, DocumentError> {
        let node = node.into();
        if route.is_empty() {
            return Err(DocumentError::EmptyRoute);
        }
        let keys: Vec<&Key> = route.components().collect();
        let (last, parents) = keys.split_last().expect("route checked non-empty");

        let mut current = self;
        for key in parents {
            current = current.descend_into((*key).clone());
        }

        let key = (*last).clone();
        let leaf_route = current.route.child(key.clone());
        let previous_comments = current.children.get(&key).map(|block| block.comments.clone());

        let mut block = match node {
            Node::Block(mut block) => {
                if let Payload::Section(section) = &mut block.payload {
                    section.rebase(leaf_route);
                }
                block
            }
            Node::Mapping(entries) => Block::section(Section::materialize(leaf_route, entries)),
            Node::Value(value) => Block::terminal(value),
        };
        if let Some(previous) = previous_comments {
            block.inherit_comments(previous);
        }

        let old = match current.children.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, block)),
            None => {
                current.children.insert(key, block);
                None
            }
        };
        Ok(old)
    }

    /// Detaches and returns the block at `route`.
    pub fn remove(&mut self, route: &Route) -> Option<Block> {
        let name = route.name()?;
        let mut section = self;
        for i in 0..route.len() - 1 {
            section = section
                .children
                .get_mut(route.get(i)?)?
                .as_section_mut()?;
        }
        section.children.shift_remove(name)
    }

    /// Removes all children.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Returns the section at `route`, creating it (and every missing
    /// intermediate) if needed.
    ///
    /// Idempotent: an existing section at the full route is returned
    /// unchanged. A terminal block anywhere on the path is replaced by an
    /// empty section that inherits its comments.
    pub fn create_section(&mut self, route: &Route) -> &mut Section {
        let mut current = self;
        for key in route.components() {
            current = current.descend_into(key.clone());
        }
        current
    }

    /// Relative routes of this section's blocks.
    ///
    /// Shallow: one route per direct child. Deep: every block in the
    /// subtree, parents before their descendants.
    pub fn routes(&self, deep: bool) -> Vec<Route> {
        let mut out = Vec::new();
        self.collect_routes(&Route::root(), deep, &mut out);
        out
    }

    /// Relative routes mapped to the terminal values they address.
    ///
    /// Shallow: direct terminal children only. Deep: every terminal in the
    /// subtree. Sections contribute their descendants, never themselves.
    pub fn route_mapped_values(&self, deep: bool) -> IndexMap<Route, &Value> {
        let mut out = IndexMap::new();
        self.collect_values(&Route::root(), deep, &mut out);
        out
    }

    pub(crate) fn children(&self) -> &IndexMap<Key, Block> {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut IndexMap<Key, Block> {
        &mut self.children
    }

    /// Rewrites this section's route to `route` and every descendant
    /// section's route below it, preserving the ancestor-concatenation
    /// invariant across relocations.
    pub(crate) fn rebase(&mut self, route: Route) {
        self.route = route;
        for (key, block) in self.children.iter_mut() {
            if let Payload::Section(section) = &mut block.payload {
                section.rebase(self.route.child(key.clone()));
            }
        }
    }

    /// Rebuilds the child map with every key adapted to `mode`, recursively.
    pub(crate) fn adapt_keys(&mut self, mode: KeyMode) {
        let children = std::mem::take(&mut self.children);
        for (key, mut block) in children {
            if let Payload::Section(section) = &mut block.payload {
                section.adapt_keys(mode);
            }
            self.children.insert(mode.adapt(key), block);
        }
    }

    /// Steps into the child section at `key`, creating or converting the
    /// slot as needed. Terminal blocks in the way become empty sections
    /// that inherit their comments.
    fn descend_into(&mut self, key: Key) -> &mut Section {
        let child_route = self.route.child(key.clone());
        let block = self
            .children
            .entry(key)
            .or_insert_with(|| Block::section(Section::with_route(child_route.clone())));
        if !block.is_section() {
            let comments = std::mem::take(&mut block.comments);
            *block = Block {
                comments,
                payload: Payload::Section(Section::with_route(child_route)),
            };
        }
        match &mut block.payload {
            Payload::Section(section) => section,
            Payload::Terminal(_) => unreachable!(),
        }
    }

    fn materialize(route: Route, entries: Vec<(Key, Node)>) -> Section {
        let mut section = Section::with_route(route);
        for (key, node) in entries {
            let child_route = section.route.child(key.clone());
            let block = match node {
                Node::Value(value) => Block::terminal(value),
                Node::Mapping(nested) => Block::section(Section::materialize(child_route, nested)),
                Node::Block(mut block) => {
                    if let Payload::Section(nested) = &mut block.payload {
                        nested.rebase(child_route);
                    }
                    block
                }
            };
            section.children.insert(key, block);
        }
        section
    }

    fn collect_routes(&self, prefix: &Route, deep: bool, out: &mut Vec<Route>) {
        for (key, block) in &self.children {
            let route = prefix.child(key.clone());
            out.push(route.clone());
            if deep && let Payload::Section(section) = &block.payload {
                section.collect_routes(&route, deep, out);
            }
        }
    }

    fn collect_values<'a>(
        &'a self,
        prefix: &Route,
        deep: bool,
        out: &mut IndexMap<Route, &'a Value>,
    ) {
        for (key, block) in &self.children {
            let route = prefix.child(key.clone());
            match &block.payload {
                Payload::Terminal(value) => {
                    out.insert(route, value);
                }
                Payload::Section(section) => {
                    if deep {
                        section.collect_values(&route, deep, out);
                    }
                }
            }
        }
    }
}
