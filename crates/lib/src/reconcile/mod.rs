//! Version-aware reconciliation of a live document against its defaults.
//!
//! Reconciliation migrates a live document's structure to match a newer
//! defaults schema while preserving user-supplied values and user-authored
//! comments. The pass runs in three stages:
//!
//! 1. **Relocations**: every version strictly after the live version, up to
//!    and including the defaults version, is visited in canonical advance
//!    order; each version's relocation list is applied in declared order
//!    (later steps may target paths vacated by earlier ones). A relocation
//!    whose source is already absent is a structural no-op, not an error.
//! 2. **Merge**: the defaults tree is walked recursively. Routes present
//!    only in defaults are copied into the live tree (comments included),
//!    routes present only in live are dropped, and live terminal values win
//!    where both sides agree on shape. The merged key order follows the
//!    defaults schema.
//! 3. **Stamp**: the versioning strategy writes the defaults version into
//!    the live document. This runs last, since a partially-migrated
//!    document must not report itself current.
//!
//! There is no partial-state rollback: a pass that fails midway (for
//! example on a version the pattern cannot express) may leave the live tree
//! partially migrated. Callers treating that as fatal should reload from
//! their text source.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::{
    document::{Block, Document, DocumentError, Payload, Section},
    route::Route,
    version::{Version, Versioning},
};

/// A single structural edit tied to one version boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relocation {
    /// Move the block at `from` to `to`, value and comments intact.
    Move { from: Route, to: Route },
    /// Remove the block at `route`.
    Remove { route: Route },
}

/// Ordered relocation lists keyed by version ID.
///
/// The key is the canonical string form of the version whose migration the
/// relocations belong to ([`Version::as_id`]): relocations under `"2.0"`
/// run when reconciliation advances past version `2.0`.
#[derive(Debug, Clone, Default)]
pub struct Relocations {
    table: HashMap<String, Vec<Relocation>>,
}

impl Relocations {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to register the relocation list for one version.
    pub fn with(mut self, version_id: impl Into<String>, steps: Vec<Relocation>) -> Self {
        self.table.insert(version_id.into(), steps);
        self
    }

    /// Appends one relocation to a version's list.
    pub fn push(&mut self, version_id: impl Into<String>, step: Relocation) {
        self.table.entry(version_id.into()).or_default().push(step);
    }

    /// The relocation list registered for `version`, if any.
    pub fn for_version(&self, version: &Version) -> Option<&[Relocation]> {
        self.table.get(&version.as_id()).map(Vec::as_slice)
    }

    /// Returns `true` when no version has relocations.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Document {
    /// Reconciles this document against its attached defaults.
    ///
    /// Requires a defaults document (see [`Document::set_defaults`]).
    /// Errors (malformed defaults markers, versions the pattern cannot
    /// express) surface immediately, and the tree may be left partially
    /// migrated when they do.
    ///
    /// A live version newer than the defaults version applies no
    /// relocations (there is no migration path backwards) but still merges,
    /// so the live document shadows the schema it is actually paired with.
    pub fn reconcile(
        &mut self,
        versioning: &dyn Versioning,
        relocations: &Relocations,
    ) -> crate::Result<()> {
        let defaults = self.defaults().ok_or(DocumentError::MissingDefaults)?;
        let target = versioning.defaults_version(defaults)?;
        let current = versioning.document_version(self)?;
        let current_id = current
            .as_ref()
            .map_or_else(|| "none".to_string(), Version::as_id);
        info!(from = %current_id, to = %target, "Starting reconciliation");

        match &current {
            Some(version) if *version == target => {
                debug!(version = %target, "Versions match, no relocations needed");
            }
            Some(version) if *version > target => {
                warn!(
                    document = %version,
                    defaults = %target,
                    "Live document is newer than defaults, skipping relocations"
                );
            }
            _ => apply_relocations(self, versioning, relocations, current.as_ref(), &target)?,
        }

        let (root, defaults) = self.reconcile_parts();
        let defaults = defaults.expect("defaults checked above");
        merge_section(root, defaults.root());

        versioning.write_version(self, &target)?;
        info!(version = %target, "Reconciliation completed");
        Ok(())
    }
}

/// Walks the versions strictly after `current` up to and including
/// `target`, applying each version's relocation list in declared order.
fn apply_relocations(
    document: &mut Document,
    versioning: &dyn Versioning,
    relocations: &Relocations,
    current: Option<&Version>,
    target: &Version,
) -> crate::Result<()> {
    let mut cursor = match current {
        Some(version) => version.next()?,
        None => versioning.first_version(),
    };
    loop {
        if let Some(steps) = relocations.for_version(&cursor) {
            debug!(version = %cursor, steps = steps.len(), "Applying relocations");
            for step in steps {
                apply_step(document, step)?;
            }
        }
        if cursor == *target {
            break;
        }
        cursor = cursor.next()?;
    }
    Ok(())
}

fn apply_step(document: &mut Document, step: &Relocation) -> Result<(), DocumentError> {
    match step {
        Relocation::Move { from, to } => {
            if !document.move_route(from, to)? {
                debug!(from = %from, "Relocation source absent, nothing to move");
            }
        }
        Relocation::Remove { route } => {
            if document.remove(route).is_none() {
                debug!(route = %route, "Removal target absent, nothing to remove");
            }
        }
    }
    Ok(())
}

/// Merges the defaults schema into the live section.
///
/// Rebuilds the live children in defaults order: default-only keys are
/// copied in (comments included), matching sections recurse, matching
/// terminals keep the live value, and shape conflicts resolve to the
/// defaults shape with the live block's comments carried over. Keys left
/// only in the live section are dropped.
fn merge_section(live: &mut Section, defaults: &Section) {
    let mut merged = IndexMap::with_capacity(defaults.children().len());
    for (key, default_block) in defaults.children() {
        let live_block = live.children_mut().shift_remove(key);
        let block = match (live_block, &default_block.payload) {
            (None, _) => default_block.clone(),
            (Some(mut live_block), Payload::Section(default_section)) => {
                if let Payload::Section(live_section) = &mut live_block.payload {
                    merge_section(live_section, default_section);
                    live_block
                } else {
                    debug!(
                        route = %default_section.route(),
                        "Replacing live terminal with schema section"
                    );
                    carry_comments(default_block.clone(), &mut live_block)
                }
            }
            (Some(mut live_block), Payload::Terminal(_)) => {
                if live_block.is_section() {
                    carry_comments(default_block.clone(), &mut live_block)
                } else {
                    live_block
                }
            }
        };
        merged.insert(key.clone(), block);
    }

    let dropped = live.children().len();
    if dropped > 0 {
        debug!(
            count = dropped,
            route = %live.route(),
            "Dropping keys absent from the defaults schema"
        );
    }
    *live.children_mut() = merged;
}

/// Moves the live block's comments onto `block` unless it is comment-free.
fn carry_comments(mut block: Block, live_block: &mut Block) -> Block {
    let comments = std::mem::take(&mut live_block.comments);
    if !comments.is_empty() {
        block.comments = comments;
    }
    block
}
