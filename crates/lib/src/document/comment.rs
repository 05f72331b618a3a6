//! Comment lines attached to document blocks.
//!
//! Every block carries up to six independently optional comment-line groups:
//! {before, inline, after} for the key node and for the value node. The
//! groups travel with their block, through value overwrites and relocations
//! alike, so user annotations survive structural changes.
//!
//! Kind/position compatibility is enforced by the construction helpers
//! ([`CommentLine::line`], [`CommentLine::inline`], [`Comments::set`]), not
//! by stored state: BEFORE and AFTER groups accept any kind except inline,
//! INLINE groups accept only inline lines.

use serde::{Deserialize, Serialize};

use super::errors::DocumentError;

/// The kind of a single comment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentKind {
    /// A full comment line of its own.
    Line,
    /// A comment trailing other content on the same line.
    Inline,
    /// A blank line, kept to preserve vertical spacing.
    Blank,
}

/// One comment line: a kind and its text (empty for blanks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentLine {
    kind: CommentKind,
    text: String,
}

impl CommentLine {
    /// A full comment line.
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Line,
            text: text.into(),
        }
    }

    /// An inline (trailing) comment.
    pub fn inline(text: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Inline,
            text: text.into(),
        }
    }

    /// A blank spacer line.
    pub fn blank() -> Self {
        Self {
            kind: CommentKind::Blank,
            text: String::new(),
        }
    }

    /// The line's kind.
    pub fn kind(&self) -> CommentKind {
        self.kind
    }

    /// The line's text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Which of the six comment groups a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentPosition {
    /// Before the key node.
    BeforeKey,
    /// On the key node's line.
    InlineKey,
    /// After the key node.
    AfterKey,
    /// Before the value node.
    BeforeValue,
    /// On the value node's line.
    InlineValue,
    /// After the value node.
    AfterValue,
}

impl CommentPosition {
    /// All six positions, in source order.
    pub const ALL: [CommentPosition; 6] = [
        CommentPosition::BeforeKey,
        CommentPosition::InlineKey,
        CommentPosition::AfterKey,
        CommentPosition::BeforeValue,
        CommentPosition::InlineValue,
        CommentPosition::AfterValue,
    ];

    /// Whether a line of `kind` may appear at this position.
    pub fn accepts(&self, kind: CommentKind) -> bool {
        match self {
            CommentPosition::InlineKey | CommentPosition::InlineValue => {
                kind == CommentKind::Inline
            }
            _ => kind != CommentKind::Inline,
        }
    }
}

/// The six optional comment-line groups of one block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comments {
    before_key: Option<Vec<CommentLine>>,
    inline_key: Option<Vec<CommentLine>>,
    after_key: Option<Vec<CommentLine>>,
    before_value: Option<Vec<CommentLine>>,
    inline_value: Option<Vec<CommentLine>>,
    after_value: Option<Vec<CommentLine>>,
}

impl Comments {
    /// No comments at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when every group is unset or empty.
    pub fn is_empty(&self) -> bool {
        CommentPosition::ALL
            .iter()
            .all(|position| self.get(*position).is_none_or(<[CommentLine]>::is_empty))
    }

    /// The lines at `position`, if the group is set.
    pub fn get(&self, position: CommentPosition) -> Option<&[CommentLine]> {
        self.slot(position).as_deref()
    }

    /// Mutable access to the group at `position`, creating it when unset.
    ///
    /// The returned vector is the live storage: mutating it mutates the
    /// block directly.
    pub fn group_mut(&mut self, position: CommentPosition) -> &mut Vec<CommentLine> {
        self.slot_mut(position).get_or_insert_with(Vec::new)
    }

    /// Replaces the group at `position`, validating kind compatibility.
    pub fn set(
        &mut self,
        position: CommentPosition,
        lines: Vec<CommentLine>,
    ) -> Result<(), DocumentError> {
        for line in &lines {
            if !position.accepts(line.kind()) {
                return Err(DocumentError::InvalidCommentKind {
                    position,
                    kind: line.kind(),
                });
            }
        }
        *self.slot_mut(position) = Some(lines);
        Ok(())
    }

    /// Removes the group at `position`, returning its lines.
    pub fn remove(&mut self, position: CommentPosition) -> Option<Vec<CommentLine>> {
        self.slot_mut(position).take()
    }

    fn slot(&self, position: CommentPosition) -> &Option<Vec<CommentLine>> {
        match position {
            CommentPosition::BeforeKey => &self.before_key,
            CommentPosition::InlineKey => &self.inline_key,
            CommentPosition::AfterKey => &self.after_key,
            CommentPosition::BeforeValue => &self.before_value,
            CommentPosition::InlineValue => &self.inline_value,
            CommentPosition::AfterValue => &self.after_value,
        }
    }

    fn slot_mut(&mut self, position: CommentPosition) -> &mut Option<Vec<CommentLine>> {
        match position {
            CommentPosition::BeforeKey => &mut self.before_key,
            CommentPosition::InlineKey => &mut self.inline_key,
            CommentPosition::AfterKey => &mut self.after_key,
            CommentPosition::BeforeValue => &mut self.before_value,
            CommentPosition::InlineValue => &mut self.inline_value,
            CommentPosition::AfterValue => &mut self.after_value,
        }
    }
}
