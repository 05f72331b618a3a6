//! Blocks: the value+comments unit stored at one key.
//!
//! A [`Block`] is a tagged union over a terminal [`Value`] and a nested
//! [`Section`], paired with its [`Comments`]. Comments belong to the block,
//! so they travel as a unit through overwrites and relocations.
//!
//! [`Node`] is the input shape accepted by `set`: an already-built section,
//! a raw block, a nested mapping to materialize, or a plain value. The
//! assignment rules dispatch on this shape.

use serde::{Deserialize, Serialize};

use super::{Comments, Key, KeyMode, Section, Value};

/// The content stored behind a block: a terminal value or a nested section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// A leaf value.
    Terminal(Value),
    /// A nested section of further blocks.
    Section(Section),
}

/// The smallest unit of stored content: a payload plus comment groups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    pub(crate) comments: Comments,
    pub(crate) payload: Payload,
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Terminal(Value::Null)
    }
}

impl Block {
    /// A terminal block with no comments.
    pub fn terminal(value: impl Into<Value>) -> Self {
        Self {
            comments: Comments::new(),
            payload: Payload::Terminal(value.into()),
        }
    }

    /// A section block with no comments.
    pub fn section(section: Section) -> Self {
        Self {
            comments: Comments::new(),
            payload: Payload::Section(section),
        }
    }

    /// Returns `true` if this block holds a nested section.
    pub fn is_section(&self) -> bool {
        matches!(self.payload, Payload::Section(_))
    }

    /// The block's payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The terminal value, if this block is terminal.
    pub fn as_value(&self) -> Option<&Value> {
        match &self.payload {
            Payload::Terminal(value) => Some(value),
            Payload::Section(_) => None,
        }
    }

    /// Mutable access to the terminal value, if this block is terminal.
    pub fn as_value_mut(&mut self) -> Option<&mut Value> {
        match &mut self.payload {
            Payload::Terminal(value) => Some(value),
            Payload::Section(_) => None,
        }
    }

    /// The nested section, if this block holds one.
    pub fn as_section(&self) -> Option<&Section> {
        match &self.payload {
            Payload::Section(section) => Some(section),
            Payload::Terminal(_) => None,
        }
    }

    /// Mutable access to the nested section, if this block holds one.
    pub fn as_section_mut(&mut self) -> Option<&mut Section> {
        match &mut self.payload {
            Payload::Section(section) => Some(section),
            Payload::Terminal(_) => None,
        }
    }

    /// The block's comment groups.
    pub fn comments(&self) -> &Comments {
        &self.comments
    }

    /// Mutable access to the block's comment groups.
    pub fn comments_mut(&mut self) -> &mut Comments {
        &mut self.comments
    }

    /// Builder-style: attaches comments and returns the block.
    pub fn with_comments(mut self, comments: Comments) -> Self {
        self.comments = comments;
        self
    }

    /// Adopts the previous occupant's comments unless this block already
    /// carries its own.
    pub(crate) fn inherit_comments(&mut self, previous: Comments) {
        if self.comments.is_empty() && !previous.is_empty() {
            self.comments = previous;
        }
    }
}

/// The shape-dispatched input to `set`.
///
/// Anything convertible into a [`Value`] becomes a terminal assignment; an
/// explicit [`Block`] or [`Section`] is inserted as a unit; a mapping is
/// materialized into nested sections recursively.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A plain value, wrapped into a terminal block.
    Value(Value),
    /// A nested mapping, materialized into a section recursively.
    Mapping(Vec<(Key, Node)>),
    /// A pre-built block, inserted as-is (comments travel with it).
    Block(Block),
}

impl Node {
    /// Builds a mapping node from key/node pairs.
    pub fn mapping<K, N>(entries: impl IntoIterator<Item = (K, N)>) -> Self
    where
        K: Into<Key>,
        N: Into<Node>,
    {
        Node::Mapping(
            entries
                .into_iter()
                .map(|(key, node)| (key.into(), node.into()))
                .collect(),
        )
    }

    /// Adapts every key in this node (and any nested sections) to `mode`.
    pub(crate) fn adapt_keys(self, mode: KeyMode) -> Self {
        match self {
            Node::Value(value) => Node::Value(value),
            Node::Mapping(entries) => Node::Mapping(
                entries
                    .into_iter()
                    .map(|(key, node)| (mode.adapt(key), node.adapt_keys(mode)))
                    .collect(),
            ),
            Node::Block(mut block) => {
                if let Payload::Section(section) = &mut block.payload {
                    section.adapt_keys(mode);
                }
                Node::Block(block)
            }
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::Value(value)
    }
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Node::Block(block)
    }
}

impl From<Section> for Node {
    fn from(section: Section) -> Self {
        Node::Block(Block::section(section))
    }
}

macro_rules! node_from_value {
    ($($ty:ty),+ $(,)?) => {
        $(impl From<$ty> for Node {
            fn from(value: $ty) -> Self {
                Node::Value(Value::from(value))
            }
        })+
    };
}

node_from_value!(bool, i32, i64, f64, &str, String, Vec<Value>);
