//! Document-level types.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// A parsed CV document: a flat, ordered list of blocks in reading order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocTree {
    /// Top-level blocks
    pub blocks: Vec<Block>,
}

impl DocTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block to the tree.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Add a paragraph block.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    /// Check if the tree has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Plain text of the whole tree, blocks joined with blank lines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.plain_text())
            .filter(|t| !t.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A block-level element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph or heading
    Paragraph(Paragraph),

    /// A table
    Table(Table),

    /// An ordered or unordered list
    List(List),
}

impl Block {
    /// Plain text of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph(p) => p.plain_text(),
            Block::Table(t) => t.plain_text(),
            Block::List(l) => l.plain_text(),
        }
    }
}

/// An ordered or unordered list of items.
///
/// Nested lists are not modelled; the source documents never nest them and
/// the flattener would collapse the nesting anyway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct List {
    /// Whether items are numbered
    pub ordered: bool,

    /// List items, one paragraph each
    pub items: Vec<Paragraph>,
}

impl List {
    /// Create an unordered list.
    pub fn bulleted(items: Vec<Paragraph>) -> Self {
        Self {
            ordered: false,
            items,
        }
    }

    /// Create an ordered list.
    pub fn numbered(items: Vec<Paragraph>) -> Self {
        Self {
            ordered: true,
            items,
        }
    }

    /// Plain text, one item per line.
    pub fn plain_text(&self) -> String {
        self.items
            .iter()
            .map(|i| i.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
