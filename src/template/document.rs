//! Block-based intermediate representation for generated documents.
//!
//! A [`StructuredDocument`] is an ordered sequence of typed blocks,
//! independent of the final binary format. The assembler consumes it; the
//! template builders produce it.

use serde::{Deserialize, Serialize};

/// One typed content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    Bullet { text: String },
}

impl Block {
    /// The text payload regardless of block kind.
    pub fn text(&self) -> &str {
        match self {
            Self::Heading { text, .. } | Self::Paragraph { text } | Self::Bullet { text } => text,
        }
    }
}

/// Ordered block sequence for one material.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructuredDocument {
    pub blocks: Vec<Block>,
}

impl StructuredDocument {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// True if any block's text contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.blocks.iter().any(|b| b.text().contains(needle))
    }
}

/// Fluent builder for constructing documents block by block.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    blocks: Vec<Block>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a level-1 heading.
    pub fn h1(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Heading {
            level: 1,
            text: text.into(),
        });
        self
    }

    /// Add a level-2 heading.
    pub fn h2(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Heading {
            level: 2,
            text: text.into(),
        });
        self
    }

    /// Add a normal paragraph.
    pub fn p(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Paragraph { text: text.into() });
        self
    }

    /// Add a bulleted list item.
    pub fn bullet(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Bullet { text: text.into() });
        self
    }

    pub fn build(self) -> StructuredDocument {
        StructuredDocument {
            blocks: self.blocks,
        }
    }
}
