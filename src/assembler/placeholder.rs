//! Plain-text placeholder renderings for formats without a native
//! serializer, plus the flattened mirror stored on Material records.

use crate::template::{Block, StructuredDocument};

/// Flatten a document to markdown-style plain text, one block per line,
/// keeping a textual marker per block type.
pub fn flatten_text(document: &StructuredDocument) -> String {
    let mut lines = Vec::with_capacity(document.blocks.len());
    for block in &document.blocks {
        match block {
            Block::Heading { level: 1, text } => lines.push(format!("# {text}")),
            Block::Heading { text, .. } => lines.push(format!("## {text}")),
            Block::Paragraph { text } => lines.push(text.clone()),
            Block::Bullet { text } => lines.push(format!("- {text}")),
        }
    }
    lines.join("\n")
}

/// Slide-deck placeholder: every level-1 heading opens a numbered slide,
/// the blocks beneath it become that slide's body.
pub fn slides_placeholder(document: &StructuredDocument) -> String {
    let mut lines = Vec::with_capacity(document.blocks.len() + 4);
    let mut slide = 0u32;
    for block in &document.blocks {
        match block {
            Block::Heading { level: 1, text } => {
                slide += 1;
                if slide > 1 {
                    lines.push(String::new());
                }
                lines.push(format!("SLIDE {slide}: {text}"));
            }
            Block::Heading { text, .. } => lines.push(format!("  {text}")),
            Block::Paragraph { text } => lines.push(format!("  {text}")),
            Block::Bullet { text } => lines.push(format!("  - {text}")),
        }
    }
    lines.join("\n")
}
