//! Document assembler - structured blocks to bytes.
//!
//! One stateless serialization seam per output format. The assembler knows
//! nothing about jobs or storage; it either returns a complete blob or an
//! [`AssemblyError`], never partial output.
//!
//! The rich word-processor format is serialized as RTF, which carries
//! native heading, paragraph and bulleted-list constructs. Slide decks and
//! PDF have no native serializer here and degrade to ordered plain-text
//! placeholders that keep a textual marker per block type.

mod placeholder;
mod rtf;

pub use placeholder::{flatten_text, slides_placeholder};

use crate::error::AssemblyError;
use crate::material::models::MaterialFormat;
use crate::template::StructuredDocument;

/// Serialize a structured document for the target format.
pub fn assemble(
    document: &StructuredDocument,
    format: MaterialFormat,
) -> Result<Vec<u8>, AssemblyError> {
    if document.is_empty() {
        return Err(AssemblyError::Serialization(
            "refusing to assemble an empty document".to_string(),
        ));
    }
    match format {
        MaterialFormat::Docx => rtf::serialize(document),
        MaterialFormat::Pptx => Ok(slides_placeholder(document).into_bytes()),
        MaterialFormat::Pdf => Ok(flatten_text(document).into_bytes()),
    }
}
