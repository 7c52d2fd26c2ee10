//! Template engine - pure content generation for the seven material types.
//!
//! `generate_content` is deterministic and does no I/O: the same
//! (material type, metadata) pair always yields the same block sequence,
//! which is what makes golden-output testing of the pipeline possible.
//! Each supported language carries a complete independent block set; the
//! `language` field has already collapsed unknown tags to the default
//! locale, so generation never fails on language.

pub mod document;
mod en;
mod id;

pub use document::{Block, DocumentBuilder, StructuredDocument};

use crate::job::models::{JobMetadata, Language};
use crate::material::models::MaterialType;

/// Build the structured document for one material type.
pub fn generate_content(material_type: MaterialType, meta: &JobMetadata) -> StructuredDocument {
    match meta.language {
        Language::En => en::generate(material_type, meta),
        Language::Id => id::generate(material_type, meta),
    }
}
