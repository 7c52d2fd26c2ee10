//! RTF serializer for the rich word-processor format.
//!
//! Heading blocks map to bold, outline-leveled paragraphs, paragraphs to
//! normal text, bullets to bulleted list items, strictly in block order.

use crate::error::AssemblyError;
use crate::template::{Block, StructuredDocument};

const HEADER: &str = r"{\rtf1\ansi\deff0{\fonttbl{\f0\fswiss Calibri;}}\f0\fs22";

pub fn serialize(document: &StructuredDocument) -> Result<Vec<u8>, AssemblyError> {
    let mut out = String::with_capacity(1024);
    out.push_str(HEADER);
    out.push('\n');

    for block in &document.blocks {
        match block {
            Block::Heading { level, text } => {
                let (size, outline) = match level {
                    1 => (36, 0),
                    2 => (28, 1),
                    other => {
                        return Err(AssemblyError::Serialization(format!(
                            "unsupported heading level {other}"
                        )))
                    }
                };
                out.push_str(&format!(
                    r"{{\pard\sb240\sa120\outlinelevel{outline}\b\fs{size} {}\par}}",
                    escape(text)
                ));
            }
            Block::Paragraph { text } => {
                out.push_str(&format!(r"{{\pard\sa120 {}\par}}", escape(text)));
            }
            Block::Bullet { text } => {
                out.push_str(&format!(
                    r"{{\pard\fi-360\li720\sa60 \bullet\tab {}\par}}",
                    escape(text)
                ));
            }
        }
        out.push('\n');
    }

    out.push('}');
    Ok(out.into_bytes())
}

/// Escape RTF control characters and encode non-ASCII as `\uN?` units.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str(r"\\"),
            '{' => escaped.push_str(r"\{"),
            '}' => escaped.push_str(r"\}"),
            '\n' => escaped.push_str(r"\line "),
            c if c.is_ascii() => escaped.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    escaped.push_str(&format!(r"\u{}?", *unit as i16));
                }
            }
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::DocumentBuilder;

    #[test]
    fn test_serialized_output_is_braced_rtf() {
        let doc = DocumentBuilder::new().h1("Title").p("Body").build();
        let text = String::from_utf8(serialize(&doc).unwrap()).unwrap();
        assert!(text.starts_with(r"{\rtf1"));
        assert!(text.ends_with('}'));
        assert!(text.contains(r"\outlinelevel0"));
        assert!(!text.contains(r"\bullet"));
    }

    #[test]
    fn test_bullets_use_list_items() {
        let doc = DocumentBuilder::new().h1("T").bullet("Item one").build();
        let text = String::from_utf8(serialize(&doc).unwrap()).unwrap();
        assert!(text.contains(r"\bullet\tab Item one"));
    }

    #[test]
    fn test_control_characters_are_escaped() {
        let doc = DocumentBuilder::new().p(r"braces {x} and \slash").build();
        let text = String::from_utf8(serialize(&doc).unwrap()).unwrap();
        assert!(text.contains(r"\{x\}"));
        assert!(text.contains(r"\\slash"));
    }

    #[test]
    fn test_non_ascii_is_unicode_escaped() {
        let doc = DocumentBuilder::new().p("caf\u{e9}").build();
        let text = String::from_utf8(serialize(&doc).unwrap()).unwrap();
        assert!(text.contains(r"\u233?"));
    }

    #[test]
    fn test_unsupported_heading_level_fails() {
        let doc = StructuredDocument {
            blocks: vec![Block::Heading {
                level: 5,
                text: "deep".to_string(),
            }],
        };
        assert!(serialize(&doc).is_err());
    }
}
