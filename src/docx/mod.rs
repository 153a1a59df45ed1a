//! DOCX parsing module
//!
//! Turns Word documents into an ordered list of blocks:
//! - Headings (from paragraph styles, outline levels, or "Chapter" lines)
//! - Paragraphs with bold/italic runs
//! - Inline images, in the position they appear in the text
//!
//! Uses zip for package access and quick-xml for the XML parts.

mod body;
mod error;
mod parser;
mod relationships;
mod styles;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use parser::{parse_document, summarize_document, DocxParser, MAX_IMAGE_BYTES, MAX_PART_BYTES};
pub use relationships::{Relationship, Relationships};
pub use styles::StyleSheet;
pub use types::{Block, DocumentSummary, ImageData, ParsedDocument, TextRun};
