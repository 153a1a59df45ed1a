//! Parsed document data types
//!
//! Core types for representing the content of a DOCX body in reading order.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Serialize, Serializer};

/// Longest description shown on a listing card, in characters
const DESCRIPTION_MAX_CHARS: usize = 200;

/// A fully parsed document: blocks in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    pub blocks: Vec<Block>,
}

impl ParsedDocument {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Title and short description for listing pages
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary::from_blocks(&self.blocks)
    }
}

/// One structural unit of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph { runs: Vec<TextRun> },
    Image(ImageData),
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    /// A paragraph made of a single unformatted run
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            runs: vec![TextRun::plain(text)],
        }
    }

    /// Plain text of the block; empty for images
    pub fn text(&self) -> String {
        match self {
            Block::Heading { text, .. } => text.clone(),
            Block::Paragraph { runs } => runs.iter().map(|r| r.text.as_str()).collect(),
            Block::Image(_) => String::new(),
        }
    }
}

/// A span of paragraph text sharing one formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    pub(crate) fn same_format(&self, other: &TextRun) -> bool {
        self.bold == other.bold && self.italic == other.italic
    }
}

/// An embedded image extracted from the package
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    /// Part name inside the package, e.g. `word/media/image1.png`
    pub name: String,
    pub content_type: String,
    #[serde(serialize_with = "serialize_base64")]
    pub data: Vec<u8>,
}

impl ImageData {
    /// `data:` URI suitable for an `<img src>`
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.data))
    }
}

impl std::fmt::Debug for ImageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageData")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

fn serialize_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(data))
}

/// Listing card content derived from a parsed document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl DocumentSummary {
    /// Title is the first heading, or the first paragraph when the document
    /// has no heading. Description is the first paragraph after the title.
    pub fn from_blocks(blocks: &[Block]) -> Self {
        let title_index = blocks
            .iter()
            .position(|b| matches!(b, Block::Heading { .. }))
            .or_else(|| blocks.iter().position(|b| matches!(b, Block::Paragraph { .. })));

        let Some(title_index) = title_index else {
            return Self::default();
        };

        let title = blocks[title_index].text().trim().to_string();
        let description = blocks[title_index + 1..]
            .iter()
            .filter(|b| matches!(b, Block::Paragraph { .. }))
            .map(|b| b.text().trim().to_string())
            .find(|text| !text.is_empty())
            .map(|text| truncate_chars(&text, DESCRIPTION_MAX_CHARS));

        Self {
            title: Some(title).filter(|t| !t.is_empty()),
            description,
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", text[..cut].trim_end()),
        None => text.to_string(),
    }
}
