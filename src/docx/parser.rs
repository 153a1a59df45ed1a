//! DOCX package parser
//!
//! Opens the ZIP container, loads the parts the body needs (style sheet,
//! relationships, media) and hands `word/document.xml` to the body reader.
//!
//! Entry sizes declared in the archive are never trusted; every read is
//! bounded by a byte limit.

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use std::time::Instant;

use zip::result::ZipError;
use zip::ZipArchive;

use super::body::{read_body, DOCUMENT_PART};
use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::relationships::{Relationships, DOCUMENT_RELS_PART};
use super::styles::{StyleSheet, STYLES_PART};
use super::types::{DocumentSummary, ImageData, ParsedDocument};
use crate::library::DocumentRef;

/// Largest XML part that will be decompressed
pub const MAX_PART_BYTES: u64 = 64 * 1024 * 1024;

/// Larger images are dropped from the output
pub const MAX_IMAGE_BYTES: u64 = 32 * 1024 * 1024;

/// Parse the document a ref points at.
///
/// Any failure, including IO, is reported as a [`ParseError`] naming the file.
pub fn parse_document(document: &DocumentRef) -> Result<ParsedDocument, ParseError> {
    let start = Instant::now();

    let parsed = open_document(document, |mut parser| parser.parse())?;

    tracing::debug!(
        "Parsed {} into {} blocks in {:?}",
        document.file_name,
        parsed.blocks.len(),
        start.elapsed()
    );

    Ok(parsed)
}

/// Title and description of a document, without loading its media
pub fn summarize_document(document: &DocumentRef) -> Result<DocumentSummary, ParseError> {
    open_document(document, |parser| {
        Ok(parser.without_images().parse()?.summary())
    })
}

fn open_document<T, F>(document: &DocumentRef, f: F) -> Result<T, ParseError>
where
    F: FnOnce(DocxParser<File>) -> ParseResult<T>,
{
    DocxParser::from_path(&document.path)
        .and_then(f)
        .map_err(|kind| ParseError::new(document.file_name.clone(), kind))
}

/// DOCX parser holding an open package
pub struct DocxParser<R: Read + Seek> {
    archive: ZipArchive<R>,
    max_part_bytes: u64,
    max_image_bytes: u64,
    load_images: bool,
}

impl DocxParser<File> {
    /// Open a DOCX from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> ParseResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl DocxParser<Cursor<Vec<u8>>> {
    /// Open a DOCX held in memory
    pub fn from_bytes(data: Vec<u8>) -> ParseResult<Self> {
        Self::from_reader(Cursor::new(data))
    }
}

impl<R: Read + Seek> DocxParser<R> {
    pub fn from_reader(reader: R) -> ParseResult<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self {
            archive,
            max_part_bytes: MAX_PART_BYTES,
            max_image_bytes: MAX_IMAGE_BYTES,
            load_images: true,
        })
    }

    /// Skip image parts entirely
    pub fn without_images(mut self) -> Self {
        self.load_images = false;
        self
    }

    pub fn with_part_limit(mut self, bytes: u64) -> Self {
        self.max_part_bytes = bytes;
        self
    }

    pub fn with_image_limit(mut self, bytes: u64) -> Self {
        self.max_image_bytes = bytes;
        self
    }

    /// Parse the complete document body
    pub fn parse(&mut self) -> ParseResult<ParsedDocument> {
        let body = self
            .read_part_string(DOCUMENT_PART)?
            .ok_or_else(|| ParseErrorKind::MissingPart(DOCUMENT_PART.to_string()))?;

        let styles = self.load_styles();
        let relationships = self.load_relationships();

        let load_images = self.load_images;
        let max_image_bytes = self.max_image_bytes;
        let archive = &mut self.archive;
        let blocks = read_body(&body, &styles, |rel_id| {
            if !load_images {
                return None;
            }
            let part = relationships.image_part(rel_id)?;
            load_image(archive, part, max_image_bytes)
        })?;

        Ok(ParsedDocument::new(blocks))
    }

    /// Style sheet, or an empty one when absent or unreadable
    fn load_styles(&mut self) -> StyleSheet {
        match self.read_part_string(STYLES_PART) {
            Ok(Some(xml)) => StyleSheet::parse(&xml).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable style sheet: {}", e);
                StyleSheet::default()
            }),
            Ok(None) => StyleSheet::default(),
            Err(e) => {
                tracing::warn!("Could not read {}: {}", STYLES_PART, e);
                StyleSheet::default()
            }
        }
    }

    /// Document relationships, or none when absent or unreadable
    fn load_relationships(&mut self) -> Relationships {
        match self.read_part_string(DOCUMENT_RELS_PART) {
            Ok(Some(xml)) => Relationships::parse(&xml).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable relationships: {}", e);
                Relationships::default()
            }),
            Ok(None) => Relationships::default(),
            Err(e) => {
                tracing::warn!("Could not read {}: {}", DOCUMENT_RELS_PART, e);
                Relationships::default()
            }
        }
    }

    /// Read a UTF-8 XML part; `None` when the package has no such part
    fn read_part_string(&mut self, name: &str) -> ParseResult<Option<String>> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut xml = String::new();
        file.by_ref()
            .take(self.max_part_bytes + 1)
            .read_to_string(&mut xml)?;
        if xml.len() as u64 > self.max_part_bytes {
            return Err(ParseErrorKind::PartTooLarge {
                part: name.to_string(),
                limit: self.max_part_bytes,
            });
        }

        match xml.strip_prefix('\u{feff}') {
            Some(stripped) => Ok(Some(stripped.to_string())),
            None => Ok(Some(xml)),
        }
    }
}

/// Load an image part; non-image or unreadable parts yield `None`
fn load_image<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    part: &str,
    limit: u64,
) -> Option<ImageData> {
    let mime = mime_guess::from_path(part).first()?;
    if mime.type_() != mime_guess::mime::IMAGE {
        tracing::debug!("Skipping non-image media part {}", part);
        return None;
    }

    let mut file = match archive.by_name(part) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!("Missing image part {}: {}", part, e);
            return None;
        }
    };

    let mut data = Vec::new();
    if let Err(e) = file.by_ref().take(limit + 1).read_to_end(&mut data) {
        tracing::warn!("Could not read image part {}: {}", part, e);
        return None;
    }
    if data.len() as u64 > limit {
        tracing::warn!("Dropping image part {} larger than {} bytes", part, limit);
        return None;
    }

    Some(ImageData {
        name: part.to_string(),
        content_type: mime.essence_str().to_string(),
        data,
    })
}
