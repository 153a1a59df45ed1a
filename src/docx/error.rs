//! DOCX parse error types

use thiserror::Error;

/// Why a DOCX package could not be decoded
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a valid DOCX archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Missing package part: {0}")]
    MissingPart(String),

    #[error("Package part {part} exceeds {limit} bytes")]
    PartTooLarge { part: String, limit: u64 },

    #[error("Malformed XML in {part}: {message}")]
    Xml { part: String, message: String },
}

impl ParseErrorKind {
    pub(crate) fn xml(part: &str, err: impl std::fmt::Display) -> Self {
        ParseErrorKind::Xml {
            part: part.to_string(),
            message: err.to_string(),
        }
    }
}

/// A document that exists on disk but could not be parsed
#[derive(Debug, Error)]
#[error("Failed to parse {document}: {kind}")]
pub struct ParseError {
    /// File name of the offending document
    pub document: String,
    #[source]
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(document: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self {
            document: document.into(),
            kind,
        }
    }

    /// True when the file vanished between resolving and reading it
    pub fn is_not_found(&self) -> bool {
        matches!(&self.kind, ParseErrorKind::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result type alias for DOCX operations
pub type ParseResult<T> = std::result::Result<T, ParseErrorKind>;
