//! Package relationships for `word/document.xml`
//!
//! Maps relationship ids (`rId7`) used in the body to package part names.

use std::collections::HashMap;

use quick_xml::de::from_str;
use serde::Deserialize;

use super::error::{ParseErrorKind, ParseResult};

/// Part name of the main document relationships
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";

/// Directory relationship targets are relative to
const DOCUMENT_BASE: &str = "word";

/// A single resolved relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub kind: String,
    /// Package part name, or the raw target for external relationships
    pub part: String,
    pub external: bool,
}

impl Relationship {
    pub fn is_image(&self) -> bool {
        self.kind.ends_with("/image")
    }
}

/// Relationships of the main document part
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    by_id: HashMap<String, Relationship>,
}

impl Relationships {
    /// Parse a `.rels` XML part
    pub fn parse(xml: &str) -> ParseResult<Self> {
        let parsed: RelationshipsXml =
            from_str(xml).map_err(|e| ParseErrorKind::xml(DOCUMENT_RELS_PART, e))?;

        let by_id = parsed
            .relationship
            .into_iter()
            .map(|rel| {
                let external = rel
                    .target_mode
                    .as_deref()
                    .is_some_and(|mode| mode.eq_ignore_ascii_case("external"));
                let part = if external {
                    rel.target
                } else {
                    resolve_part_name(DOCUMENT_BASE, &rel.target)
                };
                (
                    rel.id,
                    Relationship {
                        kind: rel.kind,
                        part,
                        external,
                    },
                )
            })
            .collect();

        Ok(Self { by_id })
    }

    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id)
    }

    /// Part name of an internal image relationship
    pub fn image_part(&self, id: &str) -> Option<&str> {
        self.get(id)
            .filter(|rel| rel.is_image() && !rel.external)
            .map(|rel| rel.part.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Resolve a relationship target against the source part's directory
fn resolve_part_name(base: &str, target: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let relative = match target.strip_prefix('/') {
        Some(absolute) => absolute,
        None => {
            segments.extend(base.split('/').filter(|s| !s.is_empty()));
            target
        }
    };

    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}

// Relationship XML structures for deserialization

#[derive(Debug, Deserialize)]
struct RelationshipsXml {
    #[serde(rename = "Relationship", default)]
    relationship: Vec<RelationshipXml>,
}

#[derive(Debug, Deserialize)]
struct RelationshipXml {
    #[serde(rename = "@Id")]
    id: String,

    #[serde(rename = "@Type", default)]
    kind: String,

    #[serde(rename = "@Target")]
    target: String,

    #[serde(rename = "@TargetMode", default)]
    target_mode: Option<String>,
}
