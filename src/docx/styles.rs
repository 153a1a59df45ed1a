//! Paragraph style lookup from `word/styles.xml`
//!
//! Body paragraphs only reference a style id (`Heading1`, or a localized id
//! such as `berschrift1`). The style sheet gives the display name and any
//! outline level, either set on the style or inherited through `basedOn`.

use std::collections::HashMap;

use quick_xml::de::from_str;
use serde::Deserialize;

use super::error::{ParseErrorKind, ParseResult};

/// Part name of the style sheet
pub const STYLES_PART: &str = "word/styles.xml";

/// Bound on `basedOn` chains, which may be cyclic in hand-edited files
const MAX_STYLE_DEPTH: usize = 16;

#[derive(Debug, Clone, Default)]
struct StyleDef {
    name: Option<String>,
    based_on: Option<String>,
    outline_level: Option<u8>,
}

/// Paragraph styles keyed by style id
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    styles: HashMap<String, StyleDef>,
}

impl StyleSheet {
    pub fn parse(xml: &str) -> ParseResult<Self> {
        let parsed: StylesXml = from_str(xml).map_err(|e| ParseErrorKind::xml(STYLES_PART, e))?;

        let styles = parsed
            .style
            .into_iter()
            .filter(|s| s.kind.as_deref().map_or(true, |k| k == "paragraph"))
            .filter_map(|s| {
                let id = s.id?;
                let def = StyleDef {
                    name: s.name.map(|n| n.val),
                    based_on: s.based_on.map(|b| b.val),
                    outline_level: s
                        .paragraph_props
                        .and_then(|p| p.outline_level)
                        .and_then(|o| o.val.parse().ok()),
                };
                Some((id, def))
            })
            .collect();

        Ok(Self { styles })
    }

    /// Display name of a style, falling back to the id itself
    pub fn name<'a>(&'a self, id: &'a str) -> &'a str {
        self.styles
            .get(id)
            .and_then(|s| s.name.as_deref())
            .unwrap_or(id)
    }

    /// Outline level set on the style or inherited from its ancestors
    pub fn outline_level(&self, id: &str) -> Option<u8> {
        let mut current = id;
        for _ in 0..MAX_STYLE_DEPTH {
            let style = self.styles.get(current)?;
            if let Some(level) = style.outline_level {
                return Some(level);
            }
            current = style.based_on.as_deref()?;
        }
        None
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

// styles.xml structures for deserialization

#[derive(Debug, Deserialize)]
struct StylesXml {
    #[serde(rename = "style", default)]
    style: Vec<StyleXml>,
}

#[derive(Debug, Deserialize)]
struct StyleXml {
    #[serde(rename = "@type", default)]
    kind: Option<String>,

    #[serde(rename = "@styleId", default)]
    id: Option<String>,

    #[serde(default)]
    name: Option<ValXml>,

    #[serde(rename = "basedOn", default)]
    based_on: Option<ValXml>,

    #[serde(rename = "pPr", default)]
    paragraph_props: Option<StyleParagraphXml>,
}

#[derive(Debug, Deserialize)]
struct StyleParagraphXml {
    #[serde(rename = "outlineLvl", default)]
    outline_level: Option<ValXml>,
}

#[derive(Debug, Deserialize)]
struct ValXml {
    #[serde(rename = "@val")]
    val: String,
}
