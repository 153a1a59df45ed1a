//! Document references
//!
//! A [`DocumentRef`] points at one `.docx` file without its parsed content.
//! The id is the file name minus the `.docx` suffix, and only the exact
//! lowercase suffix is eligible, so ids and file names map one to one.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// File suffix of eligible documents
pub const DOCUMENT_EXTENSION: &str = ".docx";

/// Prefix Word uses for its lock files next to an open document
const LOCK_FILE_PREFIX: &str = "~$";

/// A listing entry for one document file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRef {
    pub id: String,
    pub title: String,
    pub file_name: String,
    #[serde(skip)]
    pub path: PathBuf,
}

impl DocumentRef {
    /// Build a ref for an eligible file name inside `root`
    pub fn new(root: &Path, file_name: &str) -> Option<Self> {
        let id = document_id(file_name)?;
        Some(Self {
            title: display_title(id),
            id: id.to_string(),
            file_name: file_name.to_string(),
            path: root.join(file_name),
        })
    }

    /// Build a ref from a full path; `None` when the name is not eligible
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let root = path.parent().unwrap_or_else(|| Path::new(""));
        Self::new(root, file_name)
    }
}

/// Id for an eligible file name
pub fn document_id(file_name: &str) -> Option<&str> {
    if file_name.starts_with('.') || file_name.starts_with(LOCK_FILE_PREFIX) {
        return None;
    }
    file_name
        .strip_suffix(DOCUMENT_EXTENSION)
        .filter(|id| is_valid_id(id))
}

/// File name an id maps back to
pub fn file_name_for(id: &str) -> Option<String> {
    is_valid_id(id).then(|| format!("{}{}", id, DOCUMENT_EXTENSION))
}

/// Ids never contain path syntax and never name hidden or lock files
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && !id.starts_with(LOCK_FILE_PREFIX)
        && !id.contains(['/', '\\', '\0'])
}

/// Human-readable title from an id: `meta_analysis-2024` -> `meta analysis 2024`
pub fn display_title(id: &str) -> String {
    let title = id
        .split(['_', '-'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        id.to_string()
    } else {
        title
    }
}
