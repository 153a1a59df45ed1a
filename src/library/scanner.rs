//! Library scanner for a local document folder
//!
//! Lists `.docx` files in the configured directory. Every call reads the
//! directory again, so files added or removed show up on the next request.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::document::{file_name_for, DocumentRef};

/// Scanner over one document directory
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
}

impl Library {
    /// Create a new library scanner
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True when the document directory exists and can be listed
    pub fn is_available(&self) -> bool {
        fs::read_dir(&self.root).is_ok()
    }

    /// Create the document directory if it does not exist yet
    pub fn ensure_root(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)
    }

    /// Lazily list every eligible document in the directory.
    ///
    /// A missing or unreadable directory yields nothing.
    pub fn scan(&self) -> impl Iterator<Item = DocumentRef> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => Some(entries),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Document directory {} does not exist", self.root.display());
                None
            }
            Err(e) => {
                tracing::warn!("Cannot read document directory {}: {}", self.root.display(), e);
                None
            }
        };

        let root = self.root.clone();
        entries
            .into_iter()
            .flatten()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable directory entry: {}", e);
                    None
                }
            })
            .filter_map(move |entry| {
                let file_name = entry.file_name();
                let Some(file_name) = file_name.to_str() else {
                    tracing::debug!("Skipping non UTF-8 file name {:?}", entry.file_name());
                    return None;
                };
                let document = DocumentRef::new(&root, file_name)?;
                // metadata() follows symlinks, entry.file_type() would not
                if !is_file(&document.path) {
                    tracing::debug!("Skipping {}: not a regular file", file_name);
                    return None;
                }
                Some(document)
            })
    }

    /// Resolve an id to the document currently on disk
    pub fn resolve(&self, id: &str) -> Option<DocumentRef> {
        let file_name = file_name_for(id)?;
        let document = DocumentRef::new(&self.root, &file_name)?;
        is_file(&document.path).then_some(document)
    }
}

fn is_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
