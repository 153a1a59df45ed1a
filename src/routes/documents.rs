//! Document pages
//!
//! - `GET /` lists every document in the folder
//! - `GET /:id` shows one parsed document
//!
//! Directory and ZIP work runs on the blocking pool.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Router,
};

use crate::docx::{parse_document, summarize_document, ParsedDocument};
use crate::error::{AppError, Result};
use crate::html::{render_document, render_listing, ListingEntry};
use crate::library::{DocumentRef, Library};
use crate::state::AppState;

/// Create the document pages router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_documents))
        .route("/:id", get(view_document))
}

/// Listing page; a missing or empty folder renders an empty list
async fn list_documents(State(state): State<AppState>) -> Result<Html<String>> {
    let entries = load_listing(state.library().clone()).await?;
    Ok(Html(render_listing(&entries)))
}

/// Detail page: 404 for unknown ids, 500 for unreadable files
async fn view_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let (document, parsed) = load_document(state.library().clone(), id).await?;
    Ok(Html(render_document(&document, &parsed)))
}

/// Scan the library and summarise each document, sorted by title.
///
/// Documents that fail to parse are still listed under their file title.
pub(crate) async fn load_listing(library: Library) -> Result<Vec<ListingEntry>> {
    let entries = tokio::task::spawn_blocking(move || {
        let start = Instant::now();

        let mut entries: Vec<ListingEntry> = library
            .scan()
            .map(|document| {
                let summary = match summarize_document(&document) {
                    Ok(summary) => Some(summary),
                    Err(e) => {
                        tracing::warn!("Listing without summary: {}", e);
                        None
                    }
                };
                ListingEntry::new(document, summary)
            })
            .collect();

        entries.sort_by_cached_key(|e| (e.document.title.to_lowercase(), e.document.id.clone()));

        tracing::debug!(
            "Scanned {} documents in {} in {:?}",
            entries.len(),
            library.root().display(),
            start.elapsed()
        );
        entries
    })
    .await?;

    Ok(entries)
}

/// Resolve and parse one document
pub(crate) async fn load_document(
    library: Library,
    id: String,
) -> Result<(DocumentRef, ParsedDocument)> {
    tokio::task::spawn_blocking(move || -> Result<(DocumentRef, ParsedDocument)> {
        let document = library
            .resolve(&id)
            .ok_or_else(|| AppError::NotFound(format!("No document named '{}'", id)))?;

        match parse_document(&document) {
            Ok(parsed) => Ok((document, parsed)),
            Err(e) if e.is_not_found() => Err(AppError::NotFound(format!(
                "Document '{}' was removed",
                id
            ))),
            Err(e) => Err(e.into()),
        }
    })
    .await?
}
