//! Document JSON API
//!
//! Same data as the HTML pages, for scripts and other front-ends:
//! - `GET /api/v1/documents`
//! - `GET /api/v1/documents/:id`

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::documents::{load_document, load_listing};
use crate::docx::Block;
use crate::error::AppError;
use crate::html::ListingEntry;
use crate::state::AppState;

/// Response for document list
#[derive(Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<ListingEntry>,
    pub total: usize,
}

/// Full document response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: String,
    pub title: String,
    pub file_name: String,
    pub blocks: Vec<Block>,
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

/// [`AppError`] rendered as JSON instead of an HTML page
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let body = Json(ErrorResponse {
            error: self.0.kind(),
            message: self.0.public_message(),
        });
        (status, body).into_response()
    }
}

/// Create the documents API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_documents))
        .route("/:id", get(get_document))
}

async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<DocumentListResponse>, ApiError> {
    let documents = load_listing(state.library().clone()).await?;
    let total = documents.len();
    Ok(Json(DocumentListResponse { documents, total }))
}

async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let (document, parsed) = load_document(state.library().clone(), id).await?;
    let title = parsed.summary().title.unwrap_or(document.title);

    Ok(Json(DocumentResponse {
        id: document.id,
        title,
        file_name: document.file_name,
        blocks: parsed.blocks,
    }))
}
