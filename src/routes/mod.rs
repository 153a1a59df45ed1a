//! Route modules for Docshelf Server

pub mod api;
pub mod documents;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// All application routes; callers add layers and state
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1/health", health::router())
        .nest("/api/v1/documents", api::router())
        .merge(documents::router())
}
