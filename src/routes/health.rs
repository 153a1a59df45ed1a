//! Service health
//!
//! Reports the build version and whether the document folder can be read.
//! A missing folder is `degraded`, not an error: pages still render empty.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    pub documents_available: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let library = state.library().clone();
    let documents_available = tokio::task::spawn_blocking(move || library.is_available())
        .await
        .unwrap_or(false);

    Json(HealthResponse {
        status: if documents_available { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        service: env!("CARGO_PKG_NAME"),
        documents_available,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}
