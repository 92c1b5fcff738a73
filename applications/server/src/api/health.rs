/// Health check API route
use crate::state::AppState;
use axum::{extract::State, Json};
use cadence_core::GenreSet;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub genre_set: GenreSet,
}

/// GET /api/health
pub async fn health(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        genre_set: app_state.songs.catalog().set(),
    })
}
