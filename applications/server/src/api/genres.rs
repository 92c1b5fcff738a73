/// Genre catalog API route
use crate::state::AppState;
use axum::{extract::State, Json};

/// GET /api/genres
/// Labels accepted for new songs, in catalog order
pub async fn list_genres(State(app_state): State<AppState>) -> Json<Vec<&'static str>> {
    Json(
        app_state
            .songs
            .catalog()
            .members()
            .into_iter()
            .map(|genre| genre.label())
            .collect(),
    )
}
