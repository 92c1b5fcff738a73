/// Search API route
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use cadence_core::SearchResults;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub name: String,
}

/// GET /api/search?name=
/// Artists, playlists, users and songs whose name contains the query
pub async fn search(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResults>> {
    let term = query.name.trim();
    if term.is_empty() {
        return Err(ServerError::BadRequest(
            "Search query cannot be empty".to_string(),
        ));
    }

    let db = &app_state.db;
    let (artists, playlists, users, songs) = tokio::try_join!(
        db.search_artists(term),
        db.search_playlists(term),
        db.search_users(term),
        db.search_songs(term),
    )?;

    Ok(Json(SearchResults {
        artists,
        playlists,
        users,
        songs,
    }))
}
