/// Playlists API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use cadence_core::{CadenceError, CreatePlaylist, Playlist, UpdatePlaylist};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlaylistQuery {
    pub photo: Option<String>,
    pub description: Option<String>,
    pub new_name: Option<String>,
}

/// GET /api/playlists
pub async fn list_playlists(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Playlist>>> {
    Ok(Json(app_state.db.get_all_playlists().await?))
}

/// POST /api/playlists?name&photo&description
/// Body: JSON array of song names
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Query(query): Query<CreatePlaylistQuery>,
    Json(song_names): Json<Vec<String>>,
) -> Result<(StatusCode, Json<Playlist>)> {
    if query.name.trim().is_empty() {
        return Err(ServerError::BadRequest(
            "Playlist name cannot be empty".to_string(),
        ));
    }

    let playlist = app_state
        .db
        .create_playlist(CreatePlaylist {
            name: query.name,
            photo: query.photo,
            description: query.description,
            owner: auth.name().to_string(),
            song_names,
        })
        .await?;

    tracing::info!(playlist = %playlist.name, owner = auth.name(), "Playlist created");
    Ok((StatusCode::CREATED, Json(playlist)))
}

/// GET /api/playlists/:name
pub async fn get_playlist(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Playlist>> {
    let playlist = app_state
        .db
        .get_playlist(&name)
        .await?
        .ok_or(CadenceError::PlaylistNotFound(name))?;
    Ok(Json(playlist))
}

/// GET /api/playlists/selected/:names
/// Comma separated names; unknown ones are skipped
pub async fn get_selected_playlists(
    Path(names): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Playlist>>> {
    let names: Vec<String> = names
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();

    Ok(Json(app_state.db.get_selected_playlists(&names).await?))
}

/// PUT /api/playlists/:name?photo&description&new_name
/// Body: JSON array of song names, replacing the current list
pub async fn update_playlist(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Query(query): Query<UpdatePlaylistQuery>,
    Json(song_names): Json<Vec<String>>,
) -> Result<StatusCode> {
    let current = owned_playlist(&app_state, &auth, &name).await?;

    app_state
        .db
        .update_playlist(
            &name,
            UpdatePlaylist {
                new_name: query.new_name,
                photo: query.photo.unwrap_or(current.photo),
                description: query.description.unwrap_or(current.description),
                song_names,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/playlists/:name
pub async fn delete_playlist(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<StatusCode> {
    owned_playlist(&app_state, &auth, &name).await?;
    app_state.db.delete_playlist(&name).await?;

    tracing::info!(playlist = %name, "Playlist deleted");
    Ok(StatusCode::ACCEPTED)
}

/// Fetch a playlist, failing unless the caller owns it
async fn owned_playlist(
    app_state: &AppState,
    auth: &AuthenticatedUser,
    name: &str,
) -> Result<Playlist> {
    let playlist = app_state
        .db
        .get_playlist(name)
        .await?
        .ok_or_else(|| CadenceError::PlaylistNotFound(name.to_string()))?;

    if playlist.owner != auth.name() {
        return Err(ServerError::Forbidden(
            "Only the owner can modify this playlist".to_string(),
        ));
    }

    Ok(playlist)
}
