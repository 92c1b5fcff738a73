/// User and artist account API routes
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
use cadence_core::{Artist, CadenceError, CreateUser, Identity, Role, Song, User};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub password: String,
}

/// Hash the password and store a new account
async fn register(app_state: &AppState, query: RegisterQuery, role: Role) -> Result<User> {
    if query.name.trim().is_empty() {
        return Err(ServerError::BadRequest("Name cannot be empty".to_string()));
    }
    if query.password.is_empty() {
        return Err(ServerError::BadRequest(
            "Password cannot be empty".to_string(),
        ));
    }

    let password_hash = app_state.auth_service.hash_password(&query.password)?;
    let user = app_state
        .db
        .create_user(CreateUser {
            name: query.name,
            photo: query.photo,
            password_hash,
            role,
        })
        .await?;

    tracing::info!(user = %user.name, role = %role, "Account registered");
    Ok(user)
}

/// POST /api/users?name&photo&password
pub async fn create_user(
    State(app_state): State<AppState>,
    Query(query): Query<RegisterQuery>,
) -> Result<(StatusCode, Json<User>)> {
    let user = register(&app_state, query, Role::User).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/artists?name&photo&password
pub async fn create_artist(
    State(app_state): State<AppState>,
    Query(query): Query<RegisterQuery>,
) -> Result<(StatusCode, Json<Artist>)> {
    let user = register(&app_state, query, Role::Artist).await?;
    Ok((
        StatusCode::CREATED,
        Json(Artist {
            user,
            uploaded_songs: Vec::new(),
        }),
    ))
}

/// GET /api/users
pub async fn list_users(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<User>>> {
    Ok(Json(app_state.db.get_all_users().await?))
}

/// GET /api/users/whoami
pub async fn whoami(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Identity>> {
    let identity = app_state
        .guard()
        .resolve_identity(auth.name())
        .await?
        .ok_or_else(|| CadenceError::UserNotFound(auth.name().to_string()))?;
    Ok(Json(identity))
}

/// GET /api/users/:name
pub async fn get_user(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<User>> {
    let user = app_state
        .db
        .get_user(&name)
        .await?
        .ok_or(CadenceError::UserNotFound(name))?;
    Ok(Json(user))
}

/// DELETE /api/users/:name
/// Removes plain users and artists alike; uploaded songs stay in the catalog
/// Any signed-in account may delete any account; only playlists are owner-restricted
pub async fn delete_user(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<StatusCode> {
    app_state.db.delete_user(&name).await?;
    tracing::info!(user = %name, "Account deleted");
    Ok(StatusCode::ACCEPTED)
}

/// GET /api/artists
pub async fn list_artists(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Artist>>> {
    Ok(Json(app_state.db.get_all_artists().await?))
}

/// GET /api/artists/:name
pub async fn get_artist(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Artist>> {
    let artist = app_state
        .db
        .get_artist(&name)
        .await?
        .ok_or(CadenceError::ArtistNotFound(name))?;
    Ok(Json(artist))
}

/// GET /api/artists/:name/songs
pub async fn get_artist_songs(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Song>>> {
    if app_state.db.get_artist(&name).await?.is_none() {
        return Err(CadenceError::ArtistNotFound(name).into());
    }
    Ok(Json(app_state.db.get_songs_by_artist(&name).await?))
}
