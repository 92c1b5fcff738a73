/// Songs API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};
use cadence_core::{CadenceError, CreateSong, Song};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateSongQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub photo: String,
}

/// POST /api/songs?name&genre&photo
/// Upload a song; the audio is the multipart field `file`
pub async fn create_song(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    Query(query): Query<CreateSongQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Song>)> {
    // Refuse non-artists before reading the upload
    app_state.guard().assert_can_upload(auth.name()).await?;

    let audio = read_audio_field(&headers, body).await?;

    let song = app_state
        .songs
        .create(
            CreateSong {
                name: query.name,
                genre: query.genre,
                photo: query.photo,
            },
            auth.name(),
            &audio,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(song)))
}

/// Pull the `file` field out of a multipart body
async fn read_audio_field(headers: &HeaderMap, body: Bytes) -> Result<Vec<u8>> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    if !content_type.starts_with("multipart/form-data") {
        return Err(ServerError::BadRequest(
            "Expected multipart/form-data".to_string(),
        ));
    }

    let boundary = multer::parse_boundary(content_type)
        .map_err(|e| ServerError::BadRequest(format!("Missing boundary: {}", e)))?;

    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {}", e)))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| ServerError::BadRequest(format!("Failed to read file: {}", e)))?;
            return Ok(data.to_vec());
        }
    }

    Err(ServerError::BadRequest("Missing file".to_string()))
}

/// GET /api/songs
pub async fn list_songs(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Song>>> {
    Ok(Json(app_state.songs.list_all().await?))
}

/// GET /api/songs/:name
pub async fn get_song(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Song>> {
    Ok(Json(app_state.songs.get(&name).await?))
}

/// GET /api/songs/genres/:genre
pub async fn list_songs_by_genre(
    Path(genre): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Song>>> {
    let songs = app_state
        .songs
        .list_by_genre(&genre)
        .await
        .map_err(|e| match e {
            CadenceError::GenreNotValid(label) => {
                ServerError::Unprocessable(format!("The genre doesn't exist: {}", label))
            }
            other => other.into(),
        })?;
    Ok(Json(songs))
}

/// PATCH /api/songs/:name/streams
pub async fn increase_streams(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<StatusCode> {
    app_state.songs.increase_streams(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/songs/:name
/// Any signed-in account may delete any song; only playlists are owner-restricted
pub async fn delete_song(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<StatusCode> {
    app_state.songs.delete(&name).await?;
    Ok(StatusCode::ACCEPTED)
}
