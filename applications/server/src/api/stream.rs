/// Audio streaming API
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};

/// GET /api/stream/:name
/// Serve a song's audio with range request support
pub async fn stream_song(
    Path(name): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    headers: HeaderMap,
) -> Result<Response> {
    let audio = app_state.songs.audio(&name).await?;
    let file_size = audio.len() as u64;
    let mime_type = sniff_mime_type(&audio);

    if let Some(range) = headers.get(header::RANGE) {
        let range_str = range
            .to_str()
            .map_err(|_| ServerError::BadRequest("Invalid Range header".to_string()))?;

        let Some((start, end)) = parse_range(range_str, file_size) else {
            return Response::builder()
                .status(StatusCode::RANGE_NOT_SATISFIABLE)
                .header(header::CONTENT_RANGE, format!("bytes */{}", file_size))
                .body(Body::empty())
                .map_err(|e| ServerError::Internal(format!("Failed to build response: {}", e)));
        };

        let content_length = end - start + 1;
        let body = Body::from(audio.slice(start as usize..=end as usize));

        return Response::builder()
            .status(StatusCode::PARTIAL_CONTENT)
            .header(header::CONTENT_TYPE, mime_type)
            .header(header::CONTENT_LENGTH, content_length)
            .header(
                header::CONTENT_RANGE,
                format!("bytes {}-{}/{}", start, end, file_size),
            )
            .header(header::ACCEPT_RANGES, "bytes")
            .body(body)
            .map_err(|e| ServerError::Internal(format!("Failed to build response: {}", e)));
    }

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime_type)
        .header(header::CONTENT_LENGTH, file_size)
        .header(header::ACCEPT_RANGES, "bytes")
        .body(Body::from(audio))
        .map_err(|e| ServerError::Internal(format!("Failed to build response: {}", e)))
}

/// Best guess at the container from its leading bytes, MP3 otherwise
fn sniff_mime_type(data: &[u8]) -> &'static str {
    if data.starts_with(b"fLaC") {
        "audio/flac"
    } else if data.starts_with(b"OggS") {
        "audio/ogg"
    } else if data.starts_with(b"RIFF") && data.get(8..12) == Some(b"WAVE".as_slice()) {
        "audio/wav"
    } else {
        "audio/mpeg"
    }
}

/// Parse HTTP Range header
/// Formats: "bytes=start-end", "bytes=start-", "bytes=-suffix"
fn parse_range(range: &str, file_size: u64) -> Option<(u64, u64)> {
    let range = range.strip_prefix("bytes=")?;
    let (start_str, end_str) = range.split_once('-')?;
    let last = file_size.checked_sub(1)?;

    if start_str.is_empty() {
        let suffix: u64 = end_str.parse().ok()?;
        if suffix == 0 {
            return None;
        }
        return Some((file_size.saturating_sub(suffix), last));
    }

    let start: u64 = start_str.parse().ok()?;
    let end: u64 = if end_str.is_empty() {
        last
    } else {
        end_str.parse::<u64>().ok()?.min(last)
    };

    (start <= end).then_some((start, end))
}
