/// HTTP routing
use crate::{api, state::AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router.
///
/// Handlers on protected routes take an `AuthenticatedUser`, so a request
/// without a valid bearer token is answered with 401 before any work.
pub fn create_router(app_state: AppState, max_upload_bytes: usize) -> Router {
    let api_routes = Router::new()
        // Public
        .route("/health", get(api::health::health))
        .route("/genres", get(api::genres::list_genres))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/refresh", post(api::auth::refresh))
        // Accounts
        .route(
            "/users",
            get(api::users::list_users).post(api::users::create_user),
        )
        .route("/users/whoami", get(api::users::whoami))
        .route(
            "/users/:name",
            get(api::users::get_user).delete(api::users::delete_user),
        )
        .route(
            "/artists",
            get(api::users::list_artists).post(api::users::create_artist),
        )
        .route("/artists/:name", get(api::users::get_artist))
        .route("/artists/:name/songs", get(api::users::get_artist_songs))
        // Songs
        .route(
            "/songs",
            get(api::songs::list_songs)
                .post(api::songs::create_song)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/songs/:name",
            get(api::songs::get_song).delete(api::songs::delete_song),
        )
        .route("/songs/:name/streams", patch(api::songs::increase_streams))
        .route("/songs/genres/:genre", get(api::songs::list_songs_by_genre))
        .route("/stream/:name", get(api::stream::stream_song))
        // Playlists
        .route(
            "/playlists",
            get(api::playlists::list_playlists).post(api::playlists::create_playlist),
        )
        .route(
            "/playlists/selected/:names",
            get(api::playlists::get_selected_playlists),
        )
        .route(
            "/playlists/:name",
            get(api::playlists::get_playlist)
                .put(api::playlists::update_playlist)
                .delete(api::playlists::delete_playlist),
        )
        // Search
        .route("/search", get(api::search::search));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
