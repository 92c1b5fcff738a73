/// API route modules
pub mod auth;
pub mod genres;
pub mod health;
pub mod playlists;
pub mod search;
pub mod songs;
pub mod stream;
pub mod users;
