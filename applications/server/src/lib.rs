//! Cadence Server Library
//!
//! Music streaming backend: accounts, a genre-validated song catalog with
//! audio blobs kept consistent with their metadata, playlists and search.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use router::create_router;
pub use services::{ArtistGuard, AuthService, FileStorage, SongService};
pub use state::AppState;
