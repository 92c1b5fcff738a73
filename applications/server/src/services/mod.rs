/// Server services
pub mod auth;
pub mod file_storage;
pub mod guard;
pub mod songs;

pub use auth::AuthService;
pub use file_storage::FileStorage;
pub use guard::ArtistGuard;
pub use songs::SongService;
