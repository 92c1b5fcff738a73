mod genre;
mod playlist;
mod search;
mod song;
mod user;

pub use genre::{Genre, GenreCatalog, GenreSet};
pub use playlist::{CreatePlaylist, Playlist, UpdatePlaylist};
pub use search::SearchResults;
pub use song::{CreateSong, Song};
pub use user::{Artist, CreateUser, Identity, Role, User};

/// Timestamp format used for registration and upload dates
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Current local time rendered with [`DATE_FORMAT`]
pub fn current_date() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}
