//! Storage trait for song, account and playlist metadata

use crate::error::Result;
use crate::types::{
    Artist, CreatePlaylist, CreateUser, Genre, Playlist, Role, Song, UpdatePlaylist, User,
};
use async_trait::async_trait;

/// Persistence store keyed by entity name
///
/// Single-record operations are atomic; implementations must enforce name
/// uniqueness so that a concurrent duplicate insert fails with the matching
/// `*AlreadyExists` error instead of overwriting.
#[async_trait]
pub trait StorageContext: Send + Sync {
    // ========================================================================
    // Songs
    // ========================================================================

    /// Get song by name
    async fn get_song(&self, name: &str) -> Result<Option<Song>>;

    /// Get all songs
    async fn get_all_songs(&self) -> Result<Vec<Song>>;

    /// Get songs of one genre
    async fn get_songs_by_genre(&self, genre: Genre) -> Result<Vec<Song>>;

    /// Get songs whose record names `artist` as owner
    async fn get_songs_by_artist(&self, artist: &str) -> Result<Vec<Song>>;

    /// Insert a song record and add it to its artist's uploaded songs
    ///
    /// Fails with `SongAlreadyExists` on a name collision.
    async fn create_song(&self, song: &Song) -> Result<()>;

    /// Re-insert a song record removed by `delete_song`
    ///
    /// Succeeds even if the owning artist has since been deleted.
    async fn restore_song(&self, song: &Song) -> Result<()>;

    /// Remove a song record and its artist back-reference
    ///
    /// Fails with `SongNotFound` if no record exists.
    async fn delete_song(&self, name: &str) -> Result<()>;

    /// Increment the play count by one
    async fn increase_song_streams(&self, name: &str) -> Result<()>;

    /// Songs whose name contains `query`
    async fn search_songs(&self, query: &str) -> Result<Vec<Song>>;

    // ========================================================================
    // Users & artists
    // ========================================================================

    /// Register a user or artist
    async fn create_user(&self, user: CreateUser) -> Result<User>;

    /// Get any account (user or artist) by name
    async fn get_user(&self, name: &str) -> Result<Option<User>>;

    /// Get an artist account; `None` for plain users
    async fn get_artist(&self, name: &str) -> Result<Option<Artist>>;

    /// Role of an account, without loading its collections
    async fn get_role(&self, name: &str) -> Result<Option<Role>>;

    /// Password hash of an account
    async fn get_password_hash(&self, name: &str) -> Result<Option<String>>;

    /// Delete an account of either role
    async fn delete_user(&self, name: &str) -> Result<()>;

    /// All accounts with the user role
    async fn get_all_users(&self) -> Result<Vec<User>>;

    /// All accounts with the artist role
    async fn get_all_artists(&self) -> Result<Vec<Artist>>;

    /// Plain users whose name contains `query`
    async fn search_users(&self, query: &str) -> Result<Vec<User>>;

    /// Artists whose name contains `query`
    async fn search_artists(&self, query: &str) -> Result<Vec<Artist>>;

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Create a playlist and add it to its owner's playlists
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist>;

    /// Get playlist by name
    async fn get_playlist(&self, name: &str) -> Result<Option<Playlist>>;

    /// Get all playlists
    async fn get_all_playlists(&self) -> Result<Vec<Playlist>>;

    /// Replace a playlist's fields, optionally renaming it
    async fn update_playlist(&self, name: &str, update: UpdatePlaylist) -> Result<()>;

    /// Delete a playlist
    async fn delete_playlist(&self, name: &str) -> Result<()>;

    /// Playlists whose name contains `query`
    async fn search_playlists(&self, query: &str) -> Result<Vec<Playlist>>;

    /// Convenience: fetch several playlists by name, skipping unknown ones
    async fn get_selected_playlists(&self, names: &[String]) -> Result<Vec<Playlist>> {
        let mut playlists = Vec::with_capacity(names.len());
        for name in names {
            if let Some(playlist) = self.get_playlist(name).await? {
                playlists.push(playlist);
            }
        }
        Ok(playlists)
    }
}
