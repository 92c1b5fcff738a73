use crate::{playlists, songs, users, StorageError};
use async_trait::async_trait;
use cadence_core::{error::Result, storage::StorageContext, types::*};
use sqlx::SqlitePool;

/// Local storage context using `SQLite`
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `database_url` and migrate it
    pub async fn connect(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StorageContext for LocalStorageContext {
    // Songs
    async fn get_song(&self, name: &str) -> Result<Option<Song>> {
        songs::get_by_name(&self.pool, name).await
    }

    async fn get_all_songs(&self) -> Result<Vec<Song>> {
        songs::get_all(&self.pool).await
    }

    async fn get_songs_by_genre(&self, genre: Genre) -> Result<Vec<Song>> {
        songs::get_by_genre(&self.pool, genre).await
    }

    async fn get_songs_by_artist(&self, artist: &str) -> Result<Vec<Song>> {
        songs::get_by_artist(&self.pool, artist).await
    }

    async fn create_song(&self, song: &Song) -> Result<()> {
        songs::create(&self.pool, song).await
    }

    async fn restore_song(&self, song: &Song) -> Result<()> {
        songs::restore(&self.pool, song).await
    }

    async fn delete_song(&self, name: &str) -> Result<()> {
        songs::delete(&self.pool, name).await
    }

    async fn increase_song_streams(&self, name: &str) -> Result<()> {
        songs::increase_streams(&self.pool, name).await
    }

    async fn search_songs(&self, query: &str) -> Result<Vec<Song>> {
        songs::search(&self.pool, query).await
    }

    // Users & artists
    async fn create_user(&self, user: CreateUser) -> Result<User> {
        users::create(&self.pool, user).await
    }

    async fn get_user(&self, name: &str) -> Result<Option<User>> {
        users::get_by_name(&self.pool, name).await
    }

    async fn get_artist(&self, name: &str) -> Result<Option<Artist>> {
        users::get_artist(&self.pool, name).await
    }

    async fn get_role(&self, name: &str) -> Result<Option<Role>> {
        users::get_role(&self.pool, name).await
    }

    async fn get_password_hash(&self, name: &str) -> Result<Option<String>> {
        users::get_password_hash(&self.pool, name).await
    }

    async fn delete_user(&self, name: &str) -> Result<()> {
        users::delete(&self.pool, name).await
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool, Role::User).await
    }

    async fn get_all_artists(&self) -> Result<Vec<Artist>> {
        users::get_all_artists(&self.pool).await
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        users::search(&self.pool, query, Role::User).await
    }

    async fn search_artists(&self, query: &str) -> Result<Vec<Artist>> {
        users::search_artists(&self.pool, query).await
    }

    // Playlists
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist> {
        playlists::create(&self.pool, playlist).await
    }

    async fn get_playlist(&self, name: &str) -> Result<Option<Playlist>> {
        playlists::get_by_name(&self.pool, name).await
    }

    async fn get_all_playlists(&self) -> Result<Vec<Playlist>> {
        playlists::get_all(&self.pool).await
    }

    async fn update_playlist(&self, name: &str, update: UpdatePlaylist) -> Result<()> {
        playlists::update(&self.pool, name, update).await
    }

    async fn delete_playlist(&self, name: &str) -> Result<()> {
        playlists::delete(&self.pool, name).await
    }

    async fn search_playlists(&self, query: &str) -> Result<Vec<Playlist>> {
        playlists::search(&self.pool, query).await
    }
}
