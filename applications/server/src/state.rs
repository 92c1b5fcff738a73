/// Shared application state
use crate::{
    config::ServerConfig,
    error::Result,
    services::{ArtistGuard, AuthService, FileStorage, SongService},
};
use cadence_core::{GenreCatalog, StorageContext};
use cadence_metadata::LoftyDurationProbe;
use cadence_storage::LocalStorageContext;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn StorageContext>,
    pub auth_service: Arc<AuthService>,
    pub songs: Arc<SongService>,
}

impl AppState {
    pub fn new(
        db: Arc<dyn StorageContext>,
        auth_service: Arc<AuthService>,
        songs: Arc<SongService>,
    ) -> Self {
        Self {
            db,
            auth_service,
            songs,
        }
    }

    /// Connect the database, prepare audio storage and wire the services
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        let db: Arc<dyn StorageContext> =
            Arc::new(LocalStorageContext::connect(&config.storage.database_url).await?);
        tracing::info!("Database connected");

        let file_storage = FileStorage::new(config.storage.audio_storage_path.clone());
        file_storage.initialize().await?;
        tracing::info!(
            path = %config.storage.audio_storage_path.display(),
            "Audio storage initialized"
        );

        let auth_service = Arc::new(
            AuthService::new(
                config.auth.jwt_secret.clone(),
                config.auth.jwt_expiration_hours,
                config.auth.jwt_refresh_expiration_days,
            )
            .with_hash_cost(config.auth.bcrypt_cost),
        );

        let catalog = GenreCatalog::new(config.catalog.genre_set);
        tracing::info!(
            genre_set = ?catalog.set(),
            genres = catalog.members().len(),
            "Genre catalog loaded"
        );

        let songs = Arc::new(SongService::new(
            Arc::clone(&db),
            Arc::new(file_storage),
            Arc::new(LoftyDurationProbe),
            catalog,
        ));

        Ok(Self::new(db, auth_service, songs))
    }

    pub fn guard(&self) -> &ArtistGuard {
        self.songs.guard()
    }
}
