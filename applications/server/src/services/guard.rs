/// Role checks for catalog mutations
use cadence_core::{CadenceError, Identity, Result, StorageContext};
use std::sync::Arc;

/// Resolves callers against storage and enforces the upload capability
#[derive(Clone)]
pub struct ArtistGuard {
    db: Arc<dyn StorageContext>,
}

impl ArtistGuard {
    pub fn new(db: Arc<dyn StorageContext>) -> Self {
        Self { db }
    }

    /// Current identity of an account, `None` if it no longer exists.
    ///
    /// The role is always read from storage so a deleted or re-registered
    /// account never keeps a stale role from its token.
    pub async fn resolve_identity(&self, name: &str) -> Result<Option<Identity>> {
        Ok(self.db.get_role(name).await?.map(|role| Identity {
            name: name.to_string(),
            role,
        }))
    }

    /// Succeeds only for an existing account holding the artist role
    pub async fn assert_can_upload(&self, name: &str) -> Result<Identity> {
        let identity = self
            .resolve_identity(name)
            .await?
            .ok_or_else(|| CadenceError::ArtistNotFound(name.to_string()))?;

        if !identity.can_upload() {
            tracing::warn!(caller = name, "Upload refused for non-artist account");
            return Err(CadenceError::UserNotArtist(name.to_string()));
        }

        Ok(identity)
    }
}
