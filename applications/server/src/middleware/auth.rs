/// Bearer-token authentication
use crate::{error::ServerError, state::AppState};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

/// Account name carried by a verified access token.
/// Used as an extractor in every protected handler.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl AuthenticatedUser {
    pub fn name(&self) -> &str {
        &self.0
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ServerError::Auth("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ServerError::Auth("Expected a bearer token".to_string()))?;

        let app_state = AppState::from_ref(state);
        let name = app_state
            .auth_service
            .verify_access_token(token)
            .map_err(|e| {
                tracing::warn!("Token verification failed: {}", e);
                ServerError::Auth("Invalid token".to_string())
            })?;

        let user = AuthenticatedUser(name);
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
