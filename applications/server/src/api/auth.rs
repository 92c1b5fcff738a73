/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

fn invalid_credentials() -> ServerError {
    ServerError::Auth("Invalid username or password".to_string())
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let password_hash = app_state
        .db
        .get_password_hash(&req.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        tracing::warn!(user = %req.username, "Login rejected");
        return Err(invalid_credentials());
    }

    let access_token = app_state.auth_service.create_access_token(&req.username)?;
    let refresh_token = app_state.auth_service.create_refresh_token(&req.username)?;

    tracing::info!(user = %req.username, "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
    }))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let name = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    // Deleted accounts cannot mint new tokens
    if app_state.db.get_role(&name).await?.is_none() {
        return Err(ServerError::Auth("Account no longer exists".to_string()));
    }

    let access_token = app_state.auth_service.create_access_token(&name)?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}
