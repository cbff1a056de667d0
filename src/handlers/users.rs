use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /users/ - register a new account. Deliberately unauthenticated.
///
/// The plaintext password exists only long enough to be hashed; it is never
/// persisted or logged.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<Value>, ApiError> {
    let username = payload
        .username
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::bad_request("username is required"))?;
    let password = payload
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("password is required"))?;

    // Fast-path check; the store's UNIQUE constraint remains the
    // authoritative guard against a concurrent registration
    if state.users.find_by_username(&username).await?.is_some() {
        return Err(ApiError::conflict(format!(
            "username '{}' is already taken",
            username
        )));
    }

    let password_hash = state.hasher.hash(&password).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("registration failed")
    })?;

    let user = state.users.create(&username, &password_hash).await?;

    Ok(Json(json!({ "id": user.id })))
}

/// GET /users/ - authenticated probe.
///
/// Exists to prove the basic-auth gate accepted; returns the caller's
/// identity rather than a trip listing (that lives at GET /trips/).
pub async fn whoami(user: AuthUser) -> Json<Value> {
    Json(json!({ "username": user.username }))
}
