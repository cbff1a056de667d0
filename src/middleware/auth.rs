use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::auth::BasicCredentials;
use crate::error::ApiError;
use crate::AppState;

/// Authenticated caller, resolved from HTTP Basic credentials.
///
/// Declaring this extractor on a handler puts the route behind the auth
/// gate: credentials are resolved against the credential store and verified
/// before the handler body runs, so a rejected request never touches a
/// repository. Every failure cause - missing header, malformed header,
/// unknown user, wrong password - collapses into the same 401 response so
/// callers cannot probe which case occurred.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::AuthRequired)?;

        let credentials = BasicCredentials::parse(header).ok_or(ApiError::AuthRequired)?;

        // A store fault here is a 5xx, not a 401; only a clean miss rejects
        let user = state
            .users
            .find_by_username(&credentials.username)
            .await?
            .ok_or(ApiError::AuthRequired)?;

        if !state.hasher.verify(&credentials.password, &user.password_hash) {
            return Err(ApiError::AuthRequired);
        }

        Ok(AuthUser {
            id: user.id,
            username: user.username,
        })
    }
}
