//! Token endpoint and bearer authentication.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, FromRef, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use session::api::TokenResponse;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// BEARER EXTRACTOR
// =============================================================================

/// Caller authenticated by an `Authorization: Bearer` access token.
/// Use as a handler parameter to require authentication.
pub struct BearerUser {
    pub username: String,
}

/// Token from the first `Authorization` header of the form `Bearer <token>`.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(AUTHORIZATION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| {
            let (scheme, token) = value.split_once(' ')?;
            let token = token.trim();
            (scheme == "Bearer" && !token.is_empty()).then_some(token)
        })
}

impl<S> axum::extract::FromRequestParts<S> for BearerUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::MissingAuthorization)?;
        let app_state = AppState::from_ref(state);

        let username = app_state.tokens.lock().await.validate(token).ok_or(ApiError::InvalidToken)?;
        if !app_state.directory.read().await.is_active(&username) {
            tracing::info!(%username, "rejecting token of inactive user");
            app_state.tokens.lock().await.revoke_user(&username);
            return Err(ApiError::InvalidToken);
        }
        Ok(Self { username })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Serialize)]
pub struct PingResponse {
    status: &'static str,
}

/// `GET /api/ping`
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { status: "ok" })
}

/// Form body of `POST /api/token`: credentials, or a refresh token.
#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub refresh_token: Option<String>,
}

/// `POST /api/token`: exchange credentials or a refresh token for tokens.
pub async fn token(
    State(state): State<AppState>,
    form: Result<Form<TokenRequest>, FormRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Form(request) = form.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    if let Some(refresh_token) = request.refresh_token.as_deref().filter(|t| !t.is_empty()) {
        let (username, pair) = state
            .tokens
            .lock()
            .await
            .refresh(refresh_token)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        tracing::info!(%username, "access token refreshed");
        return Ok(Json(token_response(pair)));
    }

    let (Some(username), Some(password)) = (request.username, request.password) else {
        return Err(ApiError::InvalidRequest("Missing required parameter USERNAME or PASSWORD".to_owned()));
    };
    let username = username.trim().to_owned();

    state
        .directory
        .read()
        .await
        .authenticate(&username, &password)
        .map_err(|e| {
            tracing::warn!(%username, error = %e, "token request rejected");
            ApiError::InvalidRequest(e.to_string())
        })?;

    let pair = state.tokens.lock().await.issue(&username);
    tracing::info!(%username, "access token issued");
    Ok(Json(token_response(pair)))
}

fn token_response(pair: crate::tokens::TokenPair) -> TokenResponse {
    TokenResponse {
        token_type: "bearer".to_owned(),
        access_token: pair.access_token,
        refresh_token: Some(pair.refresh_token),
    }
}
