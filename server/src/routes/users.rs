//! User directory routes. Both require a bearer token.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use session::api::UserListResponse;
use uuid::Uuid;

use super::auth::BearerUser;
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/user/list`
pub async fn list_users(State(state): State<AppState>, caller: BearerUser) -> Json<UserListResponse> {
    let users = state.directory.read().await.list();
    tracing::debug!(caller = %caller.username, count = users.len(), "user list");
    Json(UserListResponse { users })
}

#[derive(Debug, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub status: &'static str,
    pub sub: Uuid,
}

/// `POST /api/user/register`: 202 with the new account's subject id.
pub async fn register_user(
    State(state): State<AppState>,
    caller: BearerUser,
    body: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegistrationResponse>), ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let sub = state
        .directory
        .write()
        .await
        .register(&request.username, &request.password)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    tracing::info!(caller = %caller.username, username = %request.username.trim(), "registration accepted");
    Ok((StatusCode::ACCEPTED, Json(RegistrationResponse { status: "registered", sub })))
}
