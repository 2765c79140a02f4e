//! JSON error responses.
//!
//! Every failure body is `{"error": ...}`, with `error_description` for
//! token-endpoint failures, matching what the clients decode.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use session::api::ErrorBody;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("missing_authorization_header")]
    MissingAuthorization,
    #[error("invalid_token")]
    InvalidToken,
    /// Token endpoint failure, reported as `invalid_request` plus a description.
    #[error("invalid_request: {0}")]
    InvalidRequest(String),
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingAuthorization | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::InvalidRequest(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            Self::InvalidRequest(description) => ErrorBody {
                error: "invalid_request".to_owned(),
                error_description: Some(description.clone()),
            },
            other => ErrorBody { error: other.to_string(), error_description: None },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
