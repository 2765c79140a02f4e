//! REST contract with the admin backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two endpoints matter to the console:
//!
//! - `POST {base}/api/token`: form-encoded credentials, answers
//!   `{"access_token": ...}`.
//! - `GET {base}/api/user/list`: bearer-authenticated, answers
//!   `{"users": [...]}` or `{"error": ...}`.
//!
//! Requests are built here as plain [`ApiRequest`] values so the same
//! construction (URL, headers, body encoding) is shared by the browser and CLI
//! transports and can be asserted on in tests without a network.
//!
//! ERROR HANDLING
//! ==============
//! Decoding is status-first: a non-2xx response becomes
//! [`FetchError::Status`] without its body ever being parsed. A 2xx body that
//! carries an `error` field is a [`FetchError::Logical`] failure.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FetchError;
use crate::store::{Session, TokenStore};

pub const PING_PATH: &str = "/api/ping";
pub const TOKEN_PATH: &str = "/api/token";
pub const LIST_USERS_PATH: &str = "/api/user/list";
pub const REGISTER_USER_PATH: &str = "/api/user/register";

/// Port the backend listens on unless configured otherwise.
pub const DEFAULT_BACKEND_PORT: &str = "5000";

const CONTENT_TYPE: &str = "Content-Type";
const AUTHORIZATION: &str = "Authorization";
const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// Where the backend lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Build from an explicit base such as `http://127.0.0.1:5000`.
    /// Trailing slashes are dropped.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }

    /// Resolve the base from the page hostname plus optional overrides.
    ///
    /// `host_override` replaces the whole `scheme://host` part;
    /// `port_override` replaces [`DEFAULT_BACKEND_PORT`].
    #[must_use]
    pub fn resolve(hostname: &str, host_override: Option<&str>, port_override: Option<&str>) -> Self {
        let host = host_override
            .filter(|host| !host.is_empty())
            .map_or_else(|| format!("http://{hostname}"), |host| host.trim_end_matches('/').to_owned());
        let port = port_override.filter(|port| !port.is_empty()).unwrap_or(DEFAULT_BACKEND_PORT);
        Self::new(format!("{host}:{port}"))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The API root, e.g. `http://host:5000/api/`.
    #[must_use]
    pub fn root(&self) -> String {
        format!("{}/api/", self.base_url)
    }

    /// Absolute URL for an `/api/...` path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A fully described HTTP request, ready for a transport to execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    /// First header value named `name` (ASCII case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body text of a completed exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Pass 2xx responses through; map anything else to
    /// [`FetchError::Status`] without looking at the body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] for non-2xx statuses.
    pub fn ensure_success(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status { status: self.status, body: self.body })
        }
    }
}

/// Account status as reported by the identity backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Unconfirmed,
    Confirmed,
    Archived,
    Compromised,
    ResetRequired,
    ForceChangePassword,
    #[serde(other)]
    Unknown,
}

impl UserStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unconfirmed => "UNCONFIRMED",
            Self::Confirmed => "CONFIRMED",
            Self::Archived => "ARCHIVED",
            Self::Compromised => "COMPROMISED",
            Self::ResetRequired => "RESET_REQUIRED",
            Self::ForceChangePassword => "FORCE_CHANGE_PASSWORD",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the user list. Every field is optional on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub username: Option<String>,
    /// RFC 3339 creation timestamp.
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub status: Option<UserStatus>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// `{"users": [...]}` success body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

/// `/api/token` success body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(default = "bearer")]
    pub token_type: String,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

fn bearer() -> String {
    "bearer".to_owned()
}

/// `{"error": ..., "error_description": ...}` body used by every failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

/// `GET /api/user/list`, with the session's bearer token when one is held.
pub fn user_list_request<S: TokenStore>(config: &ApiConfig, session: &Session<S>) -> ApiRequest {
    let mut headers = Vec::with_capacity(2);
    if let Some(token) = session.token() {
        headers.push((AUTHORIZATION, format!("Bearer {token}")));
    }
    headers.push((CONTENT_TYPE, JSON.to_owned()));
    ApiRequest {
        method: Method::Get,
        url: config.url(LIST_USERS_PATH),
        headers,
        body: None,
    }
}

/// `POST /api/token` with form-encoded credentials. Never carries a bearer.
#[must_use]
pub fn token_request(config: &ApiConfig, username: &str, password: &str) -> ApiRequest {
    let body = format!(
        "username={}&password={}",
        urlencoding::encode(username),
        urlencoding::encode(password)
    );
    ApiRequest {
        method: Method::Post,
        url: config.url(TOKEN_PATH),
        headers: vec![(CONTENT_TYPE, FORM.to_owned())],
        body: Some(body),
    }
}

/// `GET /api/ping`.
#[must_use]
pub fn ping_request(config: &ApiConfig) -> ApiRequest {
    ApiRequest {
        method: Method::Get,
        url: config.url(PING_PATH),
        headers: Vec::new(),
        body: None,
    }
}

/// Decode a user-list response, status first.
///
/// # Errors
///
/// [`FetchError::Status`] for non-2xx, otherwise see [`user_list_from_body`].
pub fn decode_user_list(response: RawResponse) -> Result<Vec<User>, FetchError> {
    let response = response.ensure_success()?;
    user_list_from_body(&response.body)
}

/// Decode the body of a successful user-list response.
///
/// # Errors
///
/// [`FetchError::Parse`] if the body is not JSON or lacks `users`;
/// [`FetchError::Logical`] if it carries an `error` field.
pub fn user_list_from_body(body: &str) -> Result<Vec<User>, FetchError> {
    let mut value: Value = serde_json::from_str(body)?;
    reject_error_field(&value)?;
    let users = value
        .get_mut("users")
        .map(Value::take)
        .ok_or_else(|| FetchError::Parse("missing field `users`".to_owned()))?;
    Ok(serde_json::from_value(users)?)
}

/// Decode a token response, status first, into the access token.
///
/// # Errors
///
/// [`FetchError::Status`] for non-2xx, otherwise see [`token_from_body`].
pub fn decode_token(response: RawResponse) -> Result<String, FetchError> {
    let response = response.ensure_success()?;
    token_from_body(&response.body)
}

/// Decode the body of a successful token response.
///
/// # Errors
///
/// [`FetchError::Parse`] if the body is not JSON or lacks `access_token`;
/// [`FetchError::Logical`] if it carries an `error` field or a blank token.
pub fn token_from_body(body: &str) -> Result<String, FetchError> {
    let value: Value = serde_json::from_str(body)?;
    reject_error_field(&value)?;
    let token: TokenResponse = serde_json::from_value(value)?;
    if token.access_token.trim().is_empty() {
        return Err(FetchError::Logical("empty access_token".to_owned()));
    }
    Ok(token.access_token)
}

/// Best human-readable message from an error body, for status failures.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    Some(parsed.error_description.unwrap_or(parsed.error))
}

fn reject_error_field(value: &Value) -> Result<(), FetchError> {
    match value.get("error") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::String(message)) => {
            let description = value.get("error_description").and_then(Value::as_str);
            Err(FetchError::Logical(description.map_or_else(|| message.clone(), ToOwned::to_owned)))
        }
        Some(other) => Err(FetchError::Logical(other.to_string())),
    }
}
