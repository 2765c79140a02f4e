//! Server configuration from the environment.
//!
//! `main` loads `.env` through `dotenvy` first, so every key here can also
//! come from that file.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 3600;
pub const DEFAULT_REFRESH_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// YAML file seeding the user directory; a default admin is used without it.
    pub users_file: Option<PathBuf>,
    /// Built client assets served for non-API paths.
    pub static_dir: Option<PathBuf>,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => parse_number("PORT", &raw)?,
            None => DEFAULT_PORT,
        };
        let ttl_secs = match get("ACCESS_TOKEN_TTL_SECS") {
            Some(raw) => parse_number("ACCESS_TOKEN_TTL_SECS", &raw)?,
            None => DEFAULT_ACCESS_TOKEN_TTL_SECS,
        };
        let refresh_secs = match get("REFRESH_TOKEN_TTL_SECS") {
            Some(raw) => parse_number("REFRESH_TOKEN_TTL_SECS", &raw)?,
            None => DEFAULT_REFRESH_TOKEN_TTL_SECS,
        };

        Ok(Self {
            port,
            users_file: get("ADMIN_USERS_FILE").map(PathBuf::from),
            static_dir: get("ADMIN_STATIC_DIR").map(PathBuf::from),
            access_token_ttl: Duration::from_secs(ttl_secs),
            refresh_token_ttl: Duration::from_secs(refresh_secs),
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::InvalidNumber { key, value: raw.to_owned() })
}
