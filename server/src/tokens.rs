//! Access and refresh token issuance.
//!
//! Tokens are opaque random 32-byte hex strings. Access tokens expire after
//! the configured TTL. Refresh tokens mint a fresh access token on each use
//! and expire after their own TTL ([`REFRESH_TOKEN_TTL`] by default). Expired grants are pruned whenever
//! a new token is minted, so the maps stay bounded by live grants.

#[cfg(test)]
#[path = "tokens_test.rs"]
mod tokens_test;

use std::collections::HashMap;
use std::fmt::Write;
use std::time::{Duration, Instant};

use rand::Rng;

/// Default lifetime of a refresh token.
pub const REFRESH_TOKEN_TTL: Duration = Duration::from_secs(crate::config::DEFAULT_REFRESH_TOKEN_TTL_SECS);

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid Refresh Token")]
    UnknownRefreshToken,
}

#[derive(Debug)]
struct Grant {
    username: String,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct TokenIssuer {
    ttl: Duration,
    refresh_ttl: Duration,
    access: HashMap<String, Grant>,
    refresh: HashMap<String, Grant>,
}

impl TokenIssuer {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, refresh_ttl: REFRESH_TOKEN_TTL, access: HashMap::new(), refresh: HashMap::new() }
    }

    #[must_use]
    pub fn with_refresh_ttl(mut self, refresh_ttl: Duration) -> Self {
        self.refresh_ttl = refresh_ttl;
        self
    }

    /// Mint an access/refresh pair for `username`.
    pub fn issue(&mut self, username: &str) -> TokenPair {
        let now = Instant::now();
        self.refresh.retain(|_, grant| grant.expires_at > now);
        let refresh_token = generate_token();
        self.refresh.insert(
            refresh_token.clone(),
            Grant { username: username.to_owned(), expires_at: now + self.refresh_ttl },
        );
        let access_token = self.grant_access(username);
        TokenPair { access_token, refresh_token }
    }

    /// Mint a new access token from a refresh token. The refresh token stays
    /// valid.
    ///
    /// # Errors
    ///
    /// [`TokenError::UnknownRefreshToken`] if it was never issued, was
    /// revoked, or has expired.
    pub fn refresh(&mut self, refresh_token: &str) -> Result<(String, TokenPair), TokenError> {
        let grant = self.refresh.get(refresh_token).ok_or(TokenError::UnknownRefreshToken)?;
        if grant.expires_at <= Instant::now() {
            self.refresh.remove(refresh_token);
            return Err(TokenError::UnknownRefreshToken);
        }
        let username = grant.username.clone();
        let access_token = self.grant_access(&username);
        Ok((username, TokenPair { access_token, refresh_token: refresh_token.to_owned() }))
    }

    /// Username behind a live access token. Expired tokens are dropped.
    pub fn validate(&mut self, access_token: &str) -> Option<String> {
        let grant = self.access.get(access_token)?;
        if grant.expires_at <= Instant::now() {
            self.access.remove(access_token);
            return None;
        }
        Some(grant.username.clone())
    }

    /// Forget every token held by `username`.
    pub fn revoke_user(&mut self, username: &str) {
        self.access.retain(|_, grant| grant.username != username);
        self.refresh.retain(|_, grant| grant.username != username);
    }

    fn grant_access(&mut self, username: &str) -> String {
        let now = Instant::now();
        self.access.retain(|_, grant| grant.expires_at > now);
        let token = generate_token();
        self.access.insert(
            token.clone(),
            Grant { username: username.to_owned(), expires_at: now + self.ttl },
        );
        token
    }
}
