//! Bearer-token session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The operator's access token is the only piece of client-side state shared
//! across components. [`Session`] is the single source of truth for "is there
//! a session"; it is an explicit value handed to whoever needs it (Leptos
//! context in the browser, a function argument in the CLI) rather than a
//! module-level global.
//!
//! The persistence medium is abstracted by [`TokenStore`]. The browser uses
//! `document.cookie`, the CLI a cookie-jar file, tests [`MemoryTokenStore`].
//! Expiry is enforced by the medium, never by [`Session`].

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::error::StoreError;

/// Cookie key holding the access token.
pub const TOKEN_KEY: &str = "__access_token";

/// Lifetime of a persisted token: seven days.
pub const TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Persistence medium for a single token value.
pub trait TokenStore {
    /// Raw stored value, if any. Expired values must read as `None`.
    fn load(&self) -> Option<String>;

    /// Persist `token`, replacing any previous value, valid for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the medium rejects the write.
    fn save(&self, token: &str, ttl: Duration) -> Result<(), StoreError>;

    /// Remove the stored value. Removing an absent value is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the medium rejects the removal.
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-process token store. Clones share the same slot.
///
/// Ignores `ttl`; the value lives until cleared or the process exits.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn save(&self, token: &str, _ttl: Duration) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        Ok(())
    }
}

/// Operator session backed by an injected [`TokenStore`].
#[derive(Clone, Debug, Default)]
pub struct Session<S> {
    store: S,
}

impl<S: TokenStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// True iff a non-empty token is present.
    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Current token. An empty stored value reads as absent.
    pub fn token(&self) -> Option<String> {
        self.store.load().filter(|token| !token.is_empty())
    }

    /// Persist `token` for [`TOKEN_TTL`], overwriting any existing token.
    ///
    /// # Errors
    ///
    /// Propagates the store's write failure.
    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.save(token, TOKEN_TTL)?;
        log::debug!("session token stored");
        Ok(())
    }

    /// Drop the persisted token. Idempotent.
    ///
    /// # Errors
    ///
    /// Propagates the store's removal failure.
    pub fn log_out(&self) -> Result<(), StoreError> {
        self.store.clear()?;
        log::debug!("session token cleared");
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// `document.cookie` assignment that stores `token` for `ttl`.
#[must_use]
pub fn set_cookie_value(token: &str, ttl: Duration) -> String {
    format!(
        "{TOKEN_KEY}={}; Max-Age={}; Path=/; SameSite=Lax",
        urlencoding::encode(token),
        ttl.as_secs()
    )
}

/// `document.cookie` assignment that expires the token immediately.
#[must_use]
pub fn clear_cookie_value() -> String {
    format!("{TOKEN_KEY}=; Max-Age=0; Path=/; SameSite=Lax")
}

/// Look up `key` in a `name=value; name=value` cookie string.
///
/// Values are percent-decoded; a value that fails to decode is returned raw.
#[must_use]
pub fn read_cookie(cookies: &str, key: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| {
            urlencoding::decode(value).map_or_else(|_| value.to_owned(), |decoded| decoded.into_owned())
        })
}
