//! In-memory user directory.
//!
//! DESIGN
//! ======
//! Stands in for the hosted identity provider: accounts are seeded from a
//! YAML file at startup and registrations live until the process exits.
//! Passwords are kept as salted SHA-256 digests. Newly registered accounts
//! start `UNCONFIRMED`, as they would with the real provider.

#[cfg(test)]
#[path = "directory_test.rs"]
mod directory_test;

use std::collections::BTreeMap;
use std::path::Path;

use rand::Rng;
use serde::Deserialize;
use session::{User, UserStatus};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::tokens::bytes_to_hex;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Incorrect username or password.")]
    InvalidCredentials,
    #[error("User account is disabled.")]
    Disabled,
    #[error("User already exists")]
    UsernameTaken,
    #[error("{0}")]
    InvalidInput(String),
    #[error("read users file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse users file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// One account as listed in the seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
    #[serde(default = "confirmed")]
    pub status: UserStatus,
    #[serde(default = "enabled")]
    pub enabled: bool,
}

fn confirmed() -> UserStatus {
    UserStatus::Confirmed
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    users: Vec<SeedUser>,
}

#[derive(Debug, Clone)]
struct Account {
    sub: Uuid,
    salt: String,
    password_hash: String,
    status: UserStatus,
    enabled: bool,
    created: OffsetDateTime,
}

#[derive(Debug, Default)]
pub struct UserDirectory {
    accounts: BTreeMap<String, Account>,
}

impl UserDirectory {
    /// Build a directory from seed accounts. Later duplicates are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::InvalidInput`] for a blank username.
    pub fn from_seed(seed: Vec<SeedUser>) -> Result<Self, DirectoryError> {
        let mut directory = Self::default();
        for user in seed {
            let username = normalize_username(&user.username)?;
            if directory.accounts.contains_key(&username) {
                tracing::warn!(%username, "duplicate seed user ignored");
                continue;
            }
            directory
                .accounts
                .insert(username, Account::new(&user.password, user.status, user.enabled));
        }
        Ok(directory)
    }

    /// Parse a seed file: `users: [{username, password, status?, enabled?}]`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Yaml`] for malformed YAML.
    pub fn from_yaml(raw: &str) -> Result<Self, DirectoryError> {
        let file: SeedFile = serde_yaml::from_str(raw)?;
        Self::from_seed(file.users)
    }

    /// # Errors
    ///
    /// Returns [`DirectoryError::Io`] if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }

    /// Directory with a single `admin`/`admin` account for local development.
    pub fn with_default_admin() -> Self {
        let mut directory = Self::default();
        directory
            .accounts
            .insert("admin".to_owned(), Account::new("admin", UserStatus::Confirmed, true));
        directory
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Check a username/password pair.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::InvalidCredentials`] for an unknown user or wrong
    /// password, [`DirectoryError::Disabled`] for a disabled account.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<(), DirectoryError> {
        let account = self
            .accounts
            .get(username.trim())
            .ok_or(DirectoryError::InvalidCredentials)?;
        if hash_password(&account.salt, password) != account.password_hash {
            return Err(DirectoryError::InvalidCredentials);
        }
        if !account.enabled {
            return Err(DirectoryError::Disabled);
        }
        Ok(())
    }

    /// Whether `username` names an enabled account.
    pub fn is_active(&self, username: &str) -> bool {
        self.accounts.get(username).is_some_and(|account| account.enabled)
    }

    /// Add an account and return its subject id.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::InvalidInput`] for a blank username or short
    /// password, [`DirectoryError::UsernameTaken`] for a duplicate.
    pub fn register(&mut self, username: &str, password: &str) -> Result<Uuid, DirectoryError> {
        let username = normalize_username(username)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DirectoryError::InvalidInput(format!(
                "Password must have length greater than or equal to {MIN_PASSWORD_LEN}"
            )));
        }
        if self.accounts.contains_key(&username) {
            return Err(DirectoryError::UsernameTaken);
        }
        let account = Account::new(password, UserStatus::Unconfirmed, true);
        let sub = account.sub;
        tracing::info!(%username, %sub, "user registered");
        self.accounts.insert(username, account);
        Ok(sub)
    }

    /// Every account, ordered by username, in the wire shape.
    pub fn list(&self) -> Vec<User> {
        self.accounts
            .iter()
            .map(|(username, account)| User {
                username: Some(username.clone()),
                created: account.created.format(&Rfc3339).ok(),
                status: Some(account.status),
                enabled: Some(account.enabled),
            })
            .collect()
    }
}

impl Account {
    fn new(password: &str, status: UserStatus, enabled: bool) -> Self {
        let salt: [u8; 16] = rand::rng().random();
        let salt = bytes_to_hex(&salt);
        Self {
            sub: Uuid::new_v4(),
            password_hash: hash_password(&salt, password),
            salt,
            status,
            enabled,
            created: OffsetDateTime::now_utc(),
        }
    }
}

fn normalize_username(raw: &str) -> Result<String, DirectoryError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(DirectoryError::InvalidInput("username is required".to_owned()));
    }
    Ok(username.to_owned())
}

pub(crate) fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    bytes_to_hex(&hasher.finalize())
}
