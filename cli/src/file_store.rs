//! Cookie-jar file for the CLI session.
//!
//! The file holds one JSON record `{name, value, expires_at}` with
//! `expires_at` in unix seconds. An expired or unreadable record reads as
//! no session, the same way a browser drops an expired cookie.

#[cfg(test)]
#[path = "file_store_test.rs"]
mod file_store_test;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use session::{StoreError, TOKEN_KEY, TokenStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CookieRecord {
    name: String,
    value: String,
    expires_at: u64,
}

#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Expiry of the stored record, if one is present and still valid.
    pub fn expires_at(&self) -> Option<u64> {
        self.read_record().map(|record| record.expires_at)
    }

    fn read_record(&self) -> Option<CookieRecord> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let record: CookieRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
                return None;
            }
        };
        if record.name != TOKEN_KEY || record.expires_at <= unix_now() {
            return None;
        }
        Some(record)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        self.read_record().map(|record| record.value)
    }

    fn save(&self, token: &str, ttl: Duration) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let record = CookieRecord {
            name: TOKEN_KEY.to_owned(),
            value: token.to_owned(),
            expires_at: unix_now().saturating_add(ttl.as_secs()),
        };
        fs::write(&self.path, serde_json::to_vec_pretty(&record)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}
