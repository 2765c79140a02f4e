use session::{FetchError, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("missing password; pass --password or set ADMIN_PASSWORD")]
    MissingPassword,
    #[error("{0}")]
    Fetch(#[from] FetchError),
    #[error("session file: {0}")]
    Store(#[from] StoreError),
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{message} ({kind})")]
    Reported { message: &'static str, kind: &'static str },
}
