//! Error taxonomy shared by every transport and consumer.
//!
//! DESIGN
//! ======
//! Network, status, parse, and logical failures all travel through the same
//! failure path of the fetch lifecycle. They stay distinct variants so callers
//! that care (the CLI exit message, tests) can tell them apart, while the UI
//! collapses them into [`FETCH_FAILED_MESSAGE`].

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Fixed, non-specific message surfaced to operators when a fetch fails.
pub const FETCH_FAILED_MESSAGE: &str = "Error Fetching data";

/// Failure of a single request/decode cycle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, refused, timeout, CORS).
    #[error("network request failed: {0}")]
    Network(String),
    /// The server answered with a non-2xx status. The body is kept verbatim
    /// and is never parsed.
    #[error("server responded with HTTP {status}")]
    Status { status: u16, body: String },
    /// The body was not the JSON shape we expected.
    #[error("response body could not be decoded: {0}")]
    Parse(String),
    /// The body parsed but carried an application-level `error` field.
    #[error("server reported an error: {0}")]
    Logical(String),
}

impl FetchError {
    /// Short machine-friendly label for the failure kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Status { .. } => "status",
            Self::Parse(_) => "parse",
            Self::Logical(_) => "logical",
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}

/// Failure to persist or remove the session token.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing medium is not reachable (no `document`, no home directory).
    #[error("token storage unavailable: {0}")]
    Unavailable(String),
    /// Reading or writing the backing file failed.
    #[error("token storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The persisted record could not be encoded.
    #[error("token record could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}
