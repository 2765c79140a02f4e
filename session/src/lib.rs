//! Shared session and data-fetch core for the admin console.
//!
//! This crate owns the pieces that the browser `client`, the `cli`, and the
//! dev `server` all agree on: bearer-token persistence, the REST wire schema
//! for `/api/token` and `/api/user/list`, and the pending/success/error
//! lifecycle that wraps a single fetch.
//!
//! Nothing here performs I/O on its own. Requests are described as
//! [`api::ApiRequest`] values and executed by a transport owned by the caller
//! (`gloo-net` in the browser, `reqwest` on the command line), and tokens are
//! persisted through whatever [`store::TokenStore`] the caller injects.

pub mod api;
pub mod error;
pub mod lifecycle;
pub mod store;

pub use api::{ApiConfig, ApiRequest, RawResponse, User, UserStatus};
pub use error::{FETCH_FAILED_MESSAGE, FetchError, StoreError};
pub use lifecycle::{FetchLifecycle, FetchState, Settled};
pub use store::{MemoryTokenStore, Session, TOKEN_KEY, TOKEN_TTL, TokenStore};
