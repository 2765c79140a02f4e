//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! user directory and the token issuer are separate locks; no handler holds
//! both at once.

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::directory::UserDirectory;
use crate::tokens::TokenIssuer;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<RwLock<UserDirectory>>,
    pub tokens: Arc<Mutex<TokenIssuer>>,
}

impl AppState {
    #[must_use]
    pub fn new(directory: UserDirectory, tokens: TokenIssuer) -> Self {
        Self {
            directory: Arc::new(RwLock::new(directory)),
            tokens: Arc::new(Mutex::new(tokens)),
        }
    }
}
