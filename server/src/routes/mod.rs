//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/api/ping` and `/api/token` are public; everything under `/api/user/`
//! requires a bearer token via the [`auth::BearerUser`] extractor. Any other
//! path falls through to the built client when a static directory is
//! configured.

pub mod auth;
pub mod users;

#[cfg(test)]
#[path = "test_support.rs"]
pub(crate) mod test_support;

use std::path::Path;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use session::api::{LIST_USERS_PATH, PING_PATH, REGISTER_USER_PATH, TOKEN_PATH};

use crate::state::AppState;

fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(PING_PATH, get(auth::ping))
        .route(TOKEN_PATH, post(auth::token))
        .route(LIST_USERS_PATH, get(users::list_users))
        .route(REGISTER_USER_PATH, post(users::register_user))
        .layer(cors)
        .with_state(state)
}

/// Full application router: API plus optional static client.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = match static_dir {
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            api_routes(state).fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => api_routes(state),
    };
    router.layer(TraceLayer::new_for_http())
}
