mod config;
mod directory;
mod error;
mod routes;
mod state;
mod tokens;

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::directory::UserDirectory;
use crate::tokens::TokenIssuer;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env().expect("invalid configuration");

    let directory = match &config.users_file {
        Some(path) => UserDirectory::load(path).expect("failed to load users file"),
        None => {
            tracing::warn!("ADMIN_USERS_FILE not set; seeding default admin/admin account");
            UserDirectory::with_default_admin()
        }
    };
    tracing::info!(users = directory.len(), "user directory ready");

    let tokens = TokenIssuer::new(config.access_token_ttl).with_refresh_ttl(config.refresh_token_ttl);
    let state = state::AppState::new(directory, tokens);
    let app = routes::app(state, config.static_dir.as_deref());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, static_dir = ?config.static_dir, "admin backend listening");
    axum::serve(listener, app).await.expect("server failed");
}
