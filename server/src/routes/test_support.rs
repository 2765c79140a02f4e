use std::time::Duration;

use tokio::net::TcpListener;

use super::app;
use crate::directory::UserDirectory;
use crate::state::AppState;
use crate::tokens::TokenIssuer;

pub(crate) const SEED: &str = r"
users:
  - username: admin
    password: s3cret!
  - username: carol
    password: carol-pw
    status: RESET_REQUIRED
    enabled: true
";

/// Serve the API on an ephemeral port; returns the base URL.
pub(crate) async fn spawn(ttl: Duration) -> (String, AppState) {
    let directory = UserDirectory::from_yaml(SEED).expect("seed");
    let state = AppState::new(directory, TokenIssuer::new(ttl));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let router = app(state.clone(), None);
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    (format!("http://{addr}"), state)
}

pub(crate) async fn login(base: &str, username: &str, password: &str) -> String {
    let body: serde_json::Value = reqwest::Client::new()
        .post(format!("{base}/api/token"))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    body["access_token"].as_str().expect("access_token").to_owned()
}
