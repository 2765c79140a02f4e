use std::time::Duration;

use axum::http::HeaderValue;
use session::api::{ApiConfig, decode_token, token_request};
use session::{FetchError, RawResponse};

use super::*;
use crate::routes::test_support::{login, spawn};

// =============================================================================
// bearer_token
// =============================================================================

fn headers(values: &[&str]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for value in values {
        map.append(AUTHORIZATION, HeaderValue::from_str(value).expect("header"));
    }
    map
}

#[test]
fn bearer_token_requires_scheme_and_value() {
    assert_eq!(bearer_token(&headers(&["Bearer abc123"])), Some("abc123"));
    assert_eq!(bearer_token(&headers(&[])), None);
    assert_eq!(bearer_token(&headers(&["Basic abc123"])), None);
    assert_eq!(bearer_token(&headers(&["Bearer"])), None);
    assert_eq!(bearer_token(&headers(&["Bearer   "])), None);
}

#[test]
fn bearer_token_scans_every_authorization_header() {
    assert_eq!(bearer_token(&headers(&["Basic x", "Bearer second"])), Some("second"));
}

// =============================================================================
// HTTP
// =============================================================================

async fn send(request: session::ApiRequest) -> RawResponse {
    let client = reqwest::Client::new();
    let mut builder = match request.method {
        session::api::Method::Get => client.get(&request.url),
        session::api::Method::Post => client.post(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(*name, value);
    }
    if let Some(body) = request.body {
        builder = builder.body(body);
    }
    let response = builder.send().await.expect("send");
    let status = response.status().as_u16();
    RawResponse::new(status, response.text().await.expect("body"))
}

#[tokio::test]
async fn ping_reports_ok() {
    let (base, _) = spawn(Duration::from_secs(60)).await;
    let body: serde_json::Value = reqwest::get(format!("{base}/api/ping"))
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    assert_eq!(body, serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn form_credentials_yield_bearer_pair() {
    let (base, _) = spawn(Duration::from_secs(60)).await;
    let response = send(token_request(&ApiConfig::new(&base), "admin", "s3cret!")).await;
    assert_eq!(response.status, 200);

    let body: TokenResponse = serde_json::from_str(&response.body).expect("json");
    assert_eq!(body.token_type, "bearer");
    assert_eq!(body.access_token.len(), 64);
    assert!(body.refresh_token.is_some());
    assert_eq!(decode_token(response).expect("decode"), body.access_token);
}

#[tokio::test]
async fn wrong_password_is_invalid_request() {
    let (base, _) = spawn(Duration::from_secs(60)).await;
    let response = send(token_request(&ApiConfig::new(&base), "admin", "nope")).await;

    assert_eq!(response.status, 400);
    let body: serde_json::Value = serde_json::from_str(&response.body).expect("json");
    assert_eq!(body["error"], "invalid_request");
    assert_eq!(body["error_description"], "Incorrect username or password.");
    assert!(matches!(decode_token(response), Err(FetchError::Status { status: 400, .. })));
}

#[tokio::test]
async fn missing_fields_are_invalid_request() {
    let (base, _) = spawn(Duration::from_secs(60)).await;
    let response = reqwest::Client::new()
        .post(format!("{base}/api/token"))
        .form(&[("username", "admin")])
        .send()
        .await
        .expect("send");
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("json");
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn refresh_token_mints_new_access_token() {
    let (base, _) = spawn(Duration::from_secs(60)).await;
    let client = reqwest::Client::new();
    let first: TokenResponse = client
        .post(format!("{base}/api/token"))
        .form(&[("username", "admin"), ("password", "s3cret!")])
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    let refresh = first.refresh_token.clone().expect("refresh token");

    let second: TokenResponse = client
        .post(format!("{base}/api/token"))
        .form(&[("refresh_token", refresh.as_str())])
        .send()
        .await
        .expect("send")
        .json()
        .await
        .expect("json");
    assert_ne!(second.access_token, first.access_token);
    assert_eq!(second.refresh_token, Some(refresh));

    let bogus = client
        .post(format!("{base}/api/token"))
        .form(&[("refresh_token", "bogus")])
        .send()
        .await
        .expect("send");
    assert_eq!(bogus.status().as_u16(), 400);
}

#[tokio::test]
async fn login_helper_returns_usable_token() {
    let (base, state) = spawn(Duration::from_secs(60)).await;
    let token = login(&base, "carol", "carol-pw").await;
    assert_eq!(state.tokens.lock().await.validate(&token).as_deref(), Some("carol"));
}
