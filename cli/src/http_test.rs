use std::time::Duration;

use session::api::{ApiConfig, token_request, user_list_request};
use session::{MemoryTokenStore, Session};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn transport() -> HttpTransport {
    HttpTransport::new(Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn forwards_method_headers_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("username=admin&password=pw"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"access_token":"abc123"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let config = ApiConfig::new(server.uri());
    let response = transport()
        .send(token_request(&config, "admin", "pw"))
        .await
        .expect("send");

    assert_eq!(response.status, 200);
    assert_eq!(response.body, r#"{"access_token":"abc123"}"#);
}

#[tokio::test]
async fn non_2xx_is_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/list"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid_token"}"#))
        .mount(&server)
        .await;

    let config = ApiConfig::new(server.uri());
    let session = Session::new(MemoryTokenStore::new());
    let response = transport()
        .send(user_list_request(&config, &session))
        .await
        .expect("send");

    assert_eq!(response.status, 401);
    assert!(!response.is_success());
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let config = ApiConfig::new("http://127.0.0.1:9");
    let session = Session::new(MemoryTokenStore::new());
    let err = transport()
        .send(user_list_request(&config, &session))
        .await
        .expect_err("nothing listens on the discard port");

    assert_eq!(err.kind(), "network");
}
