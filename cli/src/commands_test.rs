use std::time::Duration;

use session::{FetchError, TokenStore, UserStatus};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

struct Fixture {
    _dir: tempfile::TempDir,
    ctx: CliContext,
}

fn fixture(server: &MockServer) -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = CliContext {
        config: ApiConfig::new(server.uri()),
        http: HttpTransport::new(Duration::from_secs(5)).expect("client"),
        session: Session::new(FileTokenStore::new(dir.path().join("session.json"))),
    };
    Fixture { _dir: dir, ctx }
}

fn users_body() -> &'static str {
    r#"{"users":[
        {"username":"alice","created":"2024-03-01T09:15:00+00:00","status":"CONFIRMED","enabled":true},
        {"username":"bob","status":"FORCE_CHANGE_PASSWORD","enabled":false}
    ]}"#
}

// =============================================================
// login / logout / status
// =============================================================

#[tokio::test]
async fn login_then_users_sends_the_new_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string("username=admin&password=pw"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"token_type":"bearer","access_token":"abc123"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/user/list"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(users_body()))
        .expect(1)
        .mount(&server)
        .await;

    let fx = fixture(&server);
    let out = login(&fx.ctx, "admin", Some("pw")).await.expect("login");
    assert_eq!(out, "logged in as admin");
    assert_eq!(fx.ctx.session.token().as_deref(), Some("abc123"));

    let table = users(&fx.ctx, false).await.expect("users");
    assert!(table.contains("alice"));
    assert!(table.contains("FORCE_CHANGE_PASSWORD"));
    assert!(table.ends_with("2 user(s)"));
}

#[tokio::test]
async fn rejected_login_keeps_session_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"{"error":"invalid_request","error_description":"Incorrect username or password."}"#,
        ))
        .mount(&server)
        .await;

    let fx = fixture(&server);
    let err = login(&fx.ctx, "admin", Some("nope")).await.expect_err("400");
    assert!(matches!(err, CliError::Fetch(FetchError::Status { status: 400, .. })));
    assert!(!fx.ctx.session.is_logged_in());
}

#[tokio::test]
async fn blank_access_token_is_not_a_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"access_token":""}"#))
        .mount(&server)
        .await;

    let fx = fixture(&server);
    let err = login(&fx.ctx, "admin", Some("pw")).await.expect_err("blank token");
    assert!(matches!(err, CliError::Fetch(FetchError::Logical(_))));
    assert!(!fx.ctx.session.is_logged_in());
    assert_eq!(status(&fx.ctx), "not logged in");
}

#[tokio::test]
async fn login_without_password_fails_before_any_request() {
    let server = MockServer::start().await;
    let fx = fixture(&server);
    let err = login(&fx.ctx, "admin", None).await.expect_err("no password");
    assert!(matches!(err, CliError::MissingPassword));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn status_and_logout_follow_the_session_file() {
    let server = MockServer::start().await;
    let fx = fixture(&server);
    assert_eq!(status(&fx.ctx), "not logged in");

    fx.ctx.session.set_token("tok").expect("save");
    let line = status(&fx.ctx);
    assert!(line == "logged in (token expires in 7d 0h)" || line == "logged in (token expires in 6d 23h)");

    assert_eq!(logout(&fx.ctx).expect("logout"), "logged out");
    assert_eq!(status(&fx.ctx), "not logged in");
    assert_eq!(logout(&fx.ctx).expect("second logout"), "logged out");
}

// =============================================================
// users
// =============================================================

#[tokio::test]
async fn users_without_token_sends_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/list"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"missing_authorization_header"}"#))
        .mount(&server)
        .await;

    let fx = fixture(&server);
    let err = users(&fx.ctx, false).await.expect_err("401");
    assert_eq!(err.to_string(), "Error Fetching data (status)");

    let requests = server.received_requests().await.expect("recording on");
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn logical_error_on_200_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"error":"unauthorized"}"#))
        .mount(&server)
        .await;

    let fx = fixture(&server);
    fx.ctx.session.store().save("tok", session::TOKEN_TTL).expect("save");
    let err = users(&fx.ctx, false).await.expect_err("logical");
    assert_eq!(err.to_string(), "Error Fetching data (logical)");
}

#[tokio::test]
async fn users_json_prints_the_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string(users_body()))
        .mount(&server)
        .await;

    let fx = fixture(&server);
    let out = users(&fx.ctx, true).await.expect("users");
    let value: serde_json::Value = serde_json::from_str(&out).expect("json");
    assert_eq!(value["users"][1]["username"], "bob");
}

#[tokio::test]
async fn ping_reports_backend_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"ok"}"#))
        .mount(&server)
        .await;

    let fx = fixture(&server);
    let out = ping(&fx.ctx).await.expect("ping");
    assert_eq!(out, format!("{} ok", server.uri()));
}

// =============================================================
// rendering
// =============================================================

#[test]
fn table_aligns_columns_and_marks_missing_fields() {
    let rows = vec![
        User {
            username: Some("alice".to_owned()),
            created: Some("2024-03-01T09:15:00+00:00".to_owned()),
            status: Some(UserStatus::Confirmed),
            enabled: Some(true),
        },
        User::default(),
    ];
    let table = render_table(&rows);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("USERNAME  CREATED"));
    assert!(lines[1].starts_with("alice     2024-03-01T09:15:00+00:00  CONFIRMED  true"));
    assert_eq!(lines[2], "-         -                          -          -");
    assert_eq!(lines[3], "2 user(s)");
}

#[test]
fn remaining_time_formats_days_or_hours() {
    assert_eq!(format_remaining(7 * 86_400), "7d 0h");
    assert_eq!(format_remaining(3 * 3_600 + 120), "3h 2m");
}
