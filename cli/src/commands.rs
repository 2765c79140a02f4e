//! Subcommand implementations. Each returns the text to print on stdout.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::cell::RefCell;
use std::fmt::Write as _;

use session::api::{self, ApiConfig, User};
use session::{FETCH_FAILED_MESSAGE, FetchLifecycle, FetchState, Session, Settled};

use crate::error::CliError;
use crate::file_store::{FileTokenStore, unix_now};
use crate::http::HttpTransport;

const MISSING: &str = "-";

/// Everything a command needs: where the backend is, how to reach it, and
/// where the session lives.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub config: ApiConfig,
    pub http: HttpTransport,
    pub session: Session<FileTokenStore>,
}

pub async fn login(ctx: &CliContext, username: &str, password: Option<&str>) -> Result<String, CliError> {
    let password = password.ok_or(CliError::MissingPassword)?;
    let response = ctx.http.send(api::token_request(&ctx.config, username, password)).await?;
    let token = api::decode_token(response)?;
    ctx.session.set_token(&token)?;
    tracing::info!(username, path = %ctx.session.store().path().display(), "token stored");
    Ok(format!("logged in as {username}"))
}

pub fn logout(ctx: &CliContext) -> Result<String, CliError> {
    ctx.session.log_out()?;
    Ok("logged out".to_owned())
}

pub fn status(ctx: &CliContext) -> String {
    if !ctx.session.is_logged_in() {
        return "not logged in".to_owned();
    }
    match ctx.session.store().expires_at() {
        Some(expires_at) => {
            let remaining = expires_at.saturating_sub(unix_now());
            format!("logged in (token expires in {})", format_remaining(remaining))
        }
        None => "logged in".to_owned(),
    }
}

/// List users through the fetch lifecycle, as a table or as the raw JSON.
pub async fn users(ctx: &CliContext, json: bool) -> Result<String, CliError> {
    let lifecycle = FetchLifecycle::<()>::new();
    let state: RefCell<FetchState<(Vec<User>, String)>> = RefCell::new(FetchState::Idle);

    let Some(invocation) = lifecycle.run(
        (),
        || ctx.http.send(api::user_list_request(&ctx.config, &ctx.session)),
        |response| {
            let users = api::user_list_from_body(&response.body)?;
            Ok((users, response.body))
        },
        |data| *state.borrow_mut() = FetchState::Success(data),
        |err| *state.borrow_mut() = FetchState::Error(err),
    ) else {
        return Err(reported("cancelled"));
    };
    *state.borrow_mut() = FetchState::Pending;

    if invocation.await == Settled::Discarded {
        return Err(reported("cancelled"));
    }

    match state.into_inner() {
        FetchState::Success((_, body)) if json => {
            let value: serde_json::Value = serde_json::from_str(&body)?;
            Ok(serde_json::to_string_pretty(&value)?)
        }
        FetchState::Success((users, _)) => Ok(render_table(&users)),
        FetchState::Error(err) => {
            tracing::error!(kind = err.kind(), error = %err, "user list fetch failed");
            Err(reported(err.kind()))
        }
        FetchState::Idle | FetchState::Pending => Err(reported("cancelled")),
    }
}

pub async fn ping(ctx: &CliContext) -> Result<String, CliError> {
    let response = ctx.http.send(api::ping_request(&ctx.config)).await?.ensure_success()?;
    let value: serde_json::Value = serde_json::from_str(&response.body)?;
    let status = value.get("status").and_then(serde_json::Value::as_str).unwrap_or("ok");
    Ok(format!("{} {status}", ctx.config.base_url()))
}

fn reported(kind: &'static str) -> CliError {
    CliError::Reported { message: FETCH_FAILED_MESSAGE, kind }
}

/// Plain-text table with username, created, status, and enabled columns.
pub fn render_table(users: &[User]) -> String {
    let rows: Vec<[String; 4]> = users
        .iter()
        .map(|user| {
            [
                user.username.clone().unwrap_or_else(|| MISSING.to_owned()),
                user.created.clone().unwrap_or_else(|| MISSING.to_owned()),
                user.status.map_or_else(|| MISSING.to_owned(), |s| s.as_str().to_owned()),
                user.enabled.map_or_else(|| MISSING.to_owned(), |e| e.to_string()),
            ]
        })
        .collect();

    let header = ["USERNAME", "CREATED", "STATUS", "ENABLED"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    let _ = write!(out, "{} user(s)", rows.len());
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn format_remaining(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    if days > 0 {
        format!("{days}d {hours}h")
    } else {
        format!("{hours}h {}m", (secs % 3_600) / 60)
    }
}
