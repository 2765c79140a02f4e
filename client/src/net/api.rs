//! REST calls to the admin backend.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`. Each request carries
//! an `AbortSignal`; dropping the [`send`] future before it completes aborts
//! the browser request.
//! Native builds (tests): every call fails with a network error since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures become [`FetchError::Network`]. Status and body
//! interpretation is left to the `session` decoders so the browser and the CLI
//! classify responses identically.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use session::api::{self, ApiRequest};
use session::{ApiConfig, FetchError, RawResponse, Session, TokenStore};

#[cfg(any(test, not(feature = "csr")))]
fn unavailable_message(request: &ApiRequest) -> String {
    format!("{} {} is only available in the browser", request.method.as_str(), request.url)
}

/// Runs `on_drop` when dropped unless [`AbortOnDrop::disarm`] was called.
#[cfg(any(test, feature = "csr"))]
pub(crate) struct AbortOnDrop<F: FnOnce()> {
    on_drop: Option<F>,
}

#[cfg(any(test, feature = "csr"))]
impl<F: FnOnce()> AbortOnDrop<F> {
    pub(crate) fn new(on_drop: F) -> Self {
        Self { on_drop: Some(on_drop) }
    }

    pub(crate) fn disarm(mut self) {
        self.on_drop = None;
    }
}

#[cfg(any(test, feature = "csr"))]
impl<F: FnOnce()> Drop for AbortOnDrop<F> {
    fn drop(&mut self) {
        if let Some(on_drop) = self.on_drop.take() {
            on_drop();
        }
    }
}

/// Execute `request` and collect its status and body text.
///
/// # Errors
///
/// Returns [`FetchError::Network`] if the request cannot be sent or its body
/// cannot be read. Dropping the future mid-flight aborts the request.
pub async fn send(request: ApiRequest) -> Result<RawResponse, FetchError> {
    #[cfg(feature = "csr")]
    {
        use gloo_net::http::{Method, RequestBuilder};

        let method = match request.method {
            api::Method::Get => Method::GET,
            api::Method::Post => Method::POST,
        };
        let controller =
            web_sys::AbortController::new().map_err(|e| FetchError::Network(format!("{e:?}")))?;
        let signal = controller.signal();
        let guard = AbortOnDrop::new(move || controller.abort());

        let mut builder = RequestBuilder::new(&request.url).method(method).abort_signal(Some(&signal));
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| FetchError::Network(e.to_string()))?;

        let resp = prepared.send().await.map_err(|e| FetchError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| FetchError::Network(e.to_string()))?;
        guard.disarm();
        log::debug!("{} {} -> {status}", request.method.as_str(), request.url);
        Ok(RawResponse { status, body })
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(FetchError::Network(unavailable_message(&request)))
    }
}

/// `GET /api/user/list` with the session's bearer token.
///
/// # Errors
///
/// See [`send`].
pub async fn fetch_user_list<S: TokenStore>(
    config: &ApiConfig,
    session: &Session<S>,
) -> Result<RawResponse, FetchError> {
    send(api::user_list_request(config, session)).await
}

/// `POST /api/token` with form-encoded credentials.
///
/// # Errors
///
/// See [`send`].
pub async fn fetch_token(config: &ApiConfig, username: &str, password: &str) -> Result<RawResponse, FetchError> {
    send(api::token_request(config, username, password)).await
}
