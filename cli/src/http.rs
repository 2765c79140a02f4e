//! reqwest transport for [`session::api::ApiRequest`].

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use session::api::{ApiRequest, Method};
use session::{FetchError, RawResponse};

use crate::error::CliError;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, CliError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Send `request` and collect status and body text. Only transport
    /// failures are errors here; status handling belongs to the decoders.
    pub async fn send(&self, request: ApiRequest) -> Result<RawResponse, FetchError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        tracing::debug!(method = request.method.as_str(), url = %request.url, status, "api call");
        Ok(RawResponse::new(status, body))
    }
}
