//! Blocking HTTP transport for the provider quota APIs.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A bearer-authenticated JSON request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer_token: String,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, bearer_token: &str) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            bearer_token: bearer_token.to_string(),
            body: None,
        }
    }

    pub fn post_json(url: impl Into<String>, bearer_token: &str, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            bearer_token: bearer_token.to_string(),
            body: Some(body),
        }
    }
}

/// Status and raw body of a completed exchange. Non-2xx statuses are replies,
/// not errors; callers decide what a failed status means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).context("Failed to parse response body")
    }
}

/// Sends requests to provider APIs. Errors are transport failures only
/// (connection, TLS, timeout, unreadable body).
pub trait HttpTransport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpReply>;
}

/// `ureq`-backed transport with a global per-request timeout.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl HttpTransport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpReply> {
        let authorization = format!("Bearer {}", request.bearer_token);
        let user_agent = format!("pi-limits/{}", env!("CARGO_PKG_VERSION"));

        let response = match request.method {
            Method::Get => self
                .agent
                .get(request.url.as_str())
                .header("Authorization", &authorization)
                .header("Content-Type", "application/json")
                .header("User-Agent", &user_agent)
                .call(),
            Method::Post => {
                let body = match &request.body {
                    Some(value) => {
                        serde_json::to_string(value).context("Failed to serialize request body")?
                    }
                    None => String::new(),
                };
                self.agent
                    .post(request.url.as_str())
                    .header("Authorization", &authorization)
                    .header("Content-Type", "application/json")
                    .header("User-Agent", &user_agent)
                    .send(&body)
            }
        };

        let mut response = response.with_context(|| format!("Request to {} failed", request.url))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .with_context(|| format!("Failed to read response from {}", request.url))?;

        tracing::debug!("{:?} {} -> {}", request.method, request.url, status);
        Ok(HttpReply { status, body })
    }
}
