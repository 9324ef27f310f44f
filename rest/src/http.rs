// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with API key and bearer token handling.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};

use crate::config::{AuthMethod, RestConfig};
use crate::error::RestError;

/// HTTP client shared by table and auth operations.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: RestConfig,
    session_token: Option<String>,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or HTTP client creation fails.
    pub fn new(config: RestConfig) -> Result<Self, RestError> {
        if config.base_url.trim().is_empty() {
            return Err(RestError::Config("base_url must not be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            config,
            session_token: None,
        })
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    pub fn set_session_token(&mut self, token: Option<String>) {
        self.session_token = token;
    }

    pub fn has_user_token(&self) -> bool {
        self.session_token.is_some() || matches!(self.config.auth, AuthMethod::Bearer { .. })
    }

    /// Joins the base URL and a path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Builds a request with the `apikey` header and a bearer token.
    ///
    /// The bearer token is the session token when signed in, the configured
    /// token otherwise, and falls back to the API key.
    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.client.request(method, self.url(path));
        if !self.config.api_key.is_empty() {
            req = req.header("apikey", &self.config.api_key);
        }

        let token = match (&self.session_token, &self.config.auth) {
            (Some(token), _) | (None, AuthMethod::Bearer { token }) => Some(token.as_str()),
            (None, _) if !self.config.api_key.is_empty() => Some(self.config.api_key.as_str()),
            (None, _) => None,
        };
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        req
    }

    /// Executes a request and maps error statuses.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error status.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, RestError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string());
        let message = error_message(&text);
        tracing::debug!(%status, message, "request failed");

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(RestError::Auth(message)),
            StatusCode::NOT_FOUND => Err(RestError::NotFound(message)),
            status => Err(RestError::Status {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

/// Pulls a human readable message out of an error body.
///
/// The table API answers with `message`, the auth provider with
/// `error_description`, `msg` or `error`.
pub fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error_description", "msg", "error"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }

    let body = body.trim();
    if body.is_empty() {
        "empty response".to_string()
    } else {
        body.to_string()
    }
}
