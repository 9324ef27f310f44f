// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Password grant against the auth provider.

use jiff::Timestamp;
use reqwest::{Method, RequestBuilder};

use crate::error::RestError;
use crate::http::HttpClient;

const TOKEN_PATH: &str = "auth/v1/token";
const LOGOUT_PATH: &str = "auth/v1/logout";

/// A signed-in session issued by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Session {
    /// Bearer token for table requests.
    pub access_token: String,

    /// Token type, normally `bearer`.
    #[serde(default)]
    pub token_type: String,

    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,

    /// Unix time in seconds at which the access token expires.
    #[serde(default)]
    pub expires_at: Option<i64>,

    /// Token that can be exchanged for a new session.
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// The signed-in user.
    #[serde(default)]
    pub user: Option<User>,
}

impl Session {
    /// Seconds before the recorded expiry at which a token is treated as expired.
    pub const EXPIRY_LEEWAY_SECS: i64 = 60;

    /// Whether the access token has expired at `now`.
    ///
    /// A session without a known expiry never expires.
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at
            .is_some_and(|at| now.as_second().saturating_add(Self::EXPIRY_LEEWAY_SECS) >= at)
    }

    /// Whether the access token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Timestamp::now())
    }

    /// Fills in the absolute expiry from `expires_in` when the provider left it out.
    fn stamp_expiry(mut self, issued: Timestamp) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = self
                .expires_in
                .map(|secs| issued.as_second().saturating_add(secs));
        }
        self
    }
}

/// The user a session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct User {
    /// User id.
    pub id: String,

    /// User email, if any.
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, serde::Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, serde::Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

pub(crate) async fn sign_in(
    http: &HttpClient,
    email: &str,
    password: &str,
) -> Result<Session, RestError> {
    tracing::debug!(email, "signing in with password");
    let req = http
        .build_request(Method::POST, TOKEN_PATH)
        .query(&[("grant_type", "password")])
        .json(&PasswordGrant { email, password });
    grant(http, req).await
}

pub(crate) async fn refresh(http: &HttpClient, refresh_token: &str) -> Result<Session, RestError> {
    tracing::debug!("refreshing session");
    let req = http
        .build_request(Method::POST, TOKEN_PATH)
        .query(&[("grant_type", "refresh_token")])
        .json(&RefreshGrant { refresh_token });
    grant(http, req).await
}

async fn grant(http: &HttpClient, req: RequestBuilder) -> Result<Session, RestError> {
    let issued = Timestamp::now();
    let resp = match http.execute(req).await {
        Ok(resp) => resp,
        // the auth provider reports bad credentials as 400
        Err(RestError::Status {
            status: 400,
            message,
        }) => return Err(RestError::Auth(message)),
        Err(e) => return Err(e),
    };

    let session: Session = resp.json().await?;
    if session.access_token.is_empty() {
        return Err(RestError::Auth("empty access token".to_string()));
    }
    Ok(session.stamp_expiry(issued))
}

pub(crate) async fn sign_out(http: &HttpClient) -> Result<(), RestError> {
    let req = http.build_request(Method::POST, LOGOUT_PATH);
    http.execute(req).await?;
    Ok(())
}
