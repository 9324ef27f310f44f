// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Table operations against the hosted backend.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::{self, Session};
use crate::config::{AuthMethod, RestConfig};
use crate::error::RestError;
use crate::http::HttpClient;
use crate::query::Query;

const TABLE_PREFIX: &str = "rest/v1";

/// Client for the hosted table API.
#[derive(Debug)]
pub struct RestClient {
    http: HttpClient,
}

impl RestClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: RestConfig) -> Result<Self, RestError> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Uses the access token of an existing session for subsequent requests.
    #[must_use]
    pub fn with_session(mut self, session: &Session) -> Self {
        self.http
            .set_session_token(Some(session.access_token.clone()));
        self
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &RestConfig {
        self.http.config()
    }

    /// Signs in with the configured password credentials if no user token is present.
    ///
    /// Returns the new session, or `None` if nothing had to be done.
    ///
    /// # Errors
    ///
    /// Returns an error if the auth provider rejects the credentials.
    pub async fn authenticate(&mut self) -> Result<Option<Session>, RestError> {
        if self.http.has_user_token() {
            return Ok(None);
        }

        match self.http.config().auth.clone() {
            AuthMethod::Password { email, password } => {
                self.sign_in(&email, &password).await.map(Some)
            }
            AuthMethod::None | AuthMethod::Bearer { .. } => Ok(None),
        }
    }

    /// Signs in with email and password and keeps the access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the auth provider rejects the credentials.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, RestError> {
        let session = auth::sign_in(&self.http, email, password).await?;
        self.http
            .set_session_token(Some(session.access_token.clone()));
        tracing::info!(email, "signed in");
        Ok(session)
    }

    /// Exchanges a refresh token for a new session and keeps its access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the auth provider rejects the refresh token.
    pub async fn refresh_session(&mut self, refresh_token: &str) -> Result<Session, RestError> {
        let session = auth::refresh(&self.http, refresh_token).await?;
        self.http
            .set_session_token(Some(session.access_token.clone()));
        tracing::info!("session refreshed");
        Ok(session)
    }

    /// Revokes the current session and forgets its token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn sign_out(&mut self) -> Result<(), RestError> {
        let result = auth::sign_out(&self.http).await;
        self.http.set_session_token(None);
        result
    }

    /// Fetches rows of `table` matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or rows cannot be decoded.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, RestError> {
        tracing::debug!(table, ?query, "selecting rows");
        let req = self
            .http
            .build_request(Method::GET, &table_path(table))
            .query(query.pairs());
        let resp = self.http.execute(req).await?;
        Ok(resp.json().await?)
    }

    /// Fetches the first row of `table` matching `query`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the row cannot be decoded.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Option<T>, RestError> {
        let rows = self.select(table, &query.clone().limit(1)).await?;
        Ok(rows.into_iter().next())
    }

    /// Counts rows of `table` matching the filters of `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the `Content-Range` header is missing.
    pub async fn count(&self, table: &str, query: &Query) -> Result<i64, RestError> {
        let req = self
            .http
            .build_request(Method::HEAD, &table_path(table))
            .header("Prefer", "count=exact")
            .query(&query.filters());
        let resp = self.http.execute(req).await?;
        let range = resp
            .headers()
            .get("Content-Range")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| RestError::InvalidResponse("missing Content-Range".to_string()))?;
        parse_content_range_total(range)
    }

    /// Inserts one row and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or no row is returned.
    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
        query: &Query,
    ) -> Result<T, RestError> {
        tracing::debug!(table, "inserting row");
        let req = self
            .http
            .build_request(Method::POST, &table_path(table))
            .header("Prefer", "return=representation")
            .query(query.pairs())
            .json(body);
        let resp = self.http.execute(req).await?;
        let rows: Vec<T> = resp.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RestError::InvalidResponse("insert returned no rows".to_string()))
    }

    /// Updates rows matching `query` and returns them as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or rows cannot be decoded.
    pub async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
        body: &B,
    ) -> Result<Vec<T>, RestError> {
        tracing::debug!(table, ?query, "updating rows");
        let req = self
            .http
            .build_request(Method::PATCH, &table_path(table))
            .header("Prefer", "return=representation")
            .query(query.pairs())
            .json(body);
        let resp = self.http.execute(req).await?;
        Ok(resp.json().await?)
    }

    /// Deletes rows matching `query` and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, table: &str, query: &Query) -> Result<usize, RestError> {
        tracing::debug!(table, ?query, "deleting rows");
        let req = self
            .http
            .build_request(Method::DELETE, &table_path(table))
            .header("Prefer", "return=representation")
            .query(query.pairs());
        let resp = self.http.execute(req).await?;
        let rows: Vec<serde_json::Value> = resp.json().await?;
        Ok(rows.len())
    }
}

fn table_path(table: &str) -> String {
    format!("{TABLE_PREFIX}/{table}")
}

/// Parses the total out of `0-24/3573` or `*/0`.
fn parse_content_range_total(range: &str) -> Result<i64, RestError> {
    range
        .rsplit_once('/')
        .and_then(|(_, total)| total.trim().parse().ok())
        .ok_or_else(|| RestError::InvalidResponse(format!("invalid Content-Range: {range}")))
}
