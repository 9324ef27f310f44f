// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// How requests are authorized against the hosted backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// Only the project API key is sent.
    #[serde(rename = "none")]
    #[default]
    None,

    /// A user access token issued by the auth provider.
    #[serde(rename = "bearer")]
    Bearer {
        /// Access token.
        token: String,
    },

    /// Email and password, exchanged for an access token on first use.
    #[serde(rename = "password")]
    Password {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },
}

/// Hosted backend configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RestConfig {
    /// Project base URL, e.g. `https://xyz.example.co`.
    pub base_url: String,

    /// Public API key of the project, sent as the `apikey` header.
    #[serde(default)]
    pub api_key: String,

    /// Authentication method.
    #[serde(default)]
    pub auth: AuthMethod,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("plancal-rest/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            auth: AuthMethod::default(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
