// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

/// Authentication method applied to every request.
///
/// Token negotiation is not performed by this crate, the token must already
/// have been issued.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// No authentication.
    #[serde(rename = "none")]
    #[default]
    None,
    /// Basic authentication (username/password).
    #[serde(rename = "basic")]
    Basic {
        /// Username for authentication.
        username: String,
        /// Password for authentication.
        password: String,
    },
    /// Bearer token authentication (OAuth).
    #[serde(rename = "bearer")]
    Bearer {
        /// Bearer token.
        token: String,
    },
    /// GData `ClientLogin` token, sent as `Authorization: GoogleLogin auth=<token>`.
    #[serde(rename = "google_login")]
    GoogleLogin {
        /// Auth token issued by the login service.
        token: String,
    },
}

/// Calendar service configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GCalConfig {
    /// Host (and optional port) of the calendar service, without scheme.
    #[serde(default = "default_server")]
    pub server: String,
    /// Use `https` instead of `http`.
    #[serde(default = "default_secure")]
    pub secure: bool,
    /// Authentication method.
    #[serde(default)]
    pub auth: AuthMethod,
    /// Name of the calling application, prefixed to the user agent.
    #[serde(default)]
    pub source: Option<String>,
    /// Extra headers sent with every request.
    #[serde(default)]
    pub additional_headers: BTreeMap<String, String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_server() -> String {
    "www.google.com".to_string()
}

const fn default_secure() -> bool {
    true
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("gcalendar/", env!("CARGO_PKG_VERSION")).to_string()
}

impl GCalConfig {
    /// Creates a configuration for the given server with default settings.
    #[must_use]
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            ..Self::default()
        }
    }

    /// Scheme and host every relative path is resolved against,
    /// e.g. `https://www.google.com`.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}", self.server.trim_end_matches('/'))
    }

    /// User agent actually sent, with the application source first.
    #[must_use]
    pub fn full_user_agent(&self) -> String {
        match &self.source {
            Some(source) if !source.is_empty() => format!("{source} {}", self.user_agent),
            _ => self.user_agent.clone(),
        }
    }
}

impl Default for GCalConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            secure: default_secure(),
            auth: AuthMethod::default(),
            source: None,
            additional_headers: BTreeMap::new(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
