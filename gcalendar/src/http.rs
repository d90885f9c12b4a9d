// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with authentication and failure translation.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};

use crate::config::{AuthMethod, GCalConfig};
use crate::error::GCalError;
use crate::outcome::{Outcome, TransportFailure};

/// Media type of Atom request bodies.
const ATOM_CONTENT_TYPE: &str = "application/atom+xml";

/// HTTP client for calendar feed operations.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: GCalConfig,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if an additional header is invalid or HTTP client
    /// creation fails.
    pub fn new(config: GCalConfig) -> Result<Self, GCalError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.additional_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| GCalError::Config(format!("Invalid header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| GCalError::Config(format!("Invalid value for header {name}: {e}")))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.full_user_agent())
            .default_headers(headers)
            .build()?;
        Ok(Self { client, config })
    }

    /// Builds a request with authentication headers.
    pub fn build_request(&self, method: Method, url: &str) -> RequestBuilder {
        let req = self.client.request(method, url);

        match &self.config.auth {
            AuthMethod::Basic { username, password } => req.basic_auth(username, Some(password)),
            AuthMethod::Bearer { token } => req.bearer_auth(token),
            AuthMethod::GoogleLogin { token } => {
                req.header(AUTHORIZATION, format!("GoogleLogin auth={token}"))
            }
            AuthMethod::None => req,
        }
    }

    /// Issues a GET.
    pub async fn get(&self, url: &str) -> Outcome<String> {
        self.execute(Method::GET, url, None).await
    }

    /// Issues a POST with an Atom body.
    pub async fn post(&self, url: &str, body: String) -> Outcome<String> {
        self.execute(Method::POST, url, Some(body)).await
    }

    /// Issues a PUT with an Atom body.
    pub async fn put(&self, url: &str, body: String) -> Outcome<String> {
        self.execute(Method::PUT, url, Some(body)).await
    }

    /// Issues a DELETE.
    pub async fn delete(&self, url: &str) -> Outcome<String> {
        self.execute(Method::DELETE, url, None).await
    }

    /// Sends one request and translates the response.
    ///
    /// Any 2xx status yields the response body. Everything else, including
    /// requests that never got a response, becomes a [`TransportFailure`].
    async fn execute(&self, method: Method, url: &str, body: Option<String>) -> Outcome<String> {
        tracing::debug!(%method, url, "sending request");

        let mut req = self.build_request(method.clone(), url);
        if let Some(body) = body {
            req = req.header(CONTENT_TYPE, ATOM_CONTENT_TYPE).body(body);
        }

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                let failure = failure_from_error(&e);
                tracing::warn!(%method, url, reason = %failure.reason, "request failed");
                return Outcome::Failure(failure);
            }
        };

        let status = resp.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(%method, url, %status, "failed to read response body");
                let body = e.to_string();
                return Outcome::Failure(TransportFailure::new(status.as_u16(), reason, body));
            }
        };

        if status.is_success() {
            tracing::debug!(%method, url, %status, "request succeeded");
            Outcome::Success(text)
        } else {
            tracing::warn!(%method, url, %status, "server returned an error status");
            Outcome::Failure(TransportFailure::new(status.as_u16(), reason, text))
        }
    }
}

fn failure_from_error(e: &reqwest::Error) -> TransportFailure {
    let status = e.status().map_or(0, |s| s.as_u16());
    let reason = if e.is_timeout() {
        "Timeout"
    } else if e.is_connect() {
        "Connection failed"
    } else if e.is_builder() {
        "Invalid request"
    } else {
        "Request failed"
    };
    TransportFailure::new(status, reason, e.to_string())
}
