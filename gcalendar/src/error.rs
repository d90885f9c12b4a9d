// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Local errors raised by the calendar client.
///
/// Remote failures (non-2xx responses, unreachable servers) are not errors;
/// they come back as [`Outcome::Failure`](crate::Outcome::Failure).
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum GCalError {
    /// A validated query parameter was given a value outside its allow-list.
    #[error("Invalid value '{value}' for query parameter '{name}', expected one of: {allowed}")]
    InvalidParameter {
        /// Parameter name, e.g. `orderby`.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Comma separated list of accepted values.
        allowed: String,
    },

    /// HTTP client construction or request building error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// XML parsing/writing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// The server answered with a success status but an unusable body.
    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for GCalError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<quick_xml::Error> for GCalError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<quick_xml::encoding::EncodingError> for GCalError {
    fn from(e: quick_xml::encoding::EncodingError) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for GCalError {
    fn from(e: quick_xml::escape::EscapeError) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for GCalError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<std::io::Error> for GCalError {
    fn from(e: std::io::Error) -> Self {
        Self::Xml(format!("IO error: {e}"))
    }
}
