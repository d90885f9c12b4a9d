// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Extra URL parameters attached to insert/update/delete requests.

use url::form_urlencoded;

/// Ordered set of additional URL parameters.
///
/// Parameters are form-urlencoded when rendered unless escaping has been
/// turned off, in which case they are joined verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParams {
    pairs: Vec<(String, String)>,
    escape: bool,
}

impl UrlParams {
    /// Creates an empty parameter set with escaping enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pairs: Vec::new(),
            escape: true,
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Adds a parameter in place.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    /// Turns percent-encoding of names and values on or off.
    #[must_use]
    pub const fn escape(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    /// Whether names and values are percent-encoded.
    #[must_use]
    pub const fn escapes(&self) -> bool {
        self.escape
    }

    /// Returns `true` when no parameter has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Renders the parameters as a query string, without the leading `?`.
    #[must_use]
    pub fn render(&self) -> String {
        if self.escape {
            form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.pairs.iter())
                .finish()
        } else {
            self.pairs
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&")
        }
    }

    /// Appends the rendered parameters to `uri`.
    #[must_use]
    pub fn apply_to(&self, uri: &str) -> String {
        if self.is_empty() {
            return uri.to_string();
        }
        let sep = if uri.contains('?') { '&' } else { '?' };
        format!("{uri}{sep}{}", self.render())
    }
}

impl Default for UrlParams {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UrlParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.push(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaped_params_are_form_encoded() {
        let params = UrlParams::new()
            .param("sendEventNotifications", "true")
            .param("comment", "moved to 3pm & room B");
        assert_eq!(
            params.render(),
            "sendEventNotifications=true&comment=moved+to+3pm+%26+room+B"
        );
    }

    #[test]
    fn unescaped_params_are_joined_verbatim() {
        let params = UrlParams::new()
            .param("ctz", "America/Los_Angeles")
            .param("q", "a b")
            .escape(false);
        assert_eq!(params.render(), "ctz=America/Los_Angeles&q=a b");
    }

    #[test]
    fn apply_to_picks_separator() {
        let params: UrlParams = [("max-results", "10")].into_iter().collect();
        assert_eq!(params.apply_to("/feeds/x"), "/feeds/x?max-results=10");
        assert_eq!(params.apply_to("/feeds/x?alt=atom"), "/feeds/x?alt=atom&max-results=10");
        assert_eq!(UrlParams::new().apply_to("/feeds/x"), "/feeds/x");
    }
}
