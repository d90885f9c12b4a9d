// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar service client for feed operations.

use std::sync::Arc;

use crate::config::GCalConfig;
use crate::error::GCalError;
use crate::http::HttpClient;
use crate::outcome::Outcome;
use crate::params::UrlParams;
use crate::query::{CalendarQuery, FeedKind};
use crate::response::{parse_calendar_list_feed, parse_event_entry, parse_event_feed, parse_feed};
use crate::types::{Entry, EventEntry, Feed, QueryFeed};

/// Client for the calendar feed service.
///
/// Every operation performs exactly one round trip. Remote failures come back
/// as [`Outcome::Failure`]; `Err` is only returned for local problems such as
/// an unparseable success body.
///
/// # Example
///
/// ```ignore
/// use gcalendar::{AuthMethod, CalendarQuery, CalendarService, GCalConfig, OrderBy};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GCalConfig {
///     auth: AuthMethod::GoogleLogin {
///         token: "DQAAAHoAAAB...".to_string(),
///     },
///     ..Default::default()
/// };
///
/// let service = CalendarService::new(config)?;
///
/// let mut query = CalendarQuery::events(None);
/// query.set_start_min("2026-01-01").set_orderby(OrderBy::StartTime)?;
///
/// let events = service.query(&query).await?.into_result()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CalendarService {
    http: Arc<HttpClient>,
    config: GCalConfig,
}

impl CalendarService {
    /// Creates a new calendar service client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(config: GCalConfig) -> Result<Self, GCalError> {
        let http = HttpClient::new(config.clone())?;
        Ok(Self {
            http: Arc::new(http),
            config,
        })
    }

    /// The configuration the client was built with.
    #[must_use]
    pub const fn config(&self) -> &GCalConfig {
        &self.config
    }

    /// Runs a feed query, translating the response according to the kind of
    /// feed the query addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if a success response is not a valid feed.
    pub async fn query(&self, query: &CalendarQuery) -> Result<Outcome<QueryFeed>, GCalError> {
        let url = self.full_url(&query.to_uri());
        let kind = query.kind().clone();

        self.http.get(&url).await.try_map(|body| {
            tracing::debug!(?kind, "translating feed");
            Ok(match kind {
                FeedKind::ListCalendars { .. } => {
                    QueryFeed::Calendars(parse_calendar_list_feed(&body)?)
                }
                FeedKind::Events { .. } => QueryFeed::Events(parse_event_feed(&body)?),
                FeedKind::Custom(_) => QueryFeed::Generic(parse_feed(&body)?),
            })
        })
    }

    /// Fetches a raw feed URI (a path on the server or an absolute URL).
    ///
    /// # Errors
    ///
    /// Returns an error if a success response is not a valid feed.
    pub async fn query_uri(&self, uri: &str) -> Result<Outcome<Feed<Entry>>, GCalError> {
        let url = self.full_url(uri);
        self.http.get(&url).await.try_map(|body| parse_feed(&body))
    }

    /// Adds an event by posting it to `insert_uri`, usually the post link of
    /// an event feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be serialized or the echoed entry
    /// cannot be parsed.
    pub async fn insert_event(
        &self,
        event: &EventEntry,
        insert_uri: &str,
        params: Option<&UrlParams>,
    ) -> Result<Outcome<EventEntry>, GCalError> {
        let body = event.to_xml()?;
        let url = self.full_url(&with_params(insert_uri, params));

        self.http
            .post(&url, body)
            .await
            .try_map(|body| parse_event_entry(&body))
    }

    /// Replaces the event stored at `edit_uri`.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be serialized or the echoed entry
    /// cannot be parsed.
    pub async fn update_event(
        &self,
        edit_uri: &str,
        event: &EventEntry,
        params: Option<&UrlParams>,
    ) -> Result<Outcome<EventEntry>, GCalError> {
        let body = event.to_xml()?;
        let path = normalize_edit_uri(&self.config.server, edit_uri);
        let url = self.full_url(&with_params(&path, params));

        self.http
            .put(&url, body)
            .await
            .try_map(|body| parse_event_entry(&body))
    }

    /// Removes the event stored at `edit_uri`.
    pub async fn delete_event(&self, edit_uri: &str, params: Option<&UrlParams>) -> Outcome<()> {
        let path = normalize_edit_uri(&self.config.server, edit_uri);
        let url = self.full_url(&with_params(&path, params));

        self.http.delete(&url).await.map(|_| ())
    }

    /// Builds full URL from a path, leaving absolute URLs untouched.
    fn full_url(&self, uri: &str) -> String {
        if is_absolute(uri) {
            uri.to_string()
        } else if uri.starts_with('/') {
            format!("{}{uri}", self.config.base_url())
        } else {
            format!("{}/{uri}", self.config.base_url())
        }
    }
}

/// Turns an edit URI into the path the transport expects.
///
/// A literal `http://<server>/` (or `https://<server>/`) prefix is stripped and
/// the result always starts with a single `/`. Absolute URLs pointing at
/// another host are returned unchanged.
///
/// ```
/// use gcalendar::normalize_edit_uri;
///
/// assert_eq!(
///     normalize_edit_uri(
///         "www.google.com",
///         "http://www.google.com/calendar/feeds/default/private/full/abc",
///     ),
///     "/calendar/feeds/default/private/full/abc",
/// );
/// ```
#[must_use]
pub fn normalize_edit_uri(server: &str, edit_uri: &str) -> String {
    let server = server.trim_end_matches('/');
    let rest = edit_uri
        .split_once("://")
        .filter(|(scheme, _)| is_web_scheme(scheme))
        .and_then(|(_, s)| s.strip_prefix(server))
        .and_then(|s| s.strip_prefix('/'));

    match rest {
        Some(path) => format!("/{path}"),
        None if is_absolute(edit_uri) => edit_uri.to_string(),
        None => format!("/{}", edit_uri.trim_start_matches('/')),
    }
}

fn is_absolute(uri: &str) -> bool {
    uri.split_once("://")
        .is_some_and(|(scheme, _)| is_web_scheme(scheme))
}

/// Schemes are case-insensitive.
fn is_web_scheme(scheme: &str) -> bool {
    scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
}

fn with_params(uri: &str, params: Option<&UrlParams>) -> String {
    params.map_or_else(|| uri.to_string(), |p| p.apply_to(uri))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_own_server_only() {
        assert_eq!(
            normalize_edit_uri("www.google.com", "https://www.google.com/calendar/feeds/x"),
            "/calendar/feeds/x"
        );
        assert_eq!(
            normalize_edit_uri("www.google.com", "http://example.org/calendar/feeds/x"),
            "http://example.org/calendar/feeds/x"
        );
        assert_eq!(
            normalize_edit_uri("www.google.com", "calendar/feeds/x"),
            "/calendar/feeds/x"
        );
        assert_eq!(
            normalize_edit_uri("www.google.com", "/calendar/feeds/x"),
            "/calendar/feeds/x"
        );
    }

    #[test]
    fn normalize_does_not_match_longer_host() {
        assert_eq!(
            normalize_edit_uri("www.google.com", "http://www.google.com.evil/feeds/x"),
            "http://www.google.com.evil/feeds/x"
        );
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert_eq!(
            normalize_edit_uri("www.google.com", "HTTPS://www.google.com/calendar/feeds/x"),
            "/calendar/feeds/x"
        );
        assert_eq!(
            normalize_edit_uri("www.google.com", "HTTP://example.org/calendar/feeds/x"),
            "HTTP://example.org/calendar/feeds/x"
        );
        assert!(is_absolute("Http://example.org/x"));
        assert!(!is_absolute("/calendar/feeds/x"));
        assert!(!is_absolute("ftp://example.org/x"));
    }

    #[test]
    fn full_url_resolves_relative_paths() {
        let mut config = GCalConfig::new("calendar.example.com");
        config.secure = false;
        let service = CalendarService::new(config).unwrap();

        assert_eq!(
            service.full_url("/calendar/feeds/default"),
            "http://calendar.example.com/calendar/feeds/default"
        );
        assert_eq!(
            service.full_url("https://other.example.com/feed"),
            "https://other.example.com/feed"
        );
        assert_eq!(
            service.full_url("HTTP://other.example.com/feed"),
            "HTTP://other.example.com/feed"
        );
    }
}
