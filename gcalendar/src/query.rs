// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Query builder for calendar feeds.

use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

use crate::error::GCalError;

/// User alias addressing the authenticated user's own feeds.
pub const DEFAULT_USER: &str = "default";

/// Reserved query key for the free-text search term.
const TEXT_QUERY_KEY: &str = "q";

/// Which feed a query addresses, and therefore how its response is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedKind {
    /// All calendars of a user: `/calendar/feeds/<user>`.
    ListCalendars {
        /// User id, or [`DEFAULT_USER`].
        user: String,
    },
    /// Full private event feed of a user: `/calendar/feeds/<user>/private/full`.
    Events {
        /// User id, or [`DEFAULT_USER`].
        user: String,
    },
    /// Any other feed, given as a path or an absolute URL.
    Custom(String),
}

impl FeedKind {
    /// Base feed path (or URL, for custom feeds) without query string.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::ListCalendars { user } => format!("/calendar/feeds/{user}"),
            Self::Events { user } => format!("/calendar/feeds/{user}/private/full"),
            Self::Custom(feed) => feed.clone(),
        }
    }
}

/// Query parameter names understood by the calendar service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryParam {
    /// `start-min`
    StartMin,
    /// `start-max`
    StartMax,
    /// `orderby`
    OrderBy,
    /// `sortorder`
    SortOrder,
    /// `singleevents`
    SingleEvents,
    /// `futureevents`
    FutureEvents,
    /// `recurrence-expansion-start`
    RecurrenceExpansionStart,
    /// `recurrence-expansion-end`
    RecurrenceExpansionEnd,
    /// `author`
    Author,
    /// `alt`
    Alt,
    /// `updated-min`
    UpdatedMin,
    /// `updated-max`
    UpdatedMax,
    /// `published-min`
    PublishedMin,
    /// `published-max`
    PublishedMax,
    /// `start-index`
    StartIndex,
    /// `max-results`
    MaxResults,
    /// Any parameter not listed above, passed through unvalidated.
    Other(String),
}

impl QueryParam {
    /// Wire name of the parameter.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::StartMin => "start-min",
            Self::StartMax => "start-max",
            Self::OrderBy => "orderby",
            Self::SortOrder => "sortorder",
            Self::SingleEvents => "singleevents",
            Self::FutureEvents => "futureevents",
            Self::RecurrenceExpansionStart => "recurrence-expansion-start",
            Self::RecurrenceExpansionEnd => "recurrence-expansion-end",
            Self::Author => "author",
            Self::Alt => "alt",
            Self::UpdatedMin => "updated-min",
            Self::UpdatedMax => "updated-max",
            Self::PublishedMin => "published-min",
            Self::PublishedMax => "published-max",
            Self::StartIndex => "start-index",
            Self::MaxResults => "max-results",
            Self::Other(name) => name,
        }
    }

    /// Maps a wire name back to the parameter.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "start-min" => Self::StartMin,
            "start-max" => Self::StartMax,
            "orderby" => Self::OrderBy,
            "sortorder" => Self::SortOrder,
            "singleevents" => Self::SingleEvents,
            "futureevents" => Self::FutureEvents,
            "recurrence-expansion-start" => Self::RecurrenceExpansionStart,
            "recurrence-expansion-end" => Self::RecurrenceExpansionEnd,
            "author" => Self::Author,
            "alt" => Self::Alt,
            "updated-min" => Self::UpdatedMin,
            "updated-max" => Self::UpdatedMax,
            "published-min" => Self::PublishedMin,
            "published-max" => Self::PublishedMax,
            "start-index" => Self::StartIndex,
            "max-results" => Self::MaxResults,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for QueryParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepted values of the `orderby` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    /// `lastmodified`
    LastModified,
    /// `starttime`
    StartTime,
}

impl OrderBy {
    const ALL: [Self; 2] = [Self::LastModified, Self::StartTime];

    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LastModified => "lastmodified",
            Self::StartTime => "starttime",
        }
    }
}

impl AsRef<str> for OrderBy {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for OrderBy {
    type Err = GCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| invalid("orderby", s, Self::ALL.map(Self::as_str).as_slice()))
    }
}

/// Accepted values of the `sortorder` parameter.
///
/// The short and long spellings are distinct values so that the string given
/// to the builder is the one sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// `ascending`
    Ascending,
    /// `descending`
    Descending,
    /// `ascend`
    Ascend,
    /// `descend`
    Descend,
    /// `a`
    A,
    /// `d`
    D,
}

impl SortOrder {
    const ALL: [Self; 6] = [
        Self::Ascending,
        Self::Descending,
        Self::Ascend,
        Self::Descend,
        Self::A,
        Self::D,
    ];

    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
            Self::Ascend => "ascend",
            Self::Descend => "descend",
            Self::A => "a",
            Self::D => "d",
        }
    }

    /// Returns `true` for any of the ascending spellings.
    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Ascending | Self::Ascend | Self::A)
    }
}

impl AsRef<str> for SortOrder {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for SortOrder {
    type Err = GCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| invalid("sortorder", s, Self::ALL.map(Self::as_str).as_slice()))
    }
}

fn invalid(name: &'static str, value: &str, allowed: &[&str]) -> GCalError {
    GCalError::InvalidParameter {
        name,
        value: value.to_string(),
        allowed: allowed.join(", "),
    }
}

/// One category group. Terms inside a group are alternatives (OR); separate
/// groups must all match (AND).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    terms: Vec<String>,
}

impl CategoryFilter {
    /// Group matching a single category term.
    #[must_use]
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            terms: vec![term.into()],
        }
    }

    /// Group matching any of the given terms.
    #[must_use]
    pub fn any_of<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// Terms of the group.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    fn to_segment(&self) -> String {
        self.terms
            .iter()
            .map(|t| urlencoding::encode(t).into_owned())
            .collect::<Vec<_>>()
            .join("|")
    }
}

macro_rules! passthrough_param {
    ($(#[$doc:meta] $get:ident, $set:ident => $param:ident;)*) => {
        $(
            #[$doc]
            #[must_use]
            pub fn $get(&self) -> Option<&str> {
                self.get_param(&QueryParam::$param)
            }

            #[$doc]
            pub fn $set(&mut self, value: impl Into<String>) -> &mut Self {
                self.put(QueryParam::$param, value.into());
                self
            }
        )*
    };
}

/// Query against a calendar feed.
///
/// Parameters keep the order in which they were first set; setting a
/// parameter again replaces its value in place.
///
/// # Example
///
/// ```
/// use gcalendar::{CalendarQuery, OrderBy, SortOrder};
///
/// let mut query = CalendarQuery::events(None);
/// query
///     .set_start_min("2026-01-01")
///     .set_start_max("2026-02-01")
///     .set_orderby(OrderBy::StartTime)?
///     .set_sortorder(SortOrder::Ascending)?;
///
/// assert_eq!(
///     query.to_uri(),
///     "/calendar/feeds/default/private/full?start-min=2026-01-01&start-max=2026-02-01&orderby=starttime&sortorder=ascending"
/// );
/// # Ok::<(), gcalendar::GCalError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarQuery {
    kind: FeedKind,
    params: Vec<(QueryParam, String)>,
    text_query: Option<String>,
    categories: Vec<CategoryFilter>,
}

impl CalendarQuery {
    /// Creates an empty query against the given feed.
    #[must_use]
    pub const fn new(kind: FeedKind) -> Self {
        Self {
            kind,
            params: Vec::new(),
            text_query: None,
            categories: Vec::new(),
        }
    }

    /// Query listing all calendars of `user` (or of [`DEFAULT_USER`]).
    #[must_use]
    pub fn list_calendars(user: Option<&str>) -> Self {
        Self::new(FeedKind::ListCalendars {
            user: user.unwrap_or(DEFAULT_USER).to_string(),
        })
    }

    /// Query over the full private event feed of `user` (or of [`DEFAULT_USER`]).
    #[must_use]
    pub fn events(user: Option<&str>) -> Self {
        Self::new(FeedKind::Events {
            user: user.unwrap_or(DEFAULT_USER).to_string(),
        })
    }

    /// Query against an arbitrary feed path or URL.
    #[must_use]
    pub fn custom(feed: impl Into<String>) -> Self {
        Self::new(FeedKind::Custom(feed.into()))
    }

    /// Feed addressed by this query.
    #[must_use]
    pub const fn kind(&self) -> &FeedKind {
        &self.kind
    }

    /// Gets a parameter by wire name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        if name == TEXT_QUERY_KEY {
            return self.text_query();
        }
        self.get_param(&QueryParam::from_name(name))
    }

    /// Sets a parameter by wire name.
    ///
    /// `orderby` and `sortorder` are validated exactly as by their named
    /// setters; `q` sets the text query. Unknown names pass through.
    ///
    /// # Errors
    ///
    /// Returns [`GCalError::InvalidParameter`] for a value outside the
    /// allow-list of a validated parameter.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<&mut Self, GCalError> {
        let value = value.into();
        match QueryParam::from_name(name) {
            QueryParam::OrderBy => self.set_orderby(value),
            QueryParam::SortOrder => self.set_sortorder(value),
            QueryParam::Other(name) if name == TEXT_QUERY_KEY => Ok(self.set_text_query(value)),
            param => {
                self.put(param, value);
                Ok(self)
            }
        }
    }

    /// Removes a parameter by wire name, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        if name == TEXT_QUERY_KEY {
            return self.text_query.take();
        }
        let param = QueryParam::from_name(name);
        let idx = self.params.iter().position(|(p, _)| *p == param)?;
        Some(self.params.remove(idx).1)
    }

    /// Parameters in insertion order, excluding the text query.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(p, v)| (p.name(), v.as_str()))
    }

    passthrough_param! {
        /// The `start-min` query parameter.
        start_min, set_start_min => StartMin;
        /// The `start-max` query parameter.
        start_max, set_start_max => StartMax;
        /// The `singleevents` query parameter.
        singleevents, set_singleevents => SingleEvents;
        /// The `futureevents` query parameter.
        futureevents, set_futureevents => FutureEvents;
        /// The `recurrence-expansion-start` query parameter.
        recurrence_expansion_start, set_recurrence_expansion_start => RecurrenceExpansionStart;
        /// The `recurrence-expansion-end` query parameter.
        recurrence_expansion_end, set_recurrence_expansion_end => RecurrenceExpansionEnd;
        /// The `author` query parameter.
        author, set_author => Author;
        /// The `alt` query parameter.
        alt, set_alt => Alt;
        /// The `updated-min` query parameter.
        updated_min, set_updated_min => UpdatedMin;
        /// The `updated-max` query parameter.
        updated_max, set_updated_max => UpdatedMax;
        /// The `published-min` query parameter.
        published_min, set_published_min => PublishedMin;
        /// The `published-max` query parameter.
        published_max, set_published_max => PublishedMax;
    }

    /// The `orderby` query parameter.
    #[must_use]
    pub fn orderby(&self) -> Option<&str> {
        self.get_param(&QueryParam::OrderBy)
    }

    /// Sets the `orderby` query parameter.
    ///
    /// # Errors
    ///
    /// Returns [`GCalError::InvalidParameter`] unless the value is
    /// `lastmodified` or `starttime`.
    pub fn set_orderby(&mut self, value: impl AsRef<str>) -> Result<&mut Self, GCalError> {
        let value: OrderBy = value.as_ref().parse()?;
        self.put(QueryParam::OrderBy, value.as_str().to_string());
        Ok(self)
    }

    /// The `sortorder` query parameter.
    #[must_use]
    pub fn sortorder(&self) -> Option<&str> {
        self.get_param(&QueryParam::SortOrder)
    }

    /// Sets the `sortorder` query parameter.
    ///
    /// # Errors
    ///
    /// Returns [`GCalError::InvalidParameter`] unless the value is one of
    /// `ascending`, `descending`, `ascend`, `descend`, `a` or `d`.
    pub fn set_sortorder(&mut self, value: impl AsRef<str>) -> Result<&mut Self, GCalError> {
        let value: SortOrder = value.as_ref().parse()?;
        self.put(QueryParam::SortOrder, value.as_str().to_string());
        Ok(self)
    }

    /// The `start-index` query parameter (1-based).
    #[must_use]
    pub fn start_index(&self) -> Option<&str> {
        self.get_param(&QueryParam::StartIndex)
    }

    /// Sets the `start-index` query parameter.
    pub fn set_start_index(&mut self, index: u32) -> &mut Self {
        self.put(QueryParam::StartIndex, index.to_string());
        self
    }

    /// The `max-results` query parameter.
    #[must_use]
    pub fn max_results(&self) -> Option<&str> {
        self.get_param(&QueryParam::MaxResults)
    }

    /// Sets the `max-results` query parameter.
    pub fn set_max_results(&mut self, max: u32) -> &mut Self {
        self.put(QueryParam::MaxResults, max.to_string());
        self
    }

    /// Free-text search term.
    #[must_use]
    pub fn text_query(&self) -> Option<&str> {
        self.text_query.as_deref()
    }

    /// Sets the free-text search term.
    pub fn set_text_query(&mut self, text: impl Into<String>) -> &mut Self {
        self.text_query = Some(text.into());
        self
    }

    /// Category groups, all of which must match.
    #[must_use]
    pub fn categories(&self) -> &[CategoryFilter] {
        &self.categories
    }

    /// Adds a category group.
    pub fn add_category(&mut self, filter: CategoryFilter) -> &mut Self {
        self.categories.push(filter);
        self
    }

    /// Renders the feed path, category segment and encoded query string.
    ///
    /// A query string already present on a custom feed is kept after the
    /// category segment, ahead of the parameters set on this builder. Empty
    /// category groups are left out.
    #[must_use]
    pub fn to_uri(&self) -> String {
        let base = self.kind.path();
        let (path, base_query) = base.split_once('?').unwrap_or((base.as_str(), ""));
        let mut uri = path.to_string();

        let segments: Vec<_> = self
            .categories
            .iter()
            .filter(|c| !c.terms.is_empty())
            .map(CategoryFilter::to_segment)
            .collect();
        if !segments.is_empty() {
            if !uri.ends_with('/') {
                uri.push('/');
            }
            uri.push_str("-/");
            uri.push_str(&segments.join("/"));
        }

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.extend_pairs(self.params());
        if let Some(text) = &self.text_query {
            serializer.append_pair(TEXT_QUERY_KEY, text);
        }
        let query = serializer.finish();

        let query = [base_query, query.as_str()]
            .into_iter()
            .filter(|q| !q.is_empty())
            .collect::<Vec<_>>()
            .join("&");
        if !query.is_empty() {
            uri.push('?');
            uri.push_str(&query);
        }
        uri
    }

    fn get_param(&self, param: &QueryParam) -> Option<&str> {
        self.params
            .iter()
            .find(|(p, _)| p == param)
            .map(|(_, v)| v.as_str())
    }

    fn put(&mut self, param: QueryParam, value: String) {
        match self.params.iter_mut().find(|(p, _)| *p == param) {
            Some((_, slot)) => *slot = value,
            None => self.params.push((param, value)),
        }
    }
}

impl fmt::Display for CalendarQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}
