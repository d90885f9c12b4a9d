// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::xml::{ns, rel};

/// Link element of an Atom feed or entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    /// Link relation, e.g. `edit` or `alternate`.
    pub rel: Option<String>,
    /// Target URI.
    pub href: String,
    /// Media type of the target.
    pub link_type: Option<String>,
    /// Human readable title.
    pub title: Option<String>,
}

impl Link {
    /// Creates a link with the given relation.
    #[must_use]
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: Some(rel.into()),
            href: href.into(),
            ..Self::default()
        }
    }
}

/// Author or contributor of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

/// Category element, used by GData to carry the kind of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    /// Category scheme URI.
    pub scheme: Option<String>,
    /// Category term.
    pub term: String,
}

/// Atom entry fields shared by every entry kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Entry id (an URI).
    pub id: Option<String>,
    /// Entry title.
    pub title: Option<String>,
    /// Text content (the event description, for events).
    pub content: Option<String>,
    /// Summary text.
    pub summary: Option<String>,
    /// Last update timestamp as sent by the server.
    pub updated: Option<String>,
    /// Publication timestamp as sent by the server.
    pub published: Option<String>,
    /// Authors.
    pub authors: Vec<Person>,
    /// Categories.
    pub categories: Vec<Category>,
    /// Links.
    pub links: Vec<Link>,
}

impl Entry {
    /// Returns the href of the first link with the given relation.
    #[must_use]
    pub fn link(&self, rel: &str) -> Option<&str> {
        find_link(&self.links, rel)
    }

    /// The edit URI of the entry, used for update and delete.
    #[must_use]
    pub fn edit_link(&self) -> Option<&str> {
        self.link(rel::EDIT)
    }

    /// The canonical URI of the entry.
    #[must_use]
    pub fn self_link(&self) -> Option<&str> {
        self.link(rel::SELF)
    }

    /// The HTML page of the entry.
    #[must_use]
    pub fn alternate_link(&self) -> Option<&str> {
        self.link(rel::ALTERNATE)
    }
}

/// Atom feed holding entries of kind `E`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed<E> {
    /// Feed id.
    pub id: Option<String>,
    /// Feed title.
    pub title: Option<String>,
    /// Last update timestamp.
    pub updated: Option<String>,
    /// Feed authors.
    pub authors: Vec<Person>,
    /// Feed links.
    pub links: Vec<Link>,
    /// `openSearch:totalResults`.
    pub total_results: Option<u32>,
    /// `openSearch:startIndex`.
    pub start_index: Option<u32>,
    /// `openSearch:itemsPerPage`.
    pub items_per_page: Option<u32>,
    /// Entries in document order.
    pub entries: Vec<E>,
}

impl<E> Default for Feed<E> {
    fn default() -> Self {
        Self {
            id: None,
            title: None,
            updated: None,
            authors: Vec::new(),
            links: Vec::new(),
            total_results: None,
            start_index: None,
            items_per_page: None,
            entries: Vec::new(),
        }
    }
}

impl<E> Feed<E> {
    /// Returns the href of the first link with the given relation.
    #[must_use]
    pub fn link(&self, rel: &str) -> Option<&str> {
        find_link(&self.links, rel)
    }

    /// URI new entries are posted to.
    #[must_use]
    pub fn post_link(&self) -> Option<&str> {
        self.link(rel::POST)
    }

    /// URI of the next page of results.
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        self.link(rel::NEXT)
    }
}

fn find_link<'a>(links: &'a [Link], rel: &str) -> Option<&'a str> {
    links
        .iter()
        .find(|l| l.rel.as_deref() == Some(rel))
        .map(|l| l.href.as_str())
}

/// A calendar in the calendar list feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarEntry {
    /// Common Atom fields.
    pub entry: Entry,
    /// `gCal:color`, e.g. `#2952A3`.
    pub color: Option<String>,
    /// `gCal:timezone`, e.g. `America/Los_Angeles`.
    pub timezone: Option<String>,
    /// `gCal:hidden`.
    pub hidden: Option<bool>,
    /// `gCal:selected`.
    pub selected: Option<bool>,
    /// `gCal:accesslevel`, e.g. `owner` or `read`.
    pub access_level: Option<String>,
}

impl CalendarEntry {
    /// URI of the event feed of this calendar.
    #[must_use]
    pub fn events_feed(&self) -> Option<&str> {
        self.entry.alternate_link()
    }
}

/// Time span of an event (`gd:when`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct When {
    /// Start, as an RFC 3339 date or date-time.
    pub start_time: String,
    /// End, as an RFC 3339 date or date-time.
    pub end_time: Option<String>,
}

/// Location of an event (`gd:where`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Where {
    /// Free-form location text.
    pub value_string: String,
}

/// Participant of an event (`gd:who`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Who {
    /// Email address.
    pub email: Option<String>,
    /// Display name.
    pub value_string: Option<String>,
    /// Role URI, e.g. `http://schemas.google.com/g/2005#event.attendee`.
    pub rel: Option<String>,
}

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEntry {
    /// Common Atom fields.
    pub entry: Entry,
    /// Occurrences; a single element for non-recurring events.
    pub when: Vec<When>,
    /// Locations.
    pub locations: Vec<Where>,
    /// Participants.
    pub participants: Vec<Who>,
    /// `gd:eventStatus` value URI, see [`event_status`].
    pub event_status: Option<String>,
    /// `gd:transparency` value URI.
    pub transparency: Option<String>,
    /// `gd:visibility` value URI.
    pub visibility: Option<String>,
    /// `gd:recurrence` iCalendar text.
    pub recurrence: Option<String>,
    /// Href of the comments feed (`gd:comments/gd:feedLink`).
    pub comments_feed: Option<String>,
}

impl EventEntry {
    /// Creates an event with the given title, tagged with the GData event kind.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let mut event = Self::default();
        event.entry.title = Some(title.into());
        event
    }

    /// Sets the time span of a single occurrence.
    #[must_use]
    pub fn with_when(mut self, start_time: impl Into<String>, end_time: Option<String>) -> Self {
        self.when.push(When {
            start_time: start_time.into(),
            end_time,
        });
        self
    }

    /// Adds a location.
    #[must_use]
    pub fn with_location(mut self, value: impl Into<String>) -> Self {
        self.locations.push(Where {
            value_string: value.into(),
        });
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.entry.content = Some(content.into());
        self
    }

    /// The edit URI of the event.
    #[must_use]
    pub fn edit_link(&self) -> Option<&str> {
        self.entry.edit_link()
    }
}

impl Default for EventEntry {
    fn default() -> Self {
        Self {
            entry: Entry {
                categories: vec![Category {
                    scheme: Some(ns::KIND_SCHEME.to_string()),
                    term: ns::EVENT_KIND.to_string(),
                }],
                ..Entry::default()
            },
            when: Vec::new(),
            locations: Vec::new(),
            participants: Vec::new(),
            event_status: None,
            transparency: None,
            visibility: None,
            recurrence: None,
            comments_feed: None,
        }
    }
}

/// `gd:eventStatus` values.
pub mod event_status {
    /// The event is canceled.
    pub const CANCELED: &str = "http://schemas.google.com/g/2005#event.canceled";
    /// The event is confirmed.
    pub const CONFIRMED: &str = "http://schemas.google.com/g/2005#event.confirmed";
    /// The event is tentative.
    pub const TENTATIVE: &str = "http://schemas.google.com/g/2005#event.tentative";
}

/// Feed of calendars, as returned for a list-calendars query.
pub type CalendarListFeed = Feed<CalendarEntry>;

/// Feed of events, as returned for an events query.
pub type EventFeed = Feed<EventEntry>;

/// Translated response of a feed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFeed {
    /// Response to a list-calendars query.
    Calendars(CalendarListFeed),
    /// Response to an events query.
    Events(EventFeed),
    /// Response to any other feed, with only the Atom fields translated.
    Generic(Feed<Entry>),
}

impl QueryFeed {
    /// Returns the calendar list feed, if that is what the query produced.
    #[must_use]
    pub fn into_calendars(self) -> Option<CalendarListFeed> {
        match self {
            Self::Calendars(feed) => Some(feed),
            _ => None,
        }
    }

    /// Returns the event feed, if that is what the query produced.
    #[must_use]
    pub fn into_events(self) -> Option<EventFeed> {
        match self {
            Self::Events(feed) => Some(feed),
            _ => None,
        }
    }

    /// Returns the generic feed, if that is what the query produced.
    #[must_use]
    pub fn into_generic(self) -> Option<Feed<Entry>> {
        match self {
            Self::Generic(feed) => Some(feed),
            _ => None,
        }
    }
}
