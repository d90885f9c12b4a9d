// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Client for the Google Calendar GData feed protocol.
//!
//! Builds feed query URIs, performs one request per operation and translates
//! Atom responses into typed feeds and entries.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else, clippy::match_bool)]

mod client;
mod config;
mod error;
mod http;
mod outcome;
mod params;
mod query;
mod request;
mod response;
mod types;
mod xml;

pub use crate::client::{CalendarService, normalize_edit_uri};
pub use crate::config::{AuthMethod, GCalConfig};
pub use crate::error::GCalError;
pub use crate::outcome::{Outcome, TransportFailure};
pub use crate::params::UrlParams;
pub use crate::query::{
    CalendarQuery, CategoryFilter, DEFAULT_USER, FeedKind, OrderBy, QueryParam, SortOrder,
};
pub use crate::response::{
    parse_calendar_list_feed, parse_entry, parse_event_entry, parse_event_feed, parse_feed,
};
pub use crate::types::{
    CalendarEntry, CalendarListFeed, Category, Entry, EventEntry, EventFeed, Feed, Link, Person,
    QueryFeed, When, Where, Who, event_status,
};
pub use crate::xml::{ns, rel};
