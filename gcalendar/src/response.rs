// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Response parsers for Atom/GData documents.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::GCalError;
use crate::types::{
    CalendarEntry, CalendarListFeed, Category, Entry, EventEntry, EventFeed, Feed, Link, Person,
    When, Where, Who,
};
use crate::xml::{attr, bool_attr, local_name, read_text, skip_element};

/// Entry kinds that can be read out of an Atom document.
///
/// The common Atom children are handled once for every kind; each kind only
/// reads its own extension elements.
pub(crate) trait AtomEntry: Default {
    fn entry_mut(&mut self) -> &mut Entry;

    /// Reads an extension element whose start tag was just consumed. Returns
    /// `false` when the element is not understood and has not been consumed.
    fn read_extension(
        &mut self,
        reader: &mut Reader<&[u8]>,
        start: &BytesStart<'_>,
        empty: bool,
    ) -> Result<bool, GCalError>;
}

impl AtomEntry for Entry {
    fn entry_mut(&mut self) -> &mut Entry {
        self
    }

    fn read_extension(
        &mut self,
        _reader: &mut Reader<&[u8]>,
        _start: &BytesStart<'_>,
        _empty: bool,
    ) -> Result<bool, GCalError> {
        Ok(false)
    }
}

impl AtomEntry for CalendarEntry {
    fn entry_mut(&mut self) -> &mut Entry {
        &mut self.entry
    }

    fn read_extension(
        &mut self,
        reader: &mut Reader<&[u8]>,
        start: &BytesStart<'_>,
        empty: bool,
    ) -> Result<bool, GCalError> {
        match local_name(start) {
            b"color" => self.color = attr(start, "value")?,
            b"timezone" => self.timezone = attr(start, "value")?,
            b"hidden" => self.hidden = bool_attr(start, "value")?,
            b"selected" => self.selected = bool_attr(start, "value")?,
            b"accesslevel" => self.access_level = attr(start, "value")?,
            _ => return Ok(false),
        }
        finish(reader, empty)?;
        Ok(true)
    }
}

impl AtomEntry for EventEntry {
    fn entry_mut(&mut self) -> &mut Entry {
        &mut self.entry
    }

    fn read_extension(
        &mut self,
        reader: &mut Reader<&[u8]>,
        start: &BytesStart<'_>,
        empty: bool,
    ) -> Result<bool, GCalError> {
        match local_name(start) {
            b"when" => self.when.push(When {
                start_time: attr(start, "startTime")?.unwrap_or_default(),
                end_time: attr(start, "endTime")?,
            }),
            b"where" => self.locations.push(Where {
                value_string: attr(start, "valueString")?.unwrap_or_default(),
            }),
            b"who" => self.participants.push(Who {
                email: attr(start, "email")?,
                value_string: attr(start, "valueString")?,
                rel: attr(start, "rel")?,
            }),
            b"eventStatus" => self.event_status = attr(start, "value")?,
            b"transparency" => self.transparency = attr(start, "value")?,
            b"visibility" => self.visibility = attr(start, "value")?,
            b"recurrence" => {
                self.recurrence = optional_text(reader, empty)?;
                return Ok(true);
            }
            b"comments" => {
                if !empty {
                    self.comments_feed = read_feed_link(reader)?;
                }
                return Ok(true);
            }
            _ => return Ok(false),
        }
        finish(reader, empty)?;
        Ok(true)
    }
}

/// Parses any Atom feed, keeping only the common entry fields.
///
/// # Errors
///
/// Returns an error if the document is not a well-formed Atom feed.
pub fn parse_feed(xml: &str) -> Result<Feed<Entry>, GCalError> {
    read_feed(xml)
}

/// Parses a calendar list feed.
///
/// # Errors
///
/// Returns an error if the document is not a well-formed Atom feed.
pub fn parse_calendar_list_feed(xml: &str) -> Result<CalendarListFeed, GCalError> {
    read_feed(xml)
}

/// Parses an event feed.
///
/// # Errors
///
/// Returns an error if the document is not a well-formed Atom feed.
pub fn parse_event_feed(xml: &str) -> Result<EventFeed, GCalError> {
    read_feed(xml)
}

/// Parses a standalone Atom entry.
///
/// # Errors
///
/// Returns an error if the document is not a well-formed Atom entry.
pub fn parse_entry(xml: &str) -> Result<Entry, GCalError> {
    read_document_entry(xml)
}

/// Parses a standalone event entry.
///
/// # Errors
///
/// Returns an error if the document is not a well-formed Atom entry.
pub fn parse_event_entry(xml: &str) -> Result<EventEntry, GCalError> {
    read_document_entry(xml)
}

/// Consumes everything up to and including the root start tag named `root`.
/// Returns `false` if the root element is empty (`<root/>`).
fn read_root(reader: &mut Reader<&[u8]>, root: &str) -> Result<bool, GCalError> {
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if local_name(&e) != root.as_bytes() => {
                return Err(GCalError::InvalidResponse(format!(
                    "Expected <{root}> document, got <{}>",
                    String::from_utf8_lossy(local_name(&e))
                )));
            }
            Event::Start(_) => return Ok(true),
            Event::Empty(_) => return Ok(false),
            Event::Eof => {
                return Err(GCalError::InvalidResponse(format!(
                    "Expected <{root}> document, got an empty body"
                )));
            }
            _ => {}
        }
    }
}

fn read_feed<E: AtomEntry>(xml: &str) -> Result<Feed<E>, GCalError> {
    let mut reader = Reader::from_str(xml);
    let mut feed = Feed::default();
    if !read_root(&mut reader, "feed")? {
        return Ok(feed);
    }

    loop {
        match reader.read_event()? {
            Event::Start(e) => match local_name(&e) {
                b"entry" => feed.entries.push(read_entry(&mut reader)?),
                b"id" => feed.id = Some(read_text(&mut reader)?),
                b"title" => feed.title = Some(read_text(&mut reader)?),
                b"updated" => feed.updated = Some(read_text(&mut reader)?),
                b"author" => feed.authors.push(read_person(&mut reader)?),
                b"link" => {
                    feed.links.push(read_link(&e)?);
                    skip_element(&mut reader)?;
                }
                b"totalResults" => feed.total_results = Some(read_u32(&mut reader)?),
                b"startIndex" => feed.start_index = Some(read_u32(&mut reader)?),
                b"itemsPerPage" => feed.items_per_page = Some(read_u32(&mut reader)?),
                _ => skip_element(&mut reader)?,
            },
            Event::Empty(e) => match local_name(&e) {
                b"link" => feed.links.push(read_link(&e)?),
                b"entry" => feed.entries.push(blank_entry()),
                _ => {}
            },
            Event::End(_) => break,
            Event::Eof => return Err(GCalError::Xml("Unexpected EOF".to_string())),
            _ => {}
        }
    }

    tracing::debug!(entries = feed.entries.len(), "parsed feed");
    Ok(feed)
}

fn read_document_entry<E: AtomEntry>(xml: &str) -> Result<E, GCalError> {
    let mut reader = Reader::from_str(xml);
    if read_root(&mut reader, "entry")? {
        read_entry(&mut reader)
    } else {
        Ok(blank_entry())
    }
}

/// An entry holding only what the document carries, without the categories
/// some defaults add.
fn blank_entry<E: AtomEntry>() -> E {
    let mut entry = E::default();
    *entry.entry_mut() = Entry::default();
    entry
}

/// Reads an entry whose start tag was just consumed.
fn read_entry<E: AtomEntry>(reader: &mut Reader<&[u8]>) -> Result<E, GCalError> {
    let mut entry = blank_entry::<E>();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if !read_entry_child(&mut entry, reader, &e, false)? {
                    skip_element(reader)?;
                }
            }
            Event::Empty(e) => {
                read_entry_child(&mut entry, reader, &e, true)?;
            }
            Event::End(_) => return Ok(entry),
            Event::Eof => return Err(GCalError::Xml("Unexpected EOF".to_string())),
            _ => {}
        }
    }
}

fn read_entry_child<E: AtomEntry>(
    entry: &mut E,
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    empty: bool,
) -> Result<bool, GCalError> {
    let base = entry.entry_mut();
    match local_name(e) {
        b"id" => base.id = optional_text(reader, empty)?,
        b"title" => base.title = optional_text(reader, empty)?,
        b"content" => base.content = optional_text(reader, empty)?,
        b"summary" => base.summary = optional_text(reader, empty)?,
        b"updated" => base.updated = optional_text(reader, empty)?,
        b"published" => base.published = optional_text(reader, empty)?,
        b"author" => {
            if !empty {
                base.authors.push(read_person(reader)?);
            }
        }
        b"category" => {
            base.categories.push(Category {
                scheme: attr(e, "scheme")?,
                term: attr(e, "term")?.unwrap_or_default(),
            });
            finish(reader, empty)?;
        }
        b"link" => {
            base.links.push(read_link(e)?);
            finish(reader, empty)?;
        }
        _ => return entry.read_extension(reader, e, empty),
    }
    Ok(true)
}

fn read_link(e: &BytesStart<'_>) -> Result<Link, GCalError> {
    Ok(Link {
        rel: attr(e, "rel")?,
        href: attr(e, "href")?.unwrap_or_default(),
        link_type: attr(e, "type")?,
        title: attr(e, "title")?,
    })
}

/// Reads an `author` element whose start tag was just consumed.
fn read_person(reader: &mut Reader<&[u8]>) -> Result<Person, GCalError> {
    let mut person = Person::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => match local_name(&e) {
                b"name" => person.name = Some(read_text(reader)?),
                b"email" => person.email = Some(read_text(reader)?),
                _ => skip_element(reader)?,
            },
            Event::End(_) => return Ok(person),
            Event::Eof => return Err(GCalError::Xml("Unexpected EOF".to_string())),
            _ => {}
        }
    }
}

/// Reads the `gd:feedLink` href out of a `gd:comments` element.
fn read_feed_link(reader: &mut Reader<&[u8]>) -> Result<Option<String>, GCalError> {
    let mut href = None;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if local_name(&e) == b"feedLink" {
                    href = attr(&e, "href")?;
                }
                skip_element(reader)?;
            }
            Event::Empty(e) if local_name(&e) == b"feedLink" => href = attr(&e, "href")?,
            Event::End(_) => return Ok(href),
            Event::Eof => return Err(GCalError::Xml("Unexpected EOF".to_string())),
            _ => {}
        }
    }
}

fn read_u32(reader: &mut Reader<&[u8]>) -> Result<u32, GCalError> {
    let text = read_text(reader)?;
    text.parse()
        .map_err(|e| GCalError::InvalidResponse(format!("Invalid number '{text}': {e}")))
}

fn optional_text(reader: &mut Reader<&[u8]>, empty: bool) -> Result<Option<String>, GCalError> {
    if empty {
        Ok(None)
    } else {
        read_text(reader).map(Some)
    }
}

fn finish(reader: &mut Reader<&[u8]>, empty: bool) -> Result<(), GCalError> {
    if empty { Ok(()) } else { skip_element(reader) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_root() {
        let err = parse_event_feed("<entry><id>x</id></entry>").unwrap_err();
        assert!(matches!(err, GCalError::InvalidResponse(_)));

        let err = parse_event_entry("").unwrap_err();
        assert!(matches!(err, GCalError::InvalidResponse(_)));
    }

    #[test]
    fn empty_root_yields_empty_feed() {
        let feed = parse_feed(r#"<?xml version="1.0"?><feed xmlns="http://www.w3.org/2005/Atom"/>"#)
            .unwrap();
        assert!(feed.entries.is_empty());
        assert_eq!(feed.id, None);
    }

    #[test]
    fn unknown_elements_are_skipped() {
        let xml = r#"<entry xmlns="http://www.w3.org/2005/Atom">
            <x:unknown xmlns:x="urn:x"><title>not mine</title></x:unknown>
            <title>mine</title>
        </entry>"#;
        let entry = parse_entry(xml).unwrap();
        assert_eq!(entry.title.as_deref(), Some("mine"));
    }
}
