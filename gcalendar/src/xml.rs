// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! XML utilities for Atom/GData processing.

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};

use crate::error::GCalError;

/// XML namespaces used by the calendar feeds.
pub mod ns {
    /// Atom namespace.
    pub const ATOM: &str = "http://www.w3.org/2005/Atom";

    /// GData namespace (`gd:` elements).
    pub const GDATA: &str = "http://schemas.google.com/g/2005";

    /// Google Calendar namespace (`gCal:` elements).
    pub const GCAL: &str = "http://schemas.google.com/gCal/2005";

    /// `OpenSearch` namespace.
    pub const OPENSEARCH: &str = "http://a9.com/-/spec/opensearchrss/1.0/";

    /// Category scheme carrying the kind of a GData entry.
    pub const KIND_SCHEME: &str = "http://schemas.google.com/g/2005#kind";

    /// Kind term of calendar events.
    pub const EVENT_KIND: &str = "http://schemas.google.com/g/2005#event";
}

/// Link relations.
pub mod rel {
    /// Edit URI of an entry.
    pub const EDIT: &str = "edit";
    /// Canonical URI.
    pub const SELF: &str = "self";
    /// HTML representation.
    pub const ALTERNATE: &str = "alternate";
    /// Next page of a feed.
    pub const NEXT: &str = "next";
    /// URI accepting new entries.
    pub const POST: &str = "http://schemas.google.com/g/2005#post";
}

/// Reads the text content of the element whose start tag was just consumed,
/// up to and including its end tag. Nested markup is skipped, its text kept.
///
/// The result is trimmed.
///
/// # Errors
///
/// Returns an error if XML parsing fails or the document ends early.
pub fn read_text(reader: &mut Reader<&[u8]>) -> Result<String, GCalError> {
    let mut text = String::new();
    let mut depth = 1_usize;

    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Text(e) => text.push_str(&reader.decoder().decode(&e)?),
            Event::CData(e) => text.push_str(&reader.decoder().decode(&e)?),
            Event::GeneralRef(e) => {
                if let Some(ch) = e.resolve_char_ref()? {
                    text.push(ch);
                } else {
                    let name = reader.decoder().decode(&e)?;
                    let resolved = resolve_predefined_entity(&name)
                        .ok_or_else(|| GCalError::Xml(format!("Unknown entity: &{name};")))?;
                    text.push_str(resolved);
                }
            }
            Event::Eof => return Err(GCalError::Xml("Unexpected EOF".to_string())),
            _ => {}
        }
    }

    Ok(text.trim().to_string())
}

/// Skips the element whose start tag was just consumed.
///
/// # Errors
///
/// Returns an error if XML parsing fails or the document ends early.
pub fn skip_element(reader: &mut Reader<&[u8]>) -> Result<(), GCalError> {
    let mut depth = 1_usize;
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => return Err(GCalError::Xml("Unexpected EOF".to_string())),
            _ => {}
        }
    }
}

/// Reads an unescaped attribute value by (unprefixed) name.
///
/// # Errors
///
/// Returns an error if the attribute is malformed.
pub fn attr(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, GCalError> {
    let Some(attr) = e.try_get_attribute(name)? else {
        return Ok(None);
    };
    let raw = std::str::from_utf8(&attr.value)
        .map_err(|e| GCalError::Xml(format!("UTF-8 error: {e}")))?;
    Ok(Some(unescape(raw)?.into_owned()))
}

/// Parses an attribute holding `true`/`false`.
///
/// # Errors
///
/// Returns an error if the attribute is malformed.
pub fn bool_attr(e: &BytesStart<'_>, name: &str) -> Result<Option<bool>, GCalError> {
    Ok(attr(e, name)?.map(|v| v.eq_ignore_ascii_case("true")))
}

/// Local name of an element, without namespace prefix.
#[must_use]
pub fn local_name<'a>(e: &'a BytesStart<'_>) -> &'a [u8] {
    e.local_name().into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader_after_start(xml: &str) -> Reader<&[u8]> {
        let mut reader = Reader::from_str(xml);
        loop {
            if let Ok(Event::Start(_)) = reader.read_event() {
                return reader;
            }
        }
    }

    #[test]
    fn read_text_resolves_references() {
        let mut reader = reader_after_start("<title>Tom &amp; Jerry&#33; <b>now</b></title>");
        let text = read_text(&mut reader).unwrap();
        assert_eq!(text, "Tom & Jerry! now");
    }

    #[test]
    fn read_text_fails_on_truncated_input() {
        let mut reader = reader_after_start("<title>unterminated");
        assert!(read_text(&mut reader).is_err());
    }

    #[test]
    fn skip_element_consumes_nested_children() {
        let mut reader = reader_after_start("<a><b><c/></b><b/></a><next/>");
        skip_element(&mut reader).unwrap();
        assert!(matches!(reader.read_event(), Ok(Event::Empty(e)) if e.local_name().into_inner() == b"next"));
    }
}
