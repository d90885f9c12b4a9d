// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Request body serialization for Atom/GData entries.

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::GCalError;
use crate::types::{Entry, EventEntry, Person};
use crate::xml::ns;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

impl Entry {
    /// Serializes the entry as a standalone Atom document.
    ///
    /// # Errors
    ///
    /// Returns an error if XML writing fails.
    pub fn to_xml(&self) -> Result<String, GCalError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        // <entry xmlns="http://www.w3.org/2005/Atom">
        let mut root = BytesStart::new("entry");
        root.push_attribute(("xmlns", ns::ATOM));
        writer.write_event(Event::Start(root))?;

        write_entry_children(&mut writer, self)?;

        writer.write_event(Event::End(BytesEnd::new("entry")))?;
        into_string(writer)
    }
}

impl EventEntry {
    /// Serializes the event as a standalone Atom document with `gd:`
    /// extension elements, ready to be posted or put.
    ///
    /// # Errors
    ///
    /// Returns an error if XML writing fails.
    pub fn to_xml(&self) -> Result<String, GCalError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        // <entry xmlns="http://www.w3.org/2005/Atom" xmlns:gd="http://schemas.google.com/g/2005">
        let mut root = BytesStart::new("entry");
        root.push_attribute(("xmlns", ns::ATOM));
        root.push_attribute(("xmlns:gd", ns::GDATA));
        writer.write_event(Event::Start(root))?;

        write_entry_children(&mut writer, &self.entry)?;

        for when in &self.when {
            write_empty(
                &mut writer,
                "gd:when",
                &[
                    ("startTime", Some(when.start_time.as_str())),
                    ("endTime", when.end_time.as_deref()),
                ],
            )?;
        }
        for location in &self.locations {
            write_empty(
                &mut writer,
                "gd:where",
                &[("valueString", Some(location.value_string.as_str()))],
            )?;
        }
        for who in &self.participants {
            write_empty(
                &mut writer,
                "gd:who",
                &[
                    ("email", who.email.as_deref()),
                    ("rel", who.rel.as_deref()),
                    ("valueString", who.value_string.as_deref()),
                ],
            )?;
        }
        if let Some(status) = &self.event_status {
            write_empty(&mut writer, "gd:eventStatus", &[("value", Some(status.as_str()))])?;
        }
        if let Some(transparency) = &self.transparency {
            write_empty(
                &mut writer,
                "gd:transparency",
                &[("value", Some(transparency.as_str()))],
            )?;
        }
        if let Some(visibility) = &self.visibility {
            write_empty(&mut writer, "gd:visibility", &[("value", Some(visibility.as_str()))])?;
        }
        if let Some(recurrence) = &self.recurrence {
            write_text(&mut writer, "gd:recurrence", recurrence, &[])?;
        }
        if let Some(href) = &self.comments_feed {
            writer.write_event(Event::Start(BytesStart::new("gd:comments")))?;
            write_empty(&mut writer, "gd:feedLink", &[("href", Some(href.as_str()))])?;
            writer.write_event(Event::End(BytesEnd::new("gd:comments")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("entry")))?;
        into_string(writer)
    }
}

fn write_entry_children(writer: &mut XmlWriter, entry: &Entry) -> Result<(), GCalError> {
    if let Some(id) = &entry.id {
        write_text(writer, "id", id, &[])?;
    }
    if let Some(title) = &entry.title {
        write_text(writer, "title", title, &[("type", "text")])?;
    }
    if let Some(content) = &entry.content {
        write_text(writer, "content", content, &[("type", "text")])?;
    }
    if let Some(summary) = &entry.summary {
        write_text(writer, "summary", summary, &[])?;
    }
    if let Some(updated) = &entry.updated {
        write_text(writer, "updated", updated, &[])?;
    }
    if let Some(published) = &entry.published {
        write_text(writer, "published", published, &[])?;
    }
    for author in &entry.authors {
        write_person(writer, author)?;
    }
    for category in &entry.categories {
        write_empty(
            writer,
            "category",
            &[
                ("scheme", category.scheme.as_deref()),
                ("term", Some(category.term.as_str())),
            ],
        )?;
    }
    for link in &entry.links {
        write_empty(
            writer,
            "link",
            &[
                ("rel", link.rel.as_deref()),
                ("type", link.link_type.as_deref()),
                ("href", Some(link.href.as_str())),
                ("title", link.title.as_deref()),
            ],
        )?;
    }
    Ok(())
}

fn write_person(writer: &mut XmlWriter, person: &Person) -> Result<(), GCalError> {
    writer.write_event(Event::Start(BytesStart::new("author")))?;
    if let Some(name) = &person.name {
        write_text(writer, "name", name, &[])?;
    }
    if let Some(email) = &person.email {
        write_text(writer, "email", email, &[])?;
    }
    writer.write_event(Event::End(BytesEnd::new("author")))?;
    Ok(())
}

fn write_text(
    writer: &mut XmlWriter,
    name: &str,
    text: &str,
    attrs: &[(&str, &str)],
) -> Result<(), GCalError> {
    let mut start = BytesStart::new(name);
    for attr in attrs {
        start.push_attribute(*attr);
    }
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Writes `<name .../>`, leaving out attributes without a value.
fn write_empty(
    writer: &mut XmlWriter,
    name: &str,
    attrs: &[(&str, Option<&str>)],
) -> Result<(), GCalError> {
    let mut elem = BytesStart::new(name);
    for (key, value) in attrs {
        if let Some(value) = value {
            elem.push_attribute((*key, *value));
        }
    }
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

fn into_string(writer: XmlWriter) -> Result<String, GCalError> {
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| GCalError::Xml(format!("UTF-8 error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_attributes_are_omitted() {
        let event = EventEntry::new("Standup").with_when("2026-03-02T09:00:00Z", None);
        let xml = event.to_xml().unwrap();
        assert!(xml.contains(r#"<gd:when startTime="2026-03-02T09:00:00Z"/>"#));
        assert!(!xml.contains("endTime"));
    }

    #[test]
    fn text_is_escaped() {
        let entry = Entry {
            title: Some("Q&A <live>".to_string()),
            ..Entry::default()
        };
        let xml = entry.to_xml().unwrap();
        assert!(xml.contains(r#"<title type="text">Q&amp;A &lt;live&gt;</title>"#));
    }
}
