// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Response parsing tests.

use gcalendar::{
    GCalError, event_status, parse_calendar_list_feed, parse_entry, parse_event_entry,
    parse_event_feed, parse_feed,
};

const CALENDAR_LIST_FEED: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom"
      xmlns:openSearch="http://a9.com/-/spec/opensearchrss/1.0/"
      xmlns:gCal="http://schemas.google.com/gCal/2005"
      xmlns:gd="http://schemas.google.com/g/2005">
  <id>http://www.google.com/calendar/feeds/default</id>
  <updated>2026-03-09T18:36:40.000Z</updated>
  <title type="text">Jo March's Calendar List</title>
  <link rel="http://schemas.google.com/g/2005#feed" type="application/atom+xml"
        href="http://www.google.com/calendar/feeds/default"/>
  <link rel="self" type="application/atom+xml"
        href="http://www.google.com/calendar/feeds/default"/>
  <author>
    <name>Jo March</name>
    <email>jo@gmail.com</email>
  </author>
  <openSearch:startIndex>1</openSearch:startIndex>
  <entry>
    <id>http://www.google.com/calendar/feeds/default/jo%40gmail.com</id>
    <published>2026-03-09T18:36:40.000Z</published>
    <updated>2026-03-09T17:43:05.000Z</updated>
    <title type="text">Jo March</title>
    <link rel="alternate" type="application/atom+xml"
          href="http://www.google.com/calendar/feeds/jo%40gmail.com/private/full"/>
    <link rel="self" type="application/atom+xml"
          href="http://www.google.com/calendar/feeds/default/jo%40gmail.com"/>
    <author>
      <name>Jo March</name>
      <email>jo@gmail.com</email>
    </author>
    <gCal:color value="#2952A3"/>
    <gCal:accesslevel value="owner"/>
    <gCal:hidden value="false"/>
    <gCal:selected value="true"/>
    <gCal:timezone value="America/Los_Angeles"/>
  </entry>
  <entry>
    <id>http://www.google.com/calendar/feeds/default/holidays%40group.v.calendar.google.com</id>
    <title type="text">US Holidays</title>
    <link rel="alternate" type="application/atom+xml"
          href="http://www.google.com/calendar/feeds/holidays%40group.v.calendar.google.com/private/full"/>
    <gCal:color value="#528800"/>
    <gCal:accesslevel value="read"/>
    <gCal:hidden value="true"/>
  </entry>
</feed>"##;

const EVENT_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom"
      xmlns:openSearch="http://a9.com/-/spec/opensearchrss/1.0/"
      xmlns:gd="http://schemas.google.com/g/2005">
  <id>http://www.google.com/calendar/feeds/default/private/full</id>
  <updated>2026-03-09T18:36:40.000Z</updated>
  <title type="text">Jo March</title>
  <link rel="http://schemas.google.com/g/2005#post" type="application/atom+xml"
        href="http://www.google.com/calendar/feeds/default/private/full"/>
  <link rel="next" type="application/atom+xml"
        href="http://www.google.com/calendar/feeds/default/private/full?start-index=2&amp;max-results=1"/>
  <openSearch:totalResults>2</openSearch:totalResults>
  <openSearch:startIndex>1</openSearch:startIndex>
  <openSearch:itemsPerPage>1</openSearch:itemsPerPage>
  <entry>
    <id>http://www.google.com/calendar/feeds/default/private/full/2qt3ao5hbaq7m9igr5ak9esjo0</id>
    <published>2026-03-09T17:43:05.000Z</published>
    <updated>2026-03-09T17:43:05.000Z</updated>
    <category scheme="http://schemas.google.com/g/2005#kind"
              term="http://schemas.google.com/g/2005#event"/>
    <title type="text">Tennis with Beth</title>
    <content type="text">Meet for a quick lesson.</content>
    <link rel="alternate" type="text/html"
          href="http://www.google.com/calendar/event?eid=MnF0M2FvNWhiYXE3bTlpZ3I1YWs5ZXNqbzAg"
          title="alternate"/>
    <link rel="self" type="application/atom+xml"
          href="http://www.google.com/calendar/feeds/default/private/full/2qt3ao5hbaq7m9igr5ak9esjo0"/>
    <link rel="edit" type="application/atom+xml"
          href="http://www.google.com/calendar/feeds/default/private/full/2qt3ao5hbaq7m9igr5ak9esjo0/63310109397"/>
    <author>
      <name>Jo March</name>
      <email>jo@gmail.com</email>
    </author>
    <gd:comments>
      <gd:feedLink href="http://www.google.com/calendar/feeds/default/private/full/2qt3ao5hbaq7m9igr5ak9esjo0/comments"/>
    </gd:comments>
    <gd:eventStatus value="http://schemas.google.com/g/2005#event.confirmed"/>
    <gd:visibility value="http://schemas.google.com/g/2005#event.default"/>
    <gd:transparency value="http://schemas.google.com/g/2005#event.opaque"/>
    <gd:when startTime="2026-04-17T15:00:00.000Z" endTime="2026-04-17T17:00:00.000Z">
      <gd:reminder minutes="10"/>
    </gd:when>
    <gd:where valueString="Rolling Lawn Courts"/>
    <gd:who rel="http://schemas.google.com/g/2005#event.organizer" valueString="Jo March"
            email="jo@gmail.com"/>
  </entry>
</feed>"#;

#[test]
fn response_parse_calendar_list_feed() {
    let feed = parse_calendar_list_feed(CALENDAR_LIST_FEED).expect("Failed to parse list feed");

    assert_eq!(
        feed.id.as_deref(),
        Some("http://www.google.com/calendar/feeds/default")
    );
    assert_eq!(feed.title.as_deref(), Some("Jo March's Calendar List"));
    assert_eq!(feed.start_index, Some(1));
    assert_eq!(feed.total_results, None);
    assert_eq!(feed.authors.len(), 1);
    assert_eq!(feed.authors[0].email.as_deref(), Some("jo@gmail.com"));
    assert_eq!(feed.entries.len(), 2);

    let primary = &feed.entries[0];
    assert_eq!(primary.entry.title.as_deref(), Some("Jo March"));
    assert_eq!(primary.color.as_deref(), Some("#2952A3"));
    assert_eq!(primary.access_level.as_deref(), Some("owner"));
    assert_eq!(primary.hidden, Some(false));
    assert_eq!(primary.selected, Some(true));
    assert_eq!(primary.timezone.as_deref(), Some("America/Los_Angeles"));
    assert_eq!(
        primary.events_feed(),
        Some("http://www.google.com/calendar/feeds/jo%40gmail.com/private/full")
    );

    let holidays = &feed.entries[1];
    assert_eq!(holidays.entry.title.as_deref(), Some("US Holidays"));
    assert_eq!(holidays.hidden, Some(true));
    assert_eq!(holidays.selected, None);
    assert_eq!(holidays.timezone, None);
}

#[test]
fn response_parse_event_feed() {
    let feed = parse_event_feed(EVENT_FEED).expect("Failed to parse event feed");

    assert_eq!(feed.total_results, Some(2));
    assert_eq!(feed.items_per_page, Some(1));
    assert_eq!(
        feed.post_link(),
        Some("http://www.google.com/calendar/feeds/default/private/full")
    );
    assert_eq!(
        feed.next_link(),
        Some("http://www.google.com/calendar/feeds/default/private/full?start-index=2&max-results=1")
    );
    assert_eq!(feed.entries.len(), 1);

    let event = &feed.entries[0];
    assert_eq!(event.entry.title.as_deref(), Some("Tennis with Beth"));
    assert_eq!(
        event.entry.content.as_deref(),
        Some("Meet for a quick lesson.")
    );
    assert_eq!(
        event.edit_link(),
        Some(
            "http://www.google.com/calendar/feeds/default/private/full/2qt3ao5hbaq7m9igr5ak9esjo0/63310109397"
        )
    );
    assert_eq!(event.event_status.as_deref(), Some(event_status::CONFIRMED));
    assert_eq!(event.when.len(), 1);
    assert_eq!(event.when[0].start_time, "2026-04-17T15:00:00.000Z");
    assert_eq!(
        event.when[0].end_time.as_deref(),
        Some("2026-04-17T17:00:00.000Z")
    );
    assert_eq!(event.locations[0].value_string, "Rolling Lawn Courts");
    assert_eq!(event.participants.len(), 1);
    assert_eq!(event.participants[0].email.as_deref(), Some("jo@gmail.com"));
    assert!(
        event
            .comments_feed
            .as_deref()
            .is_some_and(|href| href.ends_with("/comments"))
    );
    assert_eq!(event.entry.categories.len(), 1);
}

#[test]
fn response_parse_generic_feed_keeps_atom_fields() {
    let feed = parse_feed(EVENT_FEED).expect("Failed to parse generic feed");

    assert_eq!(feed.entries.len(), 1);
    let entry = &feed.entries[0];
    assert_eq!(entry.title.as_deref(), Some("Tennis with Beth"));
    assert_eq!(entry.links.len(), 3);
    assert_eq!(entry.alternate_link().map(|l| l.contains("eid=")), Some(true));
    assert_eq!(entry.links[0].title.as_deref(), Some("alternate"));
}

#[test]
fn response_parse_event_entry() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<entry xmlns="http://www.w3.org/2005/Atom" xmlns:gd="http://schemas.google.com/g/2005">
  <id>http://www.google.com/calendar/feeds/default/private/full/abc</id>
  <title type="text">Dentist</title>
  <link rel="edit" type="application/atom+xml"
        href="http://www.google.com/calendar/feeds/default/private/full/abc/1"/>
  <gd:eventStatus value="http://schemas.google.com/g/2005#event.tentative"/>
  <gd:recurrence>DTSTART;VALUE=DATE:20260601
RRULE:FREQ=MONTHLY;COUNT=3</gd:recurrence>
</entry>"#;

    let event = parse_event_entry(xml).expect("Failed to parse event entry");

    assert_eq!(event.entry.title.as_deref(), Some("Dentist"));
    assert_eq!(event.event_status.as_deref(), Some(event_status::TENTATIVE));
    assert_eq!(
        event.recurrence.as_deref(),
        Some("DTSTART;VALUE=DATE:20260601\nRRULE:FREQ=MONTHLY;COUNT=3")
    );
    assert!(event.when.is_empty());
    assert!(event.entry.categories.is_empty());
}

#[test]
fn response_self_closed_entry_matches_open_form() {
    let empty = parse_event_entry(r#"<entry xmlns="http://www.w3.org/2005/Atom"/>"#)
        .expect("Failed to parse empty entry");
    let open = parse_event_entry(r#"<entry xmlns="http://www.w3.org/2005/Atom"></entry>"#)
        .expect("Failed to parse open entry");

    assert!(empty.entry.categories.is_empty());
    assert_eq!(empty, open);
}

#[test]
fn response_self_closed_entry_in_feed() {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry/>
  <entry><id>x</id></entry>
</feed>"#;
    let feed = parse_event_feed(xml).expect("Failed to parse event feed");

    assert_eq!(feed.entries.len(), 2);
    assert!(feed.entries[0].entry.categories.is_empty());
    assert!(feed.entries[1].entry.categories.is_empty());
    assert_eq!(feed.entries[0].entry.id, None);
    assert_eq!(feed.entries[1].entry.id.as_deref(), Some("x"));
}

#[test]
fn response_parse_entry_rejects_feed_document() {
    let err = parse_entry(EVENT_FEED).unwrap_err();
    assert!(matches!(err, GCalError::InvalidResponse(_)));
}

#[test]
fn response_parse_malformed_xml() {
    let err = parse_event_feed("<feed><entry><title>oops</entry></feed>").unwrap_err();
    assert!(matches!(err, GCalError::Xml(_)));
}

#[test]
fn response_parse_invalid_number() {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"
      xmlns:openSearch="http://a9.com/-/spec/opensearchrss/1.0/">
  <openSearch:totalResults>many</openSearch:totalResults>
</feed>"#;
    let err = parse_feed(xml).unwrap_err();
    assert!(matches!(err, GCalError::InvalidResponse(_)));
}
