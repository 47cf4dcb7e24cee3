//! RFC 5545 iCalendar generation.

use chrono::{DateTime, Utc};
use er_protocol::{CalendarConfig, Event};

const PRODID: &str = "-//event-radar//event-radar//EN";
const MAX_LINE_OCTETS: usize = 75;

/// Render `events` as a single VCALENDAR document with CRLF line endings.
pub fn generate_ical(calendar: &CalendarConfig, events: &[Event], now: DateTime<Utc>) -> String {
    let mut out = String::new();

    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, &format!("PRODID:{PRODID}"));
    push_line(&mut out, "CALSCALE:GREGORIAN");
    push_line(&mut out, "METHOD:PUBLISH");
    push_line(&mut out, &format!("X-WR-CALNAME:{}", escape_text(&calendar.name)));
    push_line(&mut out, &format!("X-WR-CALDESC:{}", escape_text(&calendar.description)));
    push_line(&mut out, &format!("X-WR-TIMEZONE:{}", calendar.timezone));
    if let Some(url) = &calendar.url {
        push_line(&mut out, &format!("URL:{url}"));
    }
    push_line(&mut out, "REFRESH-INTERVAL;VALUE=DURATION:PT1H");
    push_line(&mut out, "X-PUBLISHED-TTL:PT1H");

    for event in events {
        push_event(&mut out, event, now);
    }

    push_line(&mut out, "END:VCALENDAR");
    out
}

fn push_event(out: &mut String, event: &Event, now: DateTime<Utc>) {
    push_line(out, "BEGIN:VEVENT");
    push_line(out, &format!("UID:{}", event.id));
    push_line(out, &format!("DTSTAMP:{}", format_utc(&now)));
    push_line(out, &format!("DTSTART:{}", format_utc(&event.start_date)));
    push_line(out, &format!("DTEND:{}", format_utc(&event.end_date)));
    push_line(out, &format!("SUMMARY:{}", escape_text(&event.title)));
    push_line(out, &format!("DESCRIPTION:{}", escape_text(&describe(event))));
    push_line(out, &format!("LOCATION:{}", escape_text(&event.location)));
    if !event.url.is_empty() {
        push_line(out, &format!("URL:{}", event.url));
    }
    if !event.tags.is_empty() {
        let categories: Vec<String> = event.tags.iter().map(|t| escape_text(t)).collect();
        push_line(out, &format!("CATEGORIES:{}", categories.join(",")));
    }
    push_line(out, &format!("CREATED:{}", format_utc(&event.created_at)));
    push_line(out, &format!("LAST-MODIFIED:{}", format_utc(&event.updated_at)));
    push_line(out, "END:VEVENT");
}

/// Event description enriched with organizer, price, tags, source and id.
pub fn describe(event: &Event) -> String {
    let mut description = event.description.clone();

    if let Some(organizer) = &event.organizer {
        description.push_str(&format!("\n\nOrganizer: {organizer}"));
    }
    if let Some(price) = &event.price {
        description.push_str(&format!("\nPrice: {price}"));
    }
    if !event.tags.is_empty() {
        description.push_str(&format!("\n\nTags: {}", event.tags.join(", ")));
    }
    description.push_str(&format!("\n\nSource: {}", event.source));
    description.push_str(&format!("\nEvent ID: {}", event.id));

    description.trim().to_string()
}

fn format_utc(instant: &DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escape a TEXT value (RFC 5545 section 3.3.11).
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Append `line` folded at 75 octets, never splitting a UTF-8 sequence.
fn push_line(out: &mut String, line: &str) {
    let mut used = 0;
    for c in line.chars() {
        let width = c.len_utf8();
        if used + width > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            used = 1;
        }
        out.push(c);
        used += width;
    }
    out.push_str("\r\n");
}
