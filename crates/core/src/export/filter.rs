//! Event list filters shared by exports and the CLI.

use chrono::{DateTime, Duration, Utc};
use er_protocol::Event;

/// Events starting within `[now, now + days]`, ascending by start date.
pub fn filter_upcoming(events: &[Event], days: i64, now: DateTime<Utc>) -> Vec<Event> {
    let cutoff = now + Duration::days(days);
    let mut upcoming: Vec<Event> = events
        .iter()
        .filter(|e| e.start_date >= now && e.start_date <= cutoff)
        .cloned()
        .collect();
    upcoming.sort_by_key(|e| e.start_date);
    upcoming
}

/// Events with at least one tag containing one of `tags`, ignoring case.
///
/// An empty `tags` keeps every event.
pub fn filter_by_tags(events: &[Event], tags: &[String]) -> Vec<Event> {
    if tags.is_empty() {
        return events.to_vec();
    }

    let wanted: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    events
        .iter()
        .filter(|event| {
            event.tags.iter().any(|tag| {
                let tag = tag.to_lowercase();
                wanted.iter().any(|w| tag.contains(w.as_str()))
            })
        })
        .cloned()
        .collect()
}
