//! JSON feed export.

use chrono::{DateTime, Utc};
use er_protocol::{CalendarConfig, Event, FeedEvent, JsonFeed};

pub fn generate_json_feed(
    calendar: &CalendarConfig,
    events: &[Event],
    now: DateTime<Utc>,
) -> JsonFeed {
    JsonFeed {
        title: calendar.name.clone(),
        description: calendar.description.clone(),
        updated: now,
        events: events.iter().map(FeedEvent::from).collect(),
    }
}
