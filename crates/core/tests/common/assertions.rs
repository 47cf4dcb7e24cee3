//! Assertion helpers over event sequences.

use er_protocol::Event;
use std::collections::HashSet;

/// Assert that no two events share an id.
#[allow(dead_code)]
pub fn assert_unique_ids(events: &[Event]) {
    let mut seen = HashSet::new();
    for event in events {
        assert!(seen.insert(event.id.as_str()), "Duplicate event id {}", event.id);
    }
}

/// Assert that events are ordered by ascending start date.
#[allow(dead_code)]
pub fn assert_sorted_by_start(events: &[Event]) {
    for pair in events.windows(2) {
        assert!(
            pair[0].start_date <= pair[1].start_date,
            "{} ({}) sorts after {} ({})",
            pair[0].title,
            pair[0].start_date,
            pair[1].title,
            pair[1].start_date
        );
    }
}

/// Titles in sequence order.
#[allow(dead_code)]
pub fn titles(events: &[Event]) -> Vec<&str> {
    events.iter().map(|e| e.title.as_str()).collect()
}
