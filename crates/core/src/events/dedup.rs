//! First-wins deduplication over the canonical key.

use er_protocol::Event;
use std::collections::HashSet;

use crate::events::identity::CanonicalKey;

/// Remove events whose canonical key was already seen.
///
/// Iterates in input order and keeps the first event for each key, so the
/// outcome depends on order: the earliest registered agent/source wins when
/// two records describe the same event with different descriptions, tags or
/// URLs. Records are never merged.
///
/// Applying this function to its own output returns the same sequence.
pub fn deduplicate_events(events: Vec<Event>) -> Vec<Event> {
    let mut seen = HashSet::with_capacity(events.len());
    events
        .into_iter()
        .filter(|event| seen.insert(CanonicalKey::of(event)))
        .collect()
}
