//! Event record models.
//!
//! An [`Event`] is the unit that flows through the discovery pipeline: sources
//! produce them, the aggregator deduplicates them, the store persists them and
//! the export transforms render them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single discovered event.
///
/// The `id` is derived from the `(title, start_date, location)` triple, so two
/// sources describing the same real-world event independently produce the
/// same id.
///
/// # Example
///
/// ```json
/// {
///   "id": "3f1c9a0d2b7e4c55",
///   "title": "World Summit AI",
///   "description": "Leading global AI conference and tech festival",
///   "startDate": "2024-10-09T00:00:00Z",
///   "endDate": "2024-10-10T00:00:00Z",
///   "location": "Amsterdam",
///   "url": "https://worldsummit.ai",
///   "source": "conference-agent",
///   "tags": ["ai", "conference"],
///   "price": null,
///   "organizer": null,
///   "imageUrl": null,
///   "createdAt": "2024-09-01T12:00:00Z",
///   "updatedAt": "2024-09-01T12:00:00Z"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Stable identifier derived from the canonical key.
    pub id: String,

    pub title: String,

    pub description: String,

    pub start_date: DateTime<Utc>,

    /// Never earlier than `start_date`.
    pub end_date: DateTime<Utc>,

    pub location: String,

    pub url: String,

    /// Name of the originating agent or source (e.g. `meetup`, `eventbrite`).
    pub source: String,

    /// Free-form labels. Order and duplicates carry no meaning for identity.
    pub tags: Vec<String>,

    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub organizer: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    /// Set by the producing source when the record is created.
    pub created_at: DateTime<Utc>,

    /// Set by the producing source; the store owns it after the first upsert.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Returns true if any tag matches `tag`, ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}
