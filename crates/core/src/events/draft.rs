//! Candidate event builder used by sources.

use chrono::{DateTime, Duration, Utc};
use er_protocol::Event;
use thiserror::Error;

use crate::events::identity::derive_event_id;

/// Duration assumed when a source does not know when an event ends.
pub const DEFAULT_EVENT_DURATION_HOURS: i64 = 2;

/// Reasons a candidate record cannot become an [`Event`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidEvent {
    #[error("Event title is empty")]
    EmptyTitle,
    #[error("Event '{title}' ends before it starts")]
    EndBeforeStart { title: String },
}

/// A candidate event as produced by a source, before identity is assigned.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use er_core::events::EventDraft;
///
/// let start = Utc.with_ymd_and_hms(2024, 10, 9, 9, 0, 0).unwrap();
/// let event = EventDraft::new("World Summit AI", start, "Amsterdam")
///     .url("https://worldsummit.ai")
///     .source("conference-agent")
///     .tags(["ai", "conference"])
///     .build(Utc::now())
///     .unwrap();
///
/// assert_eq!(event.end_date, start + chrono::Duration::hours(2));
/// ```
#[derive(Debug, Clone)]
pub struct EventDraft {
    title: String,
    description: String,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    location: String,
    url: String,
    source: String,
    tags: Vec<String>,
    price: Option<String>,
    organizer: Option<String>,
    image_url: Option<String>,
}

impl EventDraft {
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Utc>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            start,
            end: None,
            location: location.into(),
            url: String::new(),
            source: String::new(),
            tags: Vec::new(),
            price: None,
            organizer: None,
            image_url: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the end instant. Defaults to two hours after the start.
    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = Some(organizer.into());
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Assign identity and bookkeeping timestamps.
    ///
    /// `now` becomes both `created_at` and `updated_at`.
    pub fn build(self, now: DateTime<Utc>) -> Result<Event, InvalidEvent> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(InvalidEvent::EmptyTitle);
        }

        let end = self
            .end
            .unwrap_or_else(|| self.start + Duration::hours(DEFAULT_EVENT_DURATION_HOURS));
        if end < self.start {
            return Err(InvalidEvent::EndBeforeStart { title });
        }

        let location = self.location.trim().to_string();

        Ok(Event {
            id: derive_event_id(&title, self.start, &location),
            title,
            description: self.description,
            start_date: self.start,
            end_date: end,
            location,
            url: self.url,
            source: self.source,
            tags: self.tags,
            price: self.price,
            organizer: self.organizer,
            image_url: self.image_url,
            created_at: now,
            updated_at: now,
        })
    }
}
