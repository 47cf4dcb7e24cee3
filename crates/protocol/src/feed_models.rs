//! JSON feed models.
//!
//! The JSON feed is one of the published export artifacts (`events.json`). It
//! wraps the event list with calendar metadata and a generation timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::event_models::Event;

/// Top-level JSON feed document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct JsonFeed {
    pub title: String,
    pub description: String,
    /// When the feed was generated.
    pub updated: DateTime<Utc>,
    pub events: Vec<FeedEvent>,
}

/// A single event as published in the JSON feed.
///
/// Mirrors [`Event`] field for field; kept separate so the published shape
/// can evolve independently of the stored record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
pub struct FeedEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub url: String,
    pub tags: Vec<String>,
    pub price: Option<String>,
    pub organizer: Option<String>,
    pub source: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Event> for FeedEvent {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            location: event.location.clone(),
            url: event.url.clone(),
            tags: event.tags.clone(),
            price: event.price.clone(),
            organizer: event.organizer.clone(),
            source: event.source.clone(),
            image_url: event.image_url.clone(),
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}
