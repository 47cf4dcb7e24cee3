//! Curated source: a hand-maintained list of known events.
//!
//! Used for conferences and venue programmes that have no scrapeable
//! listing page. Entries can be restricted to locations matching a set of
//! keywords.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use er_protocol::Event;
use tracing::warn;

use crate::events::EventDraft;
use crate::sources::base::{Source, SourceError};

/// One entry of a curated list.
#[derive(Debug, Clone)]
pub struct CuratedEvent {
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: String,
    pub url: String,
    pub tags: Vec<String>,
    pub organizer: Option<String>,
}

pub struct CuratedSource {
    name: String,
    base_url: String,
    source_tag: String,
    entries: Vec<CuratedEvent>,
    location_keywords: Vec<String>,
}

impl CuratedSource {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        source_tag: impl Into<String>,
        entries: Vec<CuratedEvent>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            source_tag: source_tag.into(),
            entries,
            location_keywords: Vec::new(),
        }
    }

    /// Keep only entries whose location contains one of `keywords`
    /// (case-insensitive).
    pub fn with_location_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.location_keywords = keywords
            .into_iter()
            .map(|k| k.into().to_lowercase())
            .collect();
        self
    }

    fn matches_location(&self, location: &str) -> bool {
        if self.location_keywords.is_empty() {
            return true;
        }
        let location = location.to_lowercase();
        self.location_keywords
            .iter()
            .any(|keyword| location.contains(keyword.as_str()))
    }
}

#[async_trait]
impl Source for CuratedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn search_events(&self) -> Result<Vec<Event>, SourceError> {
        let now = Utc::now();
        let mut events = Vec::new();

        let entries = self
            .entries
            .iter()
            .filter(|e| self.matches_location(&e.location));
        for entry in entries {
            let mut draft =
                EventDraft::new(entry.title.clone(), entry.start, entry.location.clone())
                .description(entry.description.clone())
                .end(entry.end)
                .url(entry.url.clone())
                .source(self.source_tag.clone())
                .tags(entry.tags.iter().cloned());
            if let Some(organizer) = &entry.organizer {
                draft = draft.organizer(organizer.clone());
            }

            match draft.build(now) {
                Ok(event) => events.push(event),
                Err(e) => warn!(source = %self.name, error = %e, "Skipping invalid curated entry"),
            }
        }

        Ok(events)
    }
}
