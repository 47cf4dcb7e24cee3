//! Conference agent: known AI conferences and Amsterdam venue programmes.
//!
//! Neither has a scrapeable listing, so both sources are curated lists.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::agents::agent_type::AgentKind;
use crate::agents::base::Agent;
use crate::sources::{CuratedEvent, CuratedSource, Source};

pub struct ConferenceAgent {
    enabled: AtomicBool,
    sources: Vec<Arc<dyn Source>>,
}

impl ConferenceAgent {
    pub fn new() -> Self {
        let conferences = CuratedSource::new(
            "AI Conferences Search",
            "https://www.google.com/search",
            "conference-agent",
            known_conferences(),
        )
        .with_location_keywords(["amsterdam", "netherlands"]);

        let venues = CuratedSource::new(
            "Amsterdam Tech Events",
            "https://amsterdamsciencepark.nl",
            "venue-search",
            venue_events(),
        );

        Self {
            enabled: AtomicBool::new(true),
            sources: vec![Arc::new(conferences), Arc::new(venues)],
        }
    }
}

impl Default for ConferenceAgent {
    fn default() -> Self {
        Self::new()
    }
}

fn day(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Some(NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?.and_utc())
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

fn known_conferences() -> Vec<CuratedEvent> {
    let world_summit = day(2024, 10, 9).zip(day(2024, 10, 10)).map(|(start, end)| CuratedEvent {
        title: "World Summit AI".to_string(),
        description: "The world's leading AI summit bringing together the brightest minds in AI"
            .to_string(),
        start,
        end,
        location: "Amsterdam, Netherlands".to_string(),
        url: "https://worldsummit.ai".to_string(),
        tags: tags(&["ai", "conference", "world-summit-ai"]),
        organizer: None,
    });

    let ai_for_good = day(2024, 5, 30).zip(day(2024, 5, 31)).map(|(start, end)| CuratedEvent {
        title: "AI for Good Global Summit".to_string(),
        description: "UN summit on AI for sustainable development goals".to_string(),
        start,
        end,
        location: "Geneva, Switzerland".to_string(),
        url: "https://aiforgood.itu.int".to_string(),
        tags: tags(&["ai", "conference", "sustainability"]),
        organizer: None,
    });

    [world_summit, ai_for_good].into_iter().flatten().collect()
}

fn venue_events() -> Vec<CuratedEvent> {
    day(2024, 12, 15)
        .map(|start| CuratedEvent {
            title: "AI Research Symposium".to_string(),
            description: "Latest developments in AI research from Amsterdam universities"
                .to_string(),
            start,
            end: start,
            location: "Amsterdam Science Park".to_string(),
            url: "https://amsterdamsciencepark.nl".to_string(),
            tags: tags(&["ai", "research", "symposium"]),
            organizer: Some("Amsterdam Science Park".to_string()),
        })
        .into_iter()
        .collect()
}

#[async_trait]
impl Agent for ConferenceAgent {
    fn name(&self) -> &str {
        AgentKind::Conference.name()
    }

    fn get_sources(&self) -> Vec<Arc<dyn Source>> {
        self.sources.clone()
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}
