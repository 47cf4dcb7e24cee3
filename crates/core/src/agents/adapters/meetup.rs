//! Meetup agent: AI and machine-learning meetups in Amsterdam.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::agents::agent_type::AgentKind;
use crate::agents::base::Agent;
use crate::sources::{DateStyle, HtmlListingSource, ListingLayout, Source, SourceContext};

const SEARCH_URL: &str =
    "https://www.meetup.com/find/?allMeetups=true&location=nl--nl--amsterdam&keywords=";

/// (source name, url-encoded search keywords)
const SEARCHES: [(&str, &str); 2] = [
    ("Meetup Amsterdam AI", "artificial%20intelligence"),
    ("Meetup Amsterdam Tech", "machine%20learning"),
];

pub struct MeetupAgent {
    enabled: AtomicBool,
    sources: Vec<Arc<dyn Source>>,
}

impl MeetupAgent {
    pub fn new(context: &SourceContext) -> Self {
        let sources = SEARCHES
            .iter()
            .map(|(name, keywords)| {
                let source = HtmlListingSource::new(
                    *name,
                    format!("{SEARCH_URL}{keywords}"),
                    layout(),
                    context,
                );
                Arc::new(source) as Arc<dyn Source>
            })
            .collect();

        Self {
            enabled: AtomicBool::new(true),
            sources,
        }
    }
}

fn layout() -> ListingLayout {
    ListingLayout {
        card: ".event-card".to_string(),
        title: ".event-title".to_string(),
        date: ".date".to_string(),
        location: ".location".to_string(),
        link: "a".to_string(),
        url_prefix: "https://www.meetup.com".to_string(),
        date_style: DateStyle::Full,
        description: "AI/ML event from Meetup: {title}".to_string(),
        default_location: "Amsterdam".to_string(),
        source_tag: "meetup".to_string(),
        tags: vec![
            "ai".to_string(),
            "machine-learning".to_string(),
            "meetup".to_string(),
        ],
    }
}

#[async_trait]
impl Agent for MeetupAgent {
    fn name(&self) -> &str {
        AgentKind::Meetup.name()
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
