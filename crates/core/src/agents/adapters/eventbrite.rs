//! Eventbrite agent: AI and tech category listings for Amsterdam.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::agents::agent_type::AgentKind;
use crate::agents::base::Agent;
use crate::sources::{DateStyle, HtmlListingSource, ListingLayout, Source, SourceContext};

/// (source name, category slug)
const CATEGORIES: [(&str, &str); 2] = [
    ("Eventbrite Amsterdam AI", "ai"),
    ("Eventbrite Amsterdam Tech", "tech"),
];

pub struct EventbriteAgent {
    enabled: AtomicBool,
    sources: Vec<Arc<dyn Source>>,
}

impl EventbriteAgent {
    pub fn new(context: &SourceContext) -> Self {
        let sources = CATEGORIES
            .iter()
            .map(|(name, category)| {
                let url = format!(
                    "https://www.eventbrite.com/d/netherlands--amsterdam/{category}-events/"
                );
                let source = HtmlListingSource::new(*name, url, layout(category), context);
                Arc::new(source) as Arc<dyn Source>
            })
            .collect();

        Self {
            enabled: AtomicBool::new(true),
            sources,
        }
    }
}

fn layout(category: &str) -> ListingLayout {
    ListingLayout {
        card: r#"[data-testid="event-card"]"#.to_string(),
        title: r#"[data-testid="event-card-title"]"#.to_string(),
        date: r#"[data-testid="event-card-local-date"]"#.to_string(),
        location: r#"[data-testid="event-card-location"]"#.to_string(),
        link: "a".to_string(),
        url_prefix: "https://www.eventbrite.com".to_string(),
        date_style: DateStyle::Relative,
        description: format!(
            "{} event from Eventbrite: {{title}}",
            category.to_uppercase()
        ),
        default_location: "Amsterdam".to_string(),
        source_tag: "eventbrite".to_string(),
        tags: vec![category.to_string(), "amsterdam".to_string()],
    }
}

#[async_trait]
impl Agent for EventbriteAgent {
    fn name(&self) -> &str {
        AgentKind::Eventbrite.name()
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
