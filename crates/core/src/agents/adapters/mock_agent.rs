//! Mock agent implementation for testing.

use async_trait::async_trait;
use er_protocol::Event;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::agents::base::{run_sources, Agent, AgentReport};
use crate::sources::{MockSource, Source};

pub struct MockAgent {
    name: String,
    enabled: AtomicBool,
    sources: Vec<Arc<dyn Source>>,
    panic_message: Option<String>,
}

impl MockAgent {
    pub fn new(name: &str, sources: Vec<Arc<dyn Source>>) -> Self {
        Self {
            name: name.to_string(),
            enabled: AtomicBool::new(true),
            sources,
            panic_message: None,
        }
    }

    /// An agent with a single source returning `events`.
    pub fn with_events(name: &str, events: Vec<Event>) -> Self {
        let source = MockSource::returning(&format!("{name} source"), events);
        Self::new(name, vec![Arc::new(source)])
    }

    /// An agent whose `discover` panics, simulating an orchestration fault.
    pub fn panicking(name: &str, message: &str) -> Self {
        Self {
            panic_message: Some(message.to_string()),
            ..Self::new(name, Vec::new())
        }
    }

    pub fn disabled(self) -> Self {
        self.enabled.store(false, Ordering::SeqCst);
        self
    }
}

#[async_trait]
impl Agent for MockAgent {
    fn name(&self) -> &str {
        &self.name
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

    async fn discover(&self) -> AgentReport {
        if let Some(message) = &self.panic_message {
            panic!("{message}");
        }
        if !self.is_enabled() {
            return AgentReport::skipped(&self.name);
        }
        run_sources(&self.name, &self.sources).await
    }
}
