//! Mock agents assembled from mock sources.

use er_core::agents::{Agent, MockAgent};
use er_core::sources::{BlockHandle, MockSource, Source};
use er_protocol::Event;
use std::sync::Arc;

/// An agent with one source returning `events`; the source is returned so
/// the test can inspect its call count.
#[allow(dead_code)]
pub fn single_source_agent(name: &str, events: Vec<Event>) -> (Arc<dyn Agent>, MockSource) {
    let source = MockSource::returning(&format!("{name} source"), events);
    let agent: Arc<dyn Agent> = Arc::new(MockAgent::new(name, vec![Arc::new(source.clone())]));
    (agent, source)
}

/// An agent whose every source fails.
#[allow(dead_code)]
pub fn failing_agent(name: &str, sources: usize) -> Arc<dyn Agent> {
    let sources: Vec<Arc<dyn Source>> = (0..sources)
        .map(|i| {
            let source = MockSource::failing(&format!("{name} source {i}"), "HTTP 503");
            Arc::new(source) as Arc<dyn Source>
        })
        .collect();
    Arc::new(MockAgent::new(name, sources))
}

/// An agent with one source that blocks until released.
#[allow(dead_code)]
pub fn blocking_agent(name: &str, events: Vec<Event>) -> (Arc<dyn Agent>, MockSource, BlockHandle) {
    let (source, handle) = MockSource::blocking(&format!("{name} source"), events);
    let agent: Arc<dyn Agent> = Arc::new(MockAgent::new(name, vec![Arc::new(source.clone())]));
    (agent, source, handle)
}
