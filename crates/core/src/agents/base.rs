//! Base Agent trait and supporting types.

use async_trait::async_trait;
use er_protocol::Event;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::sources::{Source, SourceError};

/// What happened to a single source during an agent run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Found(usize),
    Failed(String),
    TimedOut(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub source: String,
    pub outcome: SourceOutcome,
}

/// Result of one `Agent::discover` call.
#[derive(Debug, Clone, Default)]
pub struct AgentReport {
    pub agent: String,

    /// True when the agent was disabled and no source was queried.
    pub skipped: bool,

    /// Events from every successful source, in source-list order.
    pub events: Vec<Event>,

    pub sources: Vec<SourceReport>,
}

impl AgentReport {
    pub fn skipped(agent: &str) -> Self {
        Self {
            agent: agent.to_string(),
            skipped: true,
            ..Self::default()
        }
    }

    pub fn failed_sources(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| !matches!(s.outcome, SourceOutcome::Found(_)))
            .count()
    }
}

/// A named group of sources with an enable/disable toggle.
///
/// Implementors provide the fixed source list and the enabled flag; the
/// provided `discover` handles orchestration, per-source timeouts and
/// failure isolation.
#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;

    /// The fixed list of sources this agent owns.
    fn get_sources(&self) -> Vec<Arc<dyn Source>>;

    fn is_enabled(&self) -> bool;

    /// Takes effect on the next `discover` call.
    fn set_enabled(&self, enabled: bool);

    async fn discover(&self) -> AgentReport {
        if !self.is_enabled() {
            info!(agent = %self.name(), "Agent is disabled, skipping");
            return AgentReport::skipped(self.name());
        }

        run_sources(self.name(), &self.get_sources()).await
    }

    async fn discover_events(&self) -> Vec<Event> {
        self.discover().await.events
    }
}

/// Query each source in order, isolating failures.
///
/// A source that errors or exceeds its timeout is logged, recorded in the
/// report and contributes no events; the remaining sources still run.
pub async fn run_sources(agent: &str, sources: &[Arc<dyn Source>]) -> AgentReport {
    info!(agent = %agent, sources = sources.len(), "Running agent");

    let mut report = AgentReport {
        agent: agent.to_string(),
        ..AgentReport::default()
    };

    for source in sources {
        let limit = source.timeout();
        let result = match tokio::time::timeout(limit, source.search_events()).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::TimedOut(limit)),
        };

        let outcome = match result {
            Ok(events) => {
                info!(
                    agent = %agent,
                    source = %source.name(),
                    count = events.len(),
                    "Source returned events"
                );
                let found = events.len();
                report.events.extend(events);
                SourceOutcome::Found(found)
            }
            Err(SourceError::TimedOut(limit)) => {
                warn!(
                    agent = %agent,
                    source = %source.name(),
                    timeout = ?limit,
                    "Source timed out"
                );
                SourceOutcome::TimedOut(limit)
            }
            Err(e) => {
                warn!(agent = %agent, source = %source.name(), error = %e, "Source failed");
                SourceOutcome::Failed(e.to_string())
            }
        };

        report.sources.push(SourceReport {
            source: source.name().to_string(),
            outcome,
        });
    }

    info!(agent = %agent, count = report.events.len(), "Agent finished");
    report
}
