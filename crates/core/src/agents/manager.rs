//! Agent manager for orchestrating multiple agents.
//!
//! The `AgentManager` is responsible for:
//! - Holding the agents in registration order
//! - Enabling and disabling agents by name
//! - Running every agent concurrently and merging their results
//! - Deduplicating the merged events

use er_protocol::Event;
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::agents::agent_type::AgentKind;
use crate::agents::base::{Agent, AgentReport};
use crate::agents::factory::AgentFactory;
use crate::events::deduplicate_events;
use crate::sources::SourceContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStatus {
    Completed,
    Disabled,
    /// The agent task panicked or was cancelled.
    Crashed(String),
}

/// Per-agent line of an [`AggregationReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSummary {
    pub name: String,
    pub status: AgentStatus,
    pub found: usize,
    pub failed_sources: usize,
}

impl AgentSummary {
    fn from_report(report: &AgentReport) -> Self {
        Self {
            name: report.agent.clone(),
            status: if report.skipped {
                AgentStatus::Disabled
            } else {
                AgentStatus::Completed
            },
            found: report.events.len(),
            failed_sources: report.failed_sources(),
        }
    }

    fn crashed(name: &str, message: String) -> Self {
        Self {
            name: name.to_string(),
            status: AgentStatus::Crashed(message),
            found: 0,
            failed_sources: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AggregationReport {
    /// Deduplicated events, first occurrence order.
    pub events: Vec<Event>,
    pub agents: Vec<AgentSummary>,
    /// Event count before deduplication.
    pub total_found: usize,
}

/// Manages all registered agents and runs them as one aggregation pass.
pub struct AgentManager {
    agents: Vec<Arc<dyn Agent>>,
}

impl AgentManager {
    /// Create a manager; registration order is the order of `agents`.
    pub fn new(agents: Vec<Arc<dyn Agent>>) -> Self {
        Self { agents }
    }

    /// Create a manager holding every built-in agent.
    pub fn with_default_agents(context: &SourceContext) -> Self {
        Self::new(AgentFactory::default_agents(context))
    }

    pub fn get_agents(&self) -> &[Arc<dyn Agent>] {
        &self.agents
    }

    /// Look up an agent by name, ignoring case.
    ///
    /// Short names of the built-in agents (`meetup` for `MeetupAgent`) are
    /// accepted as well.
    pub fn get_agent(&self, name: &str) -> Option<Arc<dyn Agent>> {
        let name = name.trim();
        self.find_agent(name).or_else(|| {
            AgentKind::from_name(name).and_then(|kind| self.find_agent(kind.name()))
        })
    }

    fn find_agent(&self, name: &str) -> Option<Arc<dyn Agent>> {
        self.agents
            .iter()
            .find(|agent| agent.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// List all registered agent names in registration order.
    pub fn list_agents(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.name().to_string()).collect()
    }

    pub fn has_agent(&self, name: &str) -> bool {
        self.get_agent(name).is_some()
    }

    /// Returns false when no agent has that name.
    pub fn enable_agent(&self, name: &str) -> bool {
        self.set_agent_enabled(name, true)
    }

    /// Returns false when no agent has that name.
    pub fn disable_agent(&self, name: &str) -> bool {
        self.set_agent_enabled(name, false)
    }

    /// Apply `name -> enabled` toggles, e.g. from the `[agents]` config table.
    pub fn apply_toggles(&self, toggles: &BTreeMap<String, bool>) {
        for (name, enabled) in toggles {
            self.set_agent_enabled(name, *enabled);
        }
    }

    fn set_agent_enabled(&self, name: &str, enabled: bool) -> bool {
        match self.get_agent(name) {
            Some(agent) => {
                agent.set_enabled(enabled);
                info!(agent = %agent.name(), enabled, "Agent toggled");
                true
            }
            None => {
                warn!(agent = %name, "Agent not found");
                false
            }
        }
    }

    /// Run every agent concurrently and merge the results.
    ///
    /// Each agent runs in its own task. A task that panics is recorded as
    /// [`AgentStatus::Crashed`] and contributes no events; the others are
    /// unaffected. Results are concatenated in registration order and then
    /// deduplicated, so the first registered agent wins a collision.
    pub async fn run(&self) -> AggregationReport {
        info!(agents = self.agents.len(), "Starting agent execution");

        let handles: Vec<_> = self
            .agents
            .iter()
            .map(|agent| {
                let agent = Arc::clone(agent);
                tokio::spawn(async move { agent.discover().await })
            })
            .collect();

        let results = join_all(handles).await;

        let mut all_events = Vec::new();
        let mut summaries = Vec::with_capacity(self.agents.len());

        for (agent, result) in self.agents.iter().zip(results) {
            match result {
                Ok(report) => {
                    info!(agent = %report.agent, count = report.events.len(), "Agent completed");
                    summaries.push(AgentSummary::from_report(&report));
                    all_events.extend(report.events);
                }
                Err(e) => {
                    error!(agent = %agent.name(), error = %e, "Agent failed");
                    summaries.push(AgentSummary::crashed(agent.name(), e.to_string()));
                }
            }
        }

        let total_found = all_events.len();
        let events = deduplicate_events(all_events);
        info!(total_found, unique = events.len(), "Total unique events found");

        AggregationReport {
            events,
            agents: summaries,
            total_found,
        }
    }

    /// Run every agent and return only the deduplicated events.
    pub async fn run_all_agents(&self) -> Vec<Event> {
        self.run().await.events
    }
}
