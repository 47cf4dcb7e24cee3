//! Agent factory for creating the built-in agents.

use std::sync::Arc;

use crate::agents::adapters::{ConferenceAgent, EventbriteAgent, MeetupAgent};
use crate::agents::agent_type::AgentKind;
use crate::agents::base::Agent;
use crate::sources::SourceContext;

/// Factory for creating agent instances.
///
/// Network-backed agents share the `reqwest::Client` held by the
/// [`SourceContext`].
pub struct AgentFactory;

impl AgentFactory {
    /// Create one agent of the given kind.
    pub fn create(kind: AgentKind, context: &SourceContext) -> Arc<dyn Agent> {
        match kind {
            AgentKind::Meetup => Arc::new(MeetupAgent::new(context)),
            AgentKind::Eventbrite => Arc::new(EventbriteAgent::new(context)),
            AgentKind::Conference => Arc::new(ConferenceAgent::new()),
        }
    }

    /// Every built-in agent, in registration order.
    pub fn default_agents(context: &SourceContext) -> Vec<Arc<dyn Agent>> {
        AgentKind::ALL
            .iter()
            .map(|kind| Self::create(*kind, context))
            .collect()
    }
}
