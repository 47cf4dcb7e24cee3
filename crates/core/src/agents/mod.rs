//! Agent abstraction and management.
//!
//! This module provides the `Agent` trait, the built-in agents that group
//! event sources, and the `AgentManager` that runs them concurrently.

pub mod adapters;
pub mod agent_type;
pub mod base;
pub mod factory;
pub mod manager;

pub use adapters::{ConferenceAgent, EventbriteAgent, MeetupAgent, MockAgent};
pub use agent_type::AgentKind;
pub use base::{run_sources, Agent, AgentReport, SourceOutcome, SourceReport};
pub use factory::AgentFactory;
pub use manager::{AgentManager, AgentStatus, AgentSummary, AggregationReport};
