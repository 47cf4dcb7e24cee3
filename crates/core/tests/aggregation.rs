//! Integration tests for agent discovery and aggregation.
//!
//! These cover the failure-isolation and identity guarantees of the
//! aggregator:
//! - disabled agents issue no source calls
//! - a failing source or agent never hides the others' events
//! - duplicates collapse to the first registered occurrence

mod common;

use common::*;
use er_core::agents::{Agent, AgentManager, AgentStatus, MockAgent, SourceOutcome};
use er_core::events::{deduplicate_events, EventDraft};
use er_core::sources::{MockSource, Source};
use er_core::state::RunOutcome;
use er_core::store::{EventStore, MemoryEventStore};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_disabled_agent_issues_no_source_calls() {
    let source = MockSource::returning("only", vec![upcoming_event("Hidden", 1, "mock")]);
    let agent = MockAgent::new("Quiet", vec![Arc::new(source.clone())]);
    agent.set_enabled(false);

    let events = agent.discover_events().await;

    assert!(events.is_empty());
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn test_disabled_agent_through_manager() {
    let (agent, source) = single_source_agent("Quiet", vec![upcoming_event("Hidden", 1, "mock")]);
    let manager = AgentManager::new(vec![agent]);
    assert!(manager.disable_agent("quiet"));

    let report = manager.run().await;

    assert!(report.events.is_empty());
    assert_eq!(report.agents[0].status, AgentStatus::Disabled);
    assert_eq!(source.call_count(), 0);
}

#[tokio::test]
async fn test_failing_source_does_not_hide_sibling_sources() {
    let before = MockSource::returning("before", vec![upcoming_event("Before", 1, "mock")]);
    let broken = MockSource::failing("broken", "connection reset");
    let after = MockSource::returning("after", vec![upcoming_event("After", 2, "mock")]);
    let sources: Vec<Arc<dyn Source>> = vec![Arc::new(before), Arc::new(broken), Arc::new(after)];
    let agent = MockAgent::new("Mixed", sources);

    let report = agent.discover().await;

    assert_eq!(titles(&report.events), vec!["Before", "After"]);
    assert_eq!(report.failed_sources(), 1);
    assert!(matches!(report.sources[1].outcome, SourceOutcome::Failed(_)));
}

#[tokio::test(start_paused = true)]
async fn test_hanging_source_times_out_and_others_continue() {
    let hanging = MockSource::hanging("hanging").with_timeout(Duration::from_secs(5));
    let live = MockSource::returning("live", vec![upcoming_event("Live", 1, "mock")]);
    let sources: Vec<Arc<dyn Source>> = vec![Arc::new(hanging), Arc::new(live)];
    let agent = MockAgent::new("Slow", sources);

    let report = agent.discover().await;

    assert_eq!(titles(&report.events), vec!["Live"]);
    assert_eq!(
        report.sources[0].outcome,
        SourceOutcome::TimedOut(Duration::from_secs(5))
    );
    assert_eq!(report.sources[1].outcome, SourceOutcome::Found(1));
}

#[tokio::test]
async fn test_failing_agent_does_not_hide_other_agents() {
    let (good, _) = single_source_agent("Good", vec![upcoming_event("Kept", 1, "good")]);
    let manager = AgentManager::new(vec![
        failing_agent("Broken", 2),
        Arc::new(MockAgent::panicking("Crashing", "unexpected fault")),
        good,
    ]);

    let report = manager.run().await;

    assert_eq!(titles(&report.events), vec!["Kept"]);
    assert_eq!(report.agents[0].failed_sources, 2);
    assert!(matches!(report.agents[1].status, AgentStatus::Crashed(_)));
    assert_eq!(report.agents[2].status, AgentStatus::Completed);
}

#[tokio::test]
async fn test_first_registered_agent_wins_collision() {
    let first = fixed_event("Deep Learning Night", "Amsterdam", "from the first agent", "first");
    let second = fixed_event("DEEP LEARNING NIGHT", "amsterdam", "from the second agent", "second");
    assert_eq!(first.id, second.id);

    let (a, _) = single_source_agent("A", vec![first.clone()]);
    let (b, _) = single_source_agent("B", vec![second]);
    let manager = AgentManager::new(vec![a, b]);

    let report = manager.run().await;

    assert_eq!(report.total_found, 2);
    assert_eq!(report.events, vec![first]);
}

#[tokio::test]
async fn test_dedup_is_idempotent_on_aggregated_output() {
    let shared = fixed_event("Shared", "Amsterdam", "one", "a");
    let (a, _) = single_source_agent(
        "A",
        vec![shared.clone(), fixed_event("Only A", "Amsterdam", "", "a")],
    );
    let (b, _) = single_source_agent("B", vec![fixed_event("Shared", "AMSTERDAM", "two", "b")]);
    let manager = AgentManager::new(vec![a, b]);

    let events = manager.run_all_agents().await;
    let again = deduplicate_events(events.clone());

    assert_eq!(events, again);
    assert_unique_ids(&events);
    assert_eq!(events[0], shared);
}

#[tokio::test]
async fn test_end_to_end_three_agents() {
    let e1 = fixed_event("AI Meetup", "Amsterdam", "original description", "agent-a");
    let e1_duplicate = fixed_event("AI Meetup", "Amsterdam", "different description", "agent-b");

    let (a, _) = single_source_agent("A", vec![e1.clone()]);
    let (b, _) = single_source_agent("B", vec![e1_duplicate]);
    let manager = AgentManager::new(vec![a, b, failing_agent("C", 1)]);

    let events = manager.run_all_agents().await;

    assert_eq!(events, vec![e1]);
    assert_eq!(events[0].source, "agent-a");
}

#[tokio::test]
async fn test_sub_millisecond_starts_collapse_to_first_record() {
    let start = fixed_start();
    let first = EventDraft::new("Vector Search Night", start, "Amsterdam")
        .source("a")
        .build(start)
        .unwrap();
    let later = start + chrono::Duration::microseconds(500);
    let second = EventDraft::new("Vector Search Night", later, "Amsterdam")
        .source("b")
        .build(start)
        .unwrap();
    assert_eq!(first.id, second.id);

    let dir = tempfile::tempdir().unwrap();
    let (a, _) = single_source_agent("A", vec![first]);
    let (b, _) = single_source_agent("B", vec![second]);
    let store = Arc::new(MemoryEventStore::new());
    let scheduler = create_scheduler(AgentManager::new(vec![a, b]), store.clone(), dir.path());

    let outcome = scheduler.run_event_discovery().await;

    let RunOutcome::Completed(report) = outcome else {
        panic!("expected completed run, got {outcome:?}");
    };
    assert_eq!(report.discovered, 1);
    let stored = store.get_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].source, "a");
}
