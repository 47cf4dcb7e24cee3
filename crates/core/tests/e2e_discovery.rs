//! End-to-end discovery: configuration, agents, SQLite store and exports.

mod common;

use common::*;
use er_core::agents::{AgentManager, AgentStatus};
use er_core::config::load_config;
use er_core::config::loader::load_config_with_env;
use er_core::engine::DiscoveryEngine;
use er_core::export::ExportWriter;
use er_core::state::{EventScheduler, RunOutcome};
use er_core::store::{EventStore, SqliteEventStore};
use er_protocol::JsonFeed;
use std::sync::Arc;

const PROJECT_CONFIG: &str = r#"
schedule = "*/30 * * * *"
database_path = "db/events.db"
output_dir = "out"
upcoming_days = 7

[calendar]
name = "Integration Calendar"
description = "Events found by the integration test"

[agents]
Muted = false
"#;

#[tokio::test]
async fn test_full_discovery_run() {
    let project = create_test_project(PROJECT_CONFIG).unwrap();
    let config = load_config_with_env(project.path(), |_| None).unwrap();

    let e1 = upcoming_event("AI Meetup", 2, "agent-a");
    let mut e1_duplicate = e1.clone();
    e1_duplicate.description = "different description".to_string();
    e1_duplicate.source = "agent-b".to_string();
    let later = upcoming_event("AI Summit", 20, "agent-b");

    let (a, _) = single_source_agent("A", vec![e1.clone()]);
    let (b, _) = single_source_agent("B", vec![e1_duplicate, later.clone()]);
    let (muted, muted_source) =
        single_source_agent("Muted", vec![upcoming_event("Muted", 1, "muted")]);
    let agents = AgentManager::new(vec![a, b, failing_agent("C", 2), muted]);
    agents.apply_toggles(&config.radar.agents);

    let store: Arc<dyn EventStore> =
        Arc::new(SqliteEventStore::open(config.database_path()).unwrap());
    let exporter = ExportWriter::new(
        config.output_dir(),
        config.calendar().clone(),
        config.radar.upcoming_days,
    );
    let engine = DiscoveryEngine::new(agents, store.clone(), exporter);
    let scheduler = EventScheduler::new(engine, config.schedule());
    scheduler.initialize().await.unwrap();

    let outcome = scheduler.run_event_discovery().await;
    let RunOutcome::Completed(report) = outcome else {
        panic!("expected completed run, got {outcome:?}");
    };

    assert_eq!(report.discovered, 2);
    assert_eq!(report.saved, 2);
    assert_eq!(report.total_stored, 2);
    assert_eq!(report.upcoming, 1);
    assert_eq!(report.agents[2].failed_sources, 2);
    assert_eq!(report.agents[3].status, AgentStatus::Disabled);
    assert_eq!(muted_source.call_count(), 0);

    let stored = store.get_all().await.unwrap();
    assert_eq!(titles(&stored), vec!["AI Meetup", "AI Summit"]);
    assert_eq!(stored[0].source, "agent-a");
    assert_eq!(stored[0].description, e1.description);

    let out = project.path().join("out");
    let ical = std::fs::read_to_string(out.join("events.ics")).unwrap();
    assert!(ical.contains("X-WR-CALNAME:Integration Calendar\r\n"));
    assert_eq!(ical.matches("BEGIN:VEVENT").count(), 2);
    assert!(ical.contains(&format!("UID:{}\r\n", e1.id)));

    let upcoming = std::fs::read_to_string(out.join("upcoming.ics")).unwrap();
    assert_eq!(upcoming.matches("BEGIN:VEVENT").count(), 1);
    assert!(!upcoming.contains(&later.id));

    let json = std::fs::read_to_string(out.join("events.json")).unwrap();
    let feed: JsonFeed = serde_json::from_str(&json).unwrap();
    assert_eq!(feed.title, "Integration Calendar");
    assert_eq!(feed.events.len(), 2);

    let csv = std::fs::read_to_string(out.join("events.csv")).unwrap();
    assert!(csv.starts_with(
        "ID,Title,Description,Start Date,End Date,Location,URL,Source,Tags,Price,Organizer"
    ));
    assert_eq!(csv.lines().count(), 3);
}

#[tokio::test]
async fn test_rerun_against_reopened_database_keeps_one_row_per_event() {
    let project = create_test_project(PROJECT_CONFIG).unwrap();
    let config = load_config_with_env(project.path(), |_| None).unwrap();
    let events = vec![upcoming_event("Recurring", 3, "mock")];

    for _ in 0..2 {
        let (agent, _) = single_source_agent("A", events.clone());
        let store: Arc<dyn EventStore> =
            Arc::new(SqliteEventStore::open(config.database_path()).unwrap());
        let scheduler =
            create_scheduler(AgentManager::new(vec![agent]), store, config.output_dir());
        scheduler.initialize().await.unwrap();
        assert!(scheduler.run_event_discovery().await.is_completed());
    }

    let store = SqliteEventStore::open(config.database_path()).unwrap();
    assert_eq!(store.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_load_config_reads_project_directory() {
    let project = create_test_project("upcoming_days = 3\n").unwrap();

    let config = load_config(project.path()).await.unwrap();

    assert_eq!(config.radar.upcoming_days, 3);
    assert_eq!(config.root, project.path());
}
