//! Test fixtures for sample events, project directories and schedulers.

use chrono::{DateTime, Duration, TimeZone, Utc};
use er_core::agents::AgentManager;
use er_core::engine::DiscoveryEngine;
use er_core::events::EventDraft;
use er_core::export::ExportWriter;
use er_core::state::EventScheduler;
use er_core::store::EventStore;
use er_protocol::{CalendarConfig, Event, DEFAULT_SCHEDULE};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// A fixed instant so ids are reproducible across tests.
#[allow(dead_code)]
pub fn fixed_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 10, 9, 9, 0, 0).unwrap()
}

/// An event starting `days` from now.
#[allow(dead_code)]
pub fn upcoming_event(title: &str, days: i64, source: &str) -> Event {
    let now = Utc::now();
    EventDraft::new(title, now + Duration::days(days), "Amsterdam")
        .description(format!("{title} description"))
        .url(format!("https://example.org/{}", title.to_lowercase().replace(' ', "-")))
        .source(source)
        .tags(["ai"])
        .build(now)
        .expect("valid fixture event")
}

/// An event at [`fixed_start`] with the given content fields.
#[allow(dead_code)]
pub fn fixed_event(title: &str, location: &str, description: &str, source: &str) -> Event {
    EventDraft::new(title, fixed_start(), location)
        .description(description)
        .url(format!("https://{source}.example.org/event"))
        .source(source)
        .tags([source])
        .build(fixed_start())
        .expect("valid fixture event")
}

/// Create a temporary project directory with `.event-radar/config.toml`.
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_test_project(config: &str) -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let config_dir = temp_dir.path().join(".event-radar");
    std::fs::create_dir_all(&config_dir)?;
    std::fs::write(config_dir.join("config.toml"), config)?;
    Ok(temp_dir)
}

/// Wire a scheduler over `agents` and `store`, exporting into `output_dir`.
#[allow(dead_code)]
pub fn create_scheduler(
    agents: AgentManager,
    store: Arc<dyn EventStore>,
    output_dir: &Path,
) -> EventScheduler {
    let exporter = ExportWriter::new(output_dir, CalendarConfig::default(), 30);
    EventScheduler::new(DiscoveryEngine::new(agents, store, exporter), DEFAULT_SCHEDULE)
}
