//! Wiring: configuration, store, agents and scheduler.

use color_eyre::eyre::WrapErr;
use er_core::agents::AgentManager;
use er_core::config::{load_config, AppConfig};
use er_core::engine::DiscoveryEngine;
use er_core::export::ExportWriter;
use er_core::sources::SourceContext;
use er_core::state::EventScheduler;
use er_core::store::{EventStore, MemoryEventStore, SqliteEventStore};
use std::sync::Arc;
use tracing::warn;

use crate::Cli;

pub struct App {
    pub config: AppConfig,
    pub scheduler: EventScheduler,
}

impl App {
    pub async fn build(cli: &Cli) -> color_eyre::Result<Self> {
        let config = load_config(&cli.root)
            .await
            .wrap_err("Failed to load configuration")?;

        let store: Arc<dyn EventStore> = if cli.memory {
            Arc::new(MemoryEventStore::new())
        } else {
            Arc::new(
                SqliteEventStore::open(config.database_path())
                    .wrap_err("Failed to open event database")?,
            )
        };

        let context = SourceContext::new(config.source_timeout())
            .wrap_err("Failed to build HTTP client")?;
        let agents = AgentManager::with_default_agents(&context);
        agents.apply_toggles(&config.radar.agents);
        for name in &cli.disable {
            if !agents.disable_agent(name) {
                warn!(agent = %name, "Cannot disable unknown agent");
            }
        }

        let exporter = ExportWriter::new(
            config.output_dir(),
            config.calendar().clone(),
            config.radar.upcoming_days,
        );
        let engine = DiscoveryEngine::new(agents, store, exporter);
        let scheduler = EventScheduler::new(engine, config.schedule());

        Ok(Self { config, scheduler })
    }

    pub fn store(&self) -> &Arc<dyn EventStore> {
        self.scheduler.engine().store()
    }

    pub fn agents(&self) -> &AgentManager {
        self.scheduler.engine().agents()
    }
}
