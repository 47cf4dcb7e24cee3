//! Discovery execution engine.
//!
//! The DiscoveryEngine runs one complete discovery pass: aggregate events
//! from every agent, persist them, then regenerate the export artifacts from
//! the full stored set.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::agents::{AgentManager, AgentSummary};
use crate::export::{ExportError, ExportWriter};
use crate::store::{EventStore, StoreError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read stored events: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to write exports: {0}")]
    Export(#[from] ExportError),
}

/// Summary of one successful discovery pass.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Correlates the log lines of one pass.
    pub run_id: Uuid,
    /// Unique events produced by the aggregator.
    pub discovered: usize,
    pub saved: usize,
    pub failed_saves: usize,
    /// Events in the store after saving.
    pub total_stored: usize,
    /// Events in the upcoming export window.
    pub upcoming: usize,
    pub agents: Vec<AgentSummary>,
    pub finished_at: DateTime<Utc>,
}

/// The main discovery engine.
///
/// Owns the aggregator and the export writer and shares the store with
/// whoever else needs it (the CLI reads from it directly).
pub struct DiscoveryEngine {
    agents: AgentManager,
    store: Arc<dyn EventStore>,
    exporter: ExportWriter,
}

impl DiscoveryEngine {
    pub fn new(agents: AgentManager, store: Arc<dyn EventStore>, exporter: ExportWriter) -> Self {
        Self {
            agents,
            store,
            exporter,
        }
    }

    pub fn agents(&self) -> &AgentManager {
        &self.agents
    }

    pub fn store(&self) -> &Arc<dyn EventStore> {
        &self.store
    }

    pub fn exporter(&self) -> &ExportWriter {
        &self.exporter
    }

    /// Execute one discovery pass.
    ///
    /// A failed upsert is logged and counted but does not stop the pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored events cannot be read back or the
    /// export artifacts cannot be written.
    pub async fn run(&self) -> Result<RunReport, EngineError> {
        let run_id = Uuid::new_v4();
        info!(%run_id, "Starting event discovery");

        let aggregation = self.agents.run().await;
        let discovered = aggregation.events.len();

        let mut saved = 0;
        let mut failed_saves = 0;
        for event in &aggregation.events {
            match self.store.upsert(event).await {
                Ok(()) => saved += 1,
                Err(e) => {
                    failed_saves += 1;
                    warn!(id = %event.id, title = %event.title, error = %e, "Failed to save event");
                }
            }
        }
        info!(%run_id, saved, failed = failed_saves, "Saved events to database");

        let stored = self.store.get_all().await?;
        let now = Utc::now();
        let summary = self.exporter.write_all(&stored, now).await?;

        info!(
            %run_id,
            discovered,
            total = summary.total,
            upcoming = summary.upcoming,
            "Event discovery completed"
        );

        Ok(RunReport {
            run_id,
            discovered,
            saved,
            failed_saves,
            total_stored: summary.total,
            upcoming: summary.upcoming,
            agents: aggregation.agents,
            finished_at: now,
        })
    }
}
