//! Recurring, mutually exclusive discovery scheduler.
//!
//! The `EventScheduler` is the single entry point for discovery runs, whether
//! they come from the cron job or from a manual trigger. At most one run is
//! in flight at any instant; a trigger that arrives while a run is active is
//! skipped rather than queued.

use chrono::{DateTime, Utc};
use er_protocol::{SchedulerStatus, DEFAULT_SCHEDULE};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use thiserror::Error;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::engine::{DiscoveryEngine, RunReport};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Cron scheduler error: {0}")]
    Cron(String),

    #[error("Failed to initialize store: {0}")]
    Store(#[from] StoreError),
}

fn cron_error(e: impl std::fmt::Display) -> SchedulerError {
    SchedulerError::Cron(e.to_string())
}

/// Result of a call to [`EventScheduler::run_event_discovery`].
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed(RunReport),
    /// Another run was already in flight; nothing was done.
    Skipped,
    Failed(String),
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Holds the running flag for the lifetime of one run.
///
/// Dropping the guard clears the flag, including during panic unwinding.
struct RunGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

struct Inner {
    engine: DiscoveryEngine,
    schedule: String,
    is_running: AtomicBool,
    cron_active: AtomicBool,
    last_run: Mutex<Option<DateTime<Utc>>>,
    cron: tokio::sync::Mutex<Option<JobScheduler>>,
}

/// Cheaply cloneable handle; clones share the same state.
#[derive(Clone)]
pub struct EventScheduler {
    inner: Arc<Inner>,
}

impl EventScheduler {
    /// Create a scheduler; `schedule` is used when `start_cron_job` gets none.
    pub fn new(engine: DiscoveryEngine, schedule: impl Into<String>) -> Self {
        let schedule = schedule.into();
        let schedule = if schedule.trim().is_empty() {
            DEFAULT_SCHEDULE.to_string()
        } else {
            schedule
        };

        Self {
            inner: Arc::new(Inner {
                engine,
                schedule,
                is_running: AtomicBool::new(false),
                cron_active: AtomicBool::new(false),
                last_run: Mutex::new(None),
                cron: tokio::sync::Mutex::new(None),
            }),
        }
    }

    pub fn engine(&self) -> &DiscoveryEngine {
        &self.inner.engine
    }

    /// Prepare the store. Safe to call more than once.
    pub async fn initialize(&self) -> Result<(), SchedulerError> {
        self.inner.engine.store().initialize().await?;
        info!("Scheduler initialized");
        Ok(())
    }

    /// Run one discovery pass unless one is already in flight.
    pub async fn run_event_discovery(&self) -> RunOutcome {
        let Some(_guard) = RunGuard::acquire(&self.inner.is_running) else {
            info!("Event discovery already running, skipping");
            return RunOutcome::Skipped;
        };

        match self.inner.engine.run().await {
            Ok(report) => {
                self.set_last_run(report.finished_at);
                RunOutcome::Completed(report)
            }
            Err(e) => {
                error!(error = %e, "Event discovery failed");
                RunOutcome::Failed(e.to_string())
            }
        }
    }

    /// Install the recurring job, replacing any existing one.
    ///
    /// Uses `schedule` if given, else the configured schedule. Five-field
    /// expressions get a leading `0` seconds field. The replaced job is shut
    /// down before the new one starts; concurrent calls are serialized, so at
    /// most one job is ever installed.
    pub async fn start_cron_job(&self, schedule: Option<&str>) -> Result<(), SchedulerError> {
        let mut cron = self.inner.cron.lock().await;
        self.shutdown_installed(&mut cron).await?;

        let expression = normalize_cron(schedule.unwrap_or(&self.inner.schedule));
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);

        let job = Job::new_async(expression.as_str(), move |_uuid, _lock| {
            let weak = weak.clone();
            Box::pin(async move {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                info!("Running scheduled event discovery");
                EventScheduler { inner }.run_event_discovery().await;
            })
        })
        .map_err(cron_error)?;

        let scheduler = JobScheduler::new().await.map_err(cron_error)?;
        scheduler.add(job).await.map_err(cron_error)?;
        scheduler.start().await.map_err(cron_error)?;

        *cron = Some(scheduler);
        self.inner.cron_active.store(true, Ordering::Release);
        info!(schedule = %expression, "Cron job started");
        Ok(())
    }

    /// Shut the recurring job down. No-op if none is installed.
    pub async fn stop_cron_job(&self) -> Result<(), SchedulerError> {
        let mut cron = self.inner.cron.lock().await;
        self.shutdown_installed(&mut cron).await
    }

    async fn shutdown_installed(
        &self,
        cron: &mut Option<JobScheduler>,
    ) -> Result<(), SchedulerError> {
        if let Some(mut scheduler) = cron.take() {
            self.inner.cron_active.store(false, Ordering::Release);
            scheduler.shutdown().await.map_err(cron_error)?;
            info!("Cron job stopped");
        }
        Ok(())
    }

    /// Snapshot of the scheduler state. Never blocks on a running pass.
    pub fn get_status(&self) -> SchedulerStatus {
        SchedulerStatus {
            is_running: self.inner.is_running.load(Ordering::Acquire),
            cron_active: self.inner.cron_active.load(Ordering::Acquire),
            last_run: self.last_run(),
        }
    }

    fn last_run(&self) -> Option<DateTime<Utc>> {
        *self
            .inner
            .last_run
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_last_run(&self, at: DateTime<Utc>) {
        *self
            .inner
            .last_run
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(at);
    }
}

/// Accept standard five-field cron by prepending a seconds field.
pub fn normalize_cron(expression: &str) -> String {
    let expression = expression.trim();
    if expression.split_whitespace().count() == 5 {
        format!("0 {expression}")
    } else {
        expression.to_string()
    }
}
