//! Scheduling state for discovery runs.
//!
//! This module provides:
//! - The single-flight `EventScheduler`
//! - Cron job lifecycle (start, stop, status)

pub mod scheduler;

pub use scheduler::{normalize_cron, EventScheduler, RunOutcome, SchedulerError};
