//! # er-core
//!
//! Core discovery pipeline for event-radar.
//!
//! This crate provides:
//! - Event sources (HTML listings, curated lists) behind the `Source` trait
//! - Agents grouping sources, and the `AgentManager` aggregator
//! - Canonical event identity and deduplication
//! - The discovery engine and the single-flight scheduler
//! - Persistence and export (iCalendar, CSV, JSON feed)
//! - Configuration loading from `.event-radar/`
//!
//! ## Modules
//!
//! - [`sources`]: Source trait and implementations
//! - [`agents`]: Agent trait, built-in agents and the aggregator
//! - [`events`]: Identity, validation and deduplication
//! - [`engine`]: One discovery pass
//! - [`state`]: Scheduler and cron lifecycle
//! - [`store`]: Event persistence
//! - [`export`]: Calendar, CSV and feed artifacts
//! - [`config`]: Configuration loading and management

pub mod agents;
pub mod config;
pub mod engine;
pub mod events;
pub mod export;
pub mod sources;
pub mod state;
pub mod store;
