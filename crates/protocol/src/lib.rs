//! # er-protocol
//!
//! Shared data models for event-radar.
//!
//! This crate defines the structures exchanged between the discovery core,
//! the persistence layer, the export transforms and whatever trigger surface
//! drives the scheduler:
//! - Event records produced by sources
//! - Scheduler status snapshots
//! - Configuration from `.event-radar/config.toml`
//! - The published JSON feed
//!
//! ## Modules
//!
//! - [`event_models`]: The event record
//! - [`status_models`]: Scheduler status and state
//! - [`config_models`]: Configuration file structure
//! - [`feed_models`]: JSON feed document
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, chrono and ts-rs
//! - TypeScript generation: All types derive `TS` for web client compatibility
//! - Independent compilation: No dependencies on other event-radar crates

pub mod config_models;
pub mod event_models;
pub mod feed_models;
pub mod status_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use event_models::*;
pub use feed_models::*;
pub use status_models::*;
