//! Configuration loading and management.
//!
//! Settings come from `.event-radar/config.toml` under the project root,
//! overridden by environment variables.

pub mod error;
pub mod loader;
pub mod models;

pub use error::{ConfigError, ConfigResult};
pub use loader::load_config;
pub use models::AppConfig;
