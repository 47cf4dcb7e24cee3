//! Common test utilities shared by the integration tests.
//!
//! - Fixtures: sample events, project directories, wired schedulers
//! - Mock agents built from mock sources
//! - Assertions over event sequences

pub mod assertions;
pub mod fixtures;
pub mod mock_agents;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use mock_agents::*;
