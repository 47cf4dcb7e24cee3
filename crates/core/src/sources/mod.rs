//! Event sources.
//!
//! This module provides the `Source` trait that every external origin of
//! candidate events implements, plus the concrete listing, curated and mock
//! implementations.

pub mod base;
pub mod context;
pub mod curated;
pub mod dates;
pub mod listing;
pub mod mock_source;

pub use base::{Source, SourceError, DEFAULT_SOURCE_TIMEOUT};
pub use context::SourceContext;
pub use curated::{CuratedEvent, CuratedSource};
pub use dates::DateStyle;
pub use listing::{HtmlListingSource, ListingLayout};
pub use mock_source::{BlockHandle, MockSource};
