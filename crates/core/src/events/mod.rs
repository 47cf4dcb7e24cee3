//! Event identity, construction and deduplication.

pub mod dedup;
pub mod draft;
pub mod identity;

pub use dedup::deduplicate_events;
pub use draft::{EventDraft, InvalidEvent, DEFAULT_EVENT_DURATION_HOURS};
pub use identity::{derive_event_id, CanonicalKey};
