//! Canonical event identity.
//!
//! The canonical key is the case-insensitive `(title, start, location)`
//! triple. It drives both id derivation and deduplication, so an event's id
//! and its dedup bucket can never disagree. The start is kept at millisecond
//! precision, the same precision the store persists.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use er_protocol::Event;
use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
const ID_LENGTH: usize = 16;

/// Separator between key components in the hash input. A control character
/// cannot appear in any user-visible field, so components cannot bleed into
/// each other.
const KEY_SEPARATOR: char = '\u{1f}';

/// Case-insensitive identity of an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKey {
    title: String,
    start: DateTime<Utc>,
    location: String,
}

impl CanonicalKey {
    pub fn new(title: &str, start: DateTime<Utc>, location: &str) -> Self {
        Self {
            title: title.to_lowercase(),
            start: start.trunc_subsecs(3),
            location: location.to_lowercase(),
        }
    }

    pub fn of(event: &Event) -> Self {
        Self::new(&event.title, event.start_date, &event.location)
    }

    /// Derive the stable event id for this key.
    pub fn event_id(&self) -> String {
        let input = format!(
            "{}{sep}{}{sep}{}",
            self.title,
            self.start.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.location,
            sep = KEY_SEPARATOR,
        );

        let digest = Sha256::digest(input.as_bytes());
        let mut id = hex::encode(digest);
        id.truncate(ID_LENGTH);
        id
    }
}

/// Derive the stable id for an event from its identity fields.
///
/// Pure: no randomness, no clock. Inputs equal under the canonical key
/// produce equal ids.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use er_core::events::derive_event_id;
///
/// let start = Utc.with_ymd_and_hms(2024, 10, 9, 9, 0, 0).unwrap();
/// assert_eq!(
///     derive_event_id("World Summit AI", start, "Amsterdam"),
///     derive_event_id("WORLD SUMMIT AI", start, "amsterdam"),
/// );
/// ```
pub fn derive_event_id(title: &str, start: DateTime<Utc>, location: &str) -> String {
    CanonicalKey::new(title, start, location).event_id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 15, 18, 30, 0).unwrap()
    }

    #[test]
    fn test_id_is_stable_across_derivations() {
        let a = derive_event_id("AI Research Symposium", start(), "Amsterdam Science Park");
        let b = derive_event_id("AI Research Symposium", start(), "Amsterdam Science Park");
        assert_eq!(a, b);
        assert_eq!(a.len(), ID_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_id_ignores_case_of_title_and_location() {
        let a = derive_event_id("PyData Amsterdam", start(), "De Waaghals");
        let b = derive_event_id("pydata amsterdam", start(), "DE WAAGHALS");
        assert_eq!(a, b);
    }

    #[test]
    fn test_id_differs_on_each_component() {
        let base = derive_event_id("Meetup", start(), "JA21");
        assert_ne!(base, derive_event_id("Meetup 2", start(), "JA21"));
        assert_ne!(base, derive_event_id("Meetup", start() + Duration::hours(1), "JA21"));
        assert_ne!(base, derive_event_id("Meetup", start(), "Pakhuis de Zwijger"));
    }

    #[test]
    fn test_components_do_not_bleed() {
        // "ab" + "c" must not collide with "a" + "bc"
        let a = derive_event_id("ab", start(), "c");
        let b = derive_event_id("a", start(), "bc");
        assert_ne!(a, b);
    }

    #[test]
    fn test_long_shared_prefix_does_not_collide() {
        let a = derive_event_id("Amsterdam Machine Learning Meetup: Transformers", start(), "JA21");
        let b = derive_event_id("Amsterdam Machine Learning Meetup: Diffusion", start(), "JA21");
        assert_ne!(a, b);
    }

    #[test]
    fn test_canonical_key_equality() {
        let a = CanonicalKey::new("Title", start(), "Place");
        let b = CanonicalKey::new("TITLE", start(), "place");
        let c = CanonicalKey::new("Title", start() + Duration::milliseconds(1), "Place");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.event_id(), b.event_id());
    }

    #[test]
    fn test_sub_millisecond_starts_share_key_and_id() {
        let later = start() + Duration::microseconds(500);
        let a = CanonicalKey::new("Title", start(), "Place");
        let b = CanonicalKey::new("Title", later, "Place");
        assert_eq!(a, b);
        assert_eq!(a.event_id(), b.event_id());
        assert_ne!(a, CanonicalKey::new("Title", start() + Duration::milliseconds(1), "Place"));
    }
}
