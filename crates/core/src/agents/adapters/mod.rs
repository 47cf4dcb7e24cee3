//! Agent implementations.

mod conference;
mod eventbrite;
mod meetup;
pub mod mock_agent;

pub use conference::ConferenceAgent;
pub use eventbrite::EventbriteAgent;
pub use meetup::MeetupAgent;
pub use mock_agent::MockAgent;
