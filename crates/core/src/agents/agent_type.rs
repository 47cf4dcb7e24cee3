//! Agent kind enumeration for the built-in agents.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Meetup,
    Eventbrite,
    Conference,
}

impl AgentKind {
    /// All built-in kinds in default registration order.
    pub const ALL: [AgentKind; 3] = [Self::Meetup, Self::Eventbrite, Self::Conference];

    /// Parse an agent name from configuration or the command line.
    ///
    /// Matching is case-insensitive and accepts both the full agent name
    /// (`MeetupAgent`) and the short form (`meetup`).
    ///
    /// # Examples
    ///
    /// ```
    /// use er_core::agents::AgentKind;
    ///
    /// assert_eq!(AgentKind::from_name("MeetupAgent"), Some(AgentKind::Meetup));
    /// assert_eq!(AgentKind::from_name("eventbrite"), Some(AgentKind::Eventbrite));
    /// assert_eq!(AgentKind::from_name("unknown"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        let short = name.strip_suffix("agent").unwrap_or(&name);

        match short {
            "meetup" => Some(Self::Meetup),
            "eventbrite" => Some(Self::Eventbrite),
            "conference" => Some(Self::Conference),
            _ => None,
        }
    }

    /// The agent name as reported by `Agent::name`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Meetup => "MeetupAgent",
            Self::Eventbrite => "EventbriteAgent",
            Self::Conference => "ConferenceAgent",
        }
    }
}
