use chrono::{TimeZone, Utc};
use er_protocol::*;

fn sample_event() -> Event {
    let start = Utc.with_ymd_and_hms(2024, 10, 9, 0, 0, 0).unwrap();
    Event {
        id: "3f1c9a0d2b7e4c55".to_string(),
        title: "World Summit AI".to_string(),
        description: "Leading global AI conference and tech festival".to_string(),
        start_date: start,
        end_date: Utc.with_ymd_and_hms(2024, 10, 10, 0, 0, 0).unwrap(),
        location: "Amsterdam".to_string(),
        url: "https://worldsummit.ai".to_string(),
        source: "conference-agent".to_string(),
        tags: vec!["ai".to_string(), "conference".to_string()],
        price: None,
        organizer: Some("InspiredMinds".to_string()),
        image_url: None,
        created_at: start,
        updated_at: start,
    }
}

#[test]
fn test_event_serializes_with_camel_case_keys() {
    let json = serde_json::to_value(sample_event()).expect("Failed to serialize Event");

    assert_eq!(json["startDate"], "2024-10-09T00:00:00Z");
    assert_eq!(json["endDate"], "2024-10-10T00:00:00Z");
    assert_eq!(json["imageUrl"], serde_json::Value::Null);
    assert_eq!(json["organizer"], "InspiredMinds");
    assert!(json.get("start_date").is_none());
}

#[test]
fn test_event_deserializes_without_optional_fields() {
    let json = r#"{
        "id": "abc",
        "title": "AI Meetup",
        "description": "",
        "startDate": "2024-11-01T18:00:00Z",
        "endDate": "2024-11-01T20:00:00Z",
        "location": "Amsterdam",
        "url": "",
        "source": "meetup",
        "tags": ["AI", "meetup"],
        "createdAt": "2024-10-01T00:00:00Z",
        "updatedAt": "2024-10-01T00:00:00Z"
    }"#;

    let event: Event = serde_json::from_str(json).expect("Failed to deserialize Event");

    assert_eq!(event.price, None);
    assert_eq!(event.organizer, None);
    assert_eq!(event.image_url, None);
    assert!(event.has_tag("ai"));
    assert!(!event.has_tag("conference"));
}

#[test]
fn test_scheduler_status_serialization() {
    let status = SchedulerStatus {
        is_running: false,
        cron_active: true,
        last_run: Some(Utc.with_ymd_and_hms(2024, 10, 9, 10, 0, 0).unwrap()),
    };

    let json = serde_json::to_string(&status).expect("Failed to serialize SchedulerStatus");
    assert_eq!(
        json,
        r#"{"isRunning":false,"cronActive":true,"lastRun":"2024-10-09T10:00:00Z"}"#
    );

    let back: SchedulerStatus =
        serde_json::from_str(&json).expect("Failed to deserialize SchedulerStatus");
    assert_eq!(back, status);
    assert_eq!(back.state(), SchedulerState::Idle);
}

#[test]
fn test_scheduler_status_missing_last_run() {
    let status: SchedulerStatus = serde_json::from_str(r#"{"isRunning":true,"cronActive":false}"#)
        .expect("Failed to deserialize SchedulerStatus");

    assert_eq!(status.last_run, None);
    assert_eq!(status.state(), SchedulerState::Running);
    assert_eq!(serde_json::to_string(&status.state()).unwrap(), r#""RUNNING""#);
}

#[test]
fn test_radar_config_defaults_from_empty_toml() {
    let config: RadarConfig = toml::from_str("").expect("Failed to parse empty config");

    assert_eq!(config, RadarConfig::default());
    assert_eq!(config.schedule, DEFAULT_SCHEDULE);
    assert_eq!(config.upcoming_days, DEFAULT_UPCOMING_DAYS);
    assert_eq!(config.source_timeout_secs, DEFAULT_SOURCE_TIMEOUT_SECS);
    assert_eq!(config.calendar.timezone, "Europe/Amsterdam");
}

#[test]
fn test_radar_config_agent_toggles() {
    let toml_str = r#"
schedule = "*/15 * * * *"

[calendar]
name = "Tech Events"

[agents]
MeetupAgent = true
EventbriteAgent = false
"#;

    let config: RadarConfig = toml::from_str(toml_str).expect("Failed to parse config");

    assert_eq!(config.schedule, "*/15 * * * *");
    assert_eq!(config.calendar.name, "Tech Events");
    assert_eq!(config.calendar.description, CalendarConfig::default().description);
    assert_eq!(config.agents.get("MeetupAgent"), Some(&true));
    assert_eq!(config.agents.get("EventbriteAgent"), Some(&false));
    assert_eq!(config.agents.get("ConferenceAgent"), None);
}

#[test]
fn test_feed_event_mirrors_event() {
    let event = sample_event();
    let feed = JsonFeed {
        title: "AI Events Amsterdam".to_string(),
        description: "AI-related events happening in Amsterdam".to_string(),
        updated: event.created_at,
        events: vec![FeedEvent::from(&event)],
    };

    let json = serde_json::to_value(&feed).expect("Failed to serialize JsonFeed");
    assert_eq!(json["events"][0]["id"], event.id);
    assert_eq!(json["events"][0]["startDate"], "2024-10-09T00:00:00Z");

    let back: JsonFeed = serde_json::from_value(json).expect("Failed to deserialize JsonFeed");
    assert_eq!(back, feed);
}
