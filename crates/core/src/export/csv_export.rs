//! CSV export.

use er_protocol::Event;

use super::ExportError;

const HEADERS: [&str; 11] = [
    "ID",
    "Title",
    "Description",
    "Start Date",
    "End Date",
    "Location",
    "URL",
    "Source",
    "Tags",
    "Price",
    "Organizer",
];

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One header row plus one row per event. Tags are joined by `", "`.
pub fn export_csv(events: &[Event]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;

    for event in events {
        let start = event.start_date.format(DATE_FORMAT).to_string();
        let end = event.end_date.format(DATE_FORMAT).to_string();
        let tags = event.tags.join(", ");

        writer.write_record([
            event.id.as_str(),
            event.title.as_str(),
            event.description.as_str(),
            start.as_str(),
            end.as_str(),
            event.location.as_str(),
            event.url.as_str(),
            event.source.as_str(),
            tags.as_str(),
            event.price.as_deref().unwrap_or_default(),
            event.organizer.as_deref().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Encoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventDraft;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_export_csv_header_only() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(
            csv.trim_end(),
            "ID,Title,Description,Start Date,End Date,Location,URL,Source,Tags,Price,Organizer"
        );
    }

    #[test]
    fn test_export_csv_quotes_and_formats() {
        let event = EventDraft::new(
            "AI \"Night\"",
            Utc.with_ymd_and_hms(2024, 11, 20, 18, 0, 0).unwrap(),
            "Amsterdam, NL",
        )
        .description("Talks, drinks")
        .url("https://example.org")
        .source("meetup")
        .tags(["ai", "ml"])
        .build(Utc::now())
        .unwrap();

        let csv = export_csv(std::slice::from_ref(&event)).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(&row[0], event.id.as_str());
        assert_eq!(&row[1], "AI \"Night\"");
        assert_eq!(&row[2], "Talks, drinks");
        assert_eq!(&row[3], "2024-11-20 18:00:00");
        assert_eq!(&row[4], "2024-11-20 20:00:00");
        assert_eq!(&row[5], "Amsterdam, NL");
        assert_eq!(&row[8], "ai, ml");
        assert_eq!(&row[9], "");
        assert_eq!(&row[10], "");
    }
}
