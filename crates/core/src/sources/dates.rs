//! Date parsing for listing pages.
//!
//! Listing sites print dates for humans. Two styles are handled:
//! - full: `"Tue, Nov 15, 2024"` (optionally followed by a time)
//! - relative: `"Today"`, `"Tomorrow"` or `"Mon, Dec 15"` in the current year
//!
//! Every parsed date is midnight UTC of the named day so that the same
//! listing parsed on different runs yields the same instant.

use chrono::format::{parse_and_remainder, Parsed, StrftimeItems};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

/// Which date style a listing page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    Full,
    Relative,
}

impl DateStyle {
    pub fn parse(self, text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Full => parse_full_date(text),
            Self::Relative => parse_relative_date(text, now),
        }
    }
}

/// Parse `"<weekday>, <month> <day>, <year>"`.
///
/// The weekday is not checked against the date.
pub fn parse_full_date(text: &str) -> Option<DateTime<Utc>> {
    let (date, _) = NaiveDate::parse_and_remainder(after_weekday(text)?, "%b %d, %Y").ok()?;
    at_midnight(date)
}

/// Parse `"Today"`, `"Tomorrow"` or `"<weekday>, <month> <day>"`.
pub fn parse_relative_date(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let lower = text.to_lowercase();
    let today = now.date_naive();

    if lower.contains("today") {
        return at_midnight(today);
    }
    if lower.contains("tomorrow") {
        return at_midnight(today + Duration::days(1));
    }

    let mut parsed = Parsed::new();
    parse_and_remainder(&mut parsed, after_weekday(text)?, StrftimeItems::new("%b %d")).ok()?;
    parsed.set_year(i64::from(now.year())).ok()?;
    at_midnight(parsed.to_naive_date().ok()?)
}

fn after_weekday(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once(',')?;
    Some(rest.trim_start())
}

fn at_midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}
