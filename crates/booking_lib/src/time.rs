//! This module decides how show dates are read and classified.
//!
//! All the dates are stored as naive UTC date-times.

use chrono::{DateTime, NaiveDateTime};

/// Returns the current UTC instant, used as the boundary between past and upcoming shows.
///
/// It should be captured once per request, so that every classification in it uses the same instant.
pub fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

/// Whether a show already happened or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTiming {
    /// The show started strictly before the boundary.
    Past,
    /// The show starts at or after the boundary.
    Upcoming,
}

impl ShowTiming {
    /// Classifies a show from its start time, relative to `now`.
    ///
    /// A show starting exactly at `now` is upcoming.
    pub fn of(start_time: NaiveDateTime, now: NaiveDateTime) -> Self {
        if start_time >= now {
            Self::Upcoming
        } else {
            Self::Past
        }
    }
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parses the start time of a show, as submitted in the show form.
///
/// It accepts RFC 3339 date-times, which are converted to UTC, and the `YYYY-MM-DD HH:MM[:SS]`
/// format which is assumed to already be in UTC.
pub fn parse_start_time(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Some(date.naive_utc());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
}

/// Formats a date like the default value of the show form.
pub fn format_form_date(date: NaiveDateTime) -> String {
    date.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    use super::{ShowTiming, format_form_date, parse_start_time};

    fn date(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|d| d.and_hms_opt(h, min, 0))
            .unwrap()
    }

    #[test]
    fn boundary_instant_is_upcoming() {
        let now = date(2025, 6, 1, 20, 0);
        assert_eq!(ShowTiming::of(now, now), ShowTiming::Upcoming);
        assert_eq!(
            ShowTiming::of(now - TimeDelta::seconds(1), now),
            ShowTiming::Past
        );
        assert_eq!(
            ShowTiming::of(now + TimeDelta::days(30), now),
            ShowTiming::Upcoming
        );
    }

    #[test]
    fn parses_rfc3339_as_utc() {
        assert_eq!(
            parse_start_time("2019-05-21T21:30:00.000Z"),
            Some(date(2019, 5, 21, 21, 30))
        );
        assert_eq!(
            parse_start_time("2019-05-21T23:30:00+02:00"),
            Some(date(2019, 5, 21, 21, 30))
        );
    }

    #[test]
    fn parses_form_formats() {
        assert_eq!(
            parse_start_time("2035-04-01 20:00:00"),
            Some(date(2035, 4, 1, 20, 0))
        );
        assert_eq!(
            parse_start_time(" 2035-04-01 20:00 "),
            Some(date(2035, 4, 1, 20, 0))
        );
        assert_eq!(
            parse_start_time("2035-04-01T20:00"),
            Some(date(2035, 4, 1, 20, 0))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_start_time("tomorrow"), None);
        assert_eq!(parse_start_time("2035-13-01 20:00"), None);
        assert_eq!(parse_start_time(""), None);
    }

    #[test]
    fn form_date_round_trips() {
        let d = date(2035, 4, 1, 20, 0);
        assert_eq!(parse_start_time(&format_form_date(d)), Some(d));
    }
}
