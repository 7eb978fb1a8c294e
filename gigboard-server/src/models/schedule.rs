//! Show start times: parsing, display, and the past/upcoming split
//!
//! Start times are stored in UTC. Naive input is read in the configured
//! display timezone; input carrying an offset is taken as-is.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::ValidationError;

/// Naive formats accepted from the show form, tried in order.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parse a submitted start time into UTC.
pub fn parse_start_time(value: &str, tz: Tz) -> Result<DateTime<Utc>, ValidationError> {
    let raw = value.trim();
    if raw.is_empty() {
        return Err(ValidationError::Empty { field: "start_time" });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or(ValidationError::InvalidFormat {
            field: "start_time",
            reason: "expected YYYY-MM-DD HH:MM[:SS]",
        })?;

    // Ambiguous wall-clock times (DST fall-back) resolve to the earlier instant.
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(ValidationError::InvalidFormat {
            field: "start_time",
            reason: "time does not exist in the configured timezone",
        })
}

/// How much detail to show when rendering a start time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `Saturday May, 21, 2035 at 9:30PM`
    Full,
    /// `Sat 05, 21, 2035 9:30PM`
    Medium,
}

/// Render a start time in the display timezone.
pub fn format_start_time(start: DateTime<Utc>, tz: Tz, style: DateStyle) -> String {
    let local = start.with_timezone(&tz);
    match style {
        DateStyle::Full => local.format("%A %B, %-d, %Y at %-I:%M%p").to_string(),
        DateStyle::Medium => local.format("%a %m, %d, %Y %-I:%M%p").to_string(),
    }
}

/// Value for an `<input type="datetime-local">` in the display timezone.
pub fn input_value(start: DateTime<Utc>, tz: Tz) -> String {
    start.with_timezone(&tz).format("%Y-%m-%dT%H:%M").to_string()
}

/// A show is past when it started strictly before `now`.
pub fn is_past(start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start < now
}

/// Items split into past and upcoming, preserving input order in each half
#[derive(Debug, Clone, PartialEq)]
pub struct Partitioned<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> Partitioned<T> {
    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }

    pub fn total(&self) -> usize {
        self.past.len() + self.upcoming.len()
    }
}

/// Split items by their start time relative to `now`.
///
/// An item starting exactly at `now` is upcoming.
pub fn partition_by_start<T, I, F>(items: I, now: DateTime<Utc>, start_of: F) -> Partitioned<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> DateTime<Utc>,
{
    let (past, upcoming): (Vec<T>, Vec<T>) = items
        .into_iter()
        .partition(|item| is_past(start_of(item), now));

    Partitioned { past, upcoming }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn parses_naive_formats_as_utc() {
        let expected = at("2035-04-01T20:00:00Z");
        for raw in [
            "2035-04-01 20:00:00",
            "2035-04-01 20:00",
            "2035-04-01T20:00:00",
            "2035-04-01T20:00",
        ] {
            assert_eq!(parse_start_time(raw, Tz::UTC).unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn naive_input_uses_display_timezone() {
        let parsed = parse_start_time("2035-01-15 19:30", chrono_tz::America::Chicago).unwrap();
        assert_eq!(parsed, at("2035-01-16T01:30:00Z"));
    }

    #[test]
    fn explicit_offset_wins_over_timezone() {
        let parsed =
            parse_start_time("2035-01-15T19:30:00-05:00", chrono_tz::Europe::Berlin).unwrap();
        assert_eq!(parsed, at("2035-01-16T00:30:00Z"));
    }

    #[test]
    fn rejects_blank_and_garbage() {
        assert_eq!(
            parse_start_time("", Tz::UTC).unwrap_err(),
            ValidationError::Empty { field: "start_time" }
        );
        assert!(matches!(
            parse_start_time("next tuesday", Tz::UTC).unwrap_err(),
            ValidationError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn rejects_skipped_wall_clock_time() {
        // 02:30 does not exist in New York on the 2035 spring-forward date.
        let err = parse_start_time("2035-03-11 02:30", chrono_tz::America::New_York).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "start_time", .. }));
    }

    #[test]
    fn formats_both_styles() {
        let start = at("2035-04-01T20:00:00Z");
        assert_eq!(
            format_start_time(start, Tz::UTC, DateStyle::Full),
            "Sunday April, 1, 2035 at 8:00PM"
        );
        assert_eq!(
            format_start_time(start, Tz::UTC, DateStyle::Medium),
            "Sun 04, 01, 2035 8:00PM"
        );
        assert_eq!(input_value(start, Tz::UTC), "2035-04-01T20:00");
    }

    #[test]
    fn partition_splits_on_now() {
        let now = at("2030-06-01T12:00:00Z");
        let starts = vec![
            now - Duration::days(30),
            now + Duration::hours(1),
            now - Duration::seconds(1),
            now + Duration::days(400),
        ];

        let split = partition_by_start(starts.clone(), now, |s| *s);

        assert_eq!(split.past, vec![starts[0], starts[2]]);
        assert_eq!(split.upcoming, vec![starts[1], starts[3]]);
        assert!(split.past.iter().all(|s| *s < now));
        assert!(split.upcoming.iter().all(|s| *s >= now));
    }

    #[test]
    fn start_equal_to_now_is_upcoming() {
        let now = at("2030-06-01T12:00:00Z");
        let split = partition_by_start(vec![now], now, |s| *s);
        assert_eq!(split.past_count(), 0);
        assert_eq!(split.upcoming_count(), 1);
    }

    #[test]
    fn counts_add_up_to_total() {
        let now = at("2030-06-01T12:00:00Z");
        let starts: Vec<_> = (-50..50).map(|h| now + Duration::hours(h)).collect();
        let split = partition_by_start(starts.iter().copied(), now, |s| *s);

        assert_eq!(split.past_count() + split.upcoming_count(), starts.len());
        assert_eq!(split.total(), starts.len());
        assert_eq!(split.past_count(), 50);
    }
}
