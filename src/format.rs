//! Timestamp formatting for the Library Logger pages.
//!
//! The API emits ISO-8601 strings (`2024-01-15T14:30:00.123456` for naive
//! database timestamps, `2024-01-15T14:30:00Z` for scan responses). These
//! helpers turn them into the short en-US forms shown in tables and toasts.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Text shown for a timestamp that cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

const TIME_FORMAT: &str = "%I:%M %p";
const DATE_FORMAT: &str = "%b %-d, %Y";

/// Date-time layouts accepted with a UTC offset, after `Z` and a space
/// separator have been normalized away.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

/// Parse an ISO-8601 string into `tz`.
///
/// Instants with an offset are converted, offset-less date-times are read as
/// wall-clock time in `tz`, and bare dates are midnight UTC. A wall-clock time
/// that falls in a DST gap is shifted forward by an hour.
pub fn parse_timestamp<Tz: TimeZone>(iso: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let iso = normalize(iso);

    if let Ok(instant) = DateTime::parse_from_rfc3339(&iso) {
        return Some(instant.with_timezone(tz));
    }
    if let Some(instant) = OFFSET_FORMATS
        .iter()
        .find_map(|layout| DateTime::parse_from_str(&iso, layout).ok())
    {
        return Some(instant.with_timezone(tz));
    }

    let naive = iso
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(&iso, "%Y-%m-%dT%H:%M"))
        .ok();
    if let Some(naive) = naive {
        return tz.from_local_datetime(&naive).earliest().or_else(|| {
            tz.from_local_datetime(&(naive + chrono::Duration::hours(1)))
                .earliest()
        });
    }

    NaiveDate::parse_from_str(&iso, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight).with_timezone(tz))
}

/// `2024-01-15 14:30Z` becomes `2024-01-15T14:30+00:00`
fn normalize(iso: &str) -> String {
    let mut iso = iso.trim().to_string();
    if iso.len() > 10 && iso.as_bytes()[10] == b' ' {
        iso.replace_range(10..11, "T");
    }
    if let Some(stripped) = iso.strip_suffix(|c: char| c.eq_ignore_ascii_case(&'z')) {
        iso = format!("{stripped}+00:00");
    }
    iso
}

fn format_with<Tz>(iso: &str, tz: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if iso.is_empty() {
        return String::new();
    }

    match parse_timestamp(iso, tz) {
        Some(instant) => instant.format(pattern).to_string(),
        None => {
            tracing::debug!("Unparseable timestamp: {iso:?}");
            INVALID_DATE.to_string()
        }
    }
}

/// `02:30 PM` for `iso`, rendered in `tz`
pub fn format_time_in<Tz>(iso: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format_with(iso, tz, TIME_FORMAT)
}

/// `Jan 15, 2024` for `iso`, rendered in `tz`
pub fn format_date_in<Tz>(iso: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format_with(iso, tz, DATE_FORMAT)
}

/// `Jan 15, 2024 02:30 PM` for `iso`, rendered in `tz`
pub fn format_date_time_in<Tz>(iso: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if iso.is_empty() {
        return String::new();
    }
    format!("{} {}", format_date_in(iso, tz), format_time_in(iso, tz))
}

/// Local-time variant of [`format_time_in`]
#[must_use]
pub fn format_time(iso: &str) -> String {
    format_time_in(iso, &Local)
}

/// Local-time variant of [`format_date_in`]
#[must_use]
pub fn format_date(iso: &str) -> String {
    format_date_in(iso, &Local)
}

/// Local-time variant of [`format_date_time_in`]
#[must_use]
pub fn format_date_time(iso: &str) -> String {
    format_date_time_in(iso, &Local)
}
