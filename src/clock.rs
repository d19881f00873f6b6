use crate::config::Clock;
use crate::page::Page;
use chrono::{DateTime, Local, TimeZone};

/// Format `now` for the page header in the given clock style.
///
/// Returns `None` for [`Clock::None`], in which case nothing is rendered.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use library_logger_ui::clock::format_clock;
/// use library_logger_ui::config::Clock;
///
/// let now = Utc.with_ymd_and_hms(2026, 10, 18, 14, 5, 0).unwrap();
/// assert_eq!(
///     format_clock(&now, Clock::Hour12).as_deref(),
///     Some("Sun, Oct 18, 2026, 02:05 PM")
/// );
/// ```
pub fn format_clock<Tz>(now: &DateTime<Tz>, clock: Clock) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let pattern = match clock {
        Clock::Hour12 => "%a, %b %-d, %Y, %I:%M %p",
        Clock::Hour24 => "%a, %b %-d, %Y, %H:%M",
        Clock::None => return None,
    };
    Some(now.format(pattern).to_string())
}

/// Get the current local time formatted for the page header
#[must_use]
pub fn current_time_string(clock: Clock) -> Option<String> {
    format_clock(&Local::now(), clock)
}

/// Render `now` into the page's `datetime` slot.
///
/// Silent no-op when the page has no slot or the clock is disabled.
pub fn update_date_time_at<Tz>(page: &Page, now: &DateTime<Tz>, clock: Clock)
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if let Some(text) = format_clock(now, clock) {
        if page.set_datetime_text(&text) {
            tracing::debug!("Clock updated: {text}");
        }
    }
}

/// Render the current local time into the page's `datetime` slot
pub fn update_date_time(page: &Page, clock: Clock) {
    update_date_time_at(page, &Local::now(), clock);
}
