//! Reporting-week calendar helpers.
//!
//! A survey week is identified by the Sunday that closes it.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// The Sunday closing the week that contains `date`.
pub fn week_ending(date: NaiveDate) -> NaiveDate {
    let days_until_sunday = match date.weekday() {
        Weekday::Sun => 0,
        other => 6 - i64::from(other.num_days_from_monday()),
    };
    date + Duration::days(days_until_sunday)
}

/// The current week ending followed by the `count - 1` before it.
pub fn recent_week_endings(today: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let current = week_ending(today);
    (0..count)
        .map(|i| current - Duration::weeks(i as i64))
        .collect()
}

/// Display label such as `Week ending 25 Aug`.
pub fn week_label(week_ending: NaiveDate) -> String {
    format!("Week ending {}", week_ending.format("%-d %b"))
}
