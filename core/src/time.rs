use chrono::{Duration, NaiveDate, NaiveTime};
use anyhow::{anyhow, Result};

use crate::model::set::{DATE_FORMAT, TIME_FORMAT};

/// Parses the date a set was done relative to `today`.
///
/// Accepts `today`, `yesterday`, `-Nd` (N days ago) and `YYYY-MM-DD`.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yes" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    if let Some(days) = input.strip_prefix('-').and_then(|s| s.strip_suffix(['d', 'D'])) {
        let count: i64 = days.parse().map_err(|_| anyhow!("Invalid relative date: {}", input))?;
        return Ok(today - Duration::days(count));
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| anyhow!("Could not parse date '{}' (expected YYYY-MM-DD)", input))
}

/// Parses `now` or a 24-hour `HH:MM` time.
pub fn parse_time(input: &str, now: NaiveTime) -> Result<NaiveTime> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("now") {
        return Ok(now);
    }
    NaiveTime::parse_from_str(input, TIME_FORMAT)
        .map_err(|_| anyhow!("Could not parse time '{}' (expected HH:MM)", input))
}
