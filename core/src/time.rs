use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use anyhow::{anyhow, Result};

use crate::calendar::{add_months, month_start};

/// Parses when a climb happened, relative to `now`.
///
/// Accepts `today`, `yesterday`/`yest`, `-Nd`, `YYYY-MM-DD` and
/// `YYYY-MM-DD HH:MM`. Date-only inputs are placed at noon.
pub fn parse_climb_date(input: &str, now: DateTime<Local>) -> Result<DateTime<Local>> {
    let input = input.trim();
    let today = now.date_naive();

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "" | "now" => return Ok(now),
        "today" | "tod" => return at_noon(today),
        "yesterday" | "yest" => return at_noon(today - Duration::days(1)),
        _ => {}
    }

    // 2. Relative format (-Nd, -Nw)
    if let Some(rest) = input.strip_prefix('-') {
        if let Some(last) = rest.chars().last().filter(|_| rest.chars().count() >= 2) {
            let (num_str, unit) = rest.split_at(rest.len() - last.len_utf8());
            let count: i64 = num_str.parse().map_err(|_| anyhow!("Invalid relative date: {}", input))?;
            let offset = match unit {
                "d" => Duration::try_days(count),
                "w" => Duration::try_weeks(count),
                _ => return Err(anyhow!("Unknown unit in relative date: {}", unit)),
            };
            let target = offset
                .and_then(|offset| today.checked_sub_signed(offset))
                .ok_or_else(|| anyhow!("Relative date out of range: {}", input))?;
            return at_noon(target);
        }
    }

    // 3. Absolute formats
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return localize(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return at_noon(d);
    }

    Err(anyhow!("Could not parse date: {}", input))
}

/// Parses a month selector into that month's first day.
///
/// Accepts `this`, `next`, `prev`, `+N`, `-N` (relative to `today`) and
/// `YYYY-MM`.
pub fn parse_month(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    let current = month_start(&today);

    match input.to_lowercase().as_str() {
        "" | "this" => return Ok(current),
        "next" => return Ok(add_months(current, 1)),
        "prev" | "last" => return Ok(add_months(current, -1)),
        _ => {}
    }

    if input.starts_with('+') || input.starts_with('-') {
        let offset: i32 = input.parse().map_err(|_| anyhow!("Invalid month offset: {}", input))?;
        return Ok(add_months(current, offset));
    }

    NaiveDate::parse_from_str(&format!("{}-01", input), "%Y-%m-%d")
        .map_err(|_| anyhow!("Could not parse month: {} (expected YYYY-MM)", input))
}

fn at_noon(date: NaiveDate) -> Result<DateTime<Local>> {
    localize(date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)))
}

fn localize(dt: NaiveDateTime) -> Result<DateTime<Local>> {
    Local
        .from_local_datetime(&dt)
        .earliest()
        .ok_or_else(|| anyhow!("{} does not exist in the local time zone", dt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 10, 18, 30, 0).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_climb_date_keywords() {
        assert_eq!(parse_climb_date("now", now()).unwrap(), now());
        let today = parse_climb_date("today", now()).unwrap();
        assert_eq!(today.date_naive(), ymd(2026, 3, 10));
        assert_eq!(today.hour(), 12);
        assert_eq!(parse_climb_date("yest", now()).unwrap().date_naive(), ymd(2026, 3, 9));
    }

    #[test]
    fn test_parse_climb_date_relative_and_absolute() {
        assert_eq!(parse_climb_date("-3d", now()).unwrap().date_naive(), ymd(2026, 3, 7));
        assert_eq!(parse_climb_date("-1w", now()).unwrap().date_naive(), ymd(2026, 3, 3));
        assert_eq!(parse_climb_date("2026-02-28", now()).unwrap().date_naive(), ymd(2026, 2, 28));

        let exact = parse_climb_date("2026-02-28 07:15", now()).unwrap();
        assert_eq!((exact.hour(), exact.minute()), (7, 15));

        assert!(parse_climb_date("-3x", now()).is_err());
        assert!(parse_climb_date("someday", now()).is_err());
    }

    #[test]
    fn test_parse_climb_date_huge_offset_is_an_error() {
        assert!(parse_climb_date("-99999999999d", now()).is_err());
        assert!(parse_climb_date("-99999999999w", now()).is_err());
        assert!(parse_climb_date("-3é", now()).is_err());
    }

    #[test]
    fn test_parse_month() {
        let today = ymd(2026, 1, 31);
        assert_eq!(parse_month("this", today).unwrap(), ymd(2026, 1, 1));
        assert_eq!(parse_month("prev", today).unwrap(), ymd(2025, 12, 1));
        assert_eq!(parse_month("+2", today).unwrap(), ymd(2026, 3, 1));
        assert_eq!(parse_month("-13", today).unwrap(), ymd(2024, 12, 1));
        assert_eq!(parse_month("2024-02", today).unwrap().month(), 2);
        assert!(parse_month("2024-13", today).is_err());
        assert!(parse_month("soon", today).is_err());
    }
}
