use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const DATE_FMT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FMT).ok()
}

/// Parse a `YYYY-MM-DD` argument, or fail with `InvalidDate`.
pub fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Parse an optional date argument; `"today"` is accepted as a shortcut.
pub fn parse_date_or_today(s: Option<&String>, today: NaiveDate) -> AppResult<NaiveDate> {
    match s {
        None => Ok(today),
        Some(v) if v.eq_ignore_ascii_case("today") => Ok(today),
        Some(v) => parse_date_arg(v),
    }
}

pub fn to_db(d: &NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

/// Longest look-back window accepted by stats, logs and progress.
pub const MAX_PERIOD_DAYS: i64 = 3650;

/// Validate a `--days` style window length.
pub fn check_period_days(days: i64) -> AppResult<i64> {
    if (0..=MAX_PERIOD_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(AppError::InvalidInput(format!(
            "days must be between 0 and {MAX_PERIOD_DAYS} (got {days})"
        )))
    }
}

pub fn prev_day(d: NaiveDate) -> NaiveDate {
    d - Duration::days(1)
}

pub fn next_day(d: NaiveDate) -> NaiveDate {
    d + Duration::days(1)
}

/// Weekday index with Monday = 0 … Sunday = 6.
pub fn weekday_index(d: NaiveDate) -> u8 {
    d.weekday().num_days_from_monday() as u8
}

/// Weekday label honoring the `show_weekday` config option
/// (`None`, `Short`, `Medium`, `Long`).
pub fn weekday_str(d: NaiveDate, mode: &str) -> String {
    let wd = d.weekday();
    match mode.to_ascii_lowercase().as_str() {
        "short" => short_name(wd).to_string(),
        "medium" => wd.to_string(),
        "long" => long_name(wd).to_string(),
        _ => String::new(),
    }
}

fn short_name(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

fn long_name(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a weekday list such as `0,2,4` or `mon,wed,fri`.
pub fn parse_weekdays(s: &str) -> AppResult<Vec<u8>> {
    let mut out = Vec::new();
    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let idx = match part.to_ascii_lowercase().as_str() {
            "mon" | "monday" => 0,
            "tue" | "tuesday" => 1,
            "wed" | "wednesday" => 2,
            "thu" | "thursday" => 3,
            "fri" | "friday" => 4,
            "sat" | "saturday" => 5,
            "sun" | "sunday" => 6,
            other => other
                .parse::<u8>()
                .map_err(|_| AppError::InvalidInput(format!("invalid weekday '{other}'")))?,
        };
        out.push(idx);
    }
    Ok(out)
}
