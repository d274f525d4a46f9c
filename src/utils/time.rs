//! Time utilities: timestamps, duration parsing and formatting seconds.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDateTime, Timelike};

pub const TS_FMT: &str = "%Y-%m-%dT%H:%M:%S";

/// Longest duration a single day can hold.
pub const DAY_SECS: i64 = 86_400;

/// Local wall-clock time truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn to_db(ts: &NaiveDateTime) -> String {
    ts.format(TS_FMT).to_string()
}

pub fn parse_ts(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TS_FMT).ok()
}

/// Format seconds as `HHh MMm SSs` (with a leading `-` if negative).
pub fn secs2readable(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let s = secs.abs();
    format!(
        "{}{:02}h {:02}m {:02}s",
        sign,
        s / 3600,
        (s % 3600) / 60,
        s % 60
    )
}

/// Parse a duration such as `90`, `45s`, `30m`, `1h`, `1h30m` or `1h30m15s`.
/// A bare number is taken as minutes. Anything above one day is rejected.
pub fn parse_duration_secs(input: &str) -> AppResult<i64> {
    let s = input.trim().to_ascii_lowercase();
    let invalid = || AppError::InvalidInput(format!("invalid duration '{input}'"));

    if s.is_empty() {
        return Err(invalid());
    }

    if let Ok(mins) = s.parse::<i64>() {
        return match mins.checked_mul(60) {
            Some(secs) if (0..=DAY_SECS).contains(&secs) => Ok(secs),
            _ => Err(invalid()),
        };
    }

    let mut total = 0i64;
    let mut num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            num.push(c);
            continue;
        }
        let n: i64 = num.parse().map_err(|_| invalid())?;
        num.clear();
        let unit = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(invalid()),
        };
        total = n
            .checked_mul(unit)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(invalid)?;
    }

    if !num.is_empty() || total > DAY_SECS {
        return Err(invalid());
    }

    Ok(total)
}
