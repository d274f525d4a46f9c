//! Formatting helpers shared by CLI output and exports.

use crate::utils::colors::{GREEN, GREY, RED, RESET, YELLOW};
use crate::utils::time::secs2readable;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / whole` as a percentage with one decimal, 0 when `whole` is 0.
pub fn percentage(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    round1(part as f64 / whole as f64 * 100.0)
}

pub fn check_mark(done: bool) -> String {
    if done {
        format!("{GREEN}✔{RESET}")
    } else {
        format!("{GREY}·{RESET}")
    }
}

/// Duration cell: grey dashes for zero.
pub fn duration_cell(secs: i64) -> String {
    if secs == 0 {
        format!("{GREY}--{RESET}")
    } else {
        secs2readable(secs)
    }
}

/// Carryover in green (`+`) or deficit in red (`-`); grey dashes when neither.
pub fn balance_cell(carryover: i64, deficit: i64) -> String {
    if carryover > 0 {
        format!("{GREEN}+{}{RESET}", secs2readable(carryover))
    } else if deficit > 0 {
        format!("{RED}-{}{RESET}", secs2readable(deficit))
    } else {
        format!("{GREY}--{RESET}")
    }
}

pub fn estimate_cell(estimate: Option<i64>) -> String {
    match estimate {
        Some(s) if s > 0 => secs2readable(s),
        _ => format!("{GREY}--{RESET}"),
    }
}

pub fn percent_cell(p: f64) -> String {
    let color = if p >= 100.0 {
        GREEN
    } else if p >= 50.0 {
        YELLOW
    } else {
        RED
    };
    format!("{color}{p:.1}%{RESET}")
}

/// Cut `s` to `max` characters, ending with `…` when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
