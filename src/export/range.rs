use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

fn bad(msg: &str, input: &str) -> AppError {
    AppError::InvalidInput(format!("{msg} in range '{input}'"))
}

/// First and last day covered by a single `YYYY`, `YYYY-MM` or `YYYY-MM-DD` term.
fn term_bounds(term: &str, input: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match term.len() {
        4 => {
            let y: i32 = term.parse().map_err(|_| bad("invalid year", input))?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| bad("invalid year", input))?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| bad("invalid year", input))?;
            Ok((first, last))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{term}-01"), "%Y-%m-%d")
                .map_err(|_| bad("invalid month", input))?;
            let (ny, nm) = if first.month() == 12 {
                (first.year() + 1, 1)
            } else {
                (first.year(), first.month() + 1)
            };
            let last = NaiveDate::from_ymd_opt(ny, nm, 1)
                .and_then(|d| d.pred_opt())
                .ok_or_else(|| bad("invalid month", input))?;
            Ok((first, last))
        }
        10 => {
            let d = NaiveDate::parse_from_str(term, "%Y-%m-%d")
                .map_err(|_| bad("invalid date", input))?;
            Ok((d, d))
        }
        _ => Err(bad("unsupported format", input)),
    }
}

/// Parse an export `--range`.
///
/// Accepted: `all`, `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or `start:end` with both
/// sides in the same form. `all` yields `None` (no bounds).
pub fn parse_range(r: &str) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let r = r.trim();
    if r.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    let (start, end) = match r.split_once(':') {
        Some((s, e)) => {
            let (s, e) = (s.trim(), e.trim());
            if s.len() != e.len() {
                return Err(bad("start and end must have the same format", r));
            }
            (term_bounds(s, r)?.0, term_bounds(e, r)?.1)
        }
        None => term_bounds(r, r)?,
    };

    if start > end {
        return Err(bad("start after end", r));
    }
    Ok(Some((start, end)))
}
