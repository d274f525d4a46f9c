//! Schedule evaluation: is a habit due on a given calendar date.

use crate::models::habit::Habit;
use crate::models::schedule::ScheduleDays;
use crate::utils::date::weekday_index;
use chrono::NaiveDate;

/// True when the habit's recurrence rule includes `date`.
///
/// No schedule, an empty one, or unreadable stored data all mean every day.
pub fn is_due(habit: &Habit, date: NaiveDate) -> bool {
    is_scheduled_on(&habit.schedule_days, date)
}

pub fn is_scheduled_on(schedule: &ScheduleDays, date: NaiveDate) -> bool {
    match schedule {
        ScheduleDays::EveryDay | ScheduleDays::Malformed(_) => true,
        ScheduleDays::Days(days) => days.contains(&weekday_index(date)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn null_and_empty_schedules_are_every_day() {
        // 2025-10-13 is a Monday
        for offset in 0..7 {
            let day = d("2025-10-13") + chrono::Duration::days(offset);
            assert!(is_scheduled_on(&ScheduleDays::from_db(None), day));
            assert!(is_scheduled_on(&ScheduleDays::from_db(Some("[]")), day));
            assert!(is_scheduled_on(&ScheduleDays::from_db(Some("  ")), day));
        }
    }

    #[test]
    fn weekday_membership_uses_monday_zero() {
        let mon_wed = ScheduleDays::from_db(Some("[0, 2]"));
        assert!(is_scheduled_on(&mon_wed, d("2025-10-13"))); // Mon
        assert!(!is_scheduled_on(&mon_wed, d("2025-10-14"))); // Tue
        assert!(is_scheduled_on(&mon_wed, d("2025-10-15"))); // Wed
        assert!(!is_scheduled_on(&mon_wed, d("2025-10-19"))); // Sun

        let sunday = ScheduleDays::from_db(Some("[6]"));
        assert!(is_scheduled_on(&sunday, d("2025-10-19")));
    }

    #[test]
    fn malformed_schedule_fails_open() {
        for raw in ["not json", "{\"a\":1}", "[\"mon\"]", "[9]", "[1,"] {
            let schedule = ScheduleDays::from_db(Some(raw));
            assert!(matches!(schedule, ScheduleDays::Malformed(_)), "{raw}");
            for offset in 0..7 {
                let day = d("2025-10-13") + chrono::Duration::days(offset);
                assert!(is_scheduled_on(&schedule, day), "{raw} on {day}");
            }
        }
    }

    #[test]
    fn input_rejects_out_of_range_indices() {
        assert!(ScheduleDays::from_input(&[7]).is_err());
        assert_eq!(
            ScheduleDays::from_input(&[4, 0, 4]).unwrap(),
            ScheduleDays::Days(vec![0, 4])
        );
        assert_eq!(ScheduleDays::from_input(&[]).unwrap(), ScheduleDays::EveryDay);
    }
}
