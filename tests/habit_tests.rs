mod common;
use common::{d, memory_pool, plain_habit, timed_habit, ts};
use rhabitlogger::core::habit::HabitLogic;
use rhabitlogger::core::streak::streak;
use rhabitlogger::core::timer::TimerLogic;
use rhabitlogger::db::queries::{find_habit, find_log, load_sessions_on};
use rhabitlogger::errors::AppError;
use rhabitlogger::models::habit::{HabitInput, HabitPatch};
use rhabitlogger::models::schedule::ScheduleDays;

#[test]
fn create_validates_input() {
    let mut pool = memory_pool();

    let err = HabitLogic::create(&mut pool, HabitInput::new("   ")).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let err = HabitLogic::create(&mut pool, HabitInput::new("Run").with_timer(Some(-1))).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let mut bad_days = HabitInput::new("Run");
    bad_days.schedule_days = vec![1, 7];
    assert!(matches!(
        HabitLogic::create(&mut pool, bad_days).unwrap_err(),
        AppError::InvalidInput(_)
    ));

    let mut ok = HabitInput::new("  Run  ").with_timer(Some(1800));
    ok.schedule_days = vec![4, 0, 2];
    let h = HabitLogic::create(&mut pool, ok).unwrap();
    assert_eq!(h.name, "Run");
    assert!(h.is_active && !h.is_archived);
    assert_eq!(h.schedule_days, ScheduleDays::Days(vec![0, 2, 4]));

    let stored = find_habit(&pool.conn, h.id).unwrap().unwrap();
    assert_eq!(stored.schedule_days.to_db().as_deref(), Some("[0,2,4]"));
    assert_eq!(stored.estimated_duration_seconds, Some(1800));
}

#[test]
fn list_filters_archived_deleted_and_future_habits() {
    let mut pool = memory_pool();
    let today = d("2025-10-14");

    let active = plain_habit(&mut pool, "Active");
    let archived = plain_habit(&mut pool, "Archived");
    let deleted = plain_habit(&mut pool, "Deleted");
    let mut future = HabitInput::new("Future");
    future.start_date = Some(d("2025-10-20"));
    let future = HabitLogic::create(&mut pool, future).unwrap();

    HabitLogic::archive(&mut pool, archived.id).unwrap();
    HabitLogic::delete(&mut pool, deleted.id).unwrap();

    let ids: Vec<i64> = HabitLogic::list(&mut pool, false, today)
        .unwrap()
        .iter()
        .map(|h| h.habit.id)
        .collect();
    assert_eq!(ids, vec![active.id]);

    let ids: Vec<i64> = HabitLogic::list(&mut pool, true, today)
        .unwrap()
        .iter()
        .map(|h| h.habit.id)
        .collect();
    assert_eq!(ids, vec![active.id, archived.id]);

    let later: Vec<i64> = HabitLogic::list(&mut pool, false, d("2025-10-20"))
        .unwrap()
        .iter()
        .map(|h| h.habit.id)
        .collect();
    assert!(later.contains(&future.id));

    HabitLogic::unarchive(&mut pool, archived.id).unwrap();
    assert_eq!(HabitLogic::list(&mut pool, false, today).unwrap().len(), 2);

    // soft-deleted habits keep their row
    assert!(!find_habit(&pool.conn, deleted.id).unwrap().unwrap().is_active);
}

#[test]
fn list_carries_todays_stats() {
    let mut pool = memory_pool();
    let h = timed_habit(&mut pool, "Read", Some(1200));
    let today = d("2025-10-14");

    TimerLogic::start(&mut pool, h.id, ts("2025-10-14T20:00:00")).unwrap();
    TimerLogic::stop(&mut pool, h.id, ts("2025-10-14T20:25:00")).unwrap();
    HabitLogic::set_day_completion(&mut pool, h.id, "2025-10-13", true, None).unwrap();
    HabitLogic::set_day_completion(&mut pool, h.id, "2025-10-14", true, None).unwrap();

    let listed = HabitLogic::list(&mut pool, false, today).unwrap();
    let row = &listed[0];
    assert!(row.completed_today);
    assert_eq!(row.time_spent_today, 1500);
    assert_eq!(row.streak, 2);
    assert!(row.is_scheduled_today);

    let shown = HabitLogic::get(&mut pool, h.id, today).unwrap();
    assert_eq!(shown.time_spent_today, 1500);

    assert!(matches!(
        HabitLogic::get(&mut pool, 77, today).unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[test]
fn unreadable_schedule_lists_as_every_day() {
    let mut pool = memory_pool();
    let h = plain_habit(&mut pool, "Legacy");
    pool.conn
        .execute(
            "UPDATE habits SET schedule_days = 'mon,wed' WHERE id = ?1",
            [h.id],
        )
        .unwrap();

    for day in ["2025-10-13", "2025-10-14", "2025-10-19"] {
        let listed = HabitLogic::list(&mut pool, false, d(day)).unwrap();
        assert!(listed[0].is_scheduled_today, "{day}");
    }
}

#[test]
fn update_applies_partial_patches() {
    let mut pool = memory_pool();
    let h = timed_habit(&mut pool, "Swim", Some(1800));

    let err = HabitLogic::update(&mut pool, h.id, HabitPatch::default()).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let updated = HabitLogic::update(
        &mut pool,
        h.id,
        HabitPatch {
            name: Some("Swim laps".into()),
            estimated_duration_seconds: Some(None),
            schedule_days: Some(vec![5, 6]),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(updated.name, "Swim laps");
    assert_eq!(updated.estimated_duration_seconds, None);
    assert!(updated.has_timer);

    let cleared = HabitLogic::update(
        &mut pool,
        h.id,
        HabitPatch {
            schedule_days: Some(vec![]),
            is_archived: Some(true),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(cleared.schedule_days, ScheduleDays::EveryDay);
    assert!(cleared.is_archived);

    let stored = find_habit(&pool.conn, h.id).unwrap().unwrap();
    assert_eq!(stored.schedule_days.to_db(), None);

    assert!(matches!(
        HabitLogic::update(
            &mut pool,
            404,
            HabitPatch {
                name: Some("x".into()),
                ..Default::default()
            }
        )
        .unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[test]
fn purge_removes_history() {
    let mut pool = memory_pool();
    let h = timed_habit(&mut pool, "Bike", None);
    let day = d("2025-10-14");

    TimerLogic::start(&mut pool, h.id, ts("2025-10-14T07:00:00")).unwrap();
    TimerLogic::stop(&mut pool, h.id, ts("2025-10-14T07:30:00")).unwrap();
    assert!(find_log(&pool.conn, h.id, &day).unwrap().is_some());

    HabitLogic::purge(&mut pool, h.id).unwrap();

    assert!(find_habit(&pool.conn, h.id).unwrap().is_none());
    assert!(find_log(&pool.conn, h.id, &day).unwrap().is_none());
    assert!(load_sessions_on(&pool.conn, h.id, &day).unwrap().is_empty());

    assert!(matches!(
        HabitLogic::purge(&mut pool, h.id).unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[test]
fn log_today_overwrites_both_fields() {
    let mut pool = memory_pool();
    let h = plain_habit(&mut pool, "Floss");
    let today = d("2025-10-14");

    let log = HabitLogic::log_today(&mut pool, h.id, true, 120, today).unwrap();
    assert!(log.completed);
    assert_eq!(log.time_spent_seconds, 120);

    let log = HabitLogic::log_today(&mut pool, h.id, false, 0, today).unwrap();
    assert!(!log.completed);
    assert_eq!(log.time_spent_seconds, 0);

    assert!(HabitLogic::log_today(&mut pool, h.id, true, -1, today).is_err());
    assert!(HabitLogic::log_today(&mut pool, 999, true, 0, today).is_err());
}

#[test]
fn logged_time_is_capped_at_one_day() {
    let mut pool = memory_pool();
    let h = plain_habit(&mut pool, "Floss");
    let today = d("2025-10-14");

    let full = HabitLogic::log_today(&mut pool, h.id, true, 86_400, today).unwrap();
    assert_eq!(full.time_spent_seconds, 86_400);

    for secs in [86_401, i64::MAX] {
        assert!(matches!(
            HabitLogic::log_today(&mut pool, h.id, true, secs, today).unwrap_err(),
            AppError::InvalidInput(_)
        ));
        assert!(matches!(
            HabitLogic::set_day_completion(&mut pool, h.id, "2025-10-13", false, Some(secs)).unwrap_err(),
            AppError::InvalidInput(_)
        ));
    }
    assert!(find_log(&pool.conn, h.id, &d("2025-10-13")).unwrap().is_none());
    assert_eq!(
        find_log(&pool.conn, h.id, &today).unwrap().unwrap().time_spent_seconds,
        86_400
    );
}

#[test]
fn streak_stops_at_first_gap() {
    let mut pool = memory_pool();
    let h = plain_habit(&mut pool, "Walk");

    for day in ["2025-10-14", "2025-10-13", "2025-10-12", "2025-10-10"] {
        HabitLogic::set_day_completion(&mut pool, h.id, day, true, None).unwrap();
    }
    HabitLogic::set_day_completion(&mut pool, h.id, "2025-10-11", false, None).unwrap();

    assert_eq!(streak(&pool.conn, h.id, d("2025-10-14")).unwrap(), 3);
    assert_eq!(streak(&pool.conn, h.id, d("2025-10-10")).unwrap(), 1);
    assert_eq!(streak(&pool.conn, h.id, d("2025-10-11")).unwrap(), 0);
    assert_eq!(streak(&pool.conn, h.id, d("2025-10-15")).unwrap(), 0);
}

#[test]
fn logs_and_stats_cover_the_window() {
    let mut pool = memory_pool();
    let h = plain_habit(&mut pool, "Water");
    let today = d("2025-10-14");

    for (day, done, secs) in [
        ("2025-10-14", true, 60),
        ("2025-10-12", true, 30),
        ("2025-10-08", false, 10),
        ("2025-10-01", true, 999),
    ] {
        HabitLogic::set_day_completion(&mut pool, h.id, day, done, Some(secs)).unwrap();
    }

    let logs = HabitLogic::logs(&mut pool, h.id, 10, today).unwrap();
    let dates: Vec<String> = logs.iter().map(|l| l.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-10-14", "2025-10-12", "2025-10-08"]);

    let stats = HabitLogic::stats(&mut pool, h.id, 10, today).unwrap();
    assert_eq!(stats.habit_name, "Water");
    assert_eq!(stats.period_days, 10);
    assert_eq!(stats.completed_days, 2);
    assert_eq!(stats.completion_rate, 20.0);
    assert_eq!(stats.total_time_seconds, 100);
    assert_eq!(stats.current_streak, 1);
    assert_eq!(stats.logs.len(), 3);

    let empty = HabitLogic::stats(&mut pool, h.id, 0, today).unwrap();
    assert_eq!(empty.completion_rate, 0.0);
}

#[test]
fn logs_and_stats_reject_out_of_range_windows() {
    let mut pool = memory_pool();
    let h = plain_habit(&mut pool, "Water");
    let today = d("2025-10-14");

    for days in [-1, 3651, i64::MAX, i64::MIN] {
        assert!(matches!(
            HabitLogic::logs(&mut pool, h.id, days, today).unwrap_err(),
            AppError::InvalidInput(_)
        ));
        assert!(matches!(
            HabitLogic::stats(&mut pool, h.id, days, today).unwrap_err(),
            AppError::InvalidInput(_)
        ));
    }

    assert_eq!(HabitLogic::stats(&mut pool, h.id, 3650, today).unwrap().period_days, 3650);
}

#[test]
fn habits_by_date_reports_defaults_and_schedule() {
    let mut pool = memory_pool();
    let mut weekdays = HabitInput::new("Commute walk");
    weekdays.schedule_days = vec![0, 1, 2, 3, 4];
    let weekdays = HabitLogic::create(&mut pool, weekdays).unwrap();
    let timed = timed_habit(&mut pool, "Study", Some(3600));
    let mut later = HabitInput::new("Later");
    later.start_date = Some(d("2025-11-01"));
    HabitLogic::create(&mut pool, later).unwrap();

    HabitLogic::set_day_completion(&mut pool, timed.id, "2025-10-18", true, Some(3600)).unwrap();

    // Saturday
    let rows = HabitLogic::habits_by_date(&mut pool, "2025-10-18").unwrap();
    assert_eq!(rows.len(), 2);

    let walk = rows.iter().find(|r| r.habit_id == weekdays.id).unwrap();
    assert!(!walk.is_scheduled);
    assert!(!walk.completed);
    assert_eq!(walk.time_spent_seconds, 0);
    assert!(!walk.has_timer);

    let study = rows.iter().find(|r| r.habit_id == timed.id).unwrap();
    assert!(study.is_scheduled);
    assert!(study.completed);
    assert_eq!(study.time_spent_seconds, 3600);
    assert_eq!(study.estimated_duration_seconds, Some(3600));

    assert!(matches!(
        HabitLogic::habits_by_date(&mut pool, "18-10-2025").unwrap_err(),
        AppError::InvalidDate(_)
    ));
}
