mod common;
use common::{d, memory_pool, plain_habit, timed_habit, ts};
use rhabitlogger::core::dashboard::DashboardLogic;
use rhabitlogger::core::habit::HabitLogic;
use rhabitlogger::core::note::NoteLogic;
use rhabitlogger::core::settings::{CARRYOVER_ENABLED, SettingsLogic};
use rhabitlogger::core::timer::TimerLogic;
use rhabitlogger::db::log::load_log;
use rhabitlogger::db::queries::set_setting;
use rhabitlogger::errors::AppError;

#[test]
fn notes_are_listed_newest_first() {
    let mut pool = memory_pool();

    let old = NoteLogic::create(&mut pool, "slept badly", d("2025-10-12")).unwrap();
    let first = NoteLogic::create(&mut pool, "  good run  ", d("2025-10-14")).unwrap();
    let second = NoteLogic::create(&mut pool, "read 40 pages", d("2025-10-14")).unwrap();
    assert_eq!(first.content, "good run");

    let ids: Vec<i64> = NoteLogic::list(&mut pool, None).unwrap().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![second.id, first.id, old.id]);

    let today: Vec<i64> = NoteLogic::today(&mut pool, d("2025-10-14"))
        .unwrap()
        .iter()
        .map(|n| n.id)
        .collect();
    assert_eq!(today, vec![second.id, first.id]);

    assert!(NoteLogic::list(&mut pool, Some(d("2025-10-13"))).unwrap().is_empty());
}

#[test]
fn notes_group_by_date_within_bounds() {
    let mut pool = memory_pool();
    for (content, day) in [
        ("a", "2025-10-10"),
        ("b", "2025-10-12"),
        ("c", "2025-10-12"),
        ("d", "2025-10-14"),
    ] {
        NoteLogic::create(&mut pool, content, d(day)).unwrap();
    }

    let groups = NoteLogic::by_date(&mut pool, None, None).unwrap();
    let shape: Vec<(String, usize)> = groups
        .iter()
        .map(|g| (g.date.to_string(), g.notes.len()))
        .collect();
    assert_eq!(
        shape,
        vec![
            ("2025-10-14".to_string(), 1),
            ("2025-10-12".to_string(), 2),
            ("2025-10-10".to_string(), 1),
        ]
    );

    let bounded = NoteLogic::by_date(&mut pool, Some(d("2025-10-11")), Some(d("2025-10-13"))).unwrap();
    assert_eq!(bounded.len(), 1);
    assert_eq!(bounded[0].date, d("2025-10-12"));
    assert_eq!(bounded[0].notes[0].content, "c");
}

#[test]
fn note_edit_and_delete() {
    let mut pool = memory_pool();
    let note = NoteLogic::create(&mut pool, "draft", d("2025-10-14")).unwrap();

    assert!(matches!(
        NoteLogic::create(&mut pool, "   ", d("2025-10-14")).unwrap_err(),
        AppError::InvalidInput(_)
    ));
    assert!(matches!(
        NoteLogic::update(&mut pool, note.id, None, None).unwrap_err(),
        AppError::InvalidInput(_)
    ));

    let edited = NoteLogic::update(&mut pool, note.id, Some("final"), Some(d("2025-10-13"))).unwrap();
    assert_eq!(edited.content, "final");
    assert_eq!(edited.date, d("2025-10-13"));
    assert_eq!(edited.created_at, note.created_at);

    let stored = NoteLogic::get(&mut pool, note.id).unwrap();
    assert_eq!(stored.content, "final");

    NoteLogic::delete(&mut pool, note.id).unwrap();
    assert!(matches!(
        NoteLogic::get(&mut pool, note.id).unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        NoteLogic::delete(&mut pool, note.id).unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        NoteLogic::update(&mut pool, note.id, Some("x"), None).unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[test]
fn dashboard_summarises_today() {
    let mut pool = memory_pool();
    let today = d("2025-10-14");

    let empty = DashboardLogic::stats(&mut pool, today).unwrap();
    assert_eq!(empty.total_habits, 0);
    assert_eq!(empty.completion_percentage, 0.0);
    assert_eq!(empty.current_streak, 0);

    let read = timed_habit(&mut pool, "Read", None);
    let walk = plain_habit(&mut pool, "Walk");

    TimerLogic::start(&mut pool, read.id, ts("2025-10-14T07:00:00")).unwrap();
    TimerLogic::stop(&mut pool, read.id, ts("2025-10-14T07:45:00")).unwrap();
    HabitLogic::set_day_completion(&mut pool, walk.id, "2025-10-14", true, None).unwrap();
    NoteLogic::create(&mut pool, "windy", today).unwrap();

    let stats = DashboardLogic::stats(&mut pool, today).unwrap();
    assert_eq!(stats.total_habits, 2);
    assert_eq!(stats.completed_today, 1);
    assert_eq!(stats.completion_percentage, 50.0);
    assert_eq!(stats.total_time_today, 2700);
    assert_eq!(stats.notes_today, 1);
    assert_eq!(stats.current_streak, 0);
}

#[test]
fn dashboard_streak_needs_every_habit_done() {
    let mut pool = memory_pool();
    let a = plain_habit(&mut pool, "A");
    let b = plain_habit(&mut pool, "B");

    for day in ["2025-10-12", "2025-10-13", "2025-10-14"] {
        HabitLogic::set_day_completion(&mut pool, a.id, day, true, None).unwrap();
    }
    for day in ["2025-10-13", "2025-10-14"] {
        HabitLogic::set_day_completion(&mut pool, b.id, day, true, None).unwrap();
    }

    let stats = DashboardLogic::stats(&mut pool, d("2025-10-14")).unwrap();
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.completion_percentage, 100.0);
}

#[test]
fn progress_runs_oldest_first() {
    let mut pool = memory_pool();
    let a = plain_habit(&mut pool, "A");
    plain_habit(&mut pool, "B");
    HabitLogic::set_day_completion(&mut pool, a.id, "2025-10-13", true, None).unwrap();

    let days = DashboardLogic::progress(&mut pool, 3, d("2025-10-14")).unwrap();
    let dates: Vec<String> = days.iter().map(|p| p.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-10-12", "2025-10-13", "2025-10-14"]);

    assert_eq!(days[1].completed, 1);
    assert_eq!(days[1].total, 2);
    assert_eq!(days[1].percentage, 50.0);
    assert_eq!(days[2].percentage, 0.0);

    assert!(DashboardLogic::progress(&mut pool, 0, d("2025-10-14")).unwrap().is_empty());
}

#[test]
fn progress_rejects_out_of_range_windows() {
    let mut pool = memory_pool();
    plain_habit(&mut pool, "A");

    for days in [-5, 3651, i64::MAX] {
        assert!(matches!(
            DashboardLogic::progress(&mut pool, days, d("2025-10-14")).unwrap_err(),
            AppError::InvalidInput(_)
        ));
    }
}

#[test]
fn settings_default_off_and_persist() {
    let mut pool = memory_pool();

    assert!(!SettingsLogic::settings(&pool.conn).unwrap().carryover_enabled);

    let unchanged = SettingsLogic::update(&mut pool, None).unwrap();
    assert!(!unchanged.carryover_enabled);

    let on = SettingsLogic::update(&mut pool, Some(true)).unwrap();
    assert!(on.carryover_enabled);
    assert!(SettingsLogic::carryover_enabled(&pool.conn).unwrap());

    set_setting(&pool.conn, CARRYOVER_ENABLED, "TRUE").unwrap();
    assert!(SettingsLogic::carryover_enabled(&pool.conn).unwrap());
    set_setting(&pool.conn, CARRYOVER_ENABLED, "maybe").unwrap();
    assert!(!SettingsLogic::carryover_enabled(&pool.conn).unwrap());

    let entries = load_log(&pool.conn).unwrap();
    assert!(entries.iter().any(|e| e.operation == "settings_update"));
}
