mod common;
use common::{d, memory_pool, plain_habit, setup_test_db, timed_habit, ts};
use rhabitlogger::core::timer::TimerLogic;
use rhabitlogger::db::initialize::open_db;
use rhabitlogger::db::queries::{
    count_running_sessions, find_log, load_sessions_on, upsert_log,
};
use rhabitlogger::errors::AppError;

#[test]
fn start_requires_existing_timed_habit() {
    let mut pool = memory_pool();
    let plain = plain_habit(&mut pool, "Stretch");

    let err = TimerLogic::start(&mut pool, 999, ts("2025-10-14T09:00:00")).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = TimerLogic::start(&mut pool, plain.id, ts("2025-10-14T09:00:00")).unwrap_err();
    assert!(matches!(err, AppError::TimerNotEnabled(id) if id == plain.id));

    assert_eq!(count_running_sessions(&pool.conn, plain.id).unwrap(), 0);
}

#[test]
fn restart_closes_the_running_session() {
    let mut pool = memory_pool();
    let h = timed_habit(&mut pool, "Reading", Some(1800));

    let first = TimerLogic::start(&mut pool, h.id, ts("2025-10-14T10:00:00")).unwrap();
    assert!(first.is_running);
    assert_eq!(first.duration_seconds, 0);

    let second = TimerLogic::start(&mut pool, h.id, ts("2025-10-14T10:30:00")).unwrap();
    assert!(second.is_running);
    assert_eq!(second.duration_seconds, 0);
    assert_ne!(first.id, second.id);

    let sessions = load_sessions_on(&pool.conn, h.id, &d("2025-10-14")).unwrap();
    assert_eq!(sessions.len(), 2);

    let closed = &sessions[0];
    assert_eq!(closed.id, first.id);
    assert!(!closed.is_running);
    assert_eq!(closed.end_time, Some(ts("2025-10-14T10:30:00")));
    assert_eq!(closed.duration_seconds, 1800);

    assert_eq!(count_running_sessions(&pool.conn, h.id).unwrap(), 1);

    // the implicitly closed session is not credited to the day
    assert!(find_log(&pool.conn, h.id, &d("2025-10-14")).unwrap().is_none());
}

#[test]
fn stop_accrues_into_the_day_log() {
    let mut pool = memory_pool();
    let h = timed_habit(&mut pool, "Guitar", None);
    let day = d("2025-10-14");

    assert!(matches!(
        TimerLogic::stop(&mut pool, h.id, ts("2025-10-14T09:00:00")).unwrap_err(),
        AppError::NoRunningTimer(_)
    ));

    TimerLogic::start(&mut pool, h.id, ts("2025-10-14T09:00:00")).unwrap();
    let s = TimerLogic::stop(&mut pool, h.id, ts("2025-10-14T09:20:00")).unwrap();
    assert_eq!(s.duration_seconds, 1200);
    assert!(!s.is_running);

    let log = find_log(&pool.conn, h.id, &day).unwrap().unwrap();
    assert_eq!(log.time_spent_seconds, 1200);
    assert!(!log.completed);

    TimerLogic::start(&mut pool, h.id, ts("2025-10-14T18:00:00")).unwrap();
    TimerLogic::stop(&mut pool, h.id, ts("2025-10-14T18:10:00")).unwrap();

    let log = find_log(&pool.conn, h.id, &day).unwrap().unwrap();
    assert_eq!(log.time_spent_seconds, 1800);
    assert_eq!(count_running_sessions(&pool.conn, h.id).unwrap(), 0);

    // nothing left to stop
    assert!(TimerLogic::stop(&mut pool, h.id, ts("2025-10-14T18:11:00")).is_err());
}

#[test]
fn stop_keeps_existing_completion() {
    let mut pool = memory_pool();
    let h = timed_habit(&mut pool, "Run", None);
    let day = d("2025-10-14");

    let mut log = rhabitlogger::models::habit_log::HabitLog::blank(h.id, day);
    log.completed = true;
    log.time_spent_seconds = 300;
    upsert_log(&pool.conn, &log).unwrap();

    TimerLogic::start(&mut pool, h.id, ts("2025-10-14T07:00:00")).unwrap();
    TimerLogic::stop(&mut pool, h.id, ts("2025-10-14T07:05:00")).unwrap();

    let log = find_log(&pool.conn, h.id, &day).unwrap().unwrap();
    assert!(log.completed);
    assert_eq!(log.time_spent_seconds, 600);
}

#[test]
fn clock_going_backwards_gives_zero_duration() {
    let mut pool = memory_pool();
    let h = timed_habit(&mut pool, "Meditate", None);

    TimerLogic::start(&mut pool, h.id, ts("2025-10-14T10:00:00")).unwrap();
    let s = TimerLogic::stop(&mut pool, h.id, ts("2025-10-14T09:59:00")).unwrap();
    assert_eq!(s.duration_seconds, 0);
}

#[test]
fn status_reports_live_elapsed_without_persisting_it() {
    let mut pool = memory_pool();
    let h = timed_habit(&mut pool, "Write", None);

    let idle = TimerLogic::status(&mut pool, h.id, ts("2025-10-14T08:00:00")).unwrap();
    assert!(!idle.is_running);
    assert!(idle.current_session.is_none());
    assert_eq!(idle.total_time_today, 0);

    TimerLogic::start(&mut pool, h.id, ts("2025-10-14T08:00:00")).unwrap();
    TimerLogic::stop(&mut pool, h.id, ts("2025-10-14T08:10:00")).unwrap();
    TimerLogic::start(&mut pool, h.id, ts("2025-10-14T10:00:00")).unwrap();

    let st = TimerLogic::status(&mut pool, h.id, ts("2025-10-14T10:05:00")).unwrap();
    assert!(st.is_running);
    assert_eq!(st.current_session.as_ref().unwrap().duration_seconds, 300);
    assert_eq!(st.total_time_today, 900);

    let total = TimerLogic::today_total(&mut pool, h.id, ts("2025-10-14T10:05:00")).unwrap();
    assert_eq!(total.total_seconds, 900);

    let stored = load_sessions_on(&pool.conn, h.id, &d("2025-10-14")).unwrap();
    assert_eq!(stored.last().unwrap().duration_seconds, 0);

    assert!(matches!(
        TimerLogic::status(&mut pool, 42, ts("2025-10-14T10:05:00")).unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[test]
fn reset_discards_today_but_keeps_balance() {
    let mut pool = memory_pool();
    let h = timed_habit(&mut pool, "Piano", Some(1800));
    let day = d("2025-10-14");

    let mut seeded = rhabitlogger::models::habit_log::HabitLog::blank(h.id, day);
    seeded.set_carryover(120);
    upsert_log(&pool.conn, &seeded).unwrap();

    TimerLogic::start(&mut pool, h.id, ts("2025-10-14T09:00:00")).unwrap();
    TimerLogic::stop(&mut pool, h.id, ts("2025-10-14T09:15:00")).unwrap();
    TimerLogic::start(&mut pool, h.id, ts("2025-10-14T11:00:00")).unwrap();

    TimerLogic::reset(&mut pool, h.id, ts("2025-10-14T11:30:00")).unwrap();

    let sessions = load_sessions_on(&pool.conn, h.id, &day).unwrap();
    assert_eq!(sessions.len(), 1);
    assert!(sessions[0].is_running);
    assert_eq!(sessions[0].start_time, ts("2025-10-14T11:30:00"));
    assert_eq!(sessions[0].duration_seconds, 0);

    let log = find_log(&pool.conn, h.id, &day).unwrap().unwrap();
    assert_eq!(log.time_spent_seconds, 0);
    assert_eq!(log.carryover_seconds, 120);

    let st = TimerLogic::status(&mut pool, h.id, ts("2025-10-14T11:31:00")).unwrap();
    assert_eq!(st.total_time_today, 60);
}

#[test]
fn reset_moves_an_overnight_session_to_today() {
    let mut pool = memory_pool();
    let h = timed_habit(&mut pool, "Piano", None);

    TimerLogic::start(&mut pool, h.id, ts("2025-10-13T23:00:00")).unwrap();
    TimerLogic::reset(&mut pool, h.id, ts("2025-10-14T07:00:00")).unwrap();

    assert!(load_sessions_on(&pool.conn, h.id, &d("2025-10-13")).unwrap().is_empty());
    let moved = load_sessions_on(&pool.conn, h.id, &d("2025-10-14")).unwrap();
    assert_eq!(moved.len(), 1);
    assert!(moved[0].is_running);
    assert_eq!(moved[0].start_time, ts("2025-10-14T07:00:00"));
}

#[test]
fn a_second_connection_sees_the_stopped_timer() {
    let db_path = setup_test_db("timer_two_connections");
    let mut a = open_db(&db_path).unwrap();
    let mut b = open_db(&db_path).unwrap();

    let h = timed_habit(&mut a, "Focus", None);
    TimerLogic::start(&mut a, h.id, ts("2025-10-14T09:00:00")).unwrap();

    TimerLogic::stop(&mut a, h.id, ts("2025-10-14T09:30:00")).unwrap();
    let err = TimerLogic::stop(&mut b, h.id, ts("2025-10-14T09:30:01")).unwrap_err();
    assert!(matches!(err, AppError::NoRunningTimer(_)));

    let log = find_log(&b.conn, h.id, &d("2025-10-14")).unwrap().unwrap();
    assert_eq!(log.time_spent_seconds, 1800);
}

#[test]
fn storage_rejects_a_second_running_session() {
    let pool = memory_pool();
    pool.conn
        .execute("INSERT INTO habits (name, has_timer, created_at) VALUES ('x', 1, 'now')", [])
        .unwrap();
    let id = pool.conn.last_insert_rowid();

    let insert = "INSERT INTO timer_sessions (habit_id, date, start_time, duration_seconds, is_running)
                  VALUES (?1, '2025-10-14', '2025-10-14T09:00:00', 0, 1)";
    pool.conn.execute(insert, [id]).unwrap();
    assert!(pool.conn.execute(insert, [id]).is_err());
}
