// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::commands::streak::{next_streak, record_activity, try_award_badge};
use centavo::{db, utils};
use chrono::NaiveDate;
use rusqlite::{Connection, params};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute("INSERT INTO profiles(name) VALUES ('ana')", [])
        .unwrap();
    conn
}

fn set_streak(conn: &Connection, current: i64, longest: i64, last: Option<&str>) {
    conn.execute(
        "UPDATE profiles SET current_streak=?1, longest_streak=?2, last_activity_date=?3 WHERE name='ana'",
        params![current, longest, last],
    )
    .unwrap();
}

fn badge_count(conn: &Connection, badge: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM user_badges WHERE profile_id=1 AND badge_type=?1",
        params![badge],
        |r| r.get(0),
    )
    .unwrap()
}

#[test]
fn next_streak_state_machine() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let yesterday = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
    let last_week = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();

    assert_eq!(next_streak(Some(today), today, 4), None);
    assert_eq!(next_streak(Some(yesterday), today, 4), Some(5));
    assert_eq!(next_streak(Some(last_week), today, 4), Some(1));
    assert_eq!(next_streak(None, today, 0), Some(1));
}

#[test]
fn extends_from_yesterday_and_awards_streak_7() {
    let conn = setup();
    set_streak(&conn, 6, 6, Some("2025-03-09"));
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    let profile = utils::load_profile(&conn, "ana").unwrap();
    let update = record_activity(&conn, &profile, today).unwrap();

    assert!(update.counted);
    assert_eq!(update.current_streak, 7);
    assert_eq!(update.longest_streak, 7);
    assert_eq!(update.badges_awarded, vec!["streak_7"]);
    assert_eq!(badge_count(&conn, "streak_7"), 1);

    let stored = utils::load_profile(&conn, "ana").unwrap();
    assert_eq!(stored.current_streak, 7);
    assert_eq!(stored.last_activity_date, Some(today));
}

#[test]
fn repeat_activity_same_day_is_noop() {
    let conn = setup();
    set_streak(&conn, 7, 7, Some("2025-03-10"));
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    let profile = utils::load_profile(&conn, "ana").unwrap();
    let update = record_activity(&conn, &profile, today).unwrap();

    assert!(!update.counted);
    assert_eq!(update.current_streak, 7);
    assert!(update.badges_awarded.is_empty());
    assert_eq!(badge_count(&conn, "streak_7"), 0);

    let stored = utils::load_profile(&conn, "ana").unwrap();
    assert_eq!(stored.current_streak, 7);
}

#[test]
fn gap_resets_but_longest_survives() {
    let conn = setup();
    set_streak(&conn, 10, 10, Some("2025-03-01"));
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    let profile = utils::load_profile(&conn, "ana").unwrap();
    let update = record_activity(&conn, &profile, today).unwrap();

    assert_eq!(update.current_streak, 1);
    assert_eq!(update.longest_streak, 10);
    assert!(update.badges_awarded.is_empty());
}

#[test]
fn third_day_awards_streak_3_once() {
    let conn = setup();
    set_streak(&conn, 2, 2, Some("2025-03-09"));
    let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    let profile = utils::load_profile(&conn, "ana").unwrap();
    let update = record_activity(&conn, &profile, today).unwrap();
    assert_eq!(update.current_streak, 3);
    assert_eq!(update.badges_awarded, vec!["streak_3"]);

    // Hitting 3 again after a reset must not re-award
    set_streak(&conn, 2, 3, Some("2025-04-01"));
    let profile = utils::load_profile(&conn, "ana").unwrap();
    let update = record_activity(&conn, &profile, NaiveDate::from_ymd_opt(2025, 4, 2).unwrap())
        .unwrap();
    assert_eq!(update.current_streak, 3);
    assert!(update.badges_awarded.is_empty());
    assert_eq!(badge_count(&conn, "streak_3"), 1);
}

#[test]
fn badge_award_is_check_then_insert() {
    let conn = setup();
    assert!(try_award_badge(&conn, 1, "streak_30"));
    assert!(!try_award_badge(&conn, 1, "streak_30"));
    assert_eq!(badge_count(&conn, "streak_30"), 1);
}
