// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::commands::doctor::findings;
use centavo::{db, utils};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute("INSERT INTO profiles(name) VALUES ('ana')", [])
        .unwrap();
    conn
}

#[test]
fn clean_database_has_no_findings() {
    let conn = setup();
    assert!(findings(&conn).unwrap().is_empty());
}

#[test]
fn reports_category_kind_mismatch() {
    let conn = setup();
    conn.execute(
        "INSERT INTO categories(profile_id, name, kind) VALUES (1, 'Salary', 'income')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(profile_id, category_id, description, amount, kind, date)
         VALUES (1, 1, 'oops', '10', 'expense', '2025-03-01')",
        [],
    )
    .unwrap();

    let rows = findings(&conn).unwrap();
    assert!(rows.iter().any(|r| r[0] == "category_kind_mismatch"));
}

#[test]
fn reports_same_day_snapshot_duplicates() {
    let conn = setup();
    for _ in 0..2 {
        conn.execute(
            "INSERT INTO net_worth_history(profile_id, total_assets, total_liabilities, net_worth, snapshot_date)
             VALUES (1, '100', '0', '100', '2025-03-10')",
            [],
        )
        .unwrap();
    }
    let rows = findings(&conn).unwrap();
    assert!(rows.iter().any(|r| r[0] == "duplicate_snapshots"));
}

#[test]
fn reports_duplicate_badges_and_dangling_session() {
    let conn = setup();
    for _ in 0..2 {
        conn.execute(
            "INSERT INTO user_badges(profile_id, badge_type) VALUES (1, 'streak_3')",
            [],
        )
        .unwrap();
    }
    utils::set_active_profile(&conn, "ghost").unwrap();

    let rows = findings(&conn).unwrap();
    assert!(rows.iter().any(|r| r[0] == "duplicate_badge"));
    assert!(rows.iter().any(|r| r[0] == "dangling_active_profile"));
}
