// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::commands::transactions::query_rows;
use centavo::db;
use centavo::models::TxKind;
use rusqlite::{Connection, params};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute("INSERT INTO profiles(name) VALUES ('ana')", [])
        .unwrap();
    conn.execute(
        "INSERT INTO categories(profile_id, name, kind, icon, color)
         VALUES (1, 'Food', 'expense', 'utensils', '#f97316')",
        [],
    )
    .unwrap();
    for (date, amount, kind, cat) in [
        ("2025-03-01", "1500", "income", None::<i64>),
        ("2025-03-05", "80", "expense", Some(1)),
        ("2025-03-20", "40", "expense", Some(1)),
        ("2025-02-14", "25", "expense", None),
    ] {
        conn.execute(
            "INSERT INTO transactions(profile_id, category_id, description, amount, kind, date)
             VALUES (1, ?1, 'x', ?2, ?3, ?4)",
            params![cat, amount, kind, date],
        )
        .unwrap();
    }
    conn
}

#[test]
fn lists_newest_first_with_category_joined() {
    let conn = setup();
    let rows = query_rows(&conn, 1, None, None, None).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].date, "2025-03-20");
    assert_eq!(rows[0].category, "Food");
    assert_eq!(rows[0].icon, "utensils");
    assert_eq!(rows[0].color, "#f97316");
    assert_eq!(rows[3].date, "2025-02-14");
    assert_eq!(rows[3].category, "");
}

#[test]
fn month_and_type_filters_compose() {
    let conn = setup();
    let rows = query_rows(&conn, 1, Some("2025-03"), Some(TxKind::Expense), None).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.kind == "expense"));
    assert!(rows.iter().all(|r| r.date.starts_with("2025-03")));
}

#[test]
fn limit_respected() {
    let conn = setup();
    let rows = query_rows(&conn, 1, None, None, Some(2)).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-03-20");
}

#[test]
fn empty_filtered_window_is_empty_not_an_error() {
    let conn = setup();
    let rows = query_rows(&conn, 1, Some("2024-01"), None, None).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn other_profiles_rows_are_invisible() {
    let conn = setup();
    conn.execute("INSERT INTO profiles(name) VALUES ('bob')", [])
        .unwrap();
    conn.execute(
        "INSERT INTO transactions(profile_id, description, amount, kind, date)
         VALUES (2, 'secret', '7', 'expense', '2025-03-09')",
        [],
    )
    .unwrap();
    let rows = query_rows(&conn, 1, None, None, None).unwrap();
    assert!(rows.iter().all(|r| r.description != "secret"));
}
