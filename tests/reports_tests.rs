// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::commands::reports::{
    UNCATEGORIZED_COLOR, UNCATEGORIZED_LABEL, category_breakdown, month_summary, monthly_trend,
};
use centavo::db;
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute("INSERT INTO profiles(name) VALUES ('ana')", [])
        .unwrap();
    conn
}

fn tx(conn: &Connection, date: &str, amount: &str, kind: &str, category_id: Option<i64>) {
    conn.execute(
        "INSERT INTO transactions(profile_id, category_id, description, amount, kind, date)
         VALUES (1, ?1, 'x', ?2, ?3, ?4)",
        params![category_id, amount, kind, date],
    )
    .unwrap();
}

#[test]
fn balance_is_income_minus_expenses() {
    let conn = setup();
    tx(&conn, "2025-03-01", "1500", "income", None);
    tx(&conn, "2025-03-05", "200.50", "expense", None);
    tx(&conn, "2025-03-20", "99.50", "expense", None);

    let s = month_summary(&conn, 1, "2025-03").unwrap();
    assert_eq!(s.total_income, Decimal::from(1500));
    assert_eq!(s.total_expenses, "300".parse::<Decimal>().unwrap());
    assert_eq!(s.balance, s.total_income - s.total_expenses);
    assert_eq!(s.transaction_count, 3);
}

#[test]
fn change_vs_previous_month() {
    let conn = setup();
    tx(&conn, "2025-02-10", "100", "income", None);
    tx(&conn, "2025-03-10", "150", "income", None);
    tx(&conn, "2025-03-11", "40", "expense", None);

    let s = month_summary(&conn, 1, "2025-03").unwrap();
    assert_eq!(s.income_change_pct, 50);
    // No expenses last month: delta pinned to 0, not infinity
    assert_eq!(s.expense_change_pct, 0);
}

#[test]
fn empty_window_is_all_zero_not_an_error() {
    let conn = setup();
    let s = month_summary(&conn, 1, "2025-03").unwrap();
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_expenses, Decimal::ZERO);
    assert_eq!(s.balance, Decimal::ZERO);
    assert_eq!(s.transaction_count, 0);
    assert_eq!(s.income_change_pct, 0);
}

#[test]
fn trend_has_six_chronological_zero_filled_buckets() {
    let conn = setup();
    tx(&conn, "2024-12-25", "80", "expense", None);
    tx(&conn, "2025-03-02", "500", "income", None);
    // Older than the window: must not leak in
    tx(&conn, "2024-09-30", "999", "income", None);

    let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
    let points = monthly_trend(&conn, 1, today).unwrap();

    let months: Vec<&str> = points.iter().map(|p| p.month.as_str()).collect();
    assert_eq!(
        months,
        ["2024-10", "2024-11", "2024-12", "2025-01", "2025-02", "2025-03"]
    );
    let labels: Vec<&str> = points.iter().map(|p| p.label).collect();
    assert_eq!(labels, ["Oct", "Nov", "Dec", "Jan", "Feb", "Mar"]);

    assert_eq!(points[0].income, Decimal::ZERO);
    assert_eq!(points[0].expense, Decimal::ZERO);
    assert_eq!(points[2].expense, Decimal::from(80));
    assert_eq!(points[5].income, Decimal::from(500));
}

#[test]
fn trend_is_six_buckets_even_with_no_data() {
    let conn = setup();
    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let points = monthly_trend(&conn, 1, today).unwrap();
    assert_eq!(points.len(), 6);
    assert!(points.iter().all(|p| p.income == Decimal::ZERO && p.expense == Decimal::ZERO));
    assert_eq!(points[0].month, "2024-08");
    assert_eq!(points[5].month, "2025-01");
}

#[test]
fn breakdown_sorts_descending_with_uncategorized_fallback() {
    let conn = setup();
    conn.execute(
        "INSERT INTO categories(profile_id, name, kind, color) VALUES (1, 'Food', 'expense', '#f97316')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO categories(profile_id, name, kind) VALUES (1, 'Rent', 'expense')",
        [],
    )
    .unwrap();
    tx(&conn, "2025-03-03", "120", "expense", Some(1));
    tx(&conn, "2025-03-04", "30", "expense", Some(1));
    tx(&conn, "2025-03-05", "900", "expense", Some(2));
    tx(&conn, "2025-03-06", "15", "expense", None);
    // Income never shows up in the expense breakdown
    tx(&conn, "2025-03-07", "5000", "income", None);

    let slices = category_breakdown(&conn, 1, "2025-03").unwrap();
    let names: Vec<&str> = slices.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Rent", "Food", UNCATEGORIZED_LABEL]);
    assert_eq!(slices[1].amount, Decimal::from(150));
    assert_eq!(slices[2].color, UNCATEGORIZED_COLOR);
    // A category without a color also gets the fallback
    assert_eq!(slices[0].color, UNCATEGORIZED_COLOR);
}
