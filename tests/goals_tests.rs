// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::commands::goals::{progress_pct, query_rows};
use centavo::db;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn.execute("INSERT INTO profiles(name) VALUES ('ana')", [])
        .unwrap();
    conn
}

#[test]
fn progress_clamps_at_one_hundred() {
    let d = |s: &str| s.parse::<Decimal>().unwrap();
    assert_eq!(progress_pct(d("50"), d("200")), d("25"));
    assert_eq!(progress_pct(d("200"), d("200")), d("100"));
    // Saving past the target keeps the display pinned
    assert_eq!(progress_pct(d("350"), d("200")), d("100"));
    assert_eq!(progress_pct(d("10"), Decimal::ZERO), Decimal::ZERO);
}

#[test]
fn listed_goals_carry_clamped_progress() {
    let conn = setup();
    conn.execute(
        "INSERT INTO goals(profile_id, title, target_amount, current_amount, deadline)
         VALUES (1, 'Trip', '1000', '1250', '2025-12-31')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO goals(profile_id, title, target_amount, current_amount)
         VALUES (1, 'Emergency fund', '5000', '500')",
        [],
    )
    .unwrap();
    // Another profile's goal stays invisible
    conn.execute("INSERT INTO profiles(name) VALUES ('bob')", [])
        .unwrap();
    conn.execute(
        "INSERT INTO goals(profile_id, title, target_amount) VALUES (2, 'Boat', '99999')",
        [],
    )
    .unwrap();

    let rows = query_rows(&conn, 1).unwrap();
    assert_eq!(rows.len(), 2);
    let trip = rows.iter().find(|g| g.title == "Trip").unwrap();
    assert_eq!(trip.progress_pct, Decimal::from(100));
    assert_eq!(trip.current_amount, "1250".parse::<Decimal>().unwrap());
    assert_eq!(trip.deadline, "2025-12-31");
    let fund = rows.iter().find(|g| g.title == "Emergency fund").unwrap();
    assert_eq!(fund.progress_pct, Decimal::from(10));
    assert_eq!(fund.deadline, "");
}

#[test]
fn contribute_accumulates() {
    let conn = setup();
    centavo::utils::set_active_profile(&conn, "ana").unwrap();
    conn.execute(
        "INSERT INTO goals(profile_id, title, target_amount) VALUES (1, 'Trip', '100')",
        [],
    )
    .unwrap();

    let run = |args: &[&str]| {
        let matches = centavo::cli::build_cli().get_matches_from(args);
        let Some(("goal", sub)) = matches.subcommand() else {
            panic!("no goal subcommand");
        };
        centavo::commands::goals::handle(&conn, sub).unwrap();
    };
    run(&["centavo", "goal", "contribute", "1", "60"]);
    run(&["centavo", "goal", "contribute", "1", "60"]);

    let saved: String = conn
        .query_row("SELECT current_amount FROM goals WHERE id=1", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(saved.parse::<Decimal>().unwrap(), Decimal::from(120));

    let rows = query_rows(&conn, 1).unwrap();
    assert_eq!(rows[0].progress_pct, Decimal::from(100));
}
