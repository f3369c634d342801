// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{active_profile_name, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = findings(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn findings(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Active profile pointing at a deleted row
    if let Some(name) = active_profile_name(conn)? {
        let exists: Option<i64> = conn
            .query_row(
                "SELECT id FROM profiles WHERE name=?1",
                [&name],
                |r| r.get(0),
            )
            .optional()?;
        if exists.is_none() {
            rows.push(vec!["dangling_active_profile".into(), name]);
        }
    }

    // 2) Transaction kind disagreeing with its category's kind. Allowed by the
    //    schema, but the category filter in listings will never surface these.
    let mut stmt = conn.prepare(
        "SELECT t.id, t.kind, c.name, c.kind
         FROM transactions t JOIN categories c ON t.category_id=c.id
         WHERE t.kind != c.kind ORDER BY t.id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let t_kind: String = r.get(1)?;
        let c_name: String = r.get(2)?;
        let c_kind: String = r.get(3)?;
        rows.push(vec![
            "category_kind_mismatch".into(),
            format!("tx {} is {} but '{}' is {}", id, t_kind, c_name, c_kind),
        ]);
    }

    // 3) Same-day snapshot pile-ups from repeated asset/liability edits
    let mut stmt2 = conn.prepare(
        "SELECT p.name, h.snapshot_date, COUNT(*)
         FROM net_worth_history h JOIN profiles p ON h.profile_id=p.id
         GROUP BY h.profile_id, h.snapshot_date HAVING COUNT(*) > 1
         ORDER BY h.snapshot_date",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let name: String = r.get(0)?;
        let date: String = r.get(1)?;
        let n: i64 = r.get(2)?;
        rows.push(vec![
            "duplicate_snapshots".into(),
            format!("{} has {} snapshots on {}", name, n, date),
        ]);
    }

    // 4) Badge rows duplicated by the check-then-insert race
    let mut stmt3 = conn.prepare(
        "SELECT p.name, b.badge_type, COUNT(*)
         FROM user_badges b JOIN profiles p ON b.profile_id=p.id
         GROUP BY b.profile_id, b.badge_type HAVING COUNT(*) > 1",
    )?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let name: String = r.get(0)?;
        let badge: String = r.get(1)?;
        let n: i64 = r.get(2)?;
        rows.push(vec![
            "duplicate_badge".into(),
            format!("{} holds '{}' {} times", name, badge, n),
        ]);
    }

    Ok(rows)
}
