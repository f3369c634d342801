// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{
    active_profile_name, clear_active_profile, load_profile, pretty_table, require_profile,
    set_active_profile,
};
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let role = if sub.get_flag("admin") { "admin" } else { "user" };
            conn.execute(
                "INSERT INTO profiles(name, role) VALUES (?1, ?2)",
                params![name, role],
            )?;
            println!("Added profile '{}' ({})", name, role);
            if active_profile_name(conn)?.is_none() {
                set_active_profile(conn, name)?;
                println!("Active profile set to '{}'", name);
            }
        }
        Some(("list", _)) => {
            let active = active_profile_name(conn)?.unwrap_or_default();
            let mut stmt = conn.prepare(
                "SELECT name, role, current_streak, longest_streak, created_at
                 FROM profiles ORDER BY name",
            )?;
            let rows = stmt.query_map([], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, i64>(2)?,
                    r.get::<_, i64>(3)?,
                    r.get::<_, String>(4)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (name, role, cur, longest, created) = row?;
                let marker = if name == active { "*" } else { "" };
                data.push(vec![
                    marker.to_string(),
                    name,
                    role,
                    cur.to_string(),
                    longest.to_string(),
                    created,
                ]);
            }
            println!(
                "{}",
                pretty_table(
                    &["", "Name", "Role", "Streak", "Longest", "Created"],
                    data
                )
            );
        }
        Some(("use", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            // Verify it exists before recording the session
            load_profile(conn, name)?;
            set_active_profile(conn, name)?;
            println!("Active profile set to '{}'", name);
        }
        Some(("show", _)) => {
            let p = require_profile(conn)?;
            let last = p
                .last_activity_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".into());
            println!(
                "{}",
                pretty_table(
                    &["Name", "Role", "Streak", "Longest", "Last activity"],
                    vec![vec![
                        p.name,
                        p.role,
                        p.current_streak.to_string(),
                        p.longest_streak.to_string(),
                        last,
                    ]],
                )
            );
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let n = conn.execute("DELETE FROM profiles WHERE name=?1", params![name])?;
            if n == 0 {
                println!("Profile '{}' not found", name);
            } else {
                if active_profile_name(conn)?.as_deref() == Some(name.as_str()) {
                    clear_active_profile(conn)?;
                }
                println!("Removed profile '{}'", name);
            }
        }
        _ => {}
    }
    Ok(())
}
