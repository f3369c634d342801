// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxKind;
use crate::utils::{pretty_table, require_profile};
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let profile = require_profile(conn)?;
            let name = sub.get_one::<String>("name").unwrap();
            let kind: TxKind = sub.get_one::<String>("type").unwrap().parse()?;
            let icon = sub.get_one::<String>("icon");
            let color = sub.get_one::<String>("color");
            conn.execute(
                "INSERT INTO categories(profile_id, name, kind, icon, color)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![profile.id, name, kind.as_str(), icon, color],
            )?;
            println!("Added {} category '{}'", kind, name);
        }
        Some(("list", sub)) => {
            let profile = require_profile(conn)?;
            let kind = sub
                .get_one::<String>("type")
                .map(|s| s.parse::<TxKind>())
                .transpose()?;
            let mut sql = String::from(
                "SELECT name, kind, COALESCE(icon,''), COALESCE(color,'')
                 FROM categories WHERE profile_id=?1",
            );
            if kind.is_some() {
                sql.push_str(" AND kind=?2");
            }
            sql.push_str(" ORDER BY name");
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = match kind {
                Some(k) => stmt.query(params![profile.id, k.as_str()])?,
                None => stmt.query(params![profile.id])?,
            };
            let mut data = Vec::new();
            while let Some(r) = rows.next()? {
                data.push(vec![
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                ]);
            }
            println!(
                "{}",
                pretty_table(&["Name", "Type", "Icon", "Color"], data)
            );
        }
        Some(("rm", sub)) => {
            let profile = require_profile(conn)?;
            let name = sub.get_one::<String>("name").unwrap();
            let n = conn.execute(
                "DELETE FROM categories WHERE profile_id=?1 AND name=?2",
                params![profile.id, name],
            )?;
            if n == 0 {
                println!("Category '{}' not found", name);
            } else {
                println!("Removed category '{}'", name);
            }
        }
        _ => {}
    }
    Ok(())
}
