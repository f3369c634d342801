// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{pretty_table, require_profile};
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) => {
            let profile = require_profile(conn)?;
            let mut stmt = conn.prepare(
                "SELECT badge_type, awarded_at FROM user_badges
                 WHERE profile_id=?1 ORDER BY awarded_at",
            )?;
            let rows = stmt.query_map(params![profile.id], |r| {
                Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (badge, awarded) = row?;
                data.push(vec![badge, awarded]);
            }
            if data.is_empty() {
                println!("No badges yet. Record a transaction to start a streak.");
            } else {
                println!("{}", pretty_table(&["Badge", "Awarded"], data));
            }
        }
        _ => {}
    }
    Ok(())
}
