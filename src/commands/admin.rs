// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxKind;
use crate::utils::{maybe_print_json, pretty_table, require_profile};
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total_profiles: i64,
    /// Sum of every transaction amount across all profiles, both kinds.
    pub total_money_handled: Decimal,
    pub total_income: Decimal,
}

pub fn overview_stats(conn: &Connection) -> Result<AdminStats> {
    let total_profiles: i64 = conn.query_row("SELECT COUNT(*) FROM profiles", [], |r| r.get(0))?;
    let mut stmt = conn.prepare("SELECT amount, kind FROM transactions")?;
    let mut rows = stmt.query([])?;
    let mut total_money_handled = Decimal::ZERO;
    let mut total_income = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let amount_s: String = r.get(0)?;
        let kind_s: String = r.get(1)?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transactions", amount_s))?;
        total_money_handled += amount;
        if kind_s.parse::<TxKind>()? == TxKind::Income {
            total_income += amount;
        }
    }
    Ok(AdminStats {
        total_profiles,
        total_money_handled,
        total_income,
    })
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("overview", sub)) => {
            let profile = require_profile(conn)?;
            if !profile.is_admin() {
                return Err(anyhow!("'admin overview' requires an admin profile"));
            }
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let stats = overview_stats(conn)?;
            if maybe_print_json(json_flag, jsonl_flag, &stats)? {
                return Ok(());
            }
            println!(
                "{}",
                pretty_table(
                    &["Profiles", "Money handled", "Total income"],
                    vec![vec![
                        stats.total_profiles.to_string(),
                        format!("{:.2}", stats.total_money_handled),
                        format!("{:.2}", stats.total_income),
                    ]],
                )
            );

            let mut stmt = conn.prepare(
                "SELECT p.name, p.role, p.current_streak,
                        (SELECT COUNT(*) FROM transactions t WHERE t.profile_id=p.id),
                        p.created_at
                 FROM profiles p ORDER BY p.created_at DESC",
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
                let (name, role, streak, tx_count, created) = row?;
                data.push(vec![
                    name,
                    role,
                    streak.to_string(),
                    tx_count.to_string(),
                    created,
                ]);
            }
            println!(
                "{}",
                pretty_table(
                    &["Profile", "Role", "Streak", "Transactions", "Created"],
                    data
                )
            );
        }
        _ => {}
    }
    Ok(())
}
