// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AssetKind, LiabilityKind};
use crate::utils::{
    get_currency, maybe_print_json, parse_decimal, pretty_table, require_profile,
};
use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NetWorthTotals {
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub net_worth: Decimal,
}

/// Recomputed from the full asset/liability lists on every call; nothing
/// authoritative is stored outside the snapshot history.
pub fn totals(conn: &Connection, profile_id: i64) -> Result<NetWorthTotals> {
    let total_assets = sum_values(conn, profile_id, "assets")?;
    let total_liabilities = sum_values(conn, profile_id, "liabilities")?;
    Ok(NetWorthTotals {
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
    })
}

fn sum_values(conn: &Connection, profile_id: i64, table: &str) -> Result<Decimal> {
    let mut stmt = conn.prepare(&format!(
        "SELECT value FROM {} WHERE profile_id=?1",
        table
    ))?;
    let mut rows = stmt.query(params![profile_id])?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let v: String = r.get(0)?;
        total += v
            .parse::<Decimal>()
            .with_context(|| format!("Invalid value '{}' in {}", v, table))?;
    }
    Ok(total)
}

/// Append one dated snapshot row. Always an insert, never an upsert, so
/// several mutations on the same day leave several same-day points.
pub fn record_snapshot(conn: &Connection, profile_id: i64, today: NaiveDate) -> Result<()> {
    let t = totals(conn, profile_id)?;
    conn.execute(
        "INSERT INTO net_worth_history(profile_id, total_assets, total_liabilities, net_worth, snapshot_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            profile_id,
            t.total_assets.to_string(),
            t.total_liabilities.to_string(),
            t.net_worth.to_string(),
            today.to_string()
        ],
    )?;
    Ok(())
}

// Snapshotting after a mutation is fire-and-forget: a failed insert must not
// turn a successful asset/liability write into a user-visible error.
fn snapshot_best_effort(conn: &Connection, profile_id: i64) {
    let _ = record_snapshot(conn, profile_id, Local::now().date_naive());
}

pub fn handle_asset(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let profile = require_profile(conn)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind: AssetKind = sub.get_one::<String>("type").unwrap().parse()?;
            let value = parse_decimal(sub.get_one::<String>("value").unwrap())?;
            conn.execute(
                "INSERT INTO assets(profile_id, name, kind, value) VALUES (?1, ?2, ?3, ?4)",
                params![profile.id, name, kind.as_str(), value.to_string()],
            )?;
            snapshot_best_effort(conn, profile.id);
            println!("Added asset '{}' ({}, {})", name, kind, value);
        }
        Some(("list", _)) => {
            list_holdings(conn, profile.id, "assets", &["Name", "Type", "Value"])?;
        }
        Some(("edit", sub)) => {
            edit_holding(conn, profile.id, "assets", "asset", sub, parse_asset_kind)?;
            snapshot_best_effort(conn, profile.id);
        }
        Some(("rm", sub)) => {
            rm_holding(conn, profile.id, "assets", "asset", sub)?;
            snapshot_best_effort(conn, profile.id);
        }
        _ => {}
    }
    Ok(())
}

pub fn handle_liability(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let profile = require_profile(conn)?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind: LiabilityKind = sub.get_one::<String>("type").unwrap().parse()?;
            let value = parse_decimal(sub.get_one::<String>("value").unwrap())?;
            conn.execute(
                "INSERT INTO liabilities(profile_id, name, kind, value) VALUES (?1, ?2, ?3, ?4)",
                params![profile.id, name, kind.as_str(), value.to_string()],
            )?;
            snapshot_best_effort(conn, profile.id);
            println!("Added liability '{}' ({}, {})", name, kind, value);
        }
        Some(("list", _)) => {
            list_holdings(conn, profile.id, "liabilities", &["Name", "Type", "Value"])?;
        }
        Some(("edit", sub)) => {
            edit_holding(conn, profile.id, "liabilities", "liability", sub, parse_liability_kind)?;
            snapshot_best_effort(conn, profile.id);
        }
        Some(("rm", sub)) => {
            rm_holding(conn, profile.id, "liabilities", "liability", sub)?;
            snapshot_best_effort(conn, profile.id);
        }
        _ => {}
    }
    Ok(())
}

fn list_holdings(
    conn: &Connection,
    profile_id: i64,
    table: &str,
    headers: &[&str],
) -> Result<()> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, name, kind, value FROM {} WHERE profile_id=?1 ORDER BY name",
        table
    ))?;
    let rows = stmt.query_map(params![profile_id], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, name, kind, value) = row?;
        data.push(vec![id.to_string(), name, kind, value]);
    }
    let mut cols = vec!["ID"];
    cols.extend_from_slice(headers);
    println!("{}", pretty_table(&cols, data));
    Ok(())
}

fn parse_asset_kind(s: &str) -> Result<&'static str> {
    Ok(s.parse::<AssetKind>()?.as_str())
}

fn parse_liability_kind(s: &str) -> Result<&'static str> {
    Ok(s.parse::<LiabilityKind>()?.as_str())
}

fn edit_holding(
    conn: &Connection,
    profile_id: i64,
    table: &str,
    noun: &str,
    sub: &clap::ArgMatches,
    parse_kind: fn(&str) -> Result<&'static str>,
) -> Result<()> {
    let id: i64 = sub.get_one::<String>("id").unwrap().trim().parse()?;
    let mut sets: Vec<String> = Vec::new();
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(n) = sub.get_one::<String>("name") {
        sets.push("name=?".into());
        params_vec.push(n.clone());
    }
    if let Some(t) = sub.get_one::<String>("type") {
        sets.push("kind=?".into());
        params_vec.push(parse_kind(t)?.to_string());
    }
    if let Some(v) = sub.get_one::<String>("value") {
        sets.push("value=?".into());
        params_vec.push(parse_decimal(v)?.to_string());
    }
    if sets.is_empty() {
        return Err(anyhow!("Nothing to edit; pass at least one field flag"));
    }
    sets.push("updated_at=datetime('now')".into());

    let sql = format!(
        "UPDATE {} SET {} WHERE id=? AND profile_id=?",
        table,
        sets.join(", ")
    );
    params_vec.push(id.to_string());
    params_vec.push(profile_id.to_string());
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let n = conn.execute(&sql, rusqlite::params_from_iter(params))?;
    if n == 0 {
        return Err(anyhow!("{} {} not found", noun, id));
    }
    println!("Updated {} {}", noun, id);
    Ok(())
}

fn rm_holding(
    conn: &Connection,
    profile_id: i64,
    table: &str,
    noun: &str,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let id: i64 = sub.get_one::<String>("id").unwrap().trim().parse()?;
    let n = conn.execute(
        &format!("DELETE FROM {} WHERE id=?1 AND profile_id=?2", table),
        params![id, profile_id],
    )?;
    if n == 0 {
        return Err(anyhow!("{} {} not found", noun, id));
    }
    println!("Removed {} {}", noun, id);
    Ok(())
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let profile = require_profile(conn)?;
    match m.subcommand() {
        Some(("summary", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let t = totals(conn, profile.id)?;
            if !maybe_print_json(json_flag, jsonl_flag, &t)? {
                let ccy = get_currency(conn)?;
                println!(
                    "{}",
                    pretty_table(
                        &["Total assets", "Total liabilities", "Net worth"],
                        vec![vec![
                            crate::utils::fmt_money(&t.total_assets, &ccy),
                            crate::utils::fmt_money(&t.total_liabilities, &ccy),
                            crate::utils::fmt_money(&t.net_worth, &ccy),
                        ]],
                    )
                );
            }
        }
        Some(("history", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let snapshots = history(conn, profile.id)?;
            if !maybe_print_json(json_flag, jsonl_flag, &snapshots)? {
                let rows = snapshots
                    .iter()
                    .map(|s| {
                        vec![
                            s.snapshot_date.to_string(),
                            format!("{:.2}", s.total_assets),
                            format!("{:.2}", s.total_liabilities),
                            format!("{:.2}", s.net_worth),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Date", "Assets", "Liabilities", "Net worth"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn history(
    conn: &Connection,
    profile_id: i64,
) -> Result<Vec<crate::models::NetWorthSnapshot>> {
    let mut stmt = conn.prepare(
        "SELECT id, total_assets, total_liabilities, net_worth, snapshot_date
         FROM net_worth_history WHERE profile_id=?1
         ORDER BY snapshot_date, id",
    )?;
    let mut rows = stmt.query(params![profile_id])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let assets_s: String = r.get(1)?;
        let liabilities_s: String = r.get(2)?;
        let net_s: String = r.get(3)?;
        let date_s: String = r.get(4)?;
        data.push(crate::models::NetWorthSnapshot {
            id,
            total_assets: assets_s
                .parse()
                .with_context(|| format!("Invalid total_assets '{}'", assets_s))?,
            total_liabilities: liabilities_s
                .parse()
                .with_context(|| format!("Invalid total_liabilities '{}'", liabilities_s))?,
            net_worth: net_s
                .parse()
                .with_context(|| format!("Invalid net_worth '{}'", net_s))?,
            snapshot_date: crate::utils::parse_date(&date_s)?,
        });
    }
    Ok(data)
}
