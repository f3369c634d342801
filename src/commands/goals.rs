// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{
    maybe_print_json, parse_amount, parse_date, parse_decimal, pretty_table, require_profile,
};
use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

/// Display progress toward a goal, clamped at 100% once the target is met.
/// The stored `current_amount` keeps counting past the target.
pub fn progress_pct(current: Decimal, target: Decimal) -> Decimal {
    if target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (current / target * Decimal::from(100)).min(Decimal::from(100))
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("contribute", sub)) => contribute(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let profile = require_profile(conn)?;
    let title = sub.get_one::<String>("title").unwrap();
    let target = parse_amount(sub.get_one::<String>("target").unwrap())?;
    let description = sub.get_one::<String>("description");
    let deadline = sub
        .get_one::<String>("deadline")
        .map(|d| parse_date(d))
        .transpose()?;
    let icon = sub.get_one::<String>("icon");
    let color = sub.get_one::<String>("color");
    conn.execute(
        "INSERT INTO goals(profile_id, title, description, target_amount, deadline, icon, color)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            profile.id,
            title,
            description,
            target.to_string(),
            deadline.map(|d| d.to_string()),
            icon,
            color
        ],
    )?;
    println!("Added goal '{}' (target {})", title, target);
    Ok(())
}

#[derive(Serialize)]
pub struct GoalRow {
    pub id: i64,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub progress_pct: Decimal,
    pub deadline: String,
}

pub fn query_rows(conn: &Connection, profile_id: i64) -> Result<Vec<GoalRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, target_amount, current_amount, COALESCE(deadline,'')
         FROM goals WHERE profile_id=?1 ORDER BY created_at DESC, id DESC",
    )?;
    let mut rows = stmt.query(params![profile_id])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let title: String = r.get(1)?;
        let target_s: String = r.get(2)?;
        let current_s: String = r.get(3)?;
        let deadline: String = r.get(4)?;
        let target_amount = target_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid target_amount '{}'", target_s))?;
        let current_amount = current_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid current_amount '{}'", current_s))?;
        data.push(GoalRow {
            id,
            title,
            progress_pct: progress_pct(current_amount, target_amount),
            target_amount,
            current_amount,
            deadline,
        });
    }
    Ok(data)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let profile = require_profile(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, profile.id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|g| {
                vec![
                    g.id.to_string(),
                    g.title.clone(),
                    format!("{:.2}", g.current_amount),
                    format!("{:.2}", g.target_amount),
                    format!("{:.0}%", g.progress_pct),
                    g.deadline.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Title", "Saved", "Target", "Progress", "Deadline"],
                rows
            )
        );
    }
    Ok(())
}

fn contribute(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let profile = require_profile(conn)?;
    let id: i64 = sub.get_one::<String>("id").unwrap().trim().parse()?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;

    let current_s: String = conn
        .query_row(
            "SELECT current_amount FROM goals WHERE id=?1 AND profile_id=?2",
            params![id, profile.id],
            |r| r.get(0),
        )
        .with_context(|| format!("Goal {} not found", id))?;
    let current = current_s
        .parse::<Decimal>()
        .with_context(|| format!("Invalid current_amount '{}'", current_s))?;
    let target_s: String = conn.query_row(
        "SELECT target_amount FROM goals WHERE id=?1",
        params![id],
        |r| r.get(0),
    )?;
    let target = target_s
        .parse::<Decimal>()
        .with_context(|| format!("Invalid target_amount '{}'", target_s))?;

    let new_amount = current + amount;
    conn.execute(
        "UPDATE goals SET current_amount=?1, updated_at=datetime('now')
         WHERE id=?2 AND profile_id=?3",
        params![new_amount.to_string(), id, profile.id],
    )?;
    println!(
        "Goal {}: saved {} of {} ({:.0}%)",
        id,
        new_amount,
        target,
        progress_pct(new_amount, target)
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let profile = require_profile(conn)?;
    let id: i64 = sub.get_one::<String>("id").unwrap().trim().parse()?;

    let mut sets: Vec<String> = Vec::new();
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(t) = sub.get_one::<String>("title") {
        sets.push("title=?".into());
        params_vec.push(t.clone());
    }
    if let Some(d) = sub.get_one::<String>("description") {
        sets.push("description=?".into());
        params_vec.push(d.clone());
    }
    if let Some(t) = sub.get_one::<String>("target") {
        sets.push("target_amount=?".into());
        params_vec.push(parse_amount(t)?.to_string());
    }
    if let Some(a) = sub.get_one::<String>("saved") {
        sets.push("current_amount=?".into());
        params_vec.push(parse_decimal(a)?.to_string());
    }
    if let Some(d) = sub.get_one::<String>("deadline") {
        sets.push("deadline=?".into());
        params_vec.push(parse_date(d)?.to_string());
    }
    if sets.is_empty() {
        return Err(anyhow!("Nothing to edit; pass at least one field flag"));
    }
    sets.push("updated_at=datetime('now')".into());

    let sql = format!("UPDATE goals SET {} WHERE id=? AND profile_id=?", sets.join(", "));
    params_vec.push(id.to_string());
    params_vec.push(profile.id.to_string());
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let n = conn.execute(&sql, rusqlite::params_from_iter(params))?;
    if n == 0 {
        return Err(anyhow!("Goal {} not found", id));
    }
    println!("Updated goal {}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let profile = require_profile(conn)?;
    let id: i64 = sub.get_one::<String>("id").unwrap().trim().parse()?;
    let n = conn.execute(
        "DELETE FROM goals WHERE id=?1 AND profile_id=?2",
        params![id, profile.id],
    )?;
    if n == 0 {
        return Err(anyhow!("Goal {} not found", id));
    }
    println!("Removed goal {}", id);
    Ok(())
}
