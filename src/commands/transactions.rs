// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::streak;
use crate::models::TxKind;
use crate::utils::{
    get_currency, id_for_category, maybe_print_json, month_bounds, parse_amount, parse_date,
    parse_month, pretty_table, require_profile,
};
use anyhow::{Result, anyhow};
use chrono::Local;
use rusqlite::{Connection, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let profile = require_profile(conn)?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let kind: TxKind = sub.get_one::<String>("type").unwrap().parse()?;
    let description = sub.get_one::<String>("description").unwrap();
    let notes = sub.get_one::<String>("notes");
    let category_id = sub
        .get_one::<String>("category")
        .map(|c| id_for_category(conn, profile.id, c))
        .transpose()?;

    conn.execute(
        "INSERT INTO transactions(profile_id, category_id, description, amount, kind, date, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            profile.id,
            category_id,
            description,
            amount.to_string(),
            kind.as_str(),
            date.to_string(),
            notes
        ],
    )?;
    let ccy = get_currency(conn)?;
    println!(
        "Recorded {} of {} {} on {} ('{}')",
        kind, ccy, amount, date, description
    );

    // Recording a transaction is the qualifying daily activity. A failure here
    // is reported to the caller but the inserted row above stays put.
    let update = streak::record_activity(conn, &profile, Local::now().date_naive())?;
    if update.counted {
        println!("Streak: {} day(s)", update.current_streak);
        for badge in update.badges_awarded {
            println!("Badge unlocked: {}", badge);
        }
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let profile = require_profile(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TxKind>())
        .transpose()?;
    let limit = sub.get_one::<usize>("limit").copied();

    let data = query_rows(conn, profile.id, month.as_deref(), kind, limit)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.notes.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Type", "Amount", "Category", "Notes"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub icon: String,
    pub color: String,
    pub notes: String,
}

/// Matching transactions ordered by date descending, category columns joined
/// in. An empty result is an empty vec, never an error.
pub fn query_rows(
    conn: &Connection,
    profile_id: i64,
    month: Option<&str>,
    kind: Option<TxKind>,
    limit: Option<usize>,
) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT t.id, t.date, t.description, t.kind, t.amount, c.name, c.icon, c.color, t.notes
         FROM transactions t
         LEFT JOIN categories c ON t.category_id=c.id
         WHERE t.profile_id=?",
    );
    let mut params_vec: Vec<String> = vec![profile_id.to_string()];

    if let Some(month) = month {
        let (start, end) = month_bounds(month)?;
        sql.push_str(" AND t.date>=? AND t.date<=?");
        params_vec.push(start.to_string());
        params_vec.push(end.to_string());
    }
    if let Some(kind) = kind {
        sql.push_str(" AND t.kind=?");
        params_vec.push(kind.as_str().to_string());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let description: String = r.get(2)?;
        let kind: String = r.get(3)?;
        let amount: String = r.get(4)?;
        let category: Option<String> = r.get(5)?;
        let icon: Option<String> = r.get(6)?;
        let color: Option<String> = r.get(7)?;
        let notes: Option<String> = r.get(8)?;
        data.push(TransactionRow {
            id,
            date,
            description,
            kind,
            amount,
            category: category.unwrap_or_default(),
            icon: icon.unwrap_or_default(),
            color: color.unwrap_or_default(),
            notes: notes.unwrap_or_default(),
        });
    }
    Ok(data)
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let profile = require_profile(conn)?;
    let id: i64 = sub.get_one::<String>("id").unwrap().trim().parse()?;

    let mut sets: Vec<String> = Vec::new();
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(d) = sub.get_one::<String>("date") {
        sets.push("date=?".into());
        params_vec.push(parse_date(d)?.to_string());
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        sets.push("amount=?".into());
        params_vec.push(parse_amount(a)?.to_string());
    }
    if let Some(t) = sub.get_one::<String>("type") {
        sets.push("kind=?".into());
        params_vec.push(t.parse::<TxKind>()?.as_str().to_string());
    }
    if let Some(d) = sub.get_one::<String>("description") {
        sets.push("description=?".into());
        params_vec.push(d.clone());
    }
    if let Some(c) = sub.get_one::<String>("category") {
        sets.push("category_id=?".into());
        params_vec.push(id_for_category(conn, profile.id, c)?.to_string());
    }
    if let Some(n) = sub.get_one::<String>("notes") {
        sets.push("notes=?".into());
        params_vec.push(n.clone());
    }
    if sets.is_empty() {
        return Err(anyhow!("Nothing to edit; pass at least one field flag"));
    }

    let sql = format!(
        "UPDATE transactions SET {} WHERE id=? AND profile_id=?",
        sets.join(", ")
    );
    params_vec.push(id.to_string());
    params_vec.push(profile.id.to_string());
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let n = conn.execute(&sql, rusqlite::params_from_iter(params))?;
    if n == 0 {
        return Err(anyhow!("Transaction {} not found", id));
    }
    println!("Updated transaction {}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let profile = require_profile(conn)?;
    let id: i64 = sub.get_one::<String>("id").unwrap().trim().parse()?;
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND profile_id=?2",
        params![id, profile.id],
    )?;
    if n == 0 {
        return Err(anyhow!("Transaction {} not found", id));
    }
    println!("Removed transaction {}", id);
    Ok(())
}
