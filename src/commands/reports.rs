// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxKind;
use crate::utils::{
    last_n_months, maybe_print_json, month_bounds, month_key, month_label, parse_month,
    pretty_table, prev_month, require_profile,
};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, params};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Fallbacks for transactions without a category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";
pub const UNCATEGORIZED_COLOR: &str = "#78716c";

pub const TREND_MONTHS: usize = 6;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("trend", sub)) => trend(conn, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct MonthSummary {
    pub month: String,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub transaction_count: usize,
    /// Whole-percent change vs the previous month; 0 when the previous month
    /// had no matching activity.
    pub income_change_pct: i64,
    pub expense_change_pct: i64,
}

#[derive(Debug, Serialize)]
pub struct TrendPoint {
    pub month: String,
    pub label: &'static str,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CategorySlice {
    pub name: String,
    pub color: String,
    pub amount: Decimal,
}

fn sums_for_month(
    conn: &Connection,
    profile_id: i64,
    month: &str,
) -> Result<(Decimal, Decimal, usize)> {
    let (start, end) = month_bounds(month)?;
    let mut stmt = conn.prepare(
        "SELECT amount, kind FROM transactions
         WHERE profile_id=?1 AND date>=?2 AND date<=?3",
    )?;
    let mut rows = stmt.query(params![profile_id, start.to_string(), end.to_string()])?;
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    let mut count = 0usize;
    while let Some(r) = rows.next()? {
        let amount_s: String = r.get(0)?;
        let kind_s: String = r.get(1)?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transactions", amount_s))?;
        match kind_s.parse::<TxKind>()? {
            TxKind::Income => income += amount,
            TxKind::Expense => expenses += amount,
        }
        count += 1;
    }
    Ok((income, expenses, count))
}

fn pct_change(current: Decimal, previous: Decimal) -> i64 {
    if previous <= Decimal::ZERO {
        return 0;
    }
    ((current - previous) / previous * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Summary-card numbers for one calendar month: totals, balance, count, and
/// whole-percent deltas against the month before.
pub fn month_summary(conn: &Connection, profile_id: i64, month: &str) -> Result<MonthSummary> {
    let (total_income, total_expenses, transaction_count) =
        sums_for_month(conn, profile_id, month)?;
    let prev = prev_month(month)?;
    let (prev_income, prev_expenses, _) = sums_for_month(conn, profile_id, &prev)?;
    Ok(MonthSummary {
        month: month.to_string(),
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        transaction_count,
        income_change_pct: pct_change(total_income, prev_income),
        expense_change_pct: pct_change(total_expenses, prev_expenses),
    })
}

/// Income/expense totals bucketed into the 6 calendar months ending with
/// `today`'s month. Every bucket is present and zero-filled, in chronological
/// order, regardless of whether the month saw any activity.
pub fn monthly_trend(
    conn: &Connection,
    profile_id: i64,
    today: NaiveDate,
) -> Result<Vec<TrendPoint>> {
    let months = last_n_months(today, TREND_MONTHS);
    // "YYYY-MM" keys sort chronologically, so a BTreeMap keeps bucket order.
    let mut buckets: BTreeMap<String, (Decimal, Decimal)> = months
        .iter()
        .map(|m| (m.clone(), (Decimal::ZERO, Decimal::ZERO)))
        .collect();

    let (window_start, _) = month_bounds(&months[0])?;
    let (_, window_end) = month_bounds(&month_key(today))?;
    let mut stmt = conn.prepare(
        "SELECT date, amount, kind FROM transactions
         WHERE profile_id=?1 AND date>=?2 AND date<=?3",
    )?;
    let mut rows = stmt.query(params![
        profile_id,
        window_start.to_string(),
        window_end.to_string()
    ])?;
    while let Some(r) = rows.next()? {
        let date: String = r.get(0)?;
        let amount_s: String = r.get(1)?;
        let kind_s: String = r.get(2)?;
        let key = date.get(..7).unwrap_or_default();
        let Some(entry) = buckets.get_mut(key) else {
            continue;
        };
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' on {}", amount_s, date))?;
        match kind_s.parse::<TxKind>()? {
            TxKind::Income => entry.0 += amount,
            TxKind::Expense => entry.1 += amount,
        }
    }

    Ok(buckets
        .into_iter()
        .map(|(month, (income, expense))| TrendPoint {
            label: month_label(&month),
            month,
            income,
            expense,
        })
        .collect())
}

/// Expense totals per category for one month, largest first. Transactions
/// without a category fall under a fixed label and color.
pub fn category_breakdown(
    conn: &Connection,
    profile_id: i64,
    month: &str,
) -> Result<Vec<CategorySlice>> {
    let (start, end) = month_bounds(month)?;
    let mut stmt = conn.prepare(
        "SELECT t.amount, c.name, c.color FROM transactions t
         LEFT JOIN categories c ON t.category_id=c.id
         WHERE t.profile_id=?1 AND t.kind='expense' AND t.date>=?2 AND t.date<=?3",
    )?;
    let mut rows = stmt.query(params![profile_id, start.to_string(), end.to_string()])?;
    let mut agg: HashMap<String, (Decimal, String)> = HashMap::new();
    while let Some(r) = rows.next()? {
        let amount_s: String = r.get(0)?;
        let name: Option<String> = r.get(1)?;
        let color: Option<String> = r.get(2)?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transactions", amount_s))?;
        let name = name.unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string());
        let color = color.unwrap_or_else(|| UNCATEGORIZED_COLOR.to_string());
        let entry = agg.entry(name).or_insert((Decimal::ZERO, color));
        entry.0 += amount;
    }
    let mut slices: Vec<CategorySlice> = agg
        .into_iter()
        .map(|(name, (amount, color))| CategorySlice { name, color, amount })
        .collect();
    slices.sort_by(|a, b| b.amount.cmp(&a.amount));
    Ok(slices)
}

fn month_arg(sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("month") {
        Some(m) => parse_month(m),
        None => Ok(month_key(Local::now().date_naive())),
    }
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let profile = require_profile(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_arg(sub)?;
    let s = month_summary(conn, profile.id, &month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        println!(
            "{}",
            pretty_table(
                &[
                    "Month",
                    "Income",
                    "Expenses",
                    "Balance",
                    "Count",
                    "Income Δ",
                    "Expense Δ",
                ],
                vec![vec![
                    s.month,
                    format!("{:.2}", s.total_income),
                    format!("{:.2}", s.total_expenses),
                    format!("{:.2}", s.balance),
                    s.transaction_count.to_string(),
                    format!("{}%", s.income_change_pct),
                    format!("{}%", s.expense_change_pct),
                ]],
            )
        );
    }
    Ok(())
}

fn trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let profile = require_profile(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let points = monthly_trend(conn, profile.id, Local::now().date_naive())?;
    if !maybe_print_json(json_flag, jsonl_flag, &points)? {
        let rows = points
            .iter()
            .map(|p| {
                vec![
                    p.month.clone(),
                    p.label.to_string(),
                    format!("{:.2}", p.income),
                    format!("{:.2}", p.expense),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Label", "Income", "Expense"], rows)
        );
    }
    Ok(())
}

fn breakdown(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let profile = require_profile(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = month_arg(sub)?;
    let slices = category_breakdown(conn, profile.id, &month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &slices)? {
        let rows = slices
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    s.color.clone(),
                    format!("{:.2}", s.amount),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Color", "Spent"], rows));
    }
    Ok(())
}
