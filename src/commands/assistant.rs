// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{goals, networth, reports};
use crate::models::Profile;
use crate::utils::{get_currency, month_key, pretty_table, require_profile};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, params};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Balance,
    Spending,
    Goals,
    NetWorth,
    Streak,
    Help,
}

// First matching rule wins; Help is the fallback.
static RULES: Lazy<Vec<(Regex, Intent)>> = Lazy::new(|| {
    let rule = |pat: &str, intent: Intent| (Regex::new(pat).expect("static rule pattern"), intent);
    vec![
        rule(r"(?i)\b(balance|left over|afford|how much do i have)\b", Intent::Balance),
        rule(r"(?i)\b(spend|spent|spending|expenses?|where.*money|biggest)\b", Intent::Spending),
        rule(r"(?i)\b(goals?|saving|save up|target)\b", Intent::Goals),
        rule(r"(?i)\b(net ?worth|assets?|liabilit|debt|owe)\b", Intent::NetWorth),
        rule(r"(?i)\b(streaks?|days in a row|consecutive)\b", Intent::Streak),
    ]
});

pub fn classify(message: &str) -> Intent {
    for (re, intent) in RULES.iter() {
        if re.is_match(message) {
            return *intent;
        }
    }
    Intent::Help
}

/// Compose a reply from the profile's own data. Pure lookup and formatting,
/// no persistence; callers log the exchange separately.
pub fn reply(
    conn: &Connection,
    profile: &Profile,
    message: &str,
    today: NaiveDate,
) -> Result<String> {
    let ccy = get_currency(conn)?;
    let month = month_key(today);
    Ok(match classify(message) {
        Intent::Balance => {
            let s = reports::month_summary(conn, profile.id, &month)?;
            format!(
                "This month you earned {} {:.2} and spent {} {:.2}, leaving a balance of {} {:.2} across {} transaction(s).",
                ccy, s.total_income, ccy, s.total_expenses, ccy, s.balance, s.transaction_count
            )
        }
        Intent::Spending => {
            let slices = reports::category_breakdown(conn, profile.id, &month)?;
            match slices.first() {
                Some(top) => format!(
                    "Your biggest expense category this month is '{}' at {} {:.2}, out of {} categor(ies) with spending.",
                    top.name,
                    ccy,
                    top.amount,
                    slices.len()
                ),
                None => "No expenses recorded this month yet.".to_string(),
            }
        }
        Intent::Goals => {
            let rows = goals::query_rows(conn, profile.id)?;
            if rows.is_empty() {
                "You have no savings goals yet. Try 'centavo goal add'.".to_string()
            } else {
                let lines: Vec<String> = rows
                    .iter()
                    .map(|g| {
                        format!(
                            "'{}': {} {:.2} of {} {:.2} ({:.0}%)",
                            g.title, ccy, g.current_amount, ccy, g.target_amount, g.progress_pct
                        )
                    })
                    .collect();
                format!("Your goals: {}", lines.join("; "))
            }
        }
        Intent::NetWorth => {
            let t = networth::totals(conn, profile.id)?;
            format!(
                "Your net worth is {} {:.2} ({} {:.2} in assets minus {} {:.2} in liabilities).",
                ccy, t.net_worth, ccy, t.total_assets, ccy, t.total_liabilities
            )
        }
        Intent::Streak => format!(
            "You are on a {}-day streak (longest: {} days). Record a transaction every day to keep it going.",
            profile.current_streak, profile.longest_streak
        ),
        Intent::Help => {
            "I can answer questions about your balance, spending by category, savings goals, net worth, or streak.".to_string()
        }
    })
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("send", sub)) => {
            let profile = require_profile(conn)?;
            let message = sub.get_one::<String>("message").unwrap();
            conn.execute(
                "INSERT INTO ai_messages(profile_id, role, content) VALUES (?1, 'user', ?2)",
                params![profile.id, message],
            )?;
            let answer = reply(conn, &profile, message, Local::now().date_naive())?;
            conn.execute(
                "INSERT INTO ai_messages(profile_id, role, content) VALUES (?1, 'assistant', ?2)",
                params![profile.id, answer],
            )?;
            println!("{}", answer);
        }
        Some(("history", _)) => {
            let profile = require_profile(conn)?;
            let mut stmt = conn.prepare(
                "SELECT role, content, created_at FROM ai_messages
                 WHERE profile_id=?1 ORDER BY id",
            )?;
            let rows = stmt.query_map(params![profile.id], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (role, content, created) = row?;
                data.push(vec![created, role, content]);
            }
            println!("{}", pretty_table(&["At", "Role", "Message"], data));
        }
        Some(("clear", _)) => {
            let profile = require_profile(conn)?;
            let n = conn.execute(
                "DELETE FROM ai_messages WHERE profile_id=?1",
                params![profile.id],
            )?;
            println!("Deleted {} message(s)", n);
        }
        _ => {}
    }
    Ok(())
}
