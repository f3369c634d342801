// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Amounts are magnitudes; the income/expense split lives on the kind column.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d <= Decimal::ZERO {
        return Err(anyhow!("Amount must be positive, got '{}'", s));
    }
    Ok(d)
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {}", ccy, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Display currency setting
pub fn get_currency(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='currency'", [], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v.unwrap_or_else(|| "USD".to_string()))
}

pub fn set_currency(conn: &Connection, ccy: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('currency', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![ccy],
    )?;
    Ok(())
}

// Active profile: the session analog. Commands over user data refuse to run
// without one rather than guessing a default.
pub fn active_profile_name(conn: &Connection) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='active_profile'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_active_profile(conn: &Connection, name: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('active_profile', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![name],
    )?;
    Ok(())
}

pub fn clear_active_profile(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key='active_profile'", [])?;
    Ok(())
}

pub fn load_profile(conn: &Connection, name: &str) -> Result<crate::models::Profile> {
    let mut stmt = conn.prepare(
        "SELECT id, name, role, current_streak, longest_streak, last_activity_date
         FROM profiles WHERE name=?1",
    )?;
    let profile = stmt
        .query_row(params![name], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, i64>(3)?,
                r.get::<_, i64>(4)?,
                r.get::<_, Option<String>>(5)?,
            ))
        })
        .optional()?
        .with_context(|| format!("Profile '{}' not found", name))?;
    let (id, name, role, current_streak, longest_streak, last_raw) = profile;
    let last_activity_date = match last_raw {
        Some(s) => Some(parse_date(&s)?),
        None => None,
    };
    Ok(crate::models::Profile {
        id,
        name,
        role,
        current_streak,
        longest_streak,
        last_activity_date,
    })
}

pub fn require_profile(conn: &Connection) -> Result<crate::models::Profile> {
    let name = active_profile_name(conn)?
        .ok_or_else(|| anyhow!("No active profile. Run 'centavo profile use <name>' first"))?;
    load_profile(conn, &name)
}

pub fn id_for_category(conn: &Connection, profile_id: i64, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM categories WHERE profile_id=?1 AND name=?2")?;
    let id: i64 = stmt
        .query_row(params![profile_id, name], |r| r.get(0))
        .with_context(|| format!("Category '{}' not found", name))?;
    Ok(id)
}

// Calendar-month helpers. Months are keyed "YYYY-MM" everywhere; the lexical
// order of those keys is chronological, which the trend report relies on.
pub const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

pub fn month_label(key: &str) -> &'static str {
    key.get(5..7)
        .and_then(|mm| mm.parse::<usize>().ok())
        .filter(|m| (1..=12).contains(m))
        .map(|m| MONTH_ABBREV[m - 1])
        .unwrap_or("???")
}

pub fn month_bounds(month: &str) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", month))?;
    let next = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    let end = next
        .and_then(|d| d.pred_opt())
        .with_context(|| format!("Month arithmetic overflow for '{}'", month))?;
    Ok((start, end))
}

pub fn prev_month(month: &str) -> Result<String> {
    let (start, _) = month_bounds(month)?;
    let (y, m) = if start.month() == 1 {
        (start.year() - 1, 12)
    } else {
        (start.year(), start.month() - 1)
    };
    Ok(format!("{:04}-{:02}", y, m))
}

/// The `n` calendar months ending with `today`'s month, oldest first.
pub fn last_n_months(today: NaiveDate, n: usize) -> Vec<String> {
    let mut months = Vec::with_capacity(n);
    let (mut y, mut m) = (today.year(), today.month());
    for _ in 0..n {
        months.push(format!("{:04}-{:02}", y, m));
        if m == 1 {
            y -= 1;
            m = 12;
        } else {
            m -= 1;
        }
    }
    months.reverse();
    months
}
