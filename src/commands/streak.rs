// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Profile;
use crate::utils::{pretty_table, require_profile};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};

/// Streak milestones and the badge each one unlocks.
pub const STREAK_BADGES: [(i64, &str); 3] =
    [(3, "streak_3"), (7, "streak_7"), (30, "streak_30")];

#[derive(Debug, Clone)]
pub struct ActivityUpdate {
    /// False when today was already counted and nothing was written.
    pub counted: bool,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub badges_awarded: Vec<&'static str>,
}

/// The day-counter state machine: `None` means today is already counted,
/// otherwise the new streak value (extended from yesterday, or reset to 1).
pub fn next_streak(
    last_activity: Option<NaiveDate>,
    today: NaiveDate,
    current: i64,
) -> Option<i64> {
    if last_activity == Some(today) {
        return None;
    }
    let extends = match (last_activity, today.pred_opt()) {
        (Some(last), Some(yesterday)) => last == yesterday,
        _ => false,
    };
    Some(if extends { current + 1 } else { 1 })
}

/// Count one qualifying activity for `today`. At most one write per calendar
/// day; `longest_streak` is maxed at write time so it can never trail
/// `current_streak`. Milestone badges are awarded best-effort on the exact
/// day the milestone is reached.
pub fn record_activity(
    conn: &Connection,
    profile: &Profile,
    today: NaiveDate,
) -> Result<ActivityUpdate> {
    let Some(new_streak) = next_streak(profile.last_activity_date, today, profile.current_streak)
    else {
        return Ok(ActivityUpdate {
            counted: false,
            current_streak: profile.current_streak,
            longest_streak: profile.longest_streak,
            badges_awarded: Vec::new(),
        });
    };
    let longest = profile.longest_streak.max(new_streak);

    conn.execute(
        "UPDATE profiles
         SET current_streak=?1, longest_streak=?2, last_activity_date=?3,
             updated_at=datetime('now')
         WHERE id=?4",
        params![new_streak, longest, today.to_string(), profile.id],
    )?;

    let mut badges_awarded = Vec::new();
    for (milestone, badge) in STREAK_BADGES {
        if new_streak == milestone && try_award_badge(conn, profile.id, badge) {
            badges_awarded.push(badge);
        }
    }

    Ok(ActivityUpdate {
        counted: true,
        current_streak: new_streak,
        longest_streak: longest,
        badges_awarded,
    })
}

/// Check-then-insert badge award. Best effort: any failure (including a lost
/// race against another writer) leaves the caller's primary mutation intact,
/// so errors are swallowed rather than propagated.
pub fn try_award_badge(conn: &Connection, profile_id: i64, badge_type: &str) -> bool {
    let existing: rusqlite::Result<Option<i64>> = conn
        .query_row(
            "SELECT id FROM user_badges WHERE profile_id=?1 AND badge_type=?2",
            params![profile_id, badge_type],
            |r| r.get(0),
        )
        .optional();
    match existing {
        Ok(None) => conn
            .execute(
                "INSERT INTO user_badges(profile_id, badge_type) VALUES (?1, ?2)",
                params![profile_id, badge_type],
            )
            .is_ok(),
        _ => false,
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("status", _)) => {
            let p = require_profile(conn)?;
            let last = p
                .last_activity_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".into());
            println!(
                "{}",
                pretty_table(
                    &["Current streak", "Longest streak", "Last activity"],
                    vec![vec![
                        format!("{} day(s)", p.current_streak),
                        format!("{} day(s)", p.longest_streak),
                        last,
                    ]],
                )
            );
        }
        _ => {}
    }
    Ok(())
}
