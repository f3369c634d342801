// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid {what} '{got}', expected one of: {expected}")]
pub struct ParseKindError {
    pub what: &'static str,
    pub got: String,
    pub expected: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(ParseKindError {
                what: "transaction type",
                got: other.to_string(),
                expected: "income, expense",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Cash,
    Investment,
    Property,
    Vehicle,
    Other,
}

impl AssetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Cash => "cash",
            AssetKind::Investment => "investment",
            AssetKind::Property => "property",
            AssetKind::Vehicle => "vehicle",
            AssetKind::Other => "other",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(AssetKind::Cash),
            "investment" => Ok(AssetKind::Investment),
            "property" => Ok(AssetKind::Property),
            "vehicle" => Ok(AssetKind::Vehicle),
            "other" => Ok(AssetKind::Other),
            other => Err(ParseKindError {
                what: "asset type",
                got: other.to_string(),
                expected: "cash, investment, property, vehicle, other",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiabilityKind {
    CreditCard,
    Loan,
    Mortgage,
    Other,
}

impl LiabilityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LiabilityKind::CreditCard => "credit_card",
            LiabilityKind::Loan => "loan",
            LiabilityKind::Mortgage => "mortgage",
            LiabilityKind::Other => "other",
        }
    }
}

impl fmt::Display for LiabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LiabilityKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit_card" => Ok(LiabilityKind::CreditCard),
            "loan" => Ok(LiabilityKind::Loan),
            "mortgage" => Ok(LiabilityKind::Mortgage),
            "other" => Ok(LiabilityKind::Other),
            other => Err(ParseKindError {
                what: "liability type",
                got: other.to_string(),
                expected: "credit_card, loan, mortgage, other",
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub last_activity_date: Option<NaiveDate>,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub profile_id: i64,
    pub name: String,
    pub kind: TxKind,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub profile_id: i64,
    pub category_id: Option<i64>,
    pub description: String,
    pub amount: Decimal,
    pub kind: TxKind,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub profile_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetWorthSnapshot {
    pub id: i64,
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub net_worth: Decimal,
    pub snapshot_date: NaiveDate,
}
