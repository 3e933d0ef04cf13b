// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Business",
    "Investment",
    "Gift",
    "Bonus",
    "Other Income",
];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Education",
    "Other Expense",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Income, TransactionType::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TransactionType::Income => "+",
            TransactionType::Expense => "-",
        }
    }

    /// Suggested categories for this type. Not enforced anywhere.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            TransactionType::Income => INCOME_CATEGORIES,
            TransactionType::Expense => EXPENSE_CATEGORIES,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(anyhow!(
                "Invalid transaction type '{}', expected income|expense",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub title: String,
    pub amount: Decimal, // always positive, sign comes from `kind`
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub date: NaiveDateTime,
    pub notes: Option<String>,
}

impl Transaction {
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl CategoryStat {
    /// Ratio of this group's total to `max`, used to size breakdown bars.
    pub fn share_of(&self, max: Decimal) -> Decimal {
        if max <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.total / max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyData {
    pub month: NaiveDate, // first day of the month
    pub income: Decimal,
    pub expense: Decimal,
}

impl MonthlyData {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub average_daily_spend: Decimal,
    pub largest_expense: Option<Transaction>,
    pub most_common_category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    All,
    ThisWeek,
    #[default]
    ThisMonth,
    ThisYear,
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Period::All),
            "week" | "this-week" => Ok(Period::ThisWeek),
            "month" | "this-month" => Ok(Period::ThisMonth),
            "year" | "this-year" => Ok(Period::ThisYear),
            other => Err(anyhow!(
                "Invalid period '{}', expected all|week|month|year",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn matches(&self, kind: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => kind == TransactionType::Income,
            TypeFilter::Expense => kind == TransactionType::Expense,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "income" => Ok(TypeFilter::Income),
            "expense" => Ok(TypeFilter::Expense),
            other => Err(anyhow!(
                "Invalid type filter '{}', expected all|income|expense",
                other
            )),
        }
    }
}
