// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Filtering and aggregation over a snapshot of transactions.
//!
//! Every function here is pure: it reads the slice it is given and returns
//! freshly built values. Callers decide when to recompute.

use crate::models::{
    CategoryStat, Insights, MonthlyData, Period, Totals, Transaction, TransactionType, TypeFilter,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};

pub fn filter_by_period(
    transactions: &[Transaction],
    period: Period,
    reference: NaiveDateTime,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| in_period(t.date, period, reference))
        .cloned()
        .collect()
}

fn in_period(date: NaiveDateTime, period: Period, reference: NaiveDateTime) -> bool {
    match period {
        Period::All => true,
        Period::ThisWeek => date.iso_week() == reference.iso_week(),
        Period::ThisMonth => date.year() == reference.year() && date.month() == reference.month(),
        Period::ThisYear => date.year() == reference.year(),
    }
}

/// Keeps transactions whose title or category contains `search`
/// (case-insensitive) and whose type passes `type_filter`. Input order is kept.
pub fn filter_by_search_and_type(
    transactions: &[Transaction],
    search: &str,
    type_filter: TypeFilter,
) -> Vec<Transaction> {
    let needle = search.to_lowercase();
    transactions
        .iter()
        .filter(|t| type_filter.matches(t.kind))
        .filter(|t| {
            needle.is_empty()
                || t.title.to_lowercase().contains(&needle)
                || t.category.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Sums saturate at `Decimal::MAX` rather than overflowing.
pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for t in transactions {
        match t.kind {
            TransactionType::Income => {
                totals.total_income = totals.total_income.saturating_add(t.amount)
            }
            TransactionType::Expense => {
                totals.total_expense = totals.total_expense.saturating_add(t.amount)
            }
        }
    }
    totals.balance = totals.total_income.saturating_sub(totals.total_expense);
    totals
}

/// One stat per distinct category string, largest total first.
///
/// A group's `kind` is the type of the first record seen for it, even when
/// the category also holds records of the other type. Equal totals keep the
/// order in which their categories first appear in `transactions`.
pub fn group_by_category(transactions: &[Transaction]) -> Vec<CategoryStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<CategoryStat> = Vec::new();
    for t in transactions {
        match index.get(t.category.as_str()) {
            Some(&i) => {
                stats[i].total = stats[i].total.saturating_add(t.amount);
                stats[i].count += 1;
            }
            None => {
                index.insert(t.category.as_str(), stats.len());
                stats.push(CategoryStat {
                    category: t.category.clone(),
                    total: t.amount,
                    count: 1,
                    kind: t.kind,
                });
            }
        }
    }
    // sort_by is stable, so ties stay in first-appearance order
    stats.sort_by(|a, b| b.total.cmp(&a.total));
    stats
}

/// Category stats whose group type is expense, in the same order.
pub fn expense_stats(transactions: &[Transaction]) -> Vec<CategoryStat> {
    group_by_category(transactions)
        .into_iter()
        .filter(|s| s.kind == TransactionType::Expense)
        .collect()
}

pub fn top_categories(stats: &[CategoryStat], n: usize) -> &[CategoryStat] {
    &stats[..n.min(stats.len())]
}

/// Income and expense sums per calendar month, oldest month first.
pub fn group_by_month(transactions: &[Transaction]) -> Vec<MonthlyData> {
    let mut months: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let entry = months
            .entry(month_start(t.date))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.kind {
            TransactionType::Income => entry.0 = entry.0.saturating_add(t.amount),
            TransactionType::Expense => entry.1 = entry.1.saturating_add(t.amount),
        }
    }
    months
        .into_iter()
        .map(|(month, (income, expense))| MonthlyData {
            month,
            income,
            expense,
        })
        .collect()
}

pub fn month_start(date: NaiveDateTime) -> NaiveDate {
    let day = date.date();
    day.with_day(1).unwrap_or(day)
}

/// Summary facts for the insights panel.
///
/// The daily average divides total expense by the number of distinct days
/// that have any transaction at all. Ties for the largest expense and for the
/// most common category resolve to whichever was encountered first.
pub fn compute_insights(transactions: &[Transaction]) -> Insights {
    let days: HashSet<NaiveDate> = transactions.iter().map(|t| t.date.date()).collect();
    let total_expense = compute_totals(transactions).total_expense;
    let average_daily_spend = if days.is_empty() {
        Decimal::ZERO
    } else {
        total_expense / Decimal::from(days.len())
    };

    let mut largest: Option<&Transaction> = None;
    for t in transactions.iter().filter(|t| t.is_expense()) {
        if largest.is_none_or(|l| t.amount > l.amount) {
            largest = Some(t);
        }
    }

    Insights {
        average_daily_spend,
        largest_expense: largest.cloned(),
        most_common_category: most_common_category(transactions),
    }
}

fn most_common_category(transactions: &[Transaction]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for t in transactions {
        match index.get(t.category.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(t.category.as_str(), counts.len());
                counts.push((t.category.as_str(), 1));
            }
        }
    }
    let mut best: Option<(&str, usize)> = None;
    for (category, count) in counts {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((category, count));
        }
    }
    best.map(|(category, _)| category.to_string())
}
