// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::period_selection;
use crate::models::{CategoryStat, Transaction};
use crate::stats::{
    compute_insights, compute_totals, expense_stats, filter_by_period, group_by_category,
    group_by_month, top_categories,
};
use crate::store::TransactionStore;
use crate::utils::{fmt_money, get_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        Some(("insights", sub)) => insights(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Stored transactions inside the selected period.
pub fn snapshot(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let (period, reference) = period_selection(sub)?;
    let all = conn.all()?;
    let data = filter_by_period(&all, period, reference);
    tracing::debug!(?period, %reference, total = all.len(), kept = data.len(), "period snapshot");
    Ok(data)
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let totals = compute_totals(&snapshot(conn, sub)?);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        let ccy = get_currency(conn)?;
        let rows = vec![
            vec!["Total Income".into(), fmt_money(&totals.total_income, &ccy)],
            vec!["Total Expense".into(), fmt_money(&totals.total_expense, &ccy)],
            vec!["Net Income".into(), fmt_money(&totals.balance, &ccy)],
        ];
        println!("{}", pretty_table(&["", "Amount"], rows));
    }
    Ok(())
}

pub fn category_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<CategoryStat>> {
    let data = snapshot(conn, sub)?;
    let stats = if sub.get_flag("expense_only") {
        expense_stats(&data)
    } else {
        group_by_category(&data)
    };
    Ok(match sub.get_one::<usize>("top") {
        Some(n) => top_categories(&stats, *n).to_vec(),
        None => stats,
    })
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let stats = category_rows(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &stats)? {
        let ccy = get_currency(conn)?;
        let max = stats.first().map(|s| s.total).unwrap_or_default();
        let rows: Vec<Vec<String>> = stats
            .iter()
            .map(|s| {
                vec![
                    s.category.clone(),
                    s.kind.to_string(),
                    s.count.to_string(),
                    fmt_money(&s.total, &ccy),
                    format!("{:.0}%", s.share_of(max) * rust_decimal::Decimal::ONE_HUNDRED),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Type", "Count", "Total", "Of Largest"], rows)
        );
    }
    Ok(())
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let months = group_by_month(&snapshot(conn, sub)?);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &months)? {
        let ccy = get_currency(conn)?;
        let rows: Vec<Vec<String>> = months
            .iter()
            .map(|m| {
                vec![
                    m.month.format("%Y-%m").to_string(),
                    fmt_money(&m.income, &ccy),
                    fmt_money(&m.expense, &ccy),
                    fmt_money(&m.net(), &ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Net"], rows)
        );
    }
    Ok(())
}

fn insights(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let insights = compute_insights(&snapshot(conn, sub)?);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &insights)? {
        let ccy = get_currency(conn)?;
        let mut rows = vec![vec![
            "Average Daily Spending".into(),
            fmt_money(&insights.average_daily_spend, &ccy),
        ]];
        if let Some(t) = &insights.largest_expense {
            rows.push(vec![
                "Largest Expense".into(),
                format!("{} - {}", t.title, fmt_money(&t.amount, &ccy)),
            ]);
        }
        if let Some(c) = &insights.most_common_category {
            rows.push(vec!["Most Common Category".into(), c.clone()]);
        }
        println!("{}", pretty_table(&["Insight", "Value"], rows));
    }
    Ok(())
}
