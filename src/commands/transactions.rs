// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::period_selection;
use crate::entry::{self, TransactionDraft, TransactionPatch};
use crate::models::{Transaction, TransactionType, TypeFilter};
use crate::stats::{filter_by_period, filter_by_search_and_type};
use crate::store::TransactionStore;
use crate::utils::{
    fmt_money, get_currency, maybe_print_json, now_local, parse_datetime, pretty_table,
    resolve_id, short_id,
};
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind(sub: &clap::ArgMatches) -> Result<Option<TransactionType>> {
    sub.get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()
}

pub fn draft_from_args(sub: &clap::ArgMatches) -> Result<TransactionDraft> {
    let Some(kind) = parse_kind(sub)? else {
        bail!("--type is required");
    };
    Ok(TransactionDraft {
        title: sub.get_one::<String>("title").cloned().unwrap_or_default(),
        amount: sub.get_one::<String>("amount").cloned().unwrap_or_default(),
        kind,
        category: sub.get_one::<String>("category").cloned().unwrap_or_default(),
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_datetime(s))
            .transpose()?,
        notes: sub.get_one::<String>("notes").cloned(),
    })
}

pub fn patch_from_args(sub: &clap::ArgMatches) -> Result<TransactionPatch> {
    Ok(TransactionPatch {
        title: sub.get_one::<String>("title").cloned(),
        amount: sub.get_one::<String>("amount").cloned(),
        kind: parse_kind(sub)?,
        category: sub.get_one::<String>("category").cloned(),
        date: sub
            .get_one::<String>("date")
            .map(|s| parse_datetime(s))
            .transpose()?,
        notes: sub.get_one::<String>("notes").cloned(),
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let draft = draft_from_args(sub)?;
    let tx = entry::create(conn, &draft, now_local())?;
    let ccy = get_currency(conn)?;
    println!(
        "Recorded {} '{}' {}{} in {} on {} [{}]",
        tx.kind,
        tx.title,
        tx.kind.symbol(),
        fmt_money(&tx.amount, &ccy),
        tx.category,
        tx.date,
        short_id(&tx.id)
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = resolve_id(conn, sub.get_one::<String>("id").unwrap())?;
    let patch = patch_from_args(sub)?;
    if patch.is_empty() {
        println!("Nothing to change for {}", short_id(&id));
        return Ok(());
    }
    let tx = entry::update(conn, id, &patch)?;
    println!("Updated '{}' [{}]", tx.title, short_id(&tx.id));
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = resolve_id(conn, sub.get_one::<String>("id").unwrap())?;
    entry::delete(conn, id)?;
    println!("Removed transaction {}", short_id(&id));
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = resolve_id(conn, sub.get_one::<String>("id").unwrap())?;
    let Some(tx) = conn.get(id)? else {
        bail!("Transaction {} not found", id);
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &tx)? {
        let ccy = get_currency(conn)?;
        let rows = vec![
            vec!["ID".into(), tx.id.to_string()],
            vec!["Title".into(), tx.title.clone()],
            vec![
                "Amount".into(),
                fmt_money(&tx.signed_amount(), &ccy),
            ],
            vec!["Type".into(), tx.kind.to_string()],
            vec!["Category".into(), tx.category.clone()],
            vec!["Date".into(), tx.date.to_string()],
            vec!["Notes".into(), tx.notes.clone().unwrap_or_default()],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = get_currency(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    short_id(&t.id),
                    t.date.format("%Y-%m-%d %H:%M").to_string(),
                    t.title.clone(),
                    fmt_money(&t.signed_amount(), &ccy),
                    t.category.clone(),
                    t.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Title", "Amount", "Category", "Notes"], rows)
        );
    }
    Ok(())
}

/// The list view's rows: period, search and type filters applied to the
/// stored set, newest first, truncated to `--limit`.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let (period, reference) = period_selection(sub)?;
    let search = sub
        .get_one::<String>("search")
        .map(|s| s.as_str())
        .unwrap_or("");
    let type_filter = match sub.get_one::<String>("type") {
        Some(t) => t.parse::<TypeFilter>()?,
        None => TypeFilter::All,
    };
    let all = conn.all()?;
    let mut data = filter_by_search_and_type(
        &filter_by_period(&all, period, reference),
        search,
        type_filter,
    );
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}
