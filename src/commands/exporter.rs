// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::TransactionStore;
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    // oldest first, the natural order for a ledger file
    let mut rows = conn.all()?;
    rows.reverse();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id", "date", "title", "type", "amount", "category", "notes",
            ])?;
            for t in &rows {
                wtr.write_record([
                    t.id.to_string(),
                    t.date.to_string(),
                    t.title.clone(),
                    t.kind.to_string(),
                    t.amount.to_string(),
                    t.category.clone(),
                    t.notes.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
    }
    tracing::info!(count = rows.len(), format = %fmt, path = %out, "export finished");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
