// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::DATE_FORMAT;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Stored records that break the transaction invariants, as (issue, detail).
/// Nothing is repaired; categories holding both types are only reported.
pub fn find_issues(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut issues = Vec::new();

    let mut stmt = conn.prepare(
        "SELECT id, title, amount, category, date, notes FROM transactions ORDER BY date, rowid",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: String = r.get(0)?;
        let title: String = r.get(1)?;
        let amount: String = r.get(2)?;
        let category: String = r.get(3)?;
        let date: String = r.get(4)?;
        let notes: Option<String> = r.get(5)?;

        match amount.parse::<Decimal>() {
            Ok(a) if a <= Decimal::ZERO => {
                issues.push(("non_positive_amount".into(), format!("{} {}", id, amount)))
            }
            Err(_) => issues.push(("invalid_amount".into(), format!("{} '{}'", id, amount))),
            _ => {}
        }
        if title.trim().is_empty() {
            issues.push(("empty_title".into(), id.clone()));
        }
        if category.trim().is_empty() {
            issues.push(("empty_category".into(), id.clone()));
        }
        if chrono::NaiveDateTime::parse_from_str(&date, DATE_FORMAT).is_err() {
            issues.push(("invalid_date".into(), format!("{} '{}'", id, date)));
        }
        if notes.is_some_and(|n| n.trim().is_empty()) {
            issues.push(("blank_notes".into(), id.clone()));
        }
    }

    let mut stmt2 = conn.prepare(
        "SELECT category FROM transactions GROUP BY category
         HAVING COUNT(DISTINCT type) > 1 ORDER BY category",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let c: String = r.get(0)?;
        issues.push(("mixed_type_category".into(), c));
    }
    Ok(issues)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let issues = find_issues(conn)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = issues.into_iter().map(|(i, d)| vec![i, d]).collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
