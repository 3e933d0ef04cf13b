// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::TransactionStore;
use anyhow::{Context, Result, anyhow, bail};
use chrono::{NaiveDate, NaiveDateTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use uuid::Uuid;

pub const DEFAULT_CURRENCY: &str = "IDR";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Accepts a bare date (midnight) or a date with minutes or seconds.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    let d = parse_date(s)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD[ HH:MM[:SS]]", s))?;
    d.and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("Invalid date '{}'", s))
}

pub fn now_local() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {}", ccy, d.round_dp(2).normalize())
}

pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

/// Resolves a full id or a unique prefix of one (hyphens ignored).
pub fn resolve_id<S: TransactionStore + ?Sized>(store: &S, s: &str) -> Result<Uuid> {
    let s = s.trim();
    if let Ok(id) = Uuid::parse_str(s) {
        return Ok(id);
    }
    let prefix = s.replace('-', "").to_lowercase();
    if prefix.is_empty() {
        bail!("Empty transaction id");
    }
    let matches: Vec<Uuid> = store
        .all()?
        .into_iter()
        .map(|t| t.id)
        .filter(|id| id.simple().to_string().starts_with(&prefix))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(anyhow!("Transaction '{}' not found", s)),
        _ => Err(anyhow!(
            "Transaction id '{}' is ambiguous ({} matches)",
            s,
            matches.len()
        )),
    }
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

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_currency(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "currency")?.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_datetime_accepts_bare_date() {
        let dt = parse_datetime("2025-08-01").unwrap();
        assert_eq!(dt.to_string(), "2025-08-01 00:00:00");
    }

    #[test]
    fn parse_datetime_accepts_minutes() {
        let dt = parse_datetime("2025-08-01 09:30").unwrap();
        assert_eq!(dt.to_string(), "2025-08-01 09:30:00");
    }

    #[test]
    fn parse_datetime_rejects_garbage() {
        assert!(parse_datetime("01/08/2025").is_err());
    }

    #[test]
    fn fmt_money_drops_trailing_zeros() {
        assert_eq!(fmt_money(&Decimal::from(400000), "IDR"), "IDR 400000");
        assert_eq!(fmt_money(&"12.50".parse().unwrap(), "USD"), "USD 12.5");
    }
}
