// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Canonical storage of transactions.
//!
//! `TransactionStore` is what command handlers and entry points talk to. The
//! SQLite implementation keeps amounts and timestamps as TEXT, like the rest
//! of the schema; `MemoryStore` backs tests and embedders without a database.

use crate::error::StoreError;
use crate::models::{Transaction, TransactionType};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::cell::RefCell;
use uuid::Uuid;

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub type StoreResult<T> = Result<T, StoreError>;

pub trait TransactionStore {
    /// Every stored transaction, newest first.
    fn all(&self) -> StoreResult<Vec<Transaction>>;
    fn get(&self, id: Uuid) -> StoreResult<Option<Transaction>>;
    fn insert(&self, tx: &Transaction) -> StoreResult<()>;
    /// Replaces the record with the same id; errors if there is none.
    fn update(&self, tx: &Transaction) -> StoreResult<()>;
    /// Returns whether a record was removed.
    fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

const SELECT_COLUMNS: &str = "SELECT id, title, amount, type, category, date, notes FROM transactions";

type RawRow = (
    String,
    String,
    String,
    String,
    String,
    String,
    Option<String>,
);

fn read_raw(r: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
    ))
}

fn from_raw(raw: RawRow) -> StoreResult<Transaction> {
    let (id_s, title, amount_s, type_s, category, date_s, notes) = raw;
    let corrupt = |field: &'static str, value: &str| StoreError::Corrupt {
        id: id_s.clone(),
        field,
        value: value.to_string(),
    };
    let id = Uuid::parse_str(&id_s).map_err(|_| corrupt("id", &id_s))?;
    let amount = amount_s
        .parse::<Decimal>()
        .map_err(|_| corrupt("amount", &amount_s))?;
    let kind = type_s
        .parse::<TransactionType>()
        .map_err(|_| corrupt("type", &type_s))?;
    let date = NaiveDateTime::parse_from_str(&date_s, DATE_FORMAT)
        .map_err(|_| corrupt("date", &date_s))?;
    Ok(Transaction {
        id,
        title,
        amount,
        kind,
        category,
        date,
        notes,
    })
}

impl TransactionStore for Connection {
    fn all(&self) -> StoreResult<Vec<Transaction>> {
        let mut stmt = self.prepare(&format!(
            "{} ORDER BY date DESC, rowid DESC",
            SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map([], read_raw)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(from_raw(row?)?);
        }
        tracing::debug!(count = data.len(), "loaded transactions");
        Ok(data)
    }

    fn get(&self, id: Uuid) -> StoreResult<Option<Transaction>> {
        let raw = self
            .query_row(
                &format!("{} WHERE id=?1", SELECT_COLUMNS),
                params![id.to_string()],
                read_raw,
            )
            .optional()?;
        raw.map(from_raw).transpose()
    }

    fn insert(&self, tx: &Transaction) -> StoreResult<()> {
        self.execute(
            "INSERT INTO transactions(id, title, amount, type, category, date, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                tx.id.to_string(),
                tx.title,
                tx.amount.to_string(),
                tx.kind.as_str(),
                tx.category,
                tx.date.format(DATE_FORMAT).to_string(),
                tx.notes
            ],
        )?;
        tracing::debug!(id = %tx.id, "inserted transaction");
        Ok(())
    }

    fn update(&self, tx: &Transaction) -> StoreResult<()> {
        let changed = self.execute(
            "UPDATE transactions SET title=?2, amount=?3, type=?4, category=?5, date=?6, notes=?7
             WHERE id=?1",
            params![
                tx.id.to_string(),
                tx.title,
                tx.amount.to_string(),
                tx.kind.as_str(),
                tx.category,
                tx.date.format(DATE_FORMAT).to_string(),
                tx.notes
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(tx.id));
        }
        tracing::debug!(id = %tx.id, "updated transaction");
        Ok(())
    }

    fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let changed = self.execute(
            "DELETE FROM transactions WHERE id=?1",
            params![id.to_string()],
        )?;
        tracing::debug!(%id, removed = changed > 0, "delete transaction");
        Ok(changed > 0)
    }
}

/// In-process store holding records in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RefCell<Vec<Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }
}

impl TransactionStore for MemoryStore {
    fn all(&self) -> StoreResult<Vec<Transaction>> {
        // newest insert first among equal dates, matching the SQLite ordering
        let mut data: Vec<Transaction> = self.rows.borrow().iter().rev().cloned().collect();
        data.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(data)
    }

    fn get(&self, id: Uuid) -> StoreResult<Option<Transaction>> {
        Ok(self.rows.borrow().iter().find(|t| t.id == id).cloned())
    }

    fn insert(&self, tx: &Transaction) -> StoreResult<()> {
        self.rows.borrow_mut().push(tx.clone());
        Ok(())
    }

    fn update(&self, tx: &Transaction) -> StoreResult<()> {
        let mut rows = self.rows.borrow_mut();
        let slot = rows
            .iter_mut()
            .find(|t| t.id == tx.id)
            .ok_or(StoreError::NotFound(tx.id))?;
        *slot = tx.clone();
        Ok(())
    }

    fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() != before)
    }
}
