// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Entry points that create, edit and delete transactions.
//!
//! Validation always runs before the store is touched, so a rejected draft
//! leaves the stored set unchanged.

use crate::error::{StoreError, ValidationError};
use crate::models::{Transaction, TransactionType};
use crate::store::TransactionStore;
use anyhow::Result;
use chrono::{NaiveDateTime, SubsecRound};
use rust_decimal::Decimal;
use uuid::Uuid;

/// User input for a new transaction, before validation.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub title: String,
    pub amount: String,
    pub kind: TransactionType,
    pub category: String,
    pub date: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

/// Replacement values for an edit. `None` keeps the current value; for
/// `notes`, `Some("")` clears them.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub title: Option<String>,
    pub amount: Option<String>,
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.kind.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.notes.is_none()
    }
}

/// Largest accepted amount. Keeps sums over any realistic number of records
/// far below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x38D7E, 0, false, 0); // 1e15

pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    let t = title.trim();
    if t.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(t.to_string())
}

pub fn validate_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let s = raw.trim();
    let amount = s
        .parse::<Decimal>()
        .map_err(|_| ValidationError::InvalidAmount(s.to_string()))?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(amount, MAX_AMOUNT));
    }
    Ok(amount)
}

pub fn validate_category(category: &str) -> Result<String, ValidationError> {
    let c = category.trim();
    if c.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    Ok(c.to_string())
}

pub fn normalize_notes(notes: Option<&str>) -> Option<String> {
    notes
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Builds a new record with a fresh id. `now` is used when no date is given.
pub fn validate(draft: &TransactionDraft, now: NaiveDateTime) -> Result<Transaction, ValidationError> {
    Ok(Transaction {
        id: Uuid::new_v4(),
        title: validate_title(&draft.title)?,
        amount: validate_amount(&draft.amount)?,
        kind: draft.kind,
        category: validate_category(&draft.category)?,
        // stored with whole-second precision
        date: draft.date.unwrap_or(now).trunc_subsecs(0),
        notes: normalize_notes(draft.notes.as_deref()),
    })
}

/// Returns the edited copy of `existing`; the id never changes.
pub fn apply_edit(
    existing: &Transaction,
    patch: &TransactionPatch,
) -> Result<Transaction, ValidationError> {
    let title = match &patch.title {
        Some(t) => validate_title(t)?,
        None => existing.title.clone(),
    };
    let amount = match &patch.amount {
        Some(a) => validate_amount(a)?,
        None => existing.amount,
    };
    let category = match &patch.category {
        Some(c) => validate_category(c)?,
        None => existing.category.clone(),
    };
    let notes = match &patch.notes {
        Some(n) => normalize_notes(Some(n)),
        None => existing.notes.clone(),
    };
    Ok(Transaction {
        id: existing.id,
        title,
        amount,
        kind: patch.kind.unwrap_or(existing.kind),
        category,
        date: patch.date.unwrap_or(existing.date).trunc_subsecs(0),
        notes,
    })
}

pub fn create<S: TransactionStore + ?Sized>(
    store: &S,
    draft: &TransactionDraft,
    now: NaiveDateTime,
) -> Result<Transaction> {
    let tx = validate(draft, now)?;
    store.insert(&tx)?;
    tracing::info!(id = %tx.id, kind = %tx.kind, "created transaction");
    Ok(tx)
}

pub fn update<S: TransactionStore + ?Sized>(
    store: &S,
    id: Uuid,
    patch: &TransactionPatch,
) -> Result<Transaction> {
    let existing = store.get(id)?.ok_or(StoreError::NotFound(id))?;
    let edited = apply_edit(&existing, patch)?;
    store.update(&edited)?;
    tracing::info!(%id, "updated transaction");
    Ok(edited)
}

pub fn delete<S: TransactionStore + ?Sized>(store: &S, id: Uuid) -> Result<()> {
    if !store.delete(id)? {
        return Err(StoreError::NotFound(id).into());
    }
    tracing::info!(%id, "deleted transaction");
    Ok(())
}
