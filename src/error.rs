// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Reasons a create or edit is refused before anything is written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Invalid amount '{0}', expected a number")]
    InvalidAmount(String),

    #[error("Please enter a valid amount greater than 0 (got {0})")]
    NonPositiveAmount(Decimal),

    #[error("Amount {0} exceeds the maximum of {1}")]
    AmountTooLarge(Decimal, Decimal),

    #[error("Category must not be empty")]
    EmptyCategory,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Transaction {0} not found")]
    NotFound(Uuid),

    #[error("Stored transaction {id} has an unreadable {field}: '{value}'")]
    Corrupt {
        id: String,
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}
