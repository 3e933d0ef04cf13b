// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tallybook::db;
use tallybook::entry::{self, TransactionDraft, TransactionPatch};
use tallybook::error::ValidationError;
use tallybook::models::TransactionType;
use tallybook::store::{MemoryStore, TransactionStore};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, 9)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

fn draft(title: &str, amount: &str, category: &str) -> TransactionDraft {
    TransactionDraft {
        title: title.to_string(),
        amount: amount.to_string(),
        kind: TransactionType::Expense,
        category: category.to_string(),
        date: None,
        notes: None,
    }
}

fn validation_error(err: &anyhow::Error) -> ValidationError {
    err.downcast_ref::<ValidationError>()
        .cloned()
        .expect("expected a validation error")
}

#[test]
fn create_trims_and_defaults() {
    let store = MemoryStore::new();
    let mut d = draft("  Lunch  ", "45000", "Food & Dining");
    d.notes = Some("   ".into());
    let tx = entry::create(&store, &d, now()).unwrap();
    assert_eq!(tx.title, "Lunch");
    assert_eq!(tx.amount, Decimal::from(45000));
    assert_eq!(tx.date, now());
    assert!(tx.notes.is_none());
    assert_eq!(store.get(tx.id).unwrap(), Some(tx));
}

#[test]
fn notes_are_trimmed_when_present() {
    let mut d = draft("Lunch", "45000", "Food & Dining");
    d.notes = Some("  with team \n".into());
    let tx = entry::validate(&d, now()).unwrap();
    assert_eq!(tx.notes.as_deref(), Some("with team"));
}

#[test]
fn smallest_positive_amount_is_accepted() {
    assert!(entry::validate(&draft("Tip", "1", "Other Expense"), now()).is_ok());
    assert!(entry::validate(&draft("Tip", "0.01", "Other Expense"), now()).is_ok());
}

#[test]
fn zero_negative_and_garbage_amounts_are_rejected() {
    assert_eq!(
        entry::validate(&draft("Tip", "0", "Other Expense"), now()).unwrap_err(),
        ValidationError::NonPositiveAmount(Decimal::ZERO)
    );
    assert!(matches!(
        entry::validate(&draft("Tip", "-5", "Other Expense"), now()),
        Err(ValidationError::NonPositiveAmount(_))
    ));
    assert_eq!(
        entry::validate(&draft("Tip", "abc", "Other Expense"), now()).unwrap_err(),
        ValidationError::InvalidAmount("abc".into())
    );
    assert_eq!(
        entry::validate(&draft("Tip", "", "Other Expense"), now()).unwrap_err(),
        ValidationError::InvalidAmount("".into())
    );
}

#[test]
fn amounts_above_the_cap_are_rejected() {
    assert!(entry::validate(&draft("House", "1000000000000000", "Other Expense"), now()).is_ok());
    assert!(matches!(
        entry::validate(&draft("House", "1000000000000000.01", "Other Expense"), now()),
        Err(ValidationError::AmountTooLarge(_, _))
    ));
    assert!(matches!(
        entry::validate(&draft("Big", "50000000000000000000000000000", "Other Expense"), now()),
        Err(ValidationError::AmountTooLarge(_, _))
    ));
}

#[test]
fn empty_title_or_category_is_rejected() {
    assert_eq!(
        entry::validate(&draft("   ", "10", "Bills"), now()).unwrap_err(),
        ValidationError::EmptyTitle
    );
    assert_eq!(
        entry::validate(&draft("Water", "10", " "), now()).unwrap_err(),
        ValidationError::EmptyCategory
    );
}

#[test]
fn any_non_empty_category_is_accepted() {
    let tx = entry::validate(&draft("Vet", "10", "Pets"), now()).unwrap();
    assert_eq!(tx.category, "Pets");
}

#[test]
fn rejected_create_leaves_store_unchanged() {
    let store = MemoryStore::new();
    entry::create(&store, &draft("Bus", "3500", "Transportation"), now()).unwrap();
    let err = entry::create(&store, &draft("Bus", "-1", "Transportation"), now()).unwrap_err();
    assert!(matches!(
        validation_error(&err),
        ValidationError::NonPositiveAmount(_)
    ));
    assert_eq!(store.len(), 1);
}

#[test]
fn edit_replaces_fields_but_keeps_id() {
    let store = MemoryStore::new();
    let tx = entry::create(&store, &draft("Bus", "3500", "Transportation"), now()).unwrap();
    let patch = TransactionPatch {
        title: Some(" Train ".into()),
        amount: Some("12000".into()),
        kind: Some(TransactionType::Expense),
        notes: Some("commute".into()),
        ..Default::default()
    };
    let edited = entry::update(&store, tx.id, &patch).unwrap();
    assert_eq!(edited.id, tx.id);
    assert_eq!(edited.title, "Train");
    assert_eq!(edited.amount, Decimal::from(12000));
    assert_eq!(edited.category, "Transportation");
    assert_eq!(edited.notes.as_deref(), Some("commute"));
    assert_eq!(store.get(tx.id).unwrap(), Some(edited));
}

#[test]
fn edit_with_empty_notes_clears_them() {
    let store = MemoryStore::new();
    let mut d = draft("Bus", "3500", "Transportation");
    d.notes = Some("old".into());
    let tx = entry::create(&store, &d, now()).unwrap();
    let patch = TransactionPatch {
        notes: Some(String::new()),
        ..Default::default()
    };
    let edited = entry::update(&store, tx.id, &patch).unwrap();
    assert!(edited.notes.is_none());
}

#[test]
fn rejected_edit_leaves_record_unchanged() {
    let store = MemoryStore::new();
    let tx = entry::create(&store, &draft("Bus", "3500", "Transportation"), now()).unwrap();
    let patch = TransactionPatch {
        title: Some("Train".into()),
        amount: Some("0".into()),
        ..Default::default()
    };
    assert!(entry::update(&store, tx.id, &patch).is_err());
    assert_eq!(store.get(tx.id).unwrap(), Some(tx));
}

#[test]
fn delete_removes_and_reports_missing() {
    let store = MemoryStore::new();
    let tx = entry::create(&store, &draft("Bus", "3500", "Transportation"), now()).unwrap();
    entry::delete(&store, tx.id).unwrap();
    assert!(store.is_empty());
    assert!(entry::delete(&store, tx.id).is_err());
}

#[test]
fn sqlite_store_round_trips_and_orders_newest_first() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();

    let mut older = draft("Groceries", "410000.50", "Food & Dining");
    older.date = Some(now() - chrono::Duration::days(3));
    let older = entry::create(&conn, &older, now()).unwrap();
    let mut income = draft("Payroll", "9000000", "Salary");
    income.kind = TransactionType::Income;
    income.notes = Some("August".into());
    let income = entry::create(&conn, &income, now()).unwrap();

    let all = conn.all().unwrap();
    assert_eq!(all, vec![income.clone(), older.clone()]);
    assert_eq!(all[1].amount.to_string(), "410000.50");

    let patch = TransactionPatch {
        category: Some("Bonus".into()),
        ..Default::default()
    };
    entry::update(&conn, income.id, &patch).unwrap();
    assert_eq!(conn.get(income.id).unwrap().unwrap().category, "Bonus");

    entry::delete(&conn, older.id).unwrap();
    assert_eq!(conn.all().unwrap().len(), 1);
}

#[test]
fn created_record_matches_stored_record_with_subsecond_now() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let precise = now() + chrono::Duration::nanoseconds(123_456_789);

    let tx = entry::create(&conn, &draft("Coffee", "25000", "Food & Dining"), precise).unwrap();
    assert_eq!(tx.date, now());
    assert_eq!(conn.get(tx.id).unwrap(), Some(tx.clone()));

    let patch = TransactionPatch {
        date: Some(precise),
        ..Default::default()
    };
    let edited = entry::update(&conn, tx.id, &patch).unwrap();
    assert_eq!(conn.get(tx.id).unwrap(), Some(edited));
}

#[test]
fn transactions_table_has_only_record_columns() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('transactions')").unwrap();
    let cols: Vec<String> = stmt
        .query_map([], |r| r.get(0))
        .unwrap()
        .map(|c| c.unwrap())
        .collect();
    assert_eq!(
        cols,
        ["id", "title", "amount", "type", "category", "date", "notes"]
    );
}
