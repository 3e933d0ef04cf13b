// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use tallybook::{cli, commands::reports, db, models::TransactionType};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let rows = [
        ("Payroll", "2000000", "income", "Salary", "2025-08-01 08:00:00"),
        ("Lunch", "500000", "expense", "Food & Dining", "2025-08-01 12:00:00"),
        ("Taxi", "300000", "expense", "Transportation", "2025-08-02 09:00:00"),
        ("Old rent", "900000", "expense", "Bills", "2025-06-01 09:00:00"),
    ];
    for (i, (title, amount, kind, category, date)) in rows.into_iter().enumerate() {
        conn.execute(
            "INSERT INTO transactions(id,title,amount,type,category,date) VALUES (?1,?2,?3,?4,?5,?6)",
            params![
                format!("00000000-0000-4000-8000-00000000000{}", i),
                title,
                amount,
                kind,
                category,
                date
            ],
        )
        .unwrap();
    }
    conn
}

fn stats_matches(args: &[&str]) -> (String, clap::ArgMatches) {
    let mut argv = vec!["tallybook", "stats"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("stats", stats_m)) = matches.subcommand() else {
        panic!("no stats subcommand");
    };
    let (name, sub) = stats_m.subcommand().expect("no stats report");
    (name.to_string(), sub.clone())
}

#[test]
fn default_period_is_current_month_of_as_of() {
    let conn = setup();
    let (_, sub) = stats_matches(&["summary", "--as-of", "2025-08-20"]);
    let data = reports::snapshot(&conn, &sub).unwrap();
    assert_eq!(data.len(), 3);
}

#[test]
fn category_rows_sorted_by_total() {
    let conn = setup();
    let (_, sub) = stats_matches(&["categories", "--as-of", "2025-08-20"]);
    let rows = reports::category_rows(&conn, &sub).unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(names, ["Salary", "Food & Dining", "Transportation"]);
}

#[test]
fn category_rows_expense_only_top() {
    let conn = setup();
    let (_, sub) = stats_matches(&[
        "categories",
        "--period",
        "all",
        "--expense-only",
        "--top",
        "2",
    ]);
    let rows = reports::category_rows(&conn, &sub).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.kind == TransactionType::Expense));
    assert_eq!(rows[0].category, "Bills");
    assert_eq!(rows[0].total, Decimal::from(900000));
    assert_eq!(rows[0].share_of(rows[0].total), Decimal::ONE);
}

#[test]
fn every_report_runs() {
    let conn = setup();
    for report in ["summary", "categories", "monthly", "insights"] {
        let matches = cli::build_cli().get_matches_from([
            "tallybook", "stats", report, "--period", "year", "--as-of", "2025-08-20", "--json",
        ]);
        let Some(("stats", stats_m)) = matches.subcommand() else {
            panic!("no stats subcommand");
        };
        reports::handle(&conn, stats_m).unwrap();
    }
}
