// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use spendbook::commands::{self, doctor, entries, exporter, importer};
use spendbook::ledger::{SortDirection, SortKey};
use spendbook::models::{Entry, RecurringKey};
use spendbook::settings::Settings;
use spendbook::store::{EntryStore, SqliteStore};
use spendbook::{cli, db};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn seeded() -> Connection {
    let conn = setup();
    let entries: Vec<Entry> = (1..=3)
        .map(|i| Entry {
            id: format!("e{}", i),
            title: format!("Lunch {}", i),
            amount: Decimal::from(10 * i),
            category: Some("Food".into()),
            date: format!("2025-01-0{}", i),
            created_at: String::new(),
            recurring: None,
            recurring_key: None,
        })
        .collect();
    SqliteStore::new(&conn).save(&entries).unwrap();
    conn
}

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args);
    match matches.subcommand() {
        Some((_, sub)) => sub.clone(),
        None => panic!("no subcommand"),
    }
}

#[test]
fn store_round_trips_and_starts_empty() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    assert!(store.load().unwrap().is_empty());
    let conn = seeded();
    assert_eq!(SqliteStore::new(&conn).load().unwrap().len(), 3);
}

#[test]
fn add_then_list_state_from_cli() {
    let conn = seeded();
    let add = sub_matches(&[
        "spendbook", "add", "--title", "Bus pass", "--amount", "18", "--category", "Transport",
        "--date", "2025-01-04",
    ]);
    entries::add(&conn, &add).unwrap();
    let stored = SqliteStore::new(&conn).load().unwrap();
    assert_eq!(stored.len(), 4);
    assert_eq!(stored[3].title, "Bus pass");

    let list = sub_matches(&[
        "spendbook", "list", "--category", "Food", "--sort", "amount", "--page-size", "2",
        "--page", "9",
    ]);
    let state = entries::query_state(&list, &Settings::default()).unwrap();
    assert_eq!(state.sort.key, SortKey::Amount);
    assert_eq!(state.sort.direction, SortDirection::Desc);
    let page = spendbook::ledger::query(&stored, &state);
    assert_eq!(page.total, 3);
    assert_eq!(page.page, 2);
    assert_eq!(page.rows[0].id, "e1");
}

#[test]
fn list_rejects_malformed_month() {
    let list = sub_matches(&["spendbook", "list", "--month", "2025-1"]);
    assert!(entries::query_state(&list, &Settings::default()).is_err());
}

#[test]
fn add_rejects_non_positive_amount_without_saving() {
    let conn = seeded();
    let add = sub_matches(&["spendbook", "add", "--title", "Refund", "--amount", "-5"]);
    assert!(entries::add(&conn, &add).is_err());
    assert_eq!(SqliteStore::new(&conn).load().unwrap().len(), 3);
}

#[test]
fn rm_unknown_id_is_not_an_error() {
    let conn = seeded();
    let rm = sub_matches(&["spendbook", "rm", "missing"]);
    entries::remove(&conn, &rm).unwrap();
    assert_eq!(SqliteStore::new(&conn).load().unwrap().len(), 3);

    let rm = sub_matches(&["spendbook", "rm", "e2"]);
    entries::remove(&conn, &rm).unwrap();
    let ids: Vec<String> = SqliteStore::new(&conn)
        .load()
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec!["e1", "e3"]);
}

#[test]
fn wipe_needs_confirmation() {
    let conn = seeded();
    assert!(entries::wipe(&conn, &sub_matches(&["spendbook", "wipe"])).is_err());
    assert_eq!(SqliteStore::new(&conn).load().unwrap().len(), 3);
    entries::wipe(&conn, &sub_matches(&["spendbook", "wipe", "--yes"])).unwrap();
    assert!(SqliteStore::new(&conn).load().unwrap().is_empty());
}

#[test]
fn failed_import_keeps_stored_collection() {
    let conn = seeded();
    let before = SqliteStore::new(&conn).load().unwrap();

    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"[{{"title":"Coffee"}}]"#).unwrap();
    file.flush().unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let import = sub_matches(&["spendbook", "import", "--path", &path]);
    assert!(importer::handle(&conn, &import).is_err());
    assert_eq!(SqliteStore::new(&conn).load().unwrap(), before);
}

#[test]
fn export_then_import_restores_collection() {
    let conn = seeded();
    let before = SqliteStore::new(&conn).load().unwrap();
    let dir = tempdir().unwrap();
    let out = dir.path().join("expenses.json");
    let out_str = out.to_string_lossy().to_string();

    let export = sub_matches(&["spendbook", "export", "--out", &out_str]);
    exporter::handle(&conn, &export).unwrap();

    entries::wipe(&conn, &sub_matches(&["spendbook", "wipe", "--yes"])).unwrap();
    let padded = format!("  {}  ", out_str);
    let import = sub_matches(&["spendbook", "import", "--path", &padded]);
    importer::handle(&conn, &import).unwrap();
    assert_eq!(SqliteStore::new(&conn).load().unwrap(), before);
}

#[test]
fn export_csv_and_reject_unknown_format() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("expenses.csv");
    let csv_str = csv_path.to_string_lossy().to_string();
    let export = sub_matches(&["spendbook", "export", "--out", &csv_str, "--format", "csv"]);
    exporter::handle(&conn, &export).unwrap();
    let text = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("id,title,amount,category,date,createdAt,recurring,recurringKey")
    );
    assert_eq!(lines.next(), Some("e1,Lunch 1,10,Food,2025-01-01,,false,"));

    let xml = dir.path().join("expenses.xml");
    let xml_str = xml.to_string_lossy().to_string();
    let export = sub_matches(&["spendbook", "export", "--out", &xml_str, "--format", "xml"]);
    assert!(exporter::handle(&conn, &export).is_err());
    assert!(!xml.exists());
}

#[test]
fn opening_the_ledger_persists_backfill() {
    let conn = setup();
    let rent = Entry {
        id: "r1".into(),
        title: "Rent".into(),
        amount: Decimal::from(600),
        category: Some("Housing".into()),
        date: "2024-01-01".into(),
        created_at: String::new(),
        recurring: Some(true),
        recurring_key: Some(RecurringKey::from("Rent|600|Housing")),
    };
    SqliteStore::new(&conn).save(&[rent]).unwrap();
    let today = chrono::NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();

    let ledger = commands::open_ledger(&conn, today).unwrap();
    assert_eq!(ledger.entries().len(), 4);
    assert_eq!(SqliteStore::new(&conn).load().unwrap().len(), 4);

    let again = commands::open_ledger(&conn, today).unwrap();
    assert_eq!(again.entries(), ledger.entries());
}

#[test]
fn settings_persist_and_validate() {
    let conn = setup();
    assert_eq!(Settings::load(&conn).unwrap(), Settings::default());

    let mut s = Settings::load(&conn).unwrap();
    s.set("currency", "usd").unwrap();
    s.set("locale", "en-US").unwrap();
    s.set("page-size", "50").unwrap();
    assert!(s.set("page-size", "0").is_err());
    assert!(s.set("currency", "JPY").is_err());
    assert!(s.set("theme", "dark").is_err());
    s.save(&conn).unwrap();

    let loaded = Settings::load(&conn).unwrap();
    assert_eq!(loaded.currency, "USD");
    assert_eq!(loaded.page_size, 50);
    assert_eq!(loaded.money(Decimal::from(1200)), "$1,200.00");
}

#[test]
fn doctor_reports_drift_collisions_and_bad_rows() {
    let base = Entry {
        id: "r1".into(),
        title: "Rent".into(),
        amount: Decimal::from(650),
        category: Some("Housing".into()),
        date: "2024-01-01".into(),
        created_at: String::new(),
        recurring: Some(true),
        recurring_key: Some(RecurringKey::from("Rent|600|Housing")),
    };
    let parking = Entry {
        id: "p1".into(),
        title: "Parking".into(),
        amount: Decimal::from(40),
        category: Some("Car".into()),
        ..base.clone()
    };
    let broken = Entry {
        id: "r1".into(),
        title: "Odd".into(),
        amount: Decimal::ZERO,
        date: "01/02/2024".into(),
        recurring: None,
        recurring_key: None,
        ..base.clone()
    };
    let issues: Vec<String> = doctor::findings(&[base, parking, broken])
        .into_iter()
        .map(|(issue, _)| issue)
        .collect();
    for expected in [
        "bad_date",
        "non_positive_amount",
        "duplicate_id",
        "recurring_key_drift",
        "recurring_key_collision",
    ] {
        assert!(issues.iter().any(|i| i == expected), "missing {expected}: {issues:?}");
    }
    assert!(doctor::findings(&[]).is_empty());
}
