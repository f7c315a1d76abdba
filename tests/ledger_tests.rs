// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use spendbook::error::{LedgerError, ValidationError};
use spendbook::ledger::{categories, Ledger, LedgerCommand, QueryState};
use spendbook::models::{Entry, EntryDraft, EntryPatch};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 15, 9, 30, 0).unwrap()
}

fn draft(title: &str, amount: &str, category: &str, date: &str, recurring: bool) -> EntryDraft {
    EntryDraft {
        title: title.into(),
        amount: amount.into(),
        category: category.into(),
        date: date.into(),
        recurring,
    }
}

fn create(ledger: &mut Ledger, d: EntryDraft) -> String {
    ledger
        .apply(LedgerCommand::Create(d), now())
        .unwrap()
        .id
        .unwrap()
}

#[test]
fn create_trims_and_stamps_entry() {
    let mut ledger = Ledger::default();
    let id = create(&mut ledger, draft("  Groceries ", "24.50", " Food ", "2024-04-02", false));
    let e = ledger.find(&id).unwrap();
    assert_eq!(e.title, "Groceries");
    assert_eq!(e.category.as_deref(), Some("Food"));
    assert_eq!(e.amount, "24.50".parse::<Decimal>().unwrap());
    assert_eq!(e.date, "2024-04-02");
    assert_eq!(e.created_at, "2024-04-15T09:30:00.000Z");
    assert_eq!(e.recurring, None);
    assert_eq!(e.recurring_key, None);
}

#[test]
fn create_defaults_blank_date_to_today_and_blank_category_to_none() {
    let mut ledger = Ledger::default();
    let id = create(&mut ledger, draft("Coffee", "3.2", "  ", "", false));
    let e = ledger.find(&id).unwrap();
    assert_eq!(e.date, "2024-04-15");
    assert_eq!(e.category, None);
    assert_eq!(e.category_label(), "Uncategorized");
}

#[test]
fn recurring_create_stores_composite_key_once() {
    let mut ledger = Ledger::default();
    let id = create(&mut ledger, draft("Rent", "600.00", "Housing", "2024-04-01", true));
    let key = ledger.find(&id).unwrap().recurring_key.clone().unwrap();
    assert_eq!(key.as_str(), "Rent|600|Housing");

    let patch = EntryPatch {
        amount: Some("650".into()),
        ..EntryPatch::default()
    };
    ledger
        .apply(LedgerCommand::Edit { id: id.clone(), patch }, now())
        .unwrap();
    let e = ledger.find(&id).unwrap();
    assert_eq!(e.amount, Decimal::from(650));
    assert_eq!(e.recurring_key.as_ref(), Some(&key));
    assert_eq!(e.recurring, Some(true));
}

#[test]
fn validation_errors_leave_collection_untouched() {
    let mut ledger = Ledger::default();
    let cases = [
        (draft("  ", "5", "", "2024-01-01", false), ValidationError::EmptyTitle),
        (
            draft("Tea", "abc", "", "2024-01-01", false),
            ValidationError::InvalidAmount("abc".into()),
        ),
        (draft("Tea", "0", "", "2024-01-01", false), ValidationError::NonPositiveAmount),
        (draft("Tea", "-2", "", "2024-01-01", false), ValidationError::NonPositiveAmount),
        (
            draft("Tea", "1000000000000.01", "", "2024-01-01", false),
            ValidationError::AmountTooLarge,
        ),
        (
            draft("Tea", "50000000000000000000000000000", "", "2024-01-01", false),
            ValidationError::AmountTooLarge,
        ),
        (
            draft("Tea", "2", "", "2024-13-01", false),
            ValidationError::InvalidDate("2024-13-01".into()),
        ),
    ];
    for (d, expected) in cases {
        match ledger.apply(LedgerCommand::Create(d), now()) {
            Err(LedgerError::Validation(v)) => assert_eq!(v, expected),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
    assert!(ledger.entries().is_empty());
}

#[test]
fn amounts_accept_exponent_notation_up_to_the_ceiling() {
    let mut ledger = Ledger::default();
    let a = create(&mut ledger, draft("Laptop", "1e3", "", "2024-04-01", false));
    let b = create(&mut ledger, draft("Desk", "2.5E2", "", "2024-04-01", false));
    let c = create(&mut ledger, draft("House", "1000000000000", "", "2024-04-01", false));
    let d = create(&mut ledger, draft("Boat", "1000000000000", "", "2024-04-01", false));
    assert_eq!(ledger.find(&a).unwrap().amount, Decimal::from(1000));
    assert_eq!(ledger.find(&b).unwrap().amount, Decimal::from(250));
    assert!(ledger.find(&c).is_some() && ledger.find(&d).is_some());

    let patch = EntryPatch {
        amount: Some("5e28".into()),
        ..EntryPatch::default()
    };
    let err = ledger
        .apply(LedgerCommand::Edit { id: a.clone(), patch }, now())
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(ValidationError::AmountTooLarge)));

    let today = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
    let view = ledger.view(&QueryState::default(), today);
    assert_eq!(view.summary.all_time_total, Decimal::from(2_000_000_001_250i64));
}

#[test]
fn edit_requires_a_date_and_keeps_identity() {
    let mut ledger = Ledger::default();
    let id = create(&mut ledger, draft("Taxi", "14", "Transport", "2024-04-03", false));
    let before = ledger.find(&id).unwrap().clone();

    let bad = EntryPatch {
        date: Some(" ".into()),
        ..EntryPatch::default()
    };
    let err = ledger
        .apply(LedgerCommand::Edit { id: id.clone(), patch: bad }, now())
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(ValidationError::MissingDate)));
    assert_eq!(ledger.find(&id), Some(&before));

    let patch = EntryPatch {
        title: Some("Cab".into()),
        amount: Some("15.5".into()),
        category: Some("".into()),
        date: Some("2024-04-04".into()),
    };
    let out = ledger
        .apply(LedgerCommand::Edit { id: id.clone(), patch }, now())
        .unwrap();
    assert!(out.changed);
    let e = ledger.find(&id).unwrap();
    assert_eq!(e.title, "Cab");
    assert_eq!(e.category, None);
    assert_eq!(e.date, "2024-04-04");
    assert_eq!(e.created_at, before.created_at);
}

#[test]
fn unknown_ids_are_silent_noops() {
    let mut ledger = Ledger::default();
    create(&mut ledger, draft("Taxi", "14", "", "2024-04-03", false));
    let snapshot = ledger.entries().to_vec();

    let out = ledger
        .apply(LedgerCommand::Delete { id: "nope".into() }, now())
        .unwrap();
    assert!(!out.changed);
    let out = ledger
        .apply(
            LedgerCommand::Edit {
                id: "nope".into(),
                patch: EntryPatch::default(),
            },
            now(),
        )
        .unwrap();
    assert!(!out.changed);
    assert!(!ledger.apply(LedgerCommand::Cancel, now()).unwrap().changed);
    assert_eq!(ledger.entries(), snapshot.as_slice());
}

#[test]
fn delete_wipe_and_import_replace_contents() {
    let mut ledger = Ledger::default();
    let a = create(&mut ledger, draft("A", "1", "", "2024-04-01", false));
    create(&mut ledger, draft("B", "2", "", "2024-04-01", false));

    assert!(ledger.apply(LedgerCommand::Delete { id: a.clone() }, now()).unwrap().changed);
    assert!(ledger.find(&a).is_none());
    assert_eq!(ledger.entries().len(), 1);

    let replacement: Vec<Entry> = ledger.entries().to_vec();
    assert!(ledger.apply(LedgerCommand::Wipe, now()).unwrap().changed);
    assert!(ledger.entries().is_empty());
    assert!(!ledger.apply(LedgerCommand::Wipe, now()).unwrap().changed);

    ledger.apply(LedgerCommand::Import(replacement), now()).unwrap();
    assert_eq!(ledger.entries().len(), 1);
}

#[test]
fn refresh_backfills_after_create() {
    let mut ledger = Ledger::default();
    create(&mut ledger, draft("Rent", "600", "Housing", "2024-01-01", true));
    let today = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
    let refresh = ledger.refresh(today);
    assert!(refresh.changed());
    assert_eq!(refresh.added, 3);
    assert_eq!(ledger.entries().len(), 4);
    assert!(!ledger.refresh(today).changed());

    let view = ledger.view(&QueryState::default(), today);
    assert_eq!(view.page.rows[0].date, "2024-04-01");
    assert_eq!(view.summary.current_month_total, Decimal::from(600));
    assert_eq!(view.categories, vec!["Housing".to_string()]);
}

#[test]
fn category_index_is_distinct_sorted_and_case_sensitive() {
    let mut ledger = Ledger::default();
    for (t, c) in [
        ("a", "travel"),
        ("b", "Food"),
        ("c", ""),
        ("d", "food"),
        ("e", "Bills"),
        ("f", "Food"),
    ] {
        create(&mut ledger, draft(t, "1", c, "2024-04-01", false));
    }
    assert_eq!(
        categories(ledger.entries()),
        vec!["Bills", "food", "Food", "travel"]
    );
    assert!(categories(&[]).is_empty());
}
