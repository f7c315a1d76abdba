// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::recurring_groups;
use crate::models::{Entry, RecurringKey};
use crate::store::{EntryStore, SqliteStore};
use crate::utils::{parse_date, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use rusqlite::Connection;
use std::collections::{HashMap, HashSet};

/// `(issue, detail)` pairs for everything suspicious in the stored entries.
pub fn findings(entries: &[Entry]) -> Vec<(String, String)> {
    let mut rows = Vec::new();

    // 1) Dates that break month bucketing and recurring backfill
    for e in entries {
        if parse_date(&e.date).is_err() {
            rows.push(("bad_date".into(), format!("{} '{}'", e.id, e.date)));
        }
    }

    // 2) Amounts that bypassed validation (imports are not re-checked)
    for e in entries.iter().filter(|e| e.amount <= Decimal::ZERO) {
        rows.push(("non_positive_amount".into(), format!("{} {}", e.id, e.amount)));
    }

    // 3) Duplicate ids
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for e in entries {
        if !seen.insert(e.id.as_str()) && reported.insert(e.id.as_str()) {
            rows.push(("duplicate_id".into(), e.id.clone()));
        }
    }

    // 4) Recurring entries edited since their key was stored
    for e in entries.iter().filter(|e| e.is_recurring()) {
        if let Some(stored) = &e.recurring_key {
            let current = RecurringKey::compose(&e.title, e.amount, e.category.as_deref());
            if &current != stored {
                rows.push((
                    "recurring_key_drift".into(),
                    format!("{} stored '{}' now '{}'", e.id, stored, current),
                ));
            }
        }
    }

    // 5) Unrelated expenses merged under one key
    for g in recurring_groups(entries) {
        let mut shapes: HashMap<(&str, Decimal, &str), usize> = HashMap::new();
        for m in &g.members {
            *shapes
                .entry((m.title.as_str(), m.amount.normalize(), m.category_label()))
                .or_default() += 1;
        }
        if shapes.len() > 1 {
            rows.push((
                "recurring_key_collision".into(),
                format!("'{}' groups {} different expenses", g.key, shapes.len()),
            ));
        }
    }

    rows
}

pub fn handle(conn: &Connection) -> Result<()> {
    let entries = SqliteStore::new(conn).load()?;
    let rows: Vec<Vec<String>> = findings(&entries)
        .into_iter()
        .map(|(issue, detail)| vec![issue, detail])
        .collect();

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
