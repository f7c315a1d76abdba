// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{open_ledger, run_command, today};
use crate::ledger::LedgerCommand;
use crate::models::EntryDraft;
use anyhow::Result;
use rusqlite::Connection;

const DEMO: [(&str, &str, &str, bool); 4] = [
    ("Groceries", "24.5", "Food", false),
    ("Bus pass", "18.0", "Transport", false),
    ("Coffee", "3.2", "Food", false),
    ("Rent", "600.00", "Housing", true),
];

/// Seeds the demo expenses, dated today. Does nothing if the ledger has entries.
pub fn handle(conn: &Connection) -> Result<()> {
    let today = today();
    let mut ledger = open_ledger(conn, today)?;
    if !ledger.entries().is_empty() {
        println!("Ledger already has {} expenses; demo not seeded", ledger.entries().len());
        return Ok(());
    }
    for (title, amount, category, recurring) in DEMO {
        let draft = EntryDraft {
            title: title.into(),
            amount: amount.into(),
            category: category.into(),
            date: today.format("%Y-%m-%d").to_string(),
            recurring,
        };
        run_command(conn, &mut ledger, LedgerCommand::Create(draft))?;
    }
    println!("Seeded {} demo expenses", DEMO.len());
    Ok(())
}
