// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod demo;
pub mod doctor;
pub mod entries;
pub mod exporter;
pub mod importer;
pub mod recurring;
pub mod reports;
pub mod settings;

use crate::ledger::{Ledger, LedgerCommand, Outcome};
use crate::store::{EntryStore, SqliteStore};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::warn;

pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Loads the ledger and brings recurring entries up to `today`, saving when
/// that added anything. Every command that reads entries starts here.
pub fn open_ledger(conn: &Connection, today: NaiveDate) -> Result<Ledger> {
    let store = SqliteStore::new(conn);
    let mut ledger = Ledger::new(store.load().context("Load entries")?);
    let refresh = ledger.refresh(today);
    for failure in &refresh.failures {
        warn!(error = %failure, "recurring backfill skipped a group");
        eprintln!("warning: {}", failure);
    }
    if refresh.changed() {
        store.save(ledger.entries()).context("Save entries")?;
    }
    Ok(ledger)
}

pub fn save_ledger(conn: &Connection, ledger: &Ledger) -> Result<()> {
    SqliteStore::new(conn)
        .save(ledger.entries())
        .context("Save entries")
}

/// Applies one command, re-runs the recurring backfill and persists if anything changed.
pub fn run_command(conn: &Connection, ledger: &mut Ledger, cmd: LedgerCommand) -> Result<Outcome> {
    let now = chrono::Utc::now();
    let outcome = ledger.apply(cmd, now)?;
    if outcome.changed {
        for failure in ledger.refresh(now.date_naive()).failures {
            eprintln!("warning: {}", failure);
        }
        save_ledger(conn, ledger)?;
    }
    Ok(outcome)
}

pub(crate) fn required<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    m.get_one::<String>(name)
        .with_context(|| format!("--{} is required", name))
}
