// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{open_ledger, required, run_command, today};
use crate::ledger::transfer::parse_import;
use crate::ledger::LedgerCommand;
use anyhow::{Context, Result};
use rusqlite::Connection;

/// Replaces the stored collection with the file's entries, or leaves it
/// untouched if any element is invalid.
pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = required(sub, "path")?.trim();
    let text = std::fs::read_to_string(path).with_context(|| format!("Open {}", path))?;
    let entries = parse_import(&text).with_context(|| format!("Import failed for {}", path))?;
    let count = entries.len();

    let mut ledger = open_ledger(conn, today())?;
    run_command(conn, &mut ledger, LedgerCommand::Import(entries))?;
    println!("Imported {} expenses from {}", count, path);
    Ok(())
}
