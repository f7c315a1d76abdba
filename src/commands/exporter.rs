// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{open_ledger, required, today};
use crate::ledger::transfer::export_json;
use crate::models::Entry;
use anyhow::{bail, Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "json".into());
    let out = required(sub, "out")?;
    if fmt != "json" && fmt != "csv" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let ledger = open_ledger(conn, today())?;
    match fmt.as_str() {
        "csv" => write_csv(out, ledger.entries())?,
        _ => std::fs::write(out, export_json(ledger.entries())?)
            .with_context(|| format!("Write {}", out))?,
    }
    println!("Exported {} expenses to {}", ledger.entries().len(), out);
    Ok(())
}

fn write_csv(out: &str, entries: &[Entry]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
    wtr.write_record([
        "id",
        "title",
        "amount",
        "category",
        "date",
        "createdAt",
        "recurring",
        "recurringKey",
    ])?;
    for e in entries {
        wtr.write_record([
            e.id.clone(),
            e.title.clone(),
            e.amount.to_string(),
            e.category.clone().unwrap_or_default(),
            e.date.clone(),
            e.created_at.clone(),
            e.is_recurring().to_string(),
            e.recurring_key
                .as_ref()
                .map(|k| k.to_string())
                .unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
