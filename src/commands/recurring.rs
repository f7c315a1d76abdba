// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{open_ledger, save_ledger, today};
use crate::ledger::{recurring_groups, Ledger};
use crate::settings::Settings;
use crate::store::{EntryStore, SqliteStore};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("run", _)) => run(conn),
        Some(("list", sub)) => list(conn, sub),
        _ => list(conn, m),
    }
}

fn run(conn: &Connection) -> Result<()> {
    let mut ledger = Ledger::new(SqliteStore::new(conn).load()?);
    let refresh = ledger.refresh(today());
    for failure in &refresh.failures {
        eprintln!("warning: {}", failure);
    }
    if refresh.changed() {
        save_ledger(conn, &ledger)?;
    }
    println!("Added {} recurring entries", refresh.added);
    Ok(())
}

#[derive(Serialize)]
pub struct GroupRow {
    pub key: String,
    pub title: String,
    pub amount: String,
    pub category: String,
    pub since: String,
    pub occurrences: usize,
    pub status: String,
}

pub fn group_rows(conn: &Connection) -> Result<Vec<GroupRow>> {
    let settings = Settings::load(conn)?;
    let ledger = open_ledger(conn, today())?;
    let rows = recurring_groups(ledger.entries())
        .into_iter()
        .map(|g| {
            let (since, status) = match g.months() {
                Ok(months) => (
                    months.first().map(|m| m.to_string()).unwrap_or_default(),
                    "ok".to_string(),
                ),
                Err(err) => (String::new(), err.to_string()),
            };
            GroupRow {
                key: g.key.to_string(),
                title: g.template.title.clone(),
                amount: settings.money(g.template.amount),
                category: g.template.category_label().to_string(),
                since,
                occurrences: g.members.len(),
                status,
            }
        })
        .collect();
    Ok(rows)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = group_rows(conn)?;
    let json = sub.try_get_one::<bool>("json").ok().flatten().copied().unwrap_or(false);
    let jsonl = sub.try_get_one::<bool>("jsonl").ok().flatten().copied().unwrap_or(false);
    if !maybe_print_json(json, jsonl, &data)? {
        let rows = data
            .into_iter()
            .map(|r| {
                vec![
                    r.title,
                    r.amount,
                    r.category,
                    r.since,
                    r.occurrences.to_string(),
                    r.status,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Title", "Amount", "Category", "Since", "Occurrences", "Status"],
                rows
            )
        );
    }
    Ok(())
}
