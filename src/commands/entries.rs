// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{open_ledger, required, run_command, today};
use crate::ledger::{Filter, LedgerCommand, Pagination, QueryState, SortDirection, SortKey, SortSpec};
use crate::models::{Entry, EntryDraft, EntryPatch};
use crate::settings::Settings;
use crate::utils::{maybe_print_json, parse_month, pretty_table};
use anyhow::{anyhow, bail, Result};
use rusqlite::Connection;

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let draft = EntryDraft {
        title: required(sub, "title")?.clone(),
        amount: required(sub, "amount")?.clone(),
        category: sub.get_one::<String>("category").cloned().unwrap_or_default(),
        date: sub.get_one::<String>("date").cloned().unwrap_or_default(),
        recurring: sub.get_flag("recurring"),
    };
    let mut ledger = open_ledger(conn, today())?;
    let outcome = run_command(conn, &mut ledger, LedgerCommand::Create(draft))?;
    if let Some(entry) = outcome.id.as_deref().and_then(|id| ledger.find(id)) {
        let settings = Settings::load(conn)?;
        println!(
            "Recorded {} '{}' on {} (id: {})",
            settings.money(entry.amount),
            entry.title,
            entry.date,
            entry.id
        );
    }
    Ok(())
}

pub fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?.clone();
    let patch = EntryPatch {
        title: sub.get_one::<String>("title").cloned(),
        amount: sub.get_one::<String>("amount").cloned(),
        category: sub.get_one::<String>("category").cloned(),
        date: sub.get_one::<String>("date").cloned(),
    };
    let mut ledger = open_ledger(conn, today())?;
    let outcome = run_command(conn, &mut ledger, LedgerCommand::Edit { id: id.clone(), patch })?;
    if outcome.changed {
        println!("Updated {}", id);
    } else {
        println!("No expense with id {}", id);
    }
    Ok(())
}

pub fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?.clone();
    let mut ledger = open_ledger(conn, today())?;
    let outcome = run_command(conn, &mut ledger, LedgerCommand::Delete { id: id.clone() })?;
    if outcome.changed {
        println!("Deleted {}", id);
    } else {
        println!("No expense with id {}", id);
    }
    Ok(())
}

pub fn wipe(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    if !sub.get_flag("yes") {
        bail!("Refusing to delete ALL expenses without --yes");
    }
    let mut ledger = open_ledger(conn, today())?;
    let count = ledger.entries().len();
    run_command(conn, &mut ledger, LedgerCommand::Wipe)?;
    println!("Deleted {} expenses", count);
    Ok(())
}

/// Reads filter, sort and paging arguments shared by `list` and `summary`.
pub fn query_state(sub: &clap::ArgMatches, settings: &Settings) -> Result<QueryState> {
    let month = match sub.get_one::<String>("month") {
        Some(m) if !m.is_empty() => Some(parse_month(m)?),
        _ => None,
    };
    let key = sub
        .get_one::<String>("sort")
        .map(|s| s.parse::<SortKey>())
        .transpose()
        .map_err(|e: String| anyhow!(e))?
        .unwrap_or(SortKey::Date);
    let direction = sub
        .get_one::<String>("dir")
        .map(|s| s.parse::<SortDirection>())
        .transpose()
        .map_err(|e: String| anyhow!(e))?;
    let page = sub.get_one::<usize>("page").copied().unwrap_or(1);
    let page_size = sub
        .get_one::<usize>("page-size")
        .copied()
        .unwrap_or(settings.page_size);

    Ok(QueryState {
        sort: SortSpec::new(key, direction),
        filter: Filter {
            month,
            category: sub.get_one::<String>("category").cloned(),
            search: sub.get_one::<String>("search").cloned(),
        },
        pagination: Pagination::new(page, page_size),
    })
}

pub fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let settings = Settings::load(conn)?;
    let state = query_state(sub, &settings)?;
    let today = today();
    let ledger = open_ledger(conn, today)?;
    let view = ledger.view(&state, today);

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view.page.rows)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = view
        .page
        .rows
        .iter()
        .map(|e| entry_row(e, &settings))
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Title", "Category", "Amount", "Id"], rows)
    );
    println!(
        "Page {} / {} · {} matching · page total {}",
        view.page.page,
        view.page.total_pages,
        view.page.total,
        settings.money(view.summary.page_total)
    );
    Ok(())
}

fn entry_row(e: &Entry, settings: &Settings) -> Vec<String> {
    let mut category = e.category_name().unwrap_or("—").to_string();
    if e.is_recurring() {
        category.push_str(" • Recurring");
    }
    vec![
        e.date.clone(),
        e.title.clone(),
        category,
        settings.money(e.amount),
        e.id.clone(),
    ]
}
