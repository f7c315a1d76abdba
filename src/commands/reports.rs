// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::entries::query_state;
use super::{open_ledger, today};
use crate::settings::Settings;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use rusqlite::Connection;

pub fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let settings = Settings::load(conn)?;
    let state = query_state(sub, &settings)?;
    let today = today();
    let ledger = open_ledger(conn, today)?;
    let view = ledger.view(&state, today);
    let s = &view.summary;

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), s)? {
        return Ok(());
    }

    let kpis = vec![
        vec!["This month".to_string(), settings.money(s.current_month_total)],
        vec!["All time".to_string(), settings.money(s.all_time_total)],
        vec!["Entries".to_string(), s.entry_count.to_string()],
        vec![
            format!("Page {} / {}", view.page.page, view.page.total_pages),
            settings.money(s.page_total),
        ],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], kpis));

    let breakdown: Vec<Vec<String>> = s
        .category_breakdown
        .iter()
        .map(|c| {
            vec![
                c.label.clone(),
                settings.money(c.total),
                format!("{:.1}%", c.share.saturating_mul(Decimal::ONE_HUNDRED)),
                c.color.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Total", "Share", "Color"], breakdown)
    );
    Ok(())
}
