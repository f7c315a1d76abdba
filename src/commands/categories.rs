// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{open_ledger, today};
use crate::ledger::categories;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = open_ledger(conn, today())?;
    let names = categories(ledger.entries());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &names)? {
        let data = names.into_iter().map(|n| vec![n]).collect();
        println!("{}", pretty_table(&["Category"], data));
    }
    Ok(())
}
