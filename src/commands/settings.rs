// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::settings::Settings;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = required(sub, "key")?;
            let value = required(sub, "value")?;
            let mut settings = Settings::load(conn)?;
            settings.set(key, value)?;
            settings.save(conn)?;
            println!("{} = {}", key, value);
        }
        _ => {
            let s = Settings::load(conn)?;
            println!(
                "{}",
                pretty_table(
                    &["Setting", "Value"],
                    vec![
                        vec!["currency".into(), s.currency],
                        vec!["locale".into(), s.locale],
                        vec!["page-size".into(), s.page_size.to_string()],
                    ],
                )
            );
        }
    }
    Ok(())
}
