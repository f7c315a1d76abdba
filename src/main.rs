// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use spendbook::{cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("add", sub)) => commands::entries::add(&conn, sub)?,
        Some(("edit", sub)) => commands::entries::edit(&conn, sub)?,
        Some(("rm", sub)) => commands::entries::remove(&conn, sub)?,
        Some(("list", sub)) => commands::entries::list(&conn, sub)?,
        Some(("wipe", sub)) => commands::entries::wipe(&conn, sub)?,
        Some(("summary", sub)) => commands::reports::summary(&conn, sub)?,
        Some(("categories", sub)) => commands::categories::handle(&conn, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("import", sub)) => commands::importer::handle(&conn, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        Some(("demo", _)) => commands::demo::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
