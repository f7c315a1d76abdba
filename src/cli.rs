// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON value per line"),
    )
}

fn query_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("month").long("month").help("Only entries in YYYY-MM"))
        .arg(
            Arg::new("category")
                .long("category")
                .help("Only entries with exactly this category"),
        )
        .arg(
            Arg::new("search")
                .long("search")
                .help("Case-insensitive title substring"),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .default_value("date")
                .value_parser(["date", "title", "category", "amount"]),
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .value_parser(["asc", "desc"])
                .help("Defaults to asc for title/category, desc for date/amount"),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .value_parser(value_parser!(usize))
                .default_value("1"),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .value_parser(value_parser!(usize))
                .help("Rows per page (defaults to the page-size setting)"),
        )
}

fn entry_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("title").long("title").required(required))
        .arg(
            Arg::new("amount")
                .long("amount")
                .required(required)
                .allow_hyphen_values(true),
        )
        .arg(Arg::new("category").long("category"))
        .arg(Arg::new("date").long("date").help("YYYY-MM-DD"))
}

pub fn build_cli() -> Command {
    Command::new("spendbook")
        .version(clap::crate_version!())
        .about("Personal expense ledger with recurring backfill and category summaries")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            entry_fields(Command::new("add").about("Record an expense"), true).arg(
                Arg::new("recurring")
                    .long("recurring")
                    .action(ArgAction::SetTrue)
                    .help("Repeat on the 1st of every following month"),
            ),
        )
        .subcommand(entry_fields(
            Command::new("edit")
                .about("Change an expense")
                .arg(Arg::new("id").required(true)),
            false,
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete an expense")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(json_flags(query_args(
            Command::new("list").about("List expenses"),
        )))
        .subcommand(json_flags(query_args(
            Command::new("summary").about("Totals and category breakdown"),
        )))
        .subcommand(json_flags(
            Command::new("categories").about("Categories in use"),
        ))
        .subcommand(
            Command::new("recurring")
                .about("Recurring expenses")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("run").about("Backfill missing months now")),
        )
        .subcommand(
            Command::new("export")
                .about("Write every expense to a file")
                .arg(Arg::new("out").long("out").required(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("json")
                        .help("json|csv"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Replace the ledger with an exported JSON file")
                .arg(Arg::new("path").long("path").required(true)),
        )
        .subcommand(
            Command::new("wipe").about("Delete ALL expenses").arg(
                Arg::new("yes")
                    .long("yes")
                    .action(ArgAction::SetTrue)
                    .help("Confirm"),
            ),
        )
        .subcommand(
            Command::new("settings")
                .about("Display preferences")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true).help("currency|locale|page-size"))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for problems"))
        .subcommand(Command::new("demo").about("Seed demo expenses into an empty ledger"))
}
