// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
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
            .help("Print one JSON object per line"),
    )
}

fn period_args(cmd: Command, default: &'static str) -> Command {
    cmd.arg(
        Arg::new("period")
            .long("period")
            .value_parser(["all", "week", "month", "year"])
            .default_value(default)
            .help("Restrict to the week, month or year containing --as-of"),
    )
    .arg(
        Arg::new("as_of")
            .long("as-of")
            .value_name("DATE")
            .help("Reference date for --period (default: now)"),
    )
}

fn type_arg(required: bool) -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
        .required(required)
}

fn stats_command(name: &'static str, about: &'static str) -> Command {
    json_args(period_args(Command::new(name).about(about), "month"))
}

pub fn build_cli() -> Command {
    Command::new("tallybook")
        .about("Track income and expenses and see where the money goes")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the database if missing"))
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(type_arg(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD[ HH:MM[:SS]] (default: now)"),
                        )
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Change fields of a transaction")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("title").long("title"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(type_arg(false))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date"))
                        .arg(
                            Arg::new("notes")
                                .long("notes")
                                .help("Replace notes; pass an empty string to clear"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(json_args(
                    Command::new("show")
                        .about("Show one transaction")
                        .arg(Arg::new("id").required(true)),
                ))
                .subcommand(json_args(period_args(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .short('s')
                                .help("Case-insensitive match on title or category"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["all", "income", "expense"])
                                .default_value("all"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                    "all",
                ))),
        )
        .subcommand(
            Command::new("stats")
                .about("Totals, breakdowns and insights")
                .subcommand(stats_command("summary", "Income, expense and balance"))
                .subcommand(
                    stats_command("categories", "Totals per category, largest first")
                        .arg(
                            Arg::new("expense_only")
                                .long("expense-only")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(
                            Arg::new("top")
                                .long("top")
                                .value_parser(value_parser!(usize)),
                        ),
                )
                .subcommand(stats_command("monthly", "Income and expense per month"))
                .subcommand(stats_command(
                    "insights",
                    "Average daily spend, largest expense, most common category",
                )),
        )
        .subcommand(
            Command::new("category")
                .about("Suggested categories")
                .subcommand(Command::new("list").arg(type_arg(false))),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("config")
                .about("Read or change settings")
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored records for problems"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }
}
