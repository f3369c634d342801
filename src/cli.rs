// Copyright (c) 2025 Centavo Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn with_json(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON Lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("centavo")
        .about("Personal finance tracking with streaks, goals, and net worth history")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("profile")
                .about("Manage profiles (the active profile scopes every other command)")
                .subcommand(
                    Command::new("add")
                        .about("Create a profile")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("admin")
                                .long("admin")
                                .action(ArgAction::SetTrue)
                                .help("Grant the admin role"),
                        ),
                )
                .subcommand(Command::new("list").about("List profiles"))
                .subcommand(
                    Command::new("use")
                        .about("Switch the active profile")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("show").about("Show the active profile"))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a profile and all its data")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("config").about("Settings").subcommand(
                Command::new("currency")
                    .about("Get or set the display currency")
                    .arg(Arg::new("code")),
            ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage income/expense categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income|expense"),
                        )
                        .arg(Arg::new("icon").long("icon"))
                        .arg(Arg::new("color").long("color").help("Hex color, e.g. #22c55e")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List categories")
                        .arg(Arg::new("type").long("type").help("income|expense")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction (counts as today's activity)")
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income|expense"),
                        )
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(with_json(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("type").long("type").help("income|expense"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Add a goal")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("deadline").long("deadline").help("YYYY-MM-DD"))
                        .arg(Arg::new("icon").long("icon"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(with_json(Command::new("list").about("List goals with progress")))
                .subcommand(
                    Command::new("contribute")
                        .about("Add to a goal's saved amount")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Edit a goal")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("title").long("title"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("saved").long("saved").help("Overwrite the saved amount"))
                        .arg(Arg::new("deadline").long("deadline")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a goal")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(holding_command(
            "asset",
            "Track assets (cash, investments, property, vehicles)",
            "cash|investment|property|vehicle|other",
        ))
        .subcommand(holding_command(
            "liability",
            "Track liabilities (credit cards, loans, mortgages)",
            "credit_card|loan|mortgage|other",
        ))
        .subcommand(
            Command::new("networth")
                .about("Net worth totals and snapshot history")
                .subcommand(with_json(
                    Command::new("summary").about("Assets minus liabilities, right now"),
                ))
                .subcommand(with_json(
                    Command::new("history").about("Dated snapshots, oldest first"),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Dashboard aggregates")
                .subcommand(with_json(
                    Command::new("summary")
                        .about("Month totals, balance, and change vs the previous month")
                        .arg(Arg::new("month").long("month").help("YYYY-MM (default: current)")),
                ))
                .subcommand(with_json(
                    Command::new("trend").about("Income/expense totals for the last 6 months"),
                ))
                .subcommand(with_json(
                    Command::new("breakdown")
                        .about("Expense totals per category, largest first")
                        .arg(Arg::new("month").long("month").help("YYYY-MM (default: current)")),
                )),
        )
        .subcommand(
            Command::new("streak")
                .about("Daily activity streak")
                .subcommand(Command::new("status").about("Current and longest streak")),
        )
        .subcommand(
            Command::new("badge")
                .about("Earned badges")
                .subcommand(Command::new("list").about("List awarded badges")),
        )
        .subcommand(
            Command::new("chat")
                .about("Ask the assistant about your finances")
                .subcommand(
                    Command::new("send")
                        .about("Send a message and print the reply")
                        .arg(Arg::new("message").required(true)),
                )
                .subcommand(Command::new("history").about("Show the conversation log"))
                .subcommand(Command::new("clear").about("Delete the conversation log")),
        )
        .subcommand(
            Command::new("admin")
                .about("Admin-only views")
                .subcommand(with_json(
                    Command::new("overview").about("Totals across all profiles"),
                )),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Export the active profile's transactions")
                    .arg(Arg::new("format").long("format").required(true).help("csv|json"))
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Report data inconsistencies"))
}

fn holding_command(name: &'static str, about: &'static str, kinds: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .subcommand(
            Command::new("add")
                .about("Add an entry (appends a net worth snapshot)")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("type").long("type").required(true).help(kinds))
                .arg(Arg::new("value").long("value").required(true)),
        )
        .subcommand(Command::new("list").about("List entries"))
        .subcommand(
            Command::new("edit")
                .about("Edit an entry (appends a net worth snapshot)")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("type").long("type").help(kinds))
                .arg(Arg::new("value").long("value")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete an entry (appends a net worth snapshot)")
                .arg(Arg::new("id").required(true)),
        )
}
