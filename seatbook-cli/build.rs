//! Build script for seatbook-cli.
//!
//! Generates the `seatbook.1` man page into `OUT_DIR` with clap_mangen.
//!
//! The command tree is declared here rather than imported, since build
//! scripts cannot depend on the crate being built. Keep it in step with
//! src/cli.rs.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("seatbook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book, move, cancel and confirm flight seats")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("SEATBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the database lock wait (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("SEATBOOK_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format")
                .value_parser(["human", "json"])
                .default_value("human")
                .global(true)
                .env("SEATBOOK_OUTPUT_FORMAT"),
        )
        .subcommands(vec![
            Command::new("init").about("Initialize the data directory and database"),
            Command::new("user")
                .about("Register or list users")
                .subcommands([
                    Command::new("add").about("Register a user"),
                    Command::new("list").about("List registered users"),
                ]),
            Command::new("seat")
                .about("Add or list seats")
                .subcommands([
                    Command::new("add").about("Add a free seat to the inventory"),
                    Command::new("list").about("List seats"),
                ]),
            Command::new("book").about("Book a free seat"),
            Command::new("modify").about("Move a reservation to another seat of the same class"),
            Command::new("cancel").about("Cancel a reservation and free its seat"),
            Command::new("confirm").about("Confirm one reservation"),
            Command::new("confirm-batch")
                .about("Confirm several reservations at once, or none of them"),
            Command::new("show").about("Show one reservation with its seat and history"),
            Command::new("list").about("List reservations"),
            Command::new("report").about("Summarize users, seats and reservations"),
            Command::new("audit").about("Check that seat occupancy agrees with live reservations"),
            Command::new("validate")
                .about("Validate a configuration file, or print the effective configuration"),
            Command::new("completions").about("Generate shell completion scripts"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer).unwrap();
    fs::write(man_dir.join("seatbook.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
