//---------------------------------------------------------------------------//
// Copyright (c) 2026 the rpgxp contributors.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

// CLI driver for the rpgxp data pipeline.

use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand};

mod commands;

const PROGRAM_NAME: &str = "rpgxp";

#[derive(Parser)]
#[command(name = PROGRAM_NAME, version, author, about = "Turns an RPG Maker XP project's .rxdata files into a normalized SQLite database.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prints the generated schema.sql to stdout without touching any database.
    Schema,

    /// Decodes every .rxdata file, scans game assets, and (re)builds the database.
    Import {
        /// Path to the project's configuration file.
        #[arg(short, long, value_name = "FILE", default_value = "rpgxp.toml")]
        config: PathBuf,
    },

    /// Runs the foreign-key violation report against an already-built database.
    Check {
        /// Path to the project's configuration file.
        #[arg(short, long, value_name = "FILE", default_value = "rpgxp.toml")]
        config: PathBuf,
    },
}

fn main() {
    rpgxp_lib::integrations::log::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Schema => commands::schema::run(),
        Command::Import { config } => commands::import::run(&config),
        Command::Check { config } => commands::check::run(&config),
    };

    if let Err(error) = result {
        tracing::error!("{error:#}");
        exit(1);
    }
}
