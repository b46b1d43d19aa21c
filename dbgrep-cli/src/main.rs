//! Brute-force value search for SQL Server databases.
//!
//! This binary connects to a database, enumerates its base tables, and
//! probes every searchable column for a user-supplied value, reporting which
//! columns contain it and a handful of sample rows.
//!
//! # Security Guarantees
//! - Read-only database operations only
//! - Credentials come from the environment and are never logged
//! - Search values are bound as query parameters, never spliced into SQL
//!
//! # Exit Codes
//! 0 when at least one matching column was found, 1 otherwise, including on
//! any fatal error.

use clap::Parser;
use dbgrep_cli::{Cli, search};
use dbgrep_core::logging::init_logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_logging(cli.global.verbose, cli.global.quiet) {
        eprintln!("Error: {error}");
        return ExitCode::FAILURE;
    }

    match search::run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("\nError: {error}");
            ExitCode::FAILURE
        }
    }
}
