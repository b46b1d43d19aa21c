//! Library module for dbgrep-cli.
//!
//! Exposes the CLI surface and the search driver so integration tests can
//! exercise them. The binary entry point is in main.rs.

use clap::{Args, Parser};
use std::path::PathBuf;

pub mod console;
pub mod output;
pub mod search;

/// CLI argument structure
#[derive(Debug, Parser)]
#[command(name = "dbgrep")]
#[command(about = "Brute-force value search across every table of a SQL Server database")]
#[command(version)]
#[command(long_about = r#"
dbgrep - brute-force value search for SQL Server

Connects to a database, walks every base table, and probes every searchable
column for a value. The default comparison is case-insensitive substring
matching; --exact and --case-sensitive tighten it.

CONNECTION (environment variables):
  DATABASE__HOST      Server host (default: localhost)
  DATABASE__PORT      Server port (default: 1433)
  DATABASE__DATABASE  Database name (required)
  DATABASE__USER      Login user (required)
  DATABASE__PASSWORD  Login password (required)

EXAMPLES:
  dbgrep "John Doe"
  dbgrep 12345 --exact
  dbgrep test --case-sensitive --table-pattern "ny%"
  dbgrep value --start-from cmem --skip-tables "cmlog,temp*"
  dbgrep value --stop-on-first --output results.json
"#)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Value to search for
    #[arg(help = "Value to search for (prompted interactively when omitted)")]
    pub search_value: Option<String>,

    /// Match exact values
    #[arg(long, help = "Search for exact matches only")]
    pub exact: bool,

    /// Compare case-sensitively
    #[arg(long, help = "Case-sensitive search")]
    pub case_sensitive: bool,

    /// Filter tables by LIKE pattern
    #[arg(
        long,
        value_name = "PATTERN",
        help = "SQL LIKE pattern to filter tables (e.g. \"ny%\")"
    )]
    pub table_pattern: Option<String>,

    /// Start the scan at this table
    #[arg(
        long,
        value_name = "TABLE",
        help = "Start searching from this table name, then continue with all others"
    )]
    pub start_from: Option<String>,

    /// Tables to skip
    #[arg(
        long,
        value_name = "LIST",
        help = "Comma-separated list of table names to skip (a '*' suffix skips by prefix)"
    )]
    pub skip_tables: Option<String>,

    /// Stop at the first matching table
    #[arg(long, help = "Stop searching after finding the first match")]
    pub stop_on_first: bool,

    /// Save results to a JSON file
    #[arg(long, value_name = "FILE", help = "Save results as JSON to this file")]
    pub output: Option<PathBuf>,
}

/// Flags shared by every invocation
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, help = "Suppress all log output except errors")]
    pub quiet: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["dbgrep", "needle"]).unwrap();

        assert_eq!(cli.search_value.as_deref(), Some("needle"));
        assert!(!cli.exact);
        assert!(!cli.case_sensitive);
        assert!(!cli.stop_on_first);
        assert!(cli.table_pattern.is_none());
        assert!(cli.start_from.is_none());
        assert!(cli.skip_tables.is_none());
        assert!(cli.output.is_none());
        assert_eq!(cli.global.verbose, 0);
        assert!(!cli.global.quiet);
    }

    #[test]
    fn test_cli_search_value_is_optional() {
        let cli = Cli::try_parse_from(["dbgrep"]).unwrap();
        assert!(cli.search_value.is_none());
    }

    #[test]
    fn test_cli_verbose_counts() {
        let cli = Cli::try_parse_from(["dbgrep", "-vv", "needle"]).unwrap();
        assert_eq!(cli.global.verbose, 2);
    }
}
