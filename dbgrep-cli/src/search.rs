//! The search driver: connect, enumerate, plan, then scan table by table.
//!
//! Table failures are recorded and skipped, never fatal; only configuration,
//! connection, and output errors abort a run.

use dbgrep_core::models::{MatchRecord, RunStats, SearchReport, TableSkip};
use dbgrep_core::planner::plan;
use dbgrep_core::scanner::scan_table;
use dbgrep_core::{ConnectionConfig, MatchPredicate, Result, catalog, connect};

use crate::{Cli, console, output};

/// Runs one complete search. Returns whether at least one column matched.
///
/// # Errors
/// Fails on unusable configuration, connection establishment, table
/// enumeration, and report writing. Per-table and per-column query failures
/// are skipped and reported instead.
pub async fn run(cli: Cli) -> Result<bool> {
    let search_value = match &cli.search_value {
        Some(value) => value.clone(),
        None => console::prompt_search_value()?,
    };

    console::print_header(&cli, &search_value);

    println!("Connecting to database...");
    let config = ConnectionConfig::from_env()?;
    let mut client = connect(&config).await?;
    println!("Connected successfully!\n");

    println!("Fetching table list...");
    let tables = catalog::list_tables(&mut client, cli.table_pattern.as_deref()).await?;
    println!("Found {} tables\n", tables.len());

    let (planned, stats) = plan(tables, cli.start_from.as_deref(), cli.skip_tables.as_deref());
    console::print_plan(&stats, cli.start_from.as_deref());

    let predicate = MatchPredicate::from_flags(cli.exact, cli.case_sensitive);
    let mut matches: Vec<MatchRecord> = Vec::new();
    let mut run_stats = RunStats::default();

    for (index, table) in planned.iter().enumerate() {
        console::print_progress(index + 1, planned.len(), table);

        match scan_table(&mut client, table, &search_value, predicate).await {
            Ok(scan) => {
                run_stats.record_scan(&scan);
                matches.extend(scan.matches);
            }
            Err(error) => {
                tracing::warn!("{error}");
                run_stats.skipped_tables.push(TableSkip {
                    table: table.bracketed(),
                    reason: error.reason(),
                });
            }
        }

        if cli.stop_on_first && !matches.is_empty() {
            println!("\n\nFirst match found in {table}! Stopping search.");
            break;
        }
    }

    tracing::debug!(
        "Scanned {} of {} planned table(s), {} matching column(s)",
        run_stats.tables_scanned,
        planned.len(),
        matches.len()
    );

    console::print_completion();
    println!("{}", console::format_results(&matches, &search_value));
    console::print_skip_report(&run_stats);

    let found = !matches.is_empty();
    if let Some(path) = &cli.output {
        let report = SearchReport::new(search_value, matches);
        output::save_report(&report, path).await?;
        println!("\nResults saved to: {}", path.display());
    }

    Ok(found)
}
