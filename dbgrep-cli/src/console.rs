//! Console output for the search run.
//!
//! Everything here writes to stdout; diagnostics go through `tracing` to
//! stderr. [`format_results`] is a pure function so the report layout stays
//! testable.

use std::io::{self, Write};

use dbgrep_core::models::{FilterStats, MatchRecord, RunStats, TableRef};
use dbgrep_core::{DbGrepError, Result};

use crate::Cli;

/// Width of the header and section rulers.
const RULER_WIDTH: usize = 80;

/// Sample values longer than this are truncated in console output. The saved
/// JSON keeps full values.
const MAX_VALUE_DISPLAY: usize = 100;

fn ruler() -> String {
    "=".repeat(RULER_WIDTH)
}

/// Prints the parameter echo block at the top of a run.
pub fn print_header(cli: &Cli, search_value: &str) {
    let ruler = ruler();
    println!("\n{ruler}");
    println!("dbgrep - database value search");
    println!("{ruler}");
    println!("Search value: '{search_value}'");
    println!("Exact match: {}", cli.exact);
    println!("Case sensitive: {}", cli.case_sensitive);
    if let Some(pattern) = &cli.table_pattern {
        println!("Table pattern: {pattern}");
    }
    if let Some(table) = &cli.start_from {
        println!("Starting from table: {table}");
    }
    if let Some(list) = &cli.skip_tables {
        println!("Skipping tables: {list}");
    }
    if cli.stop_on_first {
        println!("Stop on first match: Yes");
    }
    println!("{ruler}\n");
}

/// Asks for the search value on stdin when none was given on the command
/// line.
///
/// # Errors
/// Fails with a configuration error when the trimmed input is empty, and
/// with an I/O error when stdin or stdout is unusable.
pub fn prompt_search_value() -> Result<String> {
    let ruler = ruler();
    println!("\n{ruler}");
    println!("dbgrep - interactive mode");
    println!("{ruler}");
    print!("\nEnter the value to search for: ");
    io::stdout()
        .flush()
        .map_err(|e| DbGrepError::io("Failed to flush stdout", e))?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| DbGrepError::io("Failed to read search value", e))?;

    let value = line.trim().to_string();
    if value.is_empty() {
        return Err(DbGrepError::configuration("Search value cannot be empty"));
    }
    Ok(value)
}

/// Reports how the table list was reordered and filtered.
///
/// `requested_start` is the raw `--start-from` argument; when planning did
/// not find it, the scan proceeds in catalog order with a warning.
pub fn print_plan(stats: &FilterStats, requested_start: Option<&str>) {
    if let Some(started) = &stats.started_from {
        println!("Starting with table '{started}', then continuing through all others");
    } else if let Some(requested) = requested_start {
        println!("Warning: Table '{requested}' not found. Searching in default order.");
    }
    if stats.skipped_count > 0 {
        println!(
            "Skipping {} table(s): {}",
            stats.skipped_count,
            stats.skipped_patterns.join(", ")
        );
    }
    println!("Searching {} tables\n", stats.final_count);
}

/// Overwrites the current line with scan progress.
pub fn print_progress(current: usize, total: usize, table: &TableRef) {
    print!("[{current}/{total}] Searching {table}...\r");
    let _ = io::stdout().flush();
}

/// Prints the ruler block that closes the scan phase. The leading newline
/// steps past the last in-place progress line.
pub fn print_completion() {
    let ruler = ruler();
    println!("\n{ruler}");
    println!("Search complete!");
    println!("{ruler}");
}

/// Renders the final report: either a no-match line or a numbered listing of
/// every matching column with its sample values.
pub fn format_results(matches: &[MatchRecord], search_value: &str) -> String {
    if matches.is_empty() {
        return format!("\nNo matches found for '{search_value}'");
    }

    let ruler = ruler();
    let mut lines = Vec::new();
    lines.push(format!("\n{ruler}"));
    lines.push(format!(
        "Found {} column(s) containing '{search_value}'",
        matches.len()
    ));
    lines.push(format!("{ruler}\n"));

    for (index, record) in matches.iter().enumerate() {
        lines.push(format!("{}. {}.{}", index + 1, record.table, record.column));
        lines.push(format!("   Data Type: {}", record.data_type));
        lines.push(format!("   Match Count: {}", record.match_count));
        lines.push("   Sample Values:".to_string());
        for value in &record.sample_values {
            lines.push(format!("     - {}", truncate_value(value, MAX_VALUE_DISPLAY)));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Prints which tables and columns were skipped and why. Silent when the run
/// was clean.
pub fn print_skip_report(stats: &RunStats) {
    if stats.is_clean() {
        return;
    }

    println!(
        "\nSkipped during scan: {} table(s), {} column(s)",
        stats.skipped_tables.len(),
        stats.skipped_columns.len()
    );
    for skip in &stats.skipped_tables {
        println!("  - table {}: {}", skip.table, skip.reason);
    }
    for skip in &stats.skipped_columns {
        println!(
            "  - column {}.{} ({}): {}",
            skip.table, skip.column, skip.data_type, skip.reason
        );
    }
}

/// Caps a value at `max` characters, marking the cut with an ellipsis.
/// Boundaries are character-based so multibyte values never split.
fn truncate_value(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let kept: String = value.chars().take(max).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(table: &str, column: &str, count: u64, samples: &[&str]) -> MatchRecord {
        MatchRecord {
            table: table.to_string(),
            column: column.to_string(),
            data_type: "nvarchar".to_string(),
            match_count: count,
            sample_values: samples.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_ruler_is_eighty_characters() {
        assert_eq!(ruler().len(), 80);
    }

    #[test]
    fn test_truncate_value_short_is_unchanged() {
        assert_eq!(truncate_value("hello", 100), "hello");
    }

    #[test]
    fn test_truncate_value_caps_at_limit() {
        let long = "x".repeat(150);
        let shown = truncate_value(&long, 100);
        assert_eq!(shown.len(), 103);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn test_truncate_value_exact_limit_keeps_everything() {
        let value = "y".repeat(100);
        assert_eq!(truncate_value(&value, 100), value);
    }

    #[test]
    fn test_truncate_value_counts_characters_not_bytes() {
        let value = "é".repeat(120);
        let shown = truncate_value(&value, 100);
        assert_eq!(shown.chars().count(), 103);
    }

    #[test]
    fn test_format_results_no_matches() {
        let rendered = format_results(&[], "ghost");
        assert_eq!(rendered, "\nNo matches found for 'ghost'");
    }

    #[test]
    fn test_format_results_lists_each_match() {
        let matches = vec![
            record("[dbo].[users]", "email", 3, &["a@example.com"]),
            record("[hr].[staff]", "name", 12, &["Ann", "Bob"]),
        ];
        let rendered = format_results(&matches, "an");

        assert!(rendered.contains("Found 2 column(s) containing 'an'"));
        assert!(rendered.contains("1. [dbo].[users].email"));
        assert!(rendered.contains("2. [hr].[staff].name"));
        assert!(rendered.contains("   Data Type: nvarchar"));
        assert!(rendered.contains("   Match Count: 12"));
        assert!(rendered.contains("   Sample Values:"));
        assert!(rendered.contains("     - Ann"));
        // Each match block is separated by a blank line.
        assert!(rendered.contains("     - a@example.com\n\n2. [hr].[staff].name"));
    }

    #[test]
    fn test_format_results_truncates_long_samples() {
        let long = "z".repeat(150);
        let matches = vec![record("[dbo].[blobs]", "body", 1, &[long.as_str()])];
        let rendered = format_results(&matches, "z");

        assert!(rendered.contains(&format!("{}...", "z".repeat(100))));
        assert!(!rendered.contains(&long));
    }
}
