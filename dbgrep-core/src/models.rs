//! Data structures for table enumeration, scan results, and the report
//! document.
//!
//! [`MatchRecord`] and [`SearchReport`] define the JSON output format and keep
//! a stable field order. The remaining types are in-memory bookkeeping for a
//! single search run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on sample values captured per matching column.
pub const MAX_SAMPLE_VALUES: usize = 5;

/// A schema-qualified base table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Schema name, e.g. `dbo`
    pub schema: String,
    /// Bare table name without schema
    pub name: String,
}

impl TableRef {
    /// Creates a table reference from schema and bare name.
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Dotted form for display, e.g. `dbo.users`.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }

    /// Bracket-quoted form for SQL statements, e.g. `[dbo].[users]`.
    pub fn bracketed(&self) -> String {
        format!("[{}].[{}]", self.schema, self.name)
    }

    /// The table name without its schema, as used for start/skip matching.
    pub fn bare_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

/// A column as reported by `INFORMATION_SCHEMA.COLUMNS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Declared data type, e.g. `nvarchar` or `varbinary`
    pub data_type: String,
}

/// One column that contained the search value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Bracket-quoted table, e.g. `[dbo].[users]`
    pub table: String,
    /// Column name
    pub column: String,
    /// Declared data type of the column
    pub data_type: String,
    /// Total number of matching rows in the table
    pub match_count: u64,
    /// Up to [`MAX_SAMPLE_VALUES`] matching values, untruncated; NULLs appear
    /// as the string `NULL`
    pub sample_values: Vec<String>,
}

/// A column left out of a table scan after a failed probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSkip {
    /// Bracket-quoted table the column belongs to
    pub table: String,
    /// Column name
    pub column: String,
    /// Declared data type of the column
    pub data_type: String,
    /// Driver message explaining the skip
    pub reason: String,
}

/// A table left out of the search after a failed column enumeration or scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSkip {
    /// Bracket-quoted table
    pub table: String,
    /// Driver message explaining the skip
    pub reason: String,
}

/// Outcome of scanning a single table.
#[derive(Debug, Clone, Default)]
pub struct TableScan {
    /// Columns of the table that contained the search value
    pub matches: Vec<MatchRecord>,
    /// Columns that failed to probe and were skipped
    pub skipped_columns: Vec<ColumnSkip>,
}

/// How the table enumeration was reordered and filtered before scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterStats {
    /// Tables enumerated before filtering
    pub original_count: usize,
    /// Tables removed by the skip list
    pub skipped_count: usize,
    /// Tables remaining in the scan plan
    pub final_count: usize,
    /// The `--start-from` name as the user gave it, when it matched a table
    pub started_from: Option<String>,
    /// Normalized skip tokens, in the order given
    pub skipped_patterns: Vec<String>,
}

/// Accumulated skip bookkeeping across a whole search run.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Tables scanned to completion
    pub tables_scanned: usize,
    /// Tables that failed and were skipped entirely
    pub skipped_tables: Vec<TableSkip>,
    /// Columns that failed and were skipped within otherwise-scanned tables
    pub skipped_columns: Vec<ColumnSkip>,
}

impl RunStats {
    /// True when no table or column was skipped during the run.
    pub fn is_clean(&self) -> bool {
        self.skipped_tables.is_empty() && self.skipped_columns.is_empty()
    }

    /// Folds one table scan into the running totals.
    pub fn record_scan(&mut self, scan: &TableScan) {
        self.tables_scanned += 1;
        self.skipped_columns.extend(scan.skipped_columns.iter().cloned());
    }
}

/// The saved search report.
///
/// Field order is the serialized order of the JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    /// The value that was searched for
    pub search_value: String,
    /// When the report was produced
    pub timestamp: DateTime<Utc>,
    /// Total matching columns across all tables
    pub total_matches: u64,
    /// Matching columns in the order they were found
    pub results: Vec<MatchRecord>,
}

impl SearchReport {
    /// Builds a report from the collected matches, stamped with the current
    /// time.
    pub fn new(search_value: impl Into<String>, results: Vec<MatchRecord>) -> Self {
        Self {
            search_value: search_value.into(),
            timestamp: Utc::now(),
            total_matches: results.len() as u64,
            results,
        }
    }
}
