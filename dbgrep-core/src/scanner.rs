//! Per-table value scanning.
//!
//! For one table: enumerate columns, drop the unsearchable types, then probe
//! each remaining column with a `COUNT(*)` query and, only when it matched, a
//! bounded sample query. A failed probe skips that column and the scan
//! continues; a failed column enumeration fails the whole table.

use crate::catalog;
use crate::client::MssqlClient;
use crate::error::{DbGrepError, Result};
use crate::models::{ColumnInfo, ColumnSkip, MAX_SAMPLE_VALUES, MatchRecord, TableRef, TableScan};
use crate::predicate::MatchPredicate;

/// Data types that are never probed. Binary and spatial payloads have no
/// meaningful text cast, and `timestamp`/`rowversion` are row markers, not
/// values.
pub const UNSEARCHABLE_TYPES: &[&str] = &[
    "image",
    "binary",
    "varbinary",
    "timestamp",
    "rowversion",
    "geography",
    "geometry",
];

/// Whether a declared data type can be probed. Comparison is
/// case-insensitive.
pub fn is_searchable_type(data_type: &str) -> bool {
    let lower = data_type.to_lowercase();
    !UNSEARCHABLE_TYPES.contains(&lower.as_str())
}

/// Scans one table for the search value.
///
/// Matching columns are returned in ordinal order. Columns whose probe
/// failed are reported in [`TableScan::skipped_columns`] with the driver's
/// reason. A table with no searchable columns produces an empty scan without
/// issuing a single query.
///
/// # Errors
/// Returns [`DbGrepError::TableQuery`] when the column enumeration itself
/// fails; no partial results are produced in that case.
pub async fn scan_table(
    client: &mut MssqlClient,
    table: &TableRef,
    search_value: &str,
    predicate: MatchPredicate,
) -> Result<TableScan> {
    let columns = catalog::list_columns(client, table).await?;
    let searchable: Vec<ColumnInfo> = columns
        .into_iter()
        .filter(|column| is_searchable_type(&column.data_type))
        .collect();

    if searchable.is_empty() {
        tracing::debug!("{table} has no searchable columns");
        return Ok(TableScan::default());
    }

    let parameter = predicate.parameter(search_value);
    let mut scan = TableScan::default();

    for column in &searchable {
        match probe_column(client, table, column, predicate, &parameter).await {
            Ok(Some(record)) => {
                tracing::debug!(
                    "Match in {}.{}: {} row(s)",
                    table,
                    column.name,
                    record.match_count
                );
                scan.matches.push(record);
            }
            Ok(None) => {}
            Err(error) => {
                tracing::warn!("{error}");
                scan.skipped_columns.push(ColumnSkip {
                    table: table.bracketed(),
                    column: column.name.clone(),
                    data_type: column.data_type.clone(),
                    reason: error.reason(),
                });
            }
        }
    }

    Ok(scan)
}

/// Renders the `COUNT(*)` probe for one column.
fn count_sql(table: &TableRef, column: &str, predicate: MatchPredicate) -> String {
    format!(
        "SELECT COUNT(*) FROM {} WHERE {}",
        table.bracketed(),
        predicate.where_clause(column)
    )
}

/// Renders the bounded sample query for one column. The `TOP` cap keeps the
/// transfer small no matter how many rows matched.
fn sample_sql(table: &TableRef, column: &str, predicate: MatchPredicate) -> String {
    format!(
        "SELECT TOP {MAX_SAMPLE_VALUES} CAST([{column}] AS NVARCHAR(MAX)) FROM {} WHERE {}",
        table.bracketed(),
        predicate.where_clause(column)
    )
}

/// Probes a single column: count first, sample only on a hit.
async fn probe_column(
    client: &mut MssqlClient,
    table: &TableRef,
    column: &ColumnInfo,
    predicate: MatchPredicate,
    parameter: &str,
) -> Result<Option<MatchRecord>> {
    let col_err = |e: tiberius::error::Error| {
        DbGrepError::column_query(table.bracketed(), column.name.clone(), e)
    };

    let count_query = count_sql(table, &column.name, predicate);
    let count_row = client
        .query(count_query.as_str(), &[&parameter])
        .await
        .map_err(col_err)?
        .into_row()
        .await
        .map_err(col_err)?
        .ok_or_else(|| {
            DbGrepError::query_failed(format!(
                "COUNT(*) returned no row for {}.{}",
                table, column.name
            ))
        })?;
    let count: i32 = count_row.get(0).ok_or_else(|| {
        DbGrepError::query_failed(format!(
            "COUNT(*) returned no value for {}.{}",
            table, column.name
        ))
    })?;

    if count <= 0 {
        return Ok(None);
    }
    #[allow(clippy::cast_sign_loss)]
    let match_count = count as u64;

    let sample_query = sample_sql(table, &column.name, predicate);
    let rows = client
        .query(sample_query.as_str(), &[&parameter])
        .await
        .map_err(col_err)?
        .into_first_result()
        .await
        .map_err(col_err)?;

    let sample_values = rows
        .iter()
        .map(|row| {
            row.get::<&str, _>(0)
                .map_or_else(|| "NULL".to_string(), ToString::to_string)
        })
        .collect();

    Ok(Some(MatchRecord {
        table: table.bracketed(),
        column: column.name.clone(),
        data_type: column.data_type.clone(),
        match_count,
        sample_values,
    }))
}
