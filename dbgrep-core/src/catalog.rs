//! Catalog metadata queries over `INFORMATION_SCHEMA`.
//!
//! Only base tables are enumerated; views and system objects never enter a
//! scan plan. User-supplied filter patterns are bound as query parameters,
//! not spliced into SQL text.

use crate::client::MssqlClient;
use crate::error::{DbGrepError, Result};
use crate::models::{ColumnInfo, TableRef};

/// Lists base tables, ordered by schema then name.
///
/// `pattern` is an optional SQL `LIKE` pattern (`%`/`_` wildcards) applied to
/// the bare table name only, never the schema. No matching tables is an empty
/// list, not an error.
///
/// # Errors
/// Returns [`DbGrepError::Connection`] when the catalog query cannot be run,
/// since a session that cannot read `INFORMATION_SCHEMA` is unusable for
/// everything that follows.
pub async fn list_tables(
    client: &mut MssqlClient,
    pattern: Option<&str>,
) -> Result<Vec<TableRef>> {
    let stream = match pattern {
        Some(pattern) => {
            tracing::debug!("Enumerating base tables matching '{pattern}'");
            client
                .query(
                    "SELECT TABLE_SCHEMA, TABLE_NAME
                     FROM INFORMATION_SCHEMA.TABLES
                     WHERE TABLE_TYPE = 'BASE TABLE' AND TABLE_NAME LIKE @P1
                     ORDER BY TABLE_SCHEMA, TABLE_NAME",
                    &[&pattern],
                )
                .await
        }
        None => {
            tracing::debug!("Enumerating all base tables");
            client
                .query(
                    "SELECT TABLE_SCHEMA, TABLE_NAME
                     FROM INFORMATION_SCHEMA.TABLES
                     WHERE TABLE_TYPE = 'BASE TABLE'
                     ORDER BY TABLE_SCHEMA, TABLE_NAME",
                    &[],
                )
                .await
        }
    }
    .map_err(|e| DbGrepError::connection_failed("Failed to enumerate tables", e))?;

    let rows = stream
        .into_first_result()
        .await
        .map_err(|e| DbGrepError::connection_failed("Failed to read table list", e))?;

    let mut tables = Vec::with_capacity(rows.len());
    for row in rows {
        let schema: &str = row
            .get(0)
            .ok_or_else(|| DbGrepError::query_failed("Table row is missing TABLE_SCHEMA"))?;
        let name: &str = row
            .get(1)
            .ok_or_else(|| DbGrepError::query_failed("Table row is missing TABLE_NAME"))?;
        tables.push(TableRef::new(schema, name));
    }

    tracing::debug!("Catalog returned {} base tables", tables.len());
    Ok(tables)
}

/// Lists the columns of one table in ordinal order.
///
/// # Errors
/// Returns [`DbGrepError::TableQuery`] when the column metadata cannot be
/// read; the caller skips the table and carries on.
pub async fn list_columns(client: &mut MssqlClient, table: &TableRef) -> Result<Vec<ColumnInfo>> {
    let stream = client
        .query(
            "SELECT COLUMN_NAME, DATA_TYPE
             FROM INFORMATION_SCHEMA.COLUMNS
             WHERE TABLE_SCHEMA = @P1 AND TABLE_NAME = @P2
             ORDER BY ORDINAL_POSITION",
            &[&table.schema, &table.name],
        )
        .await
        .map_err(|e| DbGrepError::table_query(table.bracketed(), e))?;

    let rows = stream
        .into_first_result()
        .await
        .map_err(|e| DbGrepError::table_query(table.bracketed(), e))?;

    let mut columns = Vec::with_capacity(rows.len());
    for row in rows {
        let name: &str = row.get(0).ok_or_else(|| {
            DbGrepError::query_failed(format!("Column row for {table} is missing COLUMN_NAME"))
        })?;
        let data_type: &str = row.get(1).ok_or_else(|| {
            DbGrepError::query_failed(format!("Column row for {table} is missing DATA_TYPE"))
        })?;
        columns.push(ColumnInfo {
            name: name.to_string(),
            data_type: data_type.to_string(),
        });
    }

    Ok(columns)
}
