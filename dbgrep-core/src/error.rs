//! Error types with credential-safe messages.
//!
//! All error types in this module ensure that database credentials are never
//! included in error messages, logs, or any output format. Connection failures
//! report host and database names only.

use thiserror::Error;

/// Main error type for dbgrep operations.
///
/// # Security
/// Error messages never contain passwords. Connection context is limited to
/// host, port, and database names.
#[derive(Debug, Error)]
pub enum DbGrepError {
    /// Missing or invalid connection settings
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Database session could not be established or is unusable
    #[error("Database connection failed: {context}")]
    Connection {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A table could not be scanned; the search recovers and skips the table
    #[error("Table query failed for {table}: {source}")]
    TableQuery {
        table: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A single column probe failed; the search recovers and skips the column
    #[error("Column query failed for {table}.{column}: {source}")]
    ColumnQuery {
        table: String,
        column: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Query returned an unusable result shape
    #[error("Query execution failed: {context}")]
    QueryExecution { context: String },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization or deserialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results with `DbGrepError`
pub type Result<T> = std::result::Result<T, DbGrepError>;

impl DbGrepError {
    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a connection error with credential-free context
    pub fn connection_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Connection {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a table-level query error
    pub fn table_query<E>(table: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::TableQuery {
            table: table.into(),
            source: Box::new(error),
        }
    }

    /// Creates a column-level query error
    pub fn column_query<E>(table: impl Into<String>, column: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ColumnQuery {
            table: table.into(),
            column: column.into(),
            source: Box::new(error),
        }
    }

    /// Creates a query execution error
    pub fn query_failed(context: impl Into<String>) -> Self {
        Self::QueryExecution {
            context: context.into(),
        }
    }

    /// Creates an I/O error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a serialization error with context
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Returns the underlying driver message when one exists.
    ///
    /// Used for skip reporting, where the table or column is already named by
    /// the surrounding record and only the cause is wanted.
    pub fn reason(&self) -> String {
        std::error::Error::source(self).map_or_else(|| self.to_string(), |source| source.to_string())
    }
}
