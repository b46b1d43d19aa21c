//! Core search primitives for dbgrep.
//!
//! This crate provides everything the `dbgrep` binary needs to brute-force
//! search a SQL Server database for a value: connection configuration from
//! the environment, TDS session establishment, catalog enumeration, scan
//! planning, and the per-column probe itself.
//!
//! # Security Guarantees
//! - Every query issued is SELECT-only; nothing is ever written
//! - Credentials come from the environment and are never logged or stored
//! - User-supplied search values and patterns are bound as query parameters,
//!   never spliced into SQL text
//!
//! # Flow
//! [`config::ConnectionConfig::from_env`] → [`client::connect`] →
//! [`catalog::list_tables`] → [`planner::plan`] → one [`scanner::scan_table`]
//! call per planned table.

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod planner;
pub mod predicate;
pub mod scanner;

// Re-export commonly used types
pub use client::{MssqlClient, connect};
pub use config::ConnectionConfig;
pub use error::{DbGrepError, Result};
pub use models::{
    ColumnInfo, ColumnSkip, FilterStats, MAX_SAMPLE_VALUES, MatchRecord, RunStats, SearchReport,
    TableRef, TableScan, TableSkip,
};
pub use planner::{SkipList, plan};
pub use predicate::MatchPredicate;
pub use scanner::scan_table;
