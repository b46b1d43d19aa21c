//! Search report persistence.
//!
//! The report is written as pretty-printed JSON with a fixed field order:
//! `search_value`, `timestamp`, `total_matches`, `results`. Skip statistics
//! are console-only and never enter the file.

use std::path::Path;

use dbgrep_core::models::SearchReport;
use dbgrep_core::{DbGrepError, Result};

/// Serializes the report and writes it to `path`, replacing any existing
/// file.
///
/// # Errors
/// Returns [`DbGrepError::Serialization`] when encoding fails and
/// [`DbGrepError::Io`] when the file cannot be written.
pub async fn save_report(report: &SearchReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| DbGrepError::serialization("Failed to serialize search report", e))?;

    tokio::fs::write(path, json)
        .await
        .map_err(|e| DbGrepError::io(format!("Failed to write to {}", path.display()), e))?;

    tracing::debug!("Report written to {}", path.display());
    Ok(())
}
