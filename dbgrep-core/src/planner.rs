//! Table ordering and filtering policy.
//!
//! Turns the raw catalog enumeration into the final scan plan: an optional
//! rotation so the search starts at a chosen table, then a skip list of exact
//! names and prefix patterns. Filtering runs after rotation so skip counts
//! are independent of the starting point, and rotation never re-sorts, it
//! only shifts the pivot.

use crate::models::{FilterStats, TableRef};

/// Parsed `--skip-tables` spec: comma-separated tokens, trimmed and
/// lowercased. A token containing `*` matches any bare name starting with the
/// text before the first `*`; other tokens match bare names exactly. All
/// comparisons are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct SkipList {
    exact: Vec<String>,
    prefixes: Vec<String>,
    patterns: Vec<String>,
}

impl SkipList {
    /// Parses a comma-separated skip spec.
    pub fn parse(spec: &str) -> Self {
        let mut list = Self::default();
        for token in spec.split(',') {
            let token = token.trim().to_lowercase();
            match token.find('*') {
                Some(star) => list.prefixes.push(token[..star].to_string()),
                None => list.exact.push(token.clone()),
            }
            list.patterns.push(token);
        }
        list
    }

    /// True when the spec contained no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether a bare table name is excluded by this list.
    pub fn matches(&self, bare_name: &str) -> bool {
        let lower = bare_name.to_lowercase();
        self.exact.iter().any(|token| *token == lower)
            || self
                .prefixes
                .iter()
                .any(|prefix| lower.starts_with(prefix.as_str()))
    }

    /// The normalized tokens in the order they were given, for reporting.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Produces the ordered scan plan and its statistics.
///
/// Rotation happens first: when `start_from` names a table (bare name,
/// case-insensitive), the sequence is rotated so that table comes first and
/// everything before it is appended at the end. `FilterStats::started_from`
/// echoes the requested name exactly as given. An unknown name leaves the
/// order untouched; `started_from` stays `None` so the caller can warn
/// without aborting. The skip list is then applied to the rotated sequence,
/// preserving relative order of the remainder.
pub fn plan(
    mut tables: Vec<TableRef>,
    start_from: Option<&str>,
    skip_spec: Option<&str>,
) -> (Vec<TableRef>, FilterStats) {
    let original_count = tables.len();
    let skip = skip_spec.map(SkipList::parse).unwrap_or_default();

    let mut started_from = None;
    if let Some(requested) = start_from {
        let needle = requested.to_lowercase();
        match tables
            .iter()
            .position(|table| table.bare_name().to_lowercase() == needle)
        {
            Some(pivot) => {
                tables.rotate_left(pivot);
                started_from = Some(requested.to_string());
            }
            None => {
                tracing::warn!("Start table '{requested}' not found, keeping catalog order");
            }
        }
    }

    let kept: Vec<TableRef> = tables
        .into_iter()
        .filter(|table| !skip.matches(table.bare_name()))
        .collect();

    let stats = FilterStats {
        original_count,
        skipped_count: original_count - kept.len(),
        final_count: kept.len(),
        started_from,
        skipped_patterns: skip.patterns().to_vec(),
    };
    (kept, stats)
}
