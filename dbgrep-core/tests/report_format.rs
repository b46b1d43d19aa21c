//! Consumer-level tests for scan planning and the report document.

#![allow(clippy::unwrap_used)]

use dbgrep_core::models::{MatchRecord, SearchReport, TableRef};
use dbgrep_core::plan;

fn catalog() -> Vec<TableRef> {
    vec![
        TableRef::new("hr", "employees"),
        TableRef::new("hr", "payroll"),
        TableRef::new("sales", "orders"),
    ]
}

fn record(table: &str, column: &str) -> MatchRecord {
    MatchRecord {
        table: table.to_string(),
        column: column.to_string(),
        data_type: "nvarchar".to_string(),
        match_count: 7,
        sample_values: vec!["one".to_string(), "two".to_string()],
    }
}

#[test]
fn test_plan_drops_skipped_table_and_keeps_order() {
    let (planned, stats) = plan(catalog(), None, Some("payroll"));

    let names: Vec<String> = planned.iter().map(TableRef::qualified).collect();
    assert_eq!(names, ["hr.employees", "sales.orders"]);
    assert_eq!(stats.skipped_count, 1);
    assert_eq!(stats.final_count + stats.skipped_count, stats.original_count);
}

#[test]
fn test_plan_rotates_to_requested_table() {
    let (planned, stats) = plan(catalog(), Some("orders"), None);

    let names: Vec<String> = planned.iter().map(TableRef::qualified).collect();
    assert_eq!(names, ["sales.orders", "hr.employees", "hr.payroll"]);
    assert_eq!(stats.started_from.as_deref(), Some("orders"));
}

#[test]
fn test_report_document_shape() {
    let report = SearchReport::new("needle", vec![record("[hr].[employees]", "name")]);

    // Field order in the document follows the struct declaration.
    let text = serde_json::to_string(&report).unwrap();
    let positions: Vec<usize> = ["search_value", "timestamp", "total_matches", "results"]
        .iter()
        .map(|key| text.find(&format!("\"{key}\"")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    let json = serde_json::to_value(&report).unwrap();

    // Timestamp must parse back as ISO-8601.
    let timestamp = json["timestamp"].as_str().unwrap();
    chrono::DateTime::parse_from_rfc3339(timestamp).unwrap();

    assert_eq!(json["total_matches"], 1);
    assert_eq!(json["results"][0]["column"], "name");
}

#[test]
fn test_report_round_trip_preserves_records_and_order() {
    let report = SearchReport::new(
        "needle",
        vec![
            record("[hr].[employees]", "name"),
            record("[sales].[orders]", "memo"),
        ],
    );

    let json = serde_json::to_string_pretty(&report).unwrap();
    let back: SearchReport = serde_json::from_str(&json).unwrap();

    assert_eq!(back.total_matches, report.total_matches);
    assert_eq!(back.results, report.results);
    assert_eq!(back, report);
}
