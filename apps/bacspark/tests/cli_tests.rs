//! Integration tests for BAC Spark CLI commands.
//!
//! Uses tempfile for testing file-based operations.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use bacspark::cli::{
    ExportFormat, cmd_categories, cmd_codes, cmd_export, cmd_redeem, is_rejection,
};
use bacspark::bacspark_core::{CODES_PER_CATEGORY, SparkError};
use bacspark::AppError;
use tempfile::TempDir;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a temporary directory for tests.
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

// =============================================================================
// CATEGORIES / CODES COMMAND TESTS
// =============================================================================

#[test]
fn test_categories_text_and_json() {
    assert!(cmd_categories(false).is_ok());
    assert!(cmd_categories(true).is_ok());
}

#[test]
fn test_codes_all_categories() {
    assert!(cmd_codes(None, 1, 20, false).is_ok());
}

#[test]
fn test_codes_one_category_json() {
    assert!(cmd_codes(Some("economie"), 2, 10, true).is_ok());
}

#[test]
fn test_codes_unknown_category() {
    let result = cmd_codes(Some("philosophie"), 1, 20, false);
    assert!(matches!(
        result,
        Err(AppError::Core(SparkError::UnknownCategory(_)))
    ));
}

// =============================================================================
// REDEEM COMMAND TESTS
// =============================================================================

#[test]
fn test_redeem_valid_code_any_case() {
    assert!(cmd_redeem("MATH00118FM", false).is_ok());
    assert!(cmd_redeem("math00118fm", true).is_ok());
}

#[test]
fn test_redeem_invalid_code() {
    let err = cmd_redeem("NOTACODE", false).unwrap_err();
    assert!(is_rejection(&err));
}

#[test]
fn test_redeem_empty_code() {
    let err = cmd_redeem("   ", false).unwrap_err();
    assert!(is_rejection(&err));
}

// =============================================================================
// EXPORT COMMAND TESTS
// =============================================================================

#[test]
fn test_export_json_all() {
    let temp = create_temp_dir();
    let output = temp.path().join("codes.json");

    cmd_export(&output, None, ExportFormat::Json).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    let rows: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(rows.len(), 6 * CODES_PER_CATEGORY);
    assert_eq!(rows[0]["id"], "math_1");
    assert_eq!(rows[0]["code"], "MATH00118FM");
    assert_eq!(rows[0]["category"], "math");
}

#[test]
fn test_export_text_one_category() {
    let temp = create_temp_dir();
    let output = temp.path().join("sciences.txt");

    cmd_export(&output, Some("sciences"), ExportFormat::Text).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), CODES_PER_CATEGORY);
    assert_eq!(lines[0], "SCI0019GNU");
    assert!(lines.iter().all(|l| l.starts_with("SCI")));
}

#[test]
fn test_export_unknown_category_writes_nothing() {
    let temp = create_temp_dir();
    let output = temp.path().join("codes.txt");

    let result = cmd_export(&output, Some("philosophie"), ExportFormat::Text);
    assert!(matches!(
        result,
        Err(AppError::Core(SparkError::UnknownCategory(_)))
    ));
    assert!(!output.exists());
}

#[test]
fn test_export_is_deterministic() {
    let temp = create_temp_dir();
    let first = temp.path().join("a.json");
    let second = temp.path().join("b.json");

    cmd_export(&first, None, ExportFormat::Json).unwrap();
    cmd_export(&second, None, ExportFormat::Json).unwrap();

    let data1 = std::fs::read(&first).unwrap();
    let data2 = std::fs::read(&second).unwrap();
    assert_eq!(data1, data2, "Export should be deterministic");
}
