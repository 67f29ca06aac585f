//! Tests for error types

use pow_analytics::Error;

#[test]
fn test_field_count_error() {
    let error = Error::FieldCount {
        line: 7,
        expected: 4,
        found: 3,
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("line 7"));
    assert!(error_str.contains("expected 4"));
    assert!(error_str.contains("found 3"));
    assert!(error.is_parse_error());
    assert_eq!(error.line(), Some(7));
}

#[test]
fn test_parse_error() {
    let error = Error::Parse {
        line: 1,
        field: "block_index",
        value: "Block Index".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("line 1"));
    assert!(error_str.contains("`block_index`"));
    assert!(error_str.contains("\"Block Index\""));
    assert!(error.is_parse_error());
}

#[test]
fn test_invalid_input_error() {
    let error = Error::InvalidInput("cannot merge two datasets labelled Quantum".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid input"));
    assert!(error_str.contains("Quantum"));
    assert!(!error.is_parse_error());
    assert_eq!(error.line(), None);
}

#[test]
fn test_storage_error() {
    let error = Error::StorageError("Failed to open metrics.csv".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Storage error"));
    assert!(error_str.contains("metrics.csv"));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: Error = io_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_error.into();
    assert!(format!("{error}").contains("JSON error"));
}

#[test]
fn test_error_debug() {
    let error = Error::InvalidInput("debug me".to_string());
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("InvalidInput"));
}
