//! Tests for MCP Initialize Handler

use super::*;
use crate::mcp::types::{INVALID_PARAMS, INVALID_REQUEST};
use serde_json::json;

#[test]
fn test_initialize_success() {
    let params = json!({
        "protocolVersion": "2024-11-05",
        "clientInfo": {
            "name": "test-client",
            "version": "1.0.0"
        }
    });

    let result = handle_initialize(params).unwrap();

    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "wlater");
    assert!(result["serverInfo"]["version"].is_string());
    assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
    assert!(result["instructions"].as_str().unwrap().contains("Read-only"));
}

#[test]
fn test_initialize_echoes_each_supported_version() {
    for version in SUPPORTED_PROTOCOL_VERSIONS {
        let result = handle_initialize(json!({"protocolVersion": version})).unwrap();
        assert_eq!(result["protocolVersion"], *version);
    }
}

#[test]
fn test_initialize_wrong_version() {
    let err = handle_initialize(json!({"protocolVersion": "1999-01-01"})).unwrap_err();

    assert_eq!(err.code, INVALID_REQUEST);
    assert!(err.message.contains("Unsupported protocol version"));
    assert!(err.message.contains("1999-01-01"));
    assert!(err.message.contains("2024-11-05"));
}

#[test]
fn test_initialize_missing_version() {
    let err = handle_initialize(json!({"clientInfo": {"name": "test-client"}})).unwrap_err();

    assert_eq!(err.code, INVALID_PARAMS);
    assert!(err.message.contains("Missing protocolVersion"));
}

#[test]
fn test_initialize_null_params() {
    let err = handle_initialize(serde_json::Value::Null).unwrap_err();
    assert_eq!(err.code, INVALID_PARAMS);
}
