//! Tests for the MCP message loop

use super::*;
use crate::mcp::test_support;
use crate::mcp::types::{INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR};

#[tokio::test]
async fn test_initialize_and_ping() {
    let services = test_support::services();

    let response = handle_message(
        &services,
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#,
    )
    .await
    .unwrap();
    assert_eq!(response.id, json!(1));
    assert_eq!(response.result.unwrap()["serverInfo"]["name"], "wlater");

    let response = handle_message(&services, r#"{"jsonrpc":"2.0","id":"p","method":"ping"}"#)
        .await
        .unwrap();
    assert_eq!(response.id, json!("p"));
    assert_eq!(response.result, Some(json!({})));
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    let services = test_support::services();

    let response = handle_message(
        &services,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
    )
    .await;
    assert!(response.is_none());

    let response = handle_message(&services, r#"{"jsonrpc":"2.0","method":"notifications/cancelled","params":{"requestId":3}}"#).await;
    assert!(response.is_none());
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let response = handle_message(&test_support::services(), "{not json")
        .await
        .unwrap();

    assert_eq!(response.id, Value::Null);
    assert_eq!(response.error.unwrap().code, PARSE_ERROR);
}

#[tokio::test]
async fn test_bad_version_is_invalid_request() {
    let response = handle_message(
        &test_support::services(),
        r#"{"jsonrpc":"1.0","id":4,"method":"ping"}"#,
    )
    .await
    .unwrap();

    assert_eq!(response.id, json!(4));
    assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
}

#[tokio::test]
async fn test_unknown_method() {
    let response = handle_message(
        &test_support::services(),
        r#"{"jsonrpc":"2.0","id":5,"method":"resources/list"}"#,
    )
    .await
    .unwrap();

    let error = response.error.unwrap();
    assert_eq!(error.code, METHOD_NOT_FOUND);
    assert!(error.message.contains("resources/list"));
}

#[tokio::test]
async fn test_serve_answers_requests_in_order() {
    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-06-18"}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"get_note","arguments":{"note_id":"n1"}}}"#,
    ]
    .join("\n");

    let mut output = Vec::new();
    serve(test_support::services(), input.as_bytes(), &mut output)
        .await
        .unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 7);
    assert_eq!(responses[2]["id"], 3);

    let note = test_support::tool_payload(&responses[2]["result"]);
    assert_eq!(note["note_id"], "n1");
}

#[test]
fn test_from_config_is_lazy() {
    let services = McpServices::from_config(ServerConfig::in_dir("/nonexistent/wlater"));
    assert!(!services.session.is_initialized());
}
