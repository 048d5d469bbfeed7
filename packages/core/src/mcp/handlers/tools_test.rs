//! Tests for MCP Tools Handler
//!
//! Tests tools/list and tools/call against fixture services.

use super::*;
use crate::mcp::test_support::{self, tool_payload};
use crate::mcp::types::{INVALID_PARAMS, NOTE_NOT_FOUND, NOT_CONFIGURED, WRONG_NOTE_TYPE};
use serde_json::json;

async fn call(services: &McpServices, name: &str, arguments: Value) -> Result<Value, MCPError> {
    handle_tools_call(services, json!({"name": name, "arguments": arguments})).await
}

// =========================================================================
// tools/list
// =========================================================================

#[test]
fn test_tools_list_returns_all_schemas() {
    let response = handle_tools_list(json!({})).unwrap();
    let tools = response["tools"].as_array().unwrap();

    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "check_credentials",
            "list_all_notes",
            "get_note",
            "get_list_items",
            "search_notes",
            "list_labels",
            "find_label",
        ]
    );
}

#[test]
fn test_tools_list_tool_schema_structure() {
    let response = handle_tools_list(Value::Null).unwrap();

    for tool in response["tools"].as_array().unwrap() {
        assert!(tool["name"].is_string(), "Tool missing name");
        assert!(tool["description"].is_string(), "Tool missing description");
        assert_eq!(tool["inputSchema"]["type"], "object");
    }
}

#[test]
fn test_search_schema_lists_color_names() {
    let schemas = get_tool_schemas();
    let search = schemas
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["name"] == "search_notes")
        .unwrap();

    let colors = search["inputSchema"]["properties"]["colors"]["items"]["enum"]
        .as_array()
        .unwrap();
    assert_eq!(colors.len(), 12);
    assert!(colors.contains(&json!("CERULEAN")));

    let description = search["inputSchema"]["properties"]["colors"]["description"]
        .as_str()
        .unwrap();
    assert!(description.contains("Unknown color names are rejected"));
}

// =========================================================================
// tools/call: dispatch and argument errors
// =========================================================================

#[tokio::test]
async fn test_tools_call_with_unknown_tool() {
    let err = call(&test_support::services(), "delete_note", json!({}))
        .await
        .unwrap_err();

    assert_eq!(err.code, INVALID_PARAMS);
    assert!(err.message.contains("Unknown tool: delete_note"));
}

#[tokio::test]
async fn test_tools_call_missing_name() {
    let err = handle_tools_call(&test_support::services(), json!({"arguments": {}}))
        .await
        .unwrap_err();
    assert_eq!(err.code, INVALID_PARAMS);
}

#[tokio::test]
async fn test_missing_required_argument_is_invalid_params() {
    let err = call(&test_support::services(), "get_note", json!({}))
        .await
        .unwrap_err();

    assert_eq!(err.code, INVALID_PARAMS);
    assert!(err.message.starts_with("Invalid parameters"));
}

#[tokio::test]
async fn test_unknown_color_is_invalid_params() {
    let err = call(
        &test_support::services(),
        "search_notes",
        json!({"colors": ["RED", "MAUVE"]}),
    )
    .await
    .unwrap_err();

    assert_eq!(err.code, INVALID_PARAMS);
    assert!(err.message.contains("MAUVE"));
}

// =========================================================================
// tools/call: results
// =========================================================================

#[tokio::test]
async fn test_list_all_notes_excludes_trashed() {
    let result = call(&test_support::services(), "list_all_notes", Value::Null)
        .await
        .unwrap();
    let notes = tool_payload(&result);

    let ids: Vec<&str> = notes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["note_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["n1", "l1"]);
    assert_eq!(notes[0]["color"], "RED");
    assert_eq!(notes[1]["note_type"], "List");
}

#[tokio::test]
async fn test_list_all_notes_respects_configured_limit() {
    let mut services = test_support::services();
    services.config = services.config.with_list_limit(1);

    let notes = tool_payload(&call(&services, "list_all_notes", json!({})).await.unwrap());

    assert_eq!(notes.as_array().unwrap().len(), 2);
    assert_eq!(notes[0]["note_id"], "n1");
    assert_eq!(
        notes[1],
        json!({"truncated": true, "message": "Results limited to 1 notes"})
    );
}

#[tokio::test]
async fn test_get_note_detail() {
    let result = call(&test_support::services(), "get_note", json!({"note_id": "n1"}))
        .await
        .unwrap();
    let note = tool_payload(&result);

    assert_eq!(note["title"], "Budget");
    assert_eq!(note["text"], "Q4 budget review");
    assert_eq!(note["labels"], json!([{"id": "l-work", "name": "Work"}]));
    assert!(note["timestamps"]["created"].is_string());
}

#[tokio::test]
async fn test_get_note_unknown_id_is_tool_error() {
    let result = call(&test_support::services(), "get_note", json!({"note_id": "nope"}))
        .await
        .unwrap();

    assert_eq!(result["isError"], true);
    assert_eq!(result["errorCode"], NOTE_NOT_FOUND);
    assert_eq!(result["content"][0]["text"], "Note nope not found");
}

#[tokio::test]
async fn test_get_list_items_partitions() {
    let result = call(&test_support::services(), "get_list_items", json!({"list_id": "l1"}))
        .await
        .unwrap();
    let items = tool_payload(&result);

    assert_eq!(items["list_id"], "l1");
    assert_eq!(items["all_items"].as_array().unwrap().len(), 2);
    assert_eq!(items["checked_items"][0]["text"], "milk");
    assert_eq!(items["unchecked_items"][0]["text"], "eggs");
    assert_eq!(items["unchecked_items"][0]["sort"], 1);
}

#[tokio::test]
async fn test_get_list_items_on_text_note_is_wrong_type() {
    let result = call(&test_support::services(), "get_list_items", json!({"list_id": "n1"}))
        .await
        .unwrap();

    assert_eq!(result["isError"], true);
    assert_eq!(result["errorCode"], WRONG_NOTE_TYPE);
    assert_eq!(result["content"][0]["text"], "Note n1 is not a List type");
}

#[tokio::test]
async fn test_search_notes_filters() {
    let services = test_support::services();

    let all = tool_payload(&call(&services, "search_notes", json!({"query": "budget"})).await.unwrap());
    assert_eq!(all.as_array().unwrap().len(), 2);

    let untrashed = tool_payload(
        &call(&services, "search_notes", json!({"query": "budget", "trashed": false}))
            .await
            .unwrap(),
    );
    assert_eq!(untrashed.as_array().unwrap().len(), 1);
    assert_eq!(untrashed[0]["note_id"], "n1");

    let green = tool_payload(
        &call(&services, "search_notes", json!({"colors": ["green"]}))
            .await
            .unwrap(),
    );
    assert_eq!(green[0]["note_id"], "l1");

    let work = tool_payload(
        &call(&services, "search_notes", json!({"labels": ["Work"], "limit": 5}))
            .await
            .unwrap(),
    );
    assert_eq!(work.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_labels_tools() {
    let services = test_support::services();

    let labels = tool_payload(&call(&services, "list_labels", json!({})).await.unwrap());
    assert_eq!(
        labels,
        json!([
            {"label_id": "l-home", "name": "home"},
            {"label_id": "l-work", "name": "Work"}
        ])
    );

    let found = tool_payload(&call(&services, "find_label", json!({"name": "WORK"})).await.unwrap());
    assert_eq!(found["label_id"], "l-work");

    let missing = tool_payload(&call(&services, "find_label", json!({"name": "none"})).await.unwrap());
    assert!(missing.is_null());
}

// =========================================================================
// Session handling
// =========================================================================

#[tokio::test]
async fn test_check_credentials_does_not_authenticate() {
    let services = test_support::services();

    let status = tool_payload(&call(&services, "check_credentials", json!({})).await.unwrap());

    assert_eq!(status["configured"], true);
    assert_eq!(status["email"], "me@example.com");
    assert!(!services.session.is_initialized());
}

#[tokio::test]
async fn test_check_credentials_when_unconfigured() {
    let services = test_support::unconfigured_services();

    let status = tool_payload(&call(&services, "check_credentials", json!({})).await.unwrap());

    assert_eq!(status["configured"], false);
    assert!(status.get("email").is_none());
}

#[tokio::test]
async fn test_note_tool_without_credentials_is_not_configured() {
    let result = call(&test_support::unconfigured_services(), "list_all_notes", json!({}))
        .await
        .unwrap();

    assert_eq!(result["isError"], true);
    assert_eq!(result["errorCode"], NOT_CONFIGURED);
    assert!(result["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("check_credentials"));
}

#[tokio::test]
async fn test_session_built_once_across_calls() {
    let client = std::sync::Arc::new(crate::session::FixedSyncClient::new(test_support::graph()));
    let services = test_support::services_with(
        crate::credentials::MemoryCredentialStore::with_credentials(test_support::credentials()),
        client.clone(),
    );

    call(&services, "list_all_notes", json!({})).await.unwrap();
    call(&services, "list_labels", json!({})).await.unwrap();
    call(&services, "get_note", json!({"note_id": "n1"})).await.unwrap();

    assert_eq!(client.authentications(), 1);
    assert!(services.session.is_initialized());
}
