//! MCP Tools Handler
//!
//! Implements MCP-compliant tools/list and tools/call methods.
//! Every tool is read-only.

use crate::mcp::handlers::{credentials, labels, notes};
use crate::mcp::server::McpServices;
use crate::mcp::types::{MCPError, INVALID_PARAMS};
use crate::models::Color;
use serde_json::{json, Value};
use tracing::debug;

/// Handle tools/list MCP request
pub fn handle_tools_list(_params: Value) -> Result<Value, MCPError> {
    Ok(json!({
        "tools": get_tool_schemas()
    }))
}

/// Handle tools/call MCP request
///
/// Request format:
/// ```json
/// {
///   "name": "tool_name",
///   "arguments": { ... }
/// }
/// ```
///
/// Response format:
/// ```json
/// {
///   "content": [{
///     "type": "text",
///     "text": "..."
///   }],
///   "isError": false
/// }
/// ```
///
/// A tool that fails (unknown note, wrong type, missing credentials) still
/// produces a result, with `isError: true`, the error message as text and
/// its code in `errorCode`. Unknown tools and malformed arguments are
/// JSON-RPC `invalid_params` errors.
pub async fn handle_tools_call(services: &McpServices, params: Value) -> Result<Value, MCPError> {
    let tool_name = params["name"]
        .as_str()
        .ok_or_else(|| MCPError::invalid_params("Missing 'name' parameter"))?;

    let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);
    debug!(tool = tool_name, "tools/call");

    let result = match tool_name {
        "check_credentials" => credentials::handle_check_credentials(services, arguments).await,
        "list_all_notes" => notes::handle_list_all_notes(services, arguments).await,
        "get_note" => notes::handle_get_note(services, arguments).await,
        "get_list_items" => notes::handle_get_list_items(services, arguments).await,
        "search_notes" => notes::handle_search_notes(services, arguments).await,
        "list_labels" => labels::handle_list_labels(services, arguments).await,
        "find_label" => labels::handle_find_label(services, arguments).await,
        _ => {
            return Err(MCPError::invalid_params(format!(
                "Unknown tool: {}",
                tool_name
            )))
        }
    };

    match result {
        Ok(data) => {
            let text = serde_json::to_string_pretty(&data).map_err(|e| {
                MCPError::internal_error(format!("JSON serialization failed: {}", e))
            })?;

            Ok(json!({
                "content": [{
                    "type": "text",
                    "text": text
                }],
                "isError": false
            }))
        }
        Err(e) if e.code == INVALID_PARAMS => Err(e),
        Err(e) => Ok(json!({
            "content": [{
                "type": "text",
                "text": e.message
            }],
            "isError": true,
            "errorCode": e.code
        })),
    }
}

/// JSON schemas for every tool the server exposes
pub fn get_tool_schemas() -> Value {
    let color_names: Vec<&str> = Color::ALL.iter().map(|c| c.name()).collect();

    json!([
        {
            "name": "check_credentials",
            "description": "Check whether wlater credentials are configured and well-formed. Does not contact Google Keep.",
            "inputSchema": {
                "type": "object",
                "properties": {}
            }
        },
        {
            "name": "list_all_notes",
            "description": "List all non-trashed notes and lists with basic metadata (id, title, type, pinned, archived, color). When the result is capped, the last element is {truncated: true, message}.",
            "inputSchema": {
                "type": "object",
                "properties": {}
            }
        },
        {
            "name": "get_note",
            "description": "Get the full content of one note: text, labels and timestamps. List notes render their items as checkbox lines.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "note_id": {
                        "type": "string",
                        "description": "Note ID from list_all_notes or search_notes"
                    }
                },
                "required": ["note_id"]
            }
        },
        {
            "name": "get_list_items",
            "description": "Get the items of a checklist with their checked state, split into all, checked and unchecked items.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "list_id": {
                        "type": "string",
                        "description": "ID of a note whose note_type is List"
                    }
                },
                "required": ["list_id"]
            }
        },
        {
            "name": "search_notes",
            "description": "Search notes by text and filters. All filters are optional and combine with AND; colors and labels match any of the given values. Trashed notes are included unless trashed=false.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Case-sensitive text to find in titles and bodies"
                    },
                    "pinned": {
                        "type": "boolean",
                        "description": "Only pinned (true) or unpinned (false) notes"
                    },
                    "archived": {
                        "type": "boolean",
                        "description": "Only archived (true) or unarchived (false) notes"
                    },
                    "trashed": {
                        "type": "boolean",
                        "description": "Only trashed (true) or untrashed (false) notes"
                    },
                    "colors": {
                        "type": "array",
                        "items": {
                            "type": "string",
                            "enum": color_names
                        },
                        "description": "Note colors to match, case-insensitive. Unknown color names are rejected as invalid parameters rather than matching nothing."
                    },
                    "labels": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Exact label names to match"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Maximum number of notes to return (default: 100)"
                    }
                }
            }
        },
        {
            "name": "list_labels",
            "description": "List all labels (id and name) sorted alphabetically, ignoring case.",
            "inputSchema": {
                "type": "object",
                "properties": {}
            }
        },
        {
            "name": "find_label",
            "description": "Find a label by name, ignoring case. Returns null when no label matches.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Label name"
                    }
                },
                "required": ["name"]
            }
        }
    ])
}

#[cfg(test)]
#[path = "tools_test.rs"]
mod tools_test;
