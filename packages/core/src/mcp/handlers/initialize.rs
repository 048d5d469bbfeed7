//! MCP Initialize Handler
//!
//! Handles the MCP initialization handshake and capability discovery.
//! This is the first method called when a client connects to the server.

use crate::mcp::types::MCPError;
use serde_json::{json, Value};

/// Supported MCP protocol versions, newest first
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

/// Name reported in `serverInfo`
pub const SERVER_NAME: &str = "wlater";

/// Handle MCP initialize request
///
/// Echoes the client's protocol version when supported and advertises the
/// (static) tools capability. Tool schemas are retrieved via `tools/list`.
///
/// # Errors
///
/// - `invalid_params` when `protocolVersion` is missing
/// - `invalid_request` when the version is not supported
pub fn handle_initialize(params: Value) -> Result<Value, MCPError> {
    let client_version = params["protocolVersion"]
        .as_str()
        .ok_or_else(|| MCPError::invalid_params("Missing protocolVersion parameter"))?;

    if !SUPPORTED_PROTOCOL_VERSIONS.contains(&client_version) {
        return Err(MCPError::invalid_request(format!(
            "Unsupported protocol version: {}. Server supports: {:?}",
            client_version, SUPPORTED_PROTOCOL_VERSIONS
        )));
    }

    Ok(json!({
        "protocolVersion": client_version,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Read-only access to Google Keep. Call check_credentials first if \
            other tools report that wlater is not configured. Use list_all_notes or \
            search_notes to find note ids, then get_note or get_list_items for details. \
            Nothing here can modify notes."
    }))
}

#[cfg(test)]
#[path = "initialize_test.rs"]
mod initialize_test;
