//! MCP credential status handler

use super::to_value;
use crate::credentials::check_credentials;
use crate::mcp::server::McpServices;
use crate::mcp::types::MCPError;
use serde_json::Value;

/// Handle check_credentials
///
/// Reports configuration state without authenticating or touching the session.
pub async fn handle_check_credentials(
    services: &McpServices,
    _params: Value,
) -> Result<Value, MCPError> {
    let status = check_credentials(services.session.credential_store()).await;
    to_value(&status)
}
