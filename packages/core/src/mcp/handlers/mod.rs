//! MCP Request Handlers
//!
//! One module per tool family. Every note tool obtains the lazily built
//! session and runs a single query against its current snapshot.

pub mod credentials;
pub mod initialize;
pub mod labels;
pub mod notes;
pub mod tools;

use crate::mcp::server::McpServices;
use crate::mcp::types::MCPError;
use crate::session::KeepSession;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Deserialize tool arguments, treating absent arguments as `{}`
pub(crate) fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, MCPError> {
    let params = if params.is_null() {
        Value::Object(Default::default())
    } else {
        params
    };
    serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))
}

pub(crate) fn to_value<T: Serialize>(value: &T) -> Result<Value, MCPError> {
    serde_json::to_value(value)
        .map_err(|e| MCPError::internal_error(format!("Failed to serialize result: {}", e)))
}

/// The authenticated session, building it on first use
pub(crate) async fn session(services: &McpServices) -> Result<Arc<KeepSession>, MCPError> {
    services.session.get().await.map_err(|e| {
        let mut error = MCPError::from(e);
        error.message = format!(
            "{}. Run the check_credentials tool for details or re-run `wlater setup`.",
            error.message
        );
        error
    })
}
