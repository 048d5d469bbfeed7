//! MCP label handlers

use super::{parse_params, session, to_value};
use crate::mcp::server::McpServices;
use crate::mcp::types::MCPError;
use serde::Deserialize;
use serde_json::Value;

/// Parameters for find_label
#[derive(Debug, Deserialize)]
pub struct FindLabelParams {
    pub name: String,
}

/// Handle list_labels
pub async fn handle_list_labels(services: &McpServices, _params: Value) -> Result<Value, MCPError> {
    let session = session(services).await?;
    let labels = session.with_engine(|engine| engine.list_labels());
    to_value(&labels)
}

/// Handle find_label
///
/// An unknown name is a `null` result, not an error.
pub async fn handle_find_label(services: &McpServices, params: Value) -> Result<Value, MCPError> {
    let params: FindLabelParams = parse_params(params)?;
    let session = session(services).await?;
    let label = session.with_engine(|engine| engine.find_label(&params.name));
    to_value(&label)
}
