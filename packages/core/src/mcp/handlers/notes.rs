//! MCP note handlers
//!
//! Wrap the query engine's read operations. Argument errors are reported
//! as `invalid_params`; lookup failures keep their own error codes.

use super::{parse_params, session, to_value};
use crate::mcp::server::McpServices;
use crate::mcp::types::MCPError;
use crate::models::Color;
use crate::query::SearchQuery;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Parameters for get_note
#[derive(Debug, Deserialize)]
pub struct GetNoteParams {
    pub note_id: String,
}

/// Parameters for get_list_items
#[derive(Debug, Deserialize)]
pub struct GetListItemsParams {
    pub list_id: String,
}

/// Parameters for search_notes
#[derive(Debug, Default, Deserialize)]
pub struct SearchNotesParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub pinned: Option<bool>,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(default)]
    pub trashed: Option<bool>,
    /// Color names such as `"RED"`, matched case-insensitively
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    /// Exact label names
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SearchNotesParams {
    /// Build the engine query, rejecting unknown color names
    pub fn into_query(self, default_limit: usize) -> Result<SearchQuery, MCPError> {
        let mut query = SearchQuery::new().with_limit(self.limit.unwrap_or(default_limit));

        if let Some(text) = self.query {
            query = query.with_text(text);
        }
        if let Some(pinned) = self.pinned {
            query = query.with_pinned(pinned);
        }
        if let Some(archived) = self.archived {
            query = query.with_archived(archived);
        }
        if let Some(trashed) = self.trashed {
            query = query.with_trashed(trashed);
        }
        if let Some(names) = self.colors {
            let colors = names
                .iter()
                .map(|name| name.parse::<Color>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;
            query = query.with_colors(colors);
        }
        if let Some(labels) = self.labels {
            query = query.with_labels(labels);
        }

        Ok(query)
    }
}

/// Handle list_all_notes
pub async fn handle_list_all_notes(
    services: &McpServices,
    _params: Value,
) -> Result<Value, MCPError> {
    let session = session(services).await?;
    let listing = session.with_engine(|engine| engine.list_notes(services.config.list_limit));
    debug!(count = listing.len(), truncated = listing.is_truncated(), "list_all_notes");
    to_value(&listing)
}

/// Handle get_note
pub async fn handle_get_note(services: &McpServices, params: Value) -> Result<Value, MCPError> {
    let params: GetNoteParams = parse_params(params)?;
    let session = session(services).await?;
    let detail = session.with_engine(|engine| engine.get_note(&params.note_id))?;
    to_value(&detail)
}

/// Handle get_list_items
pub async fn handle_get_list_items(
    services: &McpServices,
    params: Value,
) -> Result<Value, MCPError> {
    let params: GetListItemsParams = parse_params(params)?;
    let session = session(services).await?;
    let items = session.with_engine(|engine| engine.get_list_items(&params.list_id))?;
    to_value(&items)
}

/// Handle search_notes
pub async fn handle_search_notes(services: &McpServices, params: Value) -> Result<Value, MCPError> {
    let params: SearchNotesParams = parse_params(params)?;
    let query = params.into_query(services.config.search_limit)?;
    let session = session(services).await?;
    let listing = session.with_engine(|engine| engine.search_notes(&query));
    debug!(count = listing.len(), truncated = listing.is_truncated(), "search_notes");
    to_value(&listing)
}
