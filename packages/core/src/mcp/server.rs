//! MCP stdio Server
//!
//! Async Tokio task that handles JSON-RPC 2.0 messages, one per line.
//! Requests are processed one at a time, in arrival order.

use crate::config::ServerConfig;
use crate::credentials::FileCredentialStore;
use crate::mcp::handlers::{initialize, tools};
use crate::mcp::types::{MCPError, MCPNotification, MCPRequest, MCPResponse};
use crate::session::{LazySession, SnapshotSyncClient};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, error, info, instrument, warn};

/// Everything a handler may need
#[derive(Clone)]
pub struct McpServices {
    pub session: Arc<LazySession>,
    pub config: ServerConfig,
}

impl McpServices {
    pub fn new(session: Arc<LazySession>, config: ServerConfig) -> Self {
        Self { session, config }
    }

    /// File credential store and snapshot sync client at the configured paths
    pub fn from_config(config: ServerConfig) -> Self {
        let store = Arc::new(FileCredentialStore::new(&config.credentials_path));
        let client = Arc::new(SnapshotSyncClient::new(&config.snapshot_path));
        Self::new(Arc::new(LazySession::new(store, client)), config)
    }
}

/// Run the MCP server on stdin/stdout until stdin closes
#[instrument(skip(services))]
pub async fn run_mcp_server(services: McpServices) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    serve(services, tokio::io::stdin(), &mut stdout).await
}

/// Serve JSON-RPC messages from `reader`, writing responses to `writer`
///
/// Returns Ok(()) at end of input, or Err on I/O failure.
pub async fn serve<R, W>(services: McpServices, reader: R, writer: W) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("🔌 MCP stdio server started");

    let mut lines = BufReader::new(reader).lines();
    let mut writer = BufWriter::new(writer);

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        debug!("📥 MCP message: {}", line);

        if let Some(response) = handle_message(&services, &line).await {
            debug!("📤 MCP response (id={})", response.id);
            write_response(&mut writer, &response).await?;
        }
    }

    info!("🔌 MCP stdio server stopped (stdin closed)");
    Ok(())
}

/// Handle one raw message; notifications produce no response
pub async fn handle_message(services: &McpServices, line: &str) -> Option<MCPResponse> {
    let message: Value = match serde_json::from_str(line) {
        Ok(message) => message,
        Err(e) => {
            warn!("❌ Failed to parse JSON-RPC message: {}", e);
            return Some(MCPResponse::error(
                Value::Null,
                MCPError::parse_error(format!("Invalid JSON: {}", e)),
            ));
        }
    };

    if message.get("id").is_none() {
        match serde_json::from_value::<MCPNotification>(message) {
            Ok(notification) => handle_notification(&notification),
            Err(e) => warn!("❌ Ignoring malformed notification: {}", e),
        }
        return None;
    }

    let id = message["id"].clone();
    match serde_json::from_value::<MCPRequest>(message) {
        Ok(request) => Some(handle_request(services, request).await),
        Err(e) => {
            warn!("❌ Invalid JSON-RPC request: {}", e);
            Some(MCPResponse::error(
                id,
                MCPError::invalid_request(format!("Invalid request: {}", e)),
            ))
        }
    }
}

fn handle_notification(notification: &MCPNotification) {
    match notification.method.as_str() {
        "notifications/initialized" => info!("🤝 MCP client initialized"),
        method => debug!("Ignoring notification: {}", method),
    }
}

/// Handle a JSON-RPC request and return a response
#[instrument(skip(services, request), fields(method = %request.method, id = %request.id))]
async fn handle_request(services: &McpServices, request: MCPRequest) -> MCPResponse {
    let result = match request.method.as_str() {
        "initialize" => initialize::handle_initialize(request.params),
        "ping" => Ok(json!({})),
        "tools/list" => tools::handle_tools_list(request.params),
        "tools/call" => tools::handle_tools_call(services, request.params).await,
        _ => {
            warn!("⚠️  Unknown MCP method: {}", request.method);
            Err(MCPError::method_not_found(&request.method))
        }
    };

    match result {
        Ok(result) => {
            debug!("✅ MCP request {} succeeded", request.id);
            MCPResponse::success(request.id, result)
        }
        Err(error) => {
            error!(
                "❌ MCP request {} failed: {} (code: {})",
                request.id, error.message, error.code
            );
            MCPResponse::error(request.id, error)
        }
    }
}

async fn write_response<W>(writer: &mut BufWriter<W>, response: &MCPResponse) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_string(response)?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
#[path = "server_test.rs"]
mod server_test;
