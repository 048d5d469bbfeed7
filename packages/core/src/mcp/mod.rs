//! Model Context Protocol (MCP) Integration
//!
//! Stdio JSON-RPC 2.0 server exposing read-only note tools to AI assistants.
//!
//! # Architecture
//!
//! - **Protocol only**: handlers translate JSON arguments into query engine
//!   calls and serialize the results; no business logic lives here
//! - **Lazy session**: the first note tool call loads credentials and
//!   authenticates; `check_credentials` never does
//! - **stdio transport**: one JSON message per line on stdin/stdout, logs on stderr
//!
//! # Usage
//!
//! ```json
//! {
//!   "jsonrpc": "2.0",
//!   "id": 1,
//!   "method": "tools/call",
//!   "params": {
//!     "name": "search_notes",
//!     "arguments": {"query": "budget", "colors": ["RED"]}
//!   }
//! }
//! ```

pub mod handlers;
pub mod server;
pub mod types;

#[cfg(test)]
mod test_support;

pub use server::{handle_message, run_mcp_server, serve, McpServices};
pub use types::{MCPError, MCPNotification, MCPRequest, MCPResponse};
