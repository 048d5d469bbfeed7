//! Fixture services for MCP handler tests

use crate::config::ServerConfig;
use crate::credentials::{Credentials, MemoryCredentialStore};
use crate::device_id::DeviceId;
use crate::mcp::server::McpServices;
use crate::models::{Color, EntityGraph, Label, ListItem, Note};
use crate::session::{FixedSyncClient, LazySession};
use serde_json::Value;
use std::sync::Arc;

pub fn graph() -> EntityGraph {
    EntityGraph::new(
        vec![
            Note::text("n1", "Budget", "Q4 budget review")
                .with_color(Color::Red)
                .with_label("l-work")
                .pinned(),
            Note::list(
                "l1",
                "Groceries",
                vec![
                    ListItem::new("i1", "milk", true, 2),
                    ListItem::new("i2", "eggs", false, 1),
                ],
            )
            .with_color(Color::Green),
            Note::text("n2", "Trip", "budget for the trip").trashed(),
        ],
        vec![Label::new("l-work", "Work"), Label::new("l-home", "home")],
    )
}

pub fn credentials() -> Credentials {
    Credentials::new(
        "me@example.com",
        "aas_et/token",
        DeviceId::parse("776c610246edd49c").unwrap(),
    )
}

/// Services over `graph()` with valid credentials
pub fn services() -> McpServices {
    services_with(
        MemoryCredentialStore::with_credentials(credentials()),
        Arc::new(FixedSyncClient::new(graph())),
    )
}

/// Services with no stored credentials
pub fn unconfigured_services() -> McpServices {
    services_with(
        MemoryCredentialStore::new(),
        Arc::new(FixedSyncClient::new(graph())),
    )
}

pub fn services_with(store: MemoryCredentialStore, client: Arc<FixedSyncClient>) -> McpServices {
    McpServices::new(
        Arc::new(LazySession::new(Arc::new(store), client)),
        ServerConfig::in_dir("/nonexistent/wlater"),
    )
}

/// Parse the JSON text payload of a successful tools/call result
pub fn tool_payload(result: &Value) -> Value {
    assert_eq!(result["isError"], false, "tool failed: {}", result);
    serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap()
}
