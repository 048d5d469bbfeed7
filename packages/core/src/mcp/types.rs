//! JSON-RPC 2.0 message types for the MCP server

use crate::error::WlaterError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// Standard JSON-RPC error codes
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

// Application error codes (-32000 and below are reserved for servers)
pub const NOTE_NOT_FOUND: i32 = -32000;
pub const WRONG_NOTE_TYPE: i32 = -32001;
pub const AUTHENTICATION_FAILED: i32 = -32002;
pub const NOT_CONFIGURED: i32 = -32003;
pub const VALIDATION_ERROR: i32 = -32004;

const JSONRPC_VERSION: &str = "2.0";

fn deserialize_jsonrpc<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let version = String::deserialize(deserializer)?;
    if version != JSONRPC_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported jsonrpc version: {}",
            version
        )));
    }
    Ok(version)
}

/// JSON-RPC request (carries an id and expects a response)
#[derive(Debug, Clone, Deserialize)]
pub struct MCPRequest {
    #[serde(deserialize_with = "deserialize_jsonrpc")]
    pub jsonrpc: String,
    /// Number or string, echoed back verbatim
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// JSON-RPC notification (no id, never answered)
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MCPNotification {
    #[serde(deserialize_with = "deserialize_jsonrpc")]
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// JSON-RPC response
#[derive(Debug, Clone, Serialize)]
pub struct MCPResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MCPError>,
}

impl MCPResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, error: MCPError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MCPError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl MCPError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(PARSE_ERROR, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, message)
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }
}

impl From<WlaterError> for MCPError {
    fn from(error: WlaterError) -> Self {
        let code = match &error {
            WlaterError::InvalidInput(_) => VALIDATION_ERROR,
            WlaterError::NotFound { .. } => NOTE_NOT_FOUND,
            WlaterError::WrongType { .. } => WRONG_NOTE_TYPE,
            WlaterError::AuthenticationFailed(_) => AUTHENTICATION_FAILED,
            WlaterError::NotConfigured(_) => NOT_CONFIGURED,
            WlaterError::Sync(_) | WlaterError::Io { .. } | WlaterError::Serialization(_) => {
                INTERNAL_ERROR
            }
        };
        Self::new(code, error.to_string())
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
