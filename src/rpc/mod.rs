//! JSON-RPC 2.0 envelope and method dispatch shared by the `/mcp` route and
//! the stdio transport.

use metrics::counter;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::tools;
use crate::AppState;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "sei-analyzer";

pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// Absent for notifications.
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Parse one frame of text and dispatch it.
pub async fn handle_text(state: &AppState, raw: &str) -> Option<JsonRpcResponse> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => handle_value(state, value).await,
        Err(e) => Some(JsonRpcResponse::failure(
            Value::Null,
            codes::PARSE_ERROR,
            format!("Parse error: {e}"),
        )),
    }
}

/// Dispatch an already-parsed frame. Returns `None` for notifications.
pub async fn handle_value(state: &AppState, value: Value) -> Option<JsonRpcResponse> {
    let id_hint = value.get("id").cloned().unwrap_or(Value::Null);

    let request: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(r) => r,
        Err(e) => {
            return Some(JsonRpcResponse::failure(
                id_hint,
                codes::INVALID_REQUEST,
                format!("Invalid request: {e}"),
            ))
        }
    };

    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::failure(
            id_hint,
            codes::INVALID_REQUEST,
            "Invalid request: jsonrpc must be \"2.0\"",
        ));
    }

    dispatch(state, request).await
}

pub async fn dispatch(state: &AppState, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    let JsonRpcRequest { id, method, params, .. } = request;
    counter!("rpc_requests_total", "method" => metric_label(&method)).increment(1);

    let outcome: Result<Value, JsonRpcError> = match method.as_str() {
        "initialize" => Ok(initialize_result()),
        "notifications/initialized" => Ok(Value::Null),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": tools::definitions() })),
        "tools/call" => call_tool(state, &params).await,
        other => Err(JsonRpcError {
            code: codes::METHOD_NOT_FOUND,
            message: format!("Method not found: {other}"),
        }),
    };

    // Notifications never get a reply, successful or not.
    let id = match id {
        Some(id) => id,
        None => {
            if let Err(e) = &outcome {
                tracing::debug!(method = %method, code = e.code, "Notification failed");
            }
            return None;
        }
    };

    Some(match outcome {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(error) => JsonRpcResponse {
            jsonrpc: "2.0".into(),
            id,
            result: None,
            error: Some(error),
        },
    })
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

async fn call_tool(state: &AppState, params: &Value) -> Result<Value, JsonRpcError> {
    let Some(name) = params.get("name").and_then(Value::as_str) else {
        return Err(JsonRpcError {
            code: codes::INVALID_PARAMS,
            message: "Invalid params: tools/call requires a tool name".into(),
        });
    };
    let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

    match tools::call(state, name, &arguments).await {
        Ok(structured) => Ok(wrap_tool_result(structured)),
        Err(e) => {
            tracing::warn!(tool = %name, error = %e, "Tool call failed");
            Err(JsonRpcError {
                code: e.rpc_code(),
                message: e.public_message(),
            })
        }
    }
}

/// MCP-style tool result: text block plus the structured payload.
pub fn wrap_tool_result(structured: Value) -> Value {
    let text = serde_json::to_string_pretty(&structured).unwrap_or_else(|_| structured.to_string());
    json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": structured,
        "isError": false,
    })
}

/// Bounded label set for the request counter.
fn metric_label(method: &str) -> &'static str {
    match method {
        "initialize" => "initialize",
        "notifications/initialized" => "notifications/initialized",
        "ping" => "ping",
        "tools/list" => "tools/list",
        "tools/call" => "tools/call",
        _ => "unknown",
    }
}
