//! Model Context Protocol server over JSON-RPC 2.0.
//!
//! Both transports feed raw messages to [`handle_message`]. Requests get a
//! response; notifications (no `id`, or a `notifications/*` method) get none.

mod cli;
mod sse;
mod stdio;
mod tools;

pub use cli::App;

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const JSONRPC_VERSION: &str = "2.0";
const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    params: Option<Value>,
}

impl JsonRpcRequest {
    fn is_notification(&self) -> bool {
        self.id.is_none() || self.method.starts_with("notifications/")
    }
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: &'static str,
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn new(id: Option<Value>, outcome: Result<Value, JsonRpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        };

        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
            error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        cli::Commands::Stdio => stdio::run_stdio(global).await,
        cli::Commands::Sse(options) => sse::run_sse(options, global).await,
    }
}

/// Handle one raw JSON-RPC message. Returns `None` for notifications.
pub async fn handle_message(message: &str, global: &crate::Global) -> Option<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(message) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Discarding unparseable JSON-RPC message: {e}");
            return Some(JsonRpcResponse::new(
                None,
                Err(JsonRpcError {
                    code: PARSE_ERROR,
                    message: format!("Parse error: {e}"),
                    data: None,
                }),
            ));
        }
    };

    if request.is_notification() {
        log::debug!("Notification: {}", request.method);
        return None;
    }

    log::debug!("Request: {}", request.method);

    let outcome = match request.method.as_str() {
        "initialize" => tools::handle_initialize(),
        "ping" => Ok(serde_json::json!({})),
        "tools/list" => tools::handle_tools_list(),
        "tools/call" => tools::handle_tools_call(request.params, global).await,
        method => Err(JsonRpcError {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {method}"),
            data: None,
        }),
    };

    Some(JsonRpcResponse::new(request.id, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global() -> crate::Global {
        crate::Global { verbose: false }
    }

    async fn call(request: Value) -> JsonRpcResponse {
        handle_message(&request.to_string(), &global())
            .await
            .expect("requests get a response")
    }

    fn tool_text(response: &JsonRpcResponse) -> Value {
        let result = response.result.as_ref().unwrap();
        let text = result["content"][0]["text"].as_str().unwrap();
        serde_json::from_str(text).unwrap()
    }

    // ============================================================================
    // Protocol
    // ============================================================================

    #[tokio::test]
    async fn test_initialize() {
        let response = call(serde_json::json!({
            "jsonrpc": "2.0", "id": 1, "method": "initialize"
        }))
        .await;

        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "devtools");
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(response.id, Some(serde_json::json!(1)));
    }

    #[tokio::test]
    async fn test_tools_list_has_every_tool() {
        let response = call(serde_json::json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools/list"
        }))
        .await;

        let result = response.result.unwrap();
        let names: Vec<&str> = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|tool| tool["name"].as_str().unwrap())
            .collect();

        assert_eq!(
            names,
            vec![
                "color_convert",
                "color_palette",
                "password_check",
                "password_generate",
                "json_validate",
                "json_diff"
            ]
        );
    }

    #[tokio::test]
    async fn test_parse_error() {
        let response = handle_message("{not json", &global()).await.unwrap();

        assert!(response.id.is_none());
        assert_eq!(response.error.unwrap().code, PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let initialized = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        assert!(handle_message(initialized, &global()).await.is_none());

        let cancelled = r#"{"jsonrpc":"2.0","method":"notifications/cancelled","params":{}}"#;
        assert!(handle_message(cancelled, &global()).await.is_none());

        // Any message without an id is a notification, known method or not.
        let no_id = r#"{"jsonrpc":"2.0","method":"tools/list"}"#;
        assert!(handle_message(no_id, &global()).await.is_none());
    }

    #[tokio::test]
    async fn test_ping() {
        let response = call(serde_json::json!({
            "jsonrpc": "2.0", "id": "p1", "method": "ping"
        }))
        .await;

        assert_eq!(response.id, Some(serde_json::json!("p1")));
        assert_eq!(response.result, Some(serde_json::json!({})));
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = call(serde_json::json!({
            "jsonrpc": "2.0", "id": 3, "method": "resources/list"
        }))
        .await;

        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let response = call(serde_json::json!({
            "jsonrpc": "2.0", "id": 4, "method": "tools/call",
            "params": {"name": "nope", "arguments": {}}
        }))
        .await;

        assert_eq!(response.error.unwrap().code, tools::INVALID_PARAMS);
    }

    // ============================================================================
    // Tool calls
    // ============================================================================

    #[tokio::test]
    async fn test_color_convert_tool() {
        let response = call(serde_json::json!({
            "jsonrpc": "2.0", "id": 5, "method": "tools/call",
            "params": {"name": "color_convert", "arguments": {"color": "rgb(255, 0, 0)"}}
        }))
        .await;

        let conversion = tool_text(&response);
        assert_eq!(conversion["hex"], "#FF0000");
        assert_eq!(conversion["hsl"], "hsl(0, 100%, 50%)");
    }

    #[tokio::test]
    async fn test_color_convert_tool_bad_input() {
        let response = call(serde_json::json!({
            "jsonrpc": "2.0", "id": 6, "method": "tools/call",
            "params": {"name": "color_convert", "arguments": {"color": "red"}}
        }))
        .await;

        let error = response.error.unwrap();
        assert_eq!(error.code, tools::INVALID_PARAMS);
        assert_eq!(error.data.unwrap()["kind"], "invalid_format");
    }

    #[tokio::test]
    async fn test_color_palette_tool_default_count() {
        let response = call(serde_json::json!({
            "jsonrpc": "2.0", "id": 7, "method": "tools/call",
            "params": {"name": "color_palette", "arguments": {"baseColor": "#808080"}}
        }))
        .await;

        let palette = tool_text(&response);
        assert_eq!(palette["shades"].as_array().unwrap().len(), 5);
        assert_eq!(palette["tints"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_password_generate_tool_without_arguments() {
        let response = call(serde_json::json!({
            "jsonrpc": "2.0", "id": 8, "method": "tools/call",
            "params": {"name": "password_generate"}
        }))
        .await;

        let generated = tool_text(&response);
        assert_eq!(generated["password"].as_str().unwrap().len(), 16);
    }

    #[tokio::test]
    async fn test_password_check_tool_empty() {
        let response = call(serde_json::json!({
            "jsonrpc": "2.0", "id": 9, "method": "tools/call",
            "params": {"name": "password_check", "arguments": {"password": ""}}
        }))
        .await;

        assert_eq!(response.error.unwrap().data.unwrap()["kind"], "validation_error");
    }

    #[tokio::test]
    async fn test_json_validate_tool_sorts_keys() {
        let response = call(serde_json::json!({
            "jsonrpc": "2.0", "id": 10, "method": "tools/call",
            "params": {"name": "json_validate", "arguments": {"jsonString": "{\"b\":1,\"a\":2}"}}
        }))
        .await;

        let validation = tool_text(&response);
        assert_eq!(validation["valid"], true);
        assert_eq!(validation["formatted"], "{\n  \"a\": 2,\n  \"b\": 1\n}");
    }

    #[tokio::test]
    async fn test_json_diff_tool() {
        let response = call(serde_json::json!({
            "jsonrpc": "2.0", "id": 11, "method": "tools/call",
            "params": {
                "name": "json_diff",
                "arguments": {"json1": "{\"a\":1}", "json2": "{\"a\":2}"}
            }
        }))
        .await;

        let diff = tool_text(&response);
        assert_eq!(diff["modified"]["a"]["old"], 1);
        assert_eq!(diff["modified"]["a"]["new"], 2);
    }

    #[tokio::test]
    async fn test_missing_arguments_are_invalid_params() {
        let response = call(serde_json::json!({
            "jsonrpc": "2.0", "id": 12, "method": "tools/call",
            "params": {"name": "json_diff", "arguments": {"json1": "{}"}}
        }))
        .await;

        assert_eq!(response.error.unwrap().code, tools::INVALID_PARAMS);
    }
}
