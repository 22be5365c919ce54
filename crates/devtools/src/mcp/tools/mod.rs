mod color;
mod json;
mod password;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn parse_args<T: serde::de::DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null)).map_err(|e| JsonRpcError {
        code: INVALID_PARAMS,
        message: format!("Invalid arguments: {e}"),
        data: None,
    })
}

fn internal_err(message: String) -> JsonRpcError {
    JsonRpcError {
        code: INTERNAL_ERROR,
        message,
        data: None,
    }
}

/// Every core failure maps to invalid params, tagged with the error kind.
fn core_err(error: devtools_core::Error) -> JsonRpcError {
    JsonRpcError {
        code: INVALID_PARAMS,
        message: error.to_string(),
        data: Some(serde_json::json!({ "kind": error.kind() })),
    }
}

fn to_text_result(value: &impl Serialize) -> Result<serde_json::Value, JsonRpcError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| internal_err(format!("Serialization error: {e}")))?;

    serde_json::to_value(CallToolResult {
        content: vec![Content::Text { text: json }],
        is_error: None,
    })
    .map_err(|e| internal_err(format!("Internal error: {e}")))
}

// ---------------------------------------------------------------------------
// Protocol handlers
// ---------------------------------------------------------------------------

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "devtools".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| internal_err(format!("Internal error: {e}")))
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "color_convert".to_string(),
            description: "Convert a color between HEX, RGB and HSL. Accepts '#RRGGBB', '#RGB', 'rgb(r, g, b)' or 'hsl(h, s%, l%)' and returns all three notations, with HEX in uppercase.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "color": {
                        "type": "string",
                        "description": "Color to convert (e.g., '#3498db', 'rgb(52, 152, 219)', 'hsl(204, 70%, 53%)')"
                    }
                },
                "required": ["color"]
            }),
        },
        Tool {
            name: "color_palette".to_string(),
            description: "Generate shades (blends toward black) and tints (blends toward white) of a base color. Returns two lists of lowercase '#rrggbb' strings, ordered from the subtlest change to the strongest.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "baseColor": {
                        "type": "string",
                        "description": "Base color in any supported notation"
                    },
                    "count": {
                        "type": "number",
                        "description": "Number of shades and of tints to generate (default: 5, min: 1, max: 20)"
                    }
                },
                "required": ["baseColor"]
            }),
        },
        Tool {
            name: "password_check".to_string(),
            description: "Score a password from 0 to 100, classify its strength (weak, medium, strong, very_strong), estimate its entropy in bits and suggest improvements.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "password": {
                        "type": "string",
                        "description": "Password to analyze (must not be empty)"
                    }
                },
                "required": ["password"]
            }),
        },
        Tool {
            name: "password_generate".to_string(),
            description: "Generate a random password from a cryptographically secure source, drawing uniformly from the selected character classes. Returns the password and its strength score.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "length": {
                        "type": "number",
                        "description": "Password length (default: 16, min: 8, max: 128)"
                    },
                    "include_uppercase": {
                        "type": "boolean",
                        "description": "Include A-Z (default: true)"
                    },
                    "include_lowercase": {
                        "type": "boolean",
                        "description": "Include a-z (default: true)"
                    },
                    "include_numbers": {
                        "type": "boolean",
                        "description": "Include 0-9 (default: true)"
                    },
                    "include_symbols": {
                        "type": "boolean",
                        "description": "Include symbols (default: true)"
                    }
                }
            }),
        },
        Tool {
            name: "json_validate".to_string(),
            description: "Check whether a string is valid JSON. Valid documents are returned pretty-printed with keys sorted at every depth; invalid ones return the parser's error message.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "jsonString": {
                        "type": "string",
                        "description": "JSON text to validate"
                    }
                },
                "required": ["jsonString"]
            }),
        },
        Tool {
            name: "json_diff".to_string(),
            description: "Compare the top-level keys of two JSON objects. Returns the keys added in the second document, the keys removed from the first, and the keys whose values changed (with old and new values).".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "json1": {
                        "type": "string",
                        "description": "Original JSON document"
                    },
                    "json2": {
                        "type": "string",
                        "description": "Changed JSON document"
                    }
                },
                "required": ["json1", "json2"]
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(|e| internal_err(format!("Internal error: {e}")))
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: INVALID_PARAMS,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    log::debug!("tools/call: {}", params.name);

    match params.name.as_str() {
        "color_convert" => color::handle_color_convert(params.arguments, global).await,
        "color_palette" => color::handle_color_palette(params.arguments, global).await,
        "password_check" => password::handle_password_check(params.arguments, global).await,
        "password_generate" => password::handle_password_generate(params.arguments, global).await,
        "json_validate" => json::handle_json_validate(params.arguments, global).await,
        "json_diff" => json::handle_json_diff(params.arguments, global).await,
        _ => Err(JsonRpcError {
            code: INVALID_PARAMS,
            message: format!("Unknown tool: {}", params.name),
            data: None,
        }),
    }
}
