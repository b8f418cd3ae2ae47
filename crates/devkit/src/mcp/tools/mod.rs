mod crypto;
mod encoding;
mod network;
mod text;
mod time;

use crate::prelude::eprintln;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

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

/// Build a tool definition. `properties` and `required` become the input schema.
fn tool(
    name: &str,
    description: &str,
    properties: serde_json::Value,
    required: &[&str],
) -> Tool {
    Tool {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        }),
    }
}

/// Deserialize tool arguments; a missing `arguments` object counts as `{}`.
fn parse_arguments<T: DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    let arguments = arguments.unwrap_or_else(|| serde_json::json!({}));
    serde_json::from_value(arguments).map_err(|e| JsonRpcError {
        code: -32602,
        message: format!("Invalid arguments: {e}"),
        data: None,
    })
}

fn execution_error(e: impl std::fmt::Display) -> JsonRpcError {
    JsonRpcError {
        code: -32603,
        message: format!("Tool execution error: {e}"),
        data: None,
    }
}

/// Wrap tool output as pretty-printed JSON text content.
fn text_result<T: Serialize>(data: &T) -> Result<serde_json::Value, JsonRpcError> {
    let json_string = serde_json::to_string_pretty(data).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Serialization error: {e}"),
        data: None,
    })?;

    let result = CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "devkit".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let mut tools = Vec::new();
    tools.extend(time::tools());
    tools.extend(network::tools());
    tools.extend(encoding::tools());
    tools.extend(crypto::tools());
    tools.extend(text::tools());

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    if global.verbose {
        eprintln!("Calling {}", params.name);
    }

    match params.name.as_str() {
        "cron_explain" => time::handle_cron_explain(params.arguments),
        "timestamp_convert" => time::handle_timestamp_convert(params.arguments),
        "subnet_calculate" => network::handle_subnet_calculate(params.arguments),
        "ua_parse" => network::handle_ua_parse(params.arguments),
        "http_status_lookup" => network::handle_http_status_lookup(params.arguments),
        "base64_encode" => encoding::handle_base64_encode(params.arguments),
        "base64_decode" => encoding::handle_base64_decode(params.arguments),
        "url_encode" => encoding::handle_url(params.arguments, false),
        "url_decode" => encoding::handle_url(params.arguments, true),
        "radix_convert" => encoding::handle_radix_convert(params.arguments),
        "number_to_words" => encoding::handle_number_to_words(params.arguments),
        "color_convert" => encoding::handle_color_convert(params.arguments),
        "chmod_convert" => encoding::handle_chmod_convert(params.arguments),
        "hash_text" => crypto::handle_hash_text(params.arguments),
        "hmac_sign" => crypto::handle_hmac_sign(params.arguments),
        "hmac_verify" => crypto::handle_hmac_verify(params.arguments),
        "jwt_encode" => crypto::handle_jwt_encode(params.arguments),
        "jwt_decode" => crypto::handle_jwt_decode(params.arguments),
        "jwt_verify" => crypto::handle_jwt_verify(params.arguments),
        "password_analyze" => crypto::handle_password_analyze(params.arguments),
        "uuid_generate" => crypto::handle_uuid_generate(params.arguments),
        "uuid_inspect" => crypto::handle_uuid_inspect(params.arguments),
        "bcrypt_hash" => crypto::handle_bcrypt_hash(params.arguments),
        "bcrypt_verify" => crypto::handle_bcrypt_verify(params.arguments),
        "json_convert" => text::handle_json_convert(params.arguments),
        "regex_test" => text::handle_regex_test(params.arguments),
        "json_to_typescript" => text::handle_json_to_typescript(params.arguments),
        "text_diff" => text::handle_text_diff(params.arguments),
        "lorem_ipsum" => text::handle_lorem_ipsum(params.arguments),
        _ => Err(JsonRpcError {
            code: -32602,
            message: format!("Unknown tool: {}", params.name),
            data: None,
        }),
    }
}
