use super::{execution_error, parse_arguments, text_result, tool, JsonRpcError, Tool};
use serde::Deserialize;

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "subnet_calculate",
            "Calculate an IPv4 CIDR block: network, broadcast, masks, first/last usable host, host counts and address class. Optionally split it into child subnets of a longer prefix (first 256 listed).",
            serde_json::json!({
                "cidr": {
                    "type": "string",
                    "description": "CIDR notation, e.g. '10.0.0.0/16'"
                },
                "split": {
                    "type": "number",
                    "description": "Prefix length of the child subnets (optional, must be longer than the block's)"
                }
            }),
            &["cidr"],
        ),
        tool(
            "ua_parse",
            "Parse a User-Agent header into browser, rendering engine, operating system and device type.",
            serde_json::json!({
                "user_agent": {
                    "type": "string",
                    "description": "User-Agent string"
                }
            }),
            &["user_agent"],
        ),
        tool(
            "http_status_lookup",
            "Look up HTTP status codes by exact code, code prefix or text in the name/description. Returns matching codes with name and description.",
            serde_json::json!({
                "query": {
                    "type": "string",
                    "description": "Code ('404'), prefix ('5') or text ('rate limit'); omit to list all"
                },
                "class": {
                    "type": "number",
                    "description": "Restrict to a class, 1-5 (optional)"
                }
            }),
            &[],
        ),
    ]
}

pub fn handle_subnet_calculate(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct SubnetArgs {
        cidr: String,
        split: Option<u8>,
    }

    let args: SubnetArgs = parse_arguments(arguments)?;
    let output = crate::subnet::subnet_data(&args.cidr, args.split).map_err(execution_error)?;
    text_result(&output)
}

pub fn handle_ua_parse(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct UaArgs {
        user_agent: String,
    }

    let args: UaArgs = parse_arguments(arguments)?;
    let parsed = devkit_core::useragent::parse(&args.user_agent).map_err(execution_error)?;
    text_result(&parsed)
}

pub fn handle_http_status_lookup(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct HttpStatusArgs {
        query: Option<String>,
        class: Option<u16>,
    }

    let args: HttpStatusArgs = parse_arguments(arguments)?;
    if let Some(class) = args.class.filter(|c| !(1..=5).contains(c)) {
        return Err(JsonRpcError {
            code: -32602,
            message: format!("Invalid arguments: class must be between 1 and 5, got {class}"),
            data: None,
        });
    }

    let codes = crate::http_status::http_status_data(args.query.as_deref(), args.class);
    text_result(&codes)
}
