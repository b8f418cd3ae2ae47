use super::{execution_error, parse_arguments, text_result, tool, JsonRpcError, Tool};
use chrono::Utc;
use serde::Deserialize;

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "cron_explain",
            "Validate a 5-field cron expression (minute hour day-of-month month day-of-week, Sunday = 0), describe it in plain English and list its next run times. Supports *, */n, a/n, a-b, a-b/n and comma lists.",
            serde_json::json!({
                "expression": {
                    "type": "string",
                    "description": "Cron expression, e.g. '*/15 9-17 * * 1-5'"
                },
                "count": {
                    "type": "number",
                    "description": "Number of upcoming runs to list (default: 5, max: 100)"
                },
                "from": {
                    "type": "string",
                    "description": "Simulate from this wall-clock time, e.g. '2024-01-01 09:30' (default: now)"
                }
            }),
            &["expression"],
        ),
        tool(
            "timestamp_convert",
            "Convert a Unix timestamp (seconds, or milliseconds when longer than 10 digits) or an ISO-8601 date into every common representation, including a relative phrase such as '3 hours ago'.",
            serde_json::json!({
                "input": {
                    "type": "string",
                    "description": "Timestamp or date (default: now)"
                },
                "tz": {
                    "type": "string",
                    "description": "UTC offset for the local rendering: UTC, Z, +05:30, -0800 (default: UTC)"
                }
            }),
            &[],
        ),
    ]
}

pub fn handle_cron_explain(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct CronArgs {
        expression: String,
        count: Option<usize>,
        from: Option<String>,
    }

    let args: CronArgs = parse_arguments(arguments)?;
    let from = crate::cron::parse_from(args.from.as_deref()).map_err(execution_error)?;
    let count = args.count.unwrap_or(5).min(100);

    let output = crate::cron::cron_data(&args.expression, count, from).map_err(execution_error)?;
    text_result(&output)
}

pub fn handle_timestamp_convert(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct TimestampArgs {
        input: Option<serde_json::Value>,
        tz: Option<String>,
    }

    let args: TimestampArgs = parse_arguments(arguments)?;
    // Agents often send numbers for timestamps.
    let input = match args.input {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            return Err(JsonRpcError {
                code: -32602,
                message: format!("Invalid arguments: input must be a string or number, got {other}"),
                data: None,
            })
        }
    };

    let output = crate::timestamp::timestamp_data(
        input.as_deref(),
        args.tz.as_deref().unwrap_or("UTC"),
        Utc::now(),
    )
    .map_err(execution_error)?;
    text_result(&output)
}
