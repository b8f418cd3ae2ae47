use super::{execution_error, parse_arguments, text_result, tool, JsonRpcError, Tool};
use devkit_core::codec::{self, Base64Variant, Radix, UrlMode};
use devkit_core::numwords::Currency;
use serde::Deserialize;

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "base64_encode",
            "Encode UTF-8 text as Base64 (standard or URL-safe alphabet).",
            serde_json::json!({
                "text": {
                    "type": "string",
                    "description": "Text to encode"
                },
                "url_safe": {
                    "type": "boolean",
                    "description": "Use the URL-safe alphabet without padding (default: false)"
                }
            }),
            &["text"],
        ),
        tool(
            "base64_decode",
            "Decode Base64 or a data: URL. Whitespace is ignored and missing padding is tolerated. Returns the text when the bytes are UTF-8, plus the byte size and MIME type for data URLs.",
            serde_json::json!({
                "text": {
                    "type": "string",
                    "description": "Base64 text or data: URL"
                },
                "url_safe": {
                    "type": "boolean",
                    "description": "Input uses the URL-safe alphabet (default: false)"
                }
            }),
            &["text"],
        ),
        tool(
            "url_encode",
            "Percent-encode text. 'component' mode escapes everything except A-Z a-z 0-9 - _ . ! ~ * ' ( ); 'uri' mode also keeps URI delimiters such as : / ? # & =.",
            url_schema(),
            &["text"],
        ),
        tool(
            "url_decode",
            "Decode percent-encoded text. 'uri' mode leaves escapes of reserved characters (e.g. %2F) intact.",
            url_schema(),
            &["text"],
        ),
        tool(
            "radix_convert",
            "Convert an integer between binary, octal, decimal and hexadecimal. Detects the base from 0x/0b/0o prefixes when 'from' is omitted. Arbitrary precision.",
            serde_json::json!({
                "number": {
                    "type": "string",
                    "description": "Number to convert, e.g. '0xff', '0b1010', '255'"
                },
                "from": {
                    "type": "string",
                    "enum": ["binary", "octal", "decimal", "hex"],
                    "description": "Input base (default: detect)"
                }
            }),
            &["number"],
        ),
        tool(
            "number_to_words",
            "Spell out a number in English words, optionally as US dollars and cents.",
            serde_json::json!({
                "number": {
                    "type": "string",
                    "description": "Number, e.g. '1234.56' or '-42'"
                },
                "currency": {
                    "type": "string",
                    "enum": ["none", "usd"],
                    "description": "Currency wording (default: none)"
                }
            }),
            &["number"],
        ),
        tool(
            "color_convert",
            "Convert a color between HEX, RGB and HSL. Accepts '#rgb', '#rrggbb', 'rgb(r, g, b)' and 'hsl(h, s%, l%)'.",
            serde_json::json!({
                "color": {
                    "type": "string",
                    "description": "Color in any supported notation"
                }
            }),
            &["color"],
        ),
        tool(
            "chmod_convert",
            "Convert Unix permissions between octal ('755') and symbolic ('rwxr-xr-x') notation, with a breakdown per class and a chmod command.",
            serde_json::json!({
                "mode": {
                    "type": "string",
                    "description": "Octal or symbolic permissions"
                },
                "target": {
                    "type": "string",
                    "description": "File name used in the chmod command (default: file)"
                }
            }),
            &["mode"],
        ),
    ]
}

fn url_schema() -> serde_json::Value {
    serde_json::json!({
        "text": {
            "type": "string",
            "description": "Text to encode or decode"
        },
        "mode": {
            "type": "string",
            "enum": ["component", "uri"],
            "description": "Escaping rules (default: component)"
        }
    })
}

#[derive(Deserialize)]
struct Base64Args {
    text: String,
    #[serde(default)]
    url_safe: bool,
}

impl Base64Args {
    fn variant(&self) -> Base64Variant {
        if self.url_safe {
            Base64Variant::UrlSafe
        } else {
            Base64Variant::Standard
        }
    }
}

pub fn handle_base64_encode(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: Base64Args = parse_arguments(arguments)?;
    let output = crate::base64::encode_data(args.text.as_bytes(), args.variant());
    text_result(&output)
}

pub fn handle_base64_decode(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: Base64Args = parse_arguments(arguments)?;
    let output = crate::base64::decode_data(&args.text, args.variant()).map_err(execution_error)?;
    text_result(&output)
}

pub fn handle_url(
    arguments: Option<serde_json::Value>,
    decode: bool,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct UrlArgs {
        text: String,
        #[serde(default)]
        mode: UrlMode,
    }

    let args: UrlArgs = parse_arguments(arguments)?;
    let output = crate::url::url_data(&args.text, args.mode, decode).map_err(execution_error)?;
    text_result(&output)
}

pub fn handle_radix_convert(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct RadixArgs {
        number: serde_json::Value,
        from: Option<Radix>,
    }

    let args: RadixArgs = parse_arguments(arguments)?;
    let number = string_or_number(args.number, "number")?;
    let output = codec::convert_radix(&number, args.from).map_err(execution_error)?;
    text_result(&output)
}

pub fn handle_number_to_words(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct WordsArgs {
        number: serde_json::Value,
        #[serde(default)]
        currency: Currency,
    }

    let args: WordsArgs = parse_arguments(arguments)?;
    let number = string_or_number(args.number, "number")?;
    let output = crate::words::words_data(&number, args.currency).map_err(execution_error)?;
    text_result(&output)
}

pub fn handle_color_convert(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct ColorArgs {
        color: String,
    }

    let args: ColorArgs = parse_arguments(arguments)?;
    let output = crate::color::color_data(&args.color).map_err(execution_error)?;
    text_result(&output)
}

pub fn handle_chmod_convert(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct ChmodArgs {
        mode: serde_json::Value,
        target: Option<String>,
    }

    let args: ChmodArgs = parse_arguments(arguments)?;
    let mode = string_or_number(args.mode, "mode")?;
    let output = crate::chmod::chmod_data(&mode, args.target.as_deref().unwrap_or("file"))
        .map_err(execution_error)?;
    text_result(&output)
}

/// Numbers arrive as JSON numbers as often as strings.
fn string_or_number(value: serde_json::Value, field: &str) -> Result<String, JsonRpcError> {
    match value {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(JsonRpcError {
            code: -32602,
            message: format!("Invalid arguments: {field} must be a string or number, got {other}"),
            data: None,
        }),
    }
}
