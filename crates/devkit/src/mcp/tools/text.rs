use super::{execution_error, parse_arguments, text_result, tool, JsonRpcError, Tool};
use crate::json::Operation;
use devkit_core::json::Indent;
use devkit_core::lorem::Unit;
use serde::{Deserialize, Serialize};

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            "json_convert",
            "Format, minify or convert JSON. to_csv flattens nested objects into dot-separated columns; from_csv, from_yaml and from_xml return pretty JSON. XML attributes land under '@attributes' and repeated elements become arrays.",
            serde_json::json!({
                "input": {
                    "type": "string",
                    "description": "Document to convert (JSON, or CSV/YAML/XML for the from_* operations)"
                },
                "operation": {
                    "type": "string",
                    "enum": ["format", "minify", "to_csv", "from_csv", "to_yaml", "from_yaml", "from_xml"],
                    "description": "Conversion to run"
                },
                "indent": {
                    "type": "string",
                    "enum": ["two", "four", "tab"],
                    "description": "Indentation for pretty output (default: two)"
                },
                "delimiter": {
                    "type": "string",
                    "description": "CSV field delimiter for from_csv (default: ',')"
                }
            }),
            &["input", "operation"],
        ),
        tool(
            "regex_test",
            "Run a regular expression against text and list every match with byte offsets and capture groups. Flags: g (all matches), i, m, s, x. Backreferences and lookaround are not supported.",
            serde_json::json!({
                "pattern": { "type": "string", "description": "Regular expression" },
                "text": { "type": "string", "description": "Text to search" },
                "flags": { "type": "string", "description": "Flags (default: 'g')" }
            }),
            &["pattern", "text"],
        ),
        tool(
            "json_to_typescript",
            "Generate TypeScript interfaces from a sample JSON document. Nested objects get their own interface; arrays are typed from their first element.",
            serde_json::json!({
                "input": { "type": "string", "description": "Sample JSON document" },
                "root_name": {
                    "type": "string",
                    "description": "Name of the top-level interface (default: Root)"
                },
                "optional": {
                    "type": "boolean",
                    "description": "Mark fields whose sample value is null as optional (default: false)"
                }
            }),
            &["input"],
        ),
        tool(
            "text_diff",
            "Compare two texts line by line. Returns added/removed/unchanged counts, every line with its kind and line numbers, and a unified patch.",
            serde_json::json!({
                "original": { "type": "string", "description": "Original text" },
                "modified": { "type": "string", "description": "Modified text" },
                "context": {
                    "type": "number",
                    "description": "Context lines around each hunk of the patch (default: 3)"
                }
            }),
            &["original", "modified"],
        ),
        tool(
            "lorem_ipsum",
            "Generate Lorem Ipsum placeholder text. Output is deterministic for a given count and unit.",
            serde_json::json!({
                "count": {
                    "type": "number",
                    "description": "How many units, 1-100 (default: 3)"
                },
                "unit": {
                    "type": "string",
                    "enum": ["words", "sentences", "paragraphs"],
                    "description": "What to count (default: paragraphs)"
                }
            }),
            &[],
        ),
    ]
}

#[derive(Debug, Serialize)]
struct ConvertOutput {
    operation: Operation,
    output: String,
}

pub fn handle_json_convert(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct ConvertArgs {
        input: String,
        operation: Operation,
        #[serde(default)]
        indent: Indent,
        delimiter: Option<char>,
    }

    let args: ConvertArgs = parse_arguments(arguments)?;
    let output = crate::json::convert_data(
        args.operation,
        &args.input,
        args.indent,
        args.delimiter.unwrap_or(','),
    )
    .map_err(execution_error)?;

    text_result(&ConvertOutput {
        operation: args.operation,
        output,
    })
}

pub fn handle_regex_test(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct RegexArgs {
        pattern: String,
        text: String,
        flags: Option<String>,
    }

    let args: RegexArgs = parse_arguments(arguments)?;
    let flags = args.flags.as_deref().unwrap_or("g");
    let report =
        devkit_core::pattern::test(&args.pattern, flags, &args.text).map_err(execution_error)?;
    text_result(&report)
}

#[derive(Debug, Serialize)]
struct TypescriptOutput {
    output: String,
}

pub fn handle_json_to_typescript(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct TypescriptArgs {
        input: String,
        root_name: Option<String>,
        #[serde(default)]
        optional: bool,
    }

    let args: TypescriptArgs = parse_arguments(arguments)?;
    let root = args
        .root_name
        .as_deref()
        .unwrap_or(devkit_core::typescript::DEFAULT_ROOT);
    let output =
        crate::json::typescript_data(&args.input, root, args.optional).map_err(execution_error)?;

    text_result(&TypescriptOutput { output })
}

#[derive(Debug, Serialize)]
struct DiffOutput {
    #[serde(flatten)]
    report: devkit_core::diff::DiffReport,
    unified: String,
}

pub fn handle_text_diff(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct DiffArgs {
        original: String,
        modified: String,
        context: Option<usize>,
    }

    let args: DiffArgs = parse_arguments(arguments)?;
    let context = args.context.unwrap_or(devkit_core::diff::DEFAULT_CONTEXT);
    text_result(&DiffOutput {
        report: crate::diff::diff_data(&args.original, &args.modified),
        unified: devkit_core::diff::unified(&args.original, &args.modified, context),
    })
}

pub fn handle_lorem_ipsum(
    arguments: Option<serde_json::Value>,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct LoremArgs {
        count: Option<usize>,
        #[serde(default)]
        unit: Unit,
    }

    let args: LoremArgs = parse_arguments(arguments)?;
    let count = args.count.unwrap_or(devkit_core::lorem::DEFAULT_COUNT);
    let output = crate::lorem::lorem_data(count, args.unit).map_err(execution_error)?;
    text_result(&output)
}
