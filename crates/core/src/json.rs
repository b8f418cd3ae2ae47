//! JSON formatting and conversion to and from CSV and YAML.
//!
//! Object key order is preserved everywhere (`serde_json/preserve_order`).

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonError {
    #[error("{message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("No data to convert")]
    Empty,

    #[error("Need at least a header row and one data row")]
    NotEnoughRows,

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("YAML error: {0}")]
    Yaml(String),
}

impl From<serde_json::Error> for JsonError {
    fn from(e: serde_json::Error) -> Self {
        JsonError::Parse {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        }
    }
}

impl From<csv::Error> for JsonError {
    fn from(e: csv::Error) -> Self {
        JsonError::Csv(e.to_string())
    }
}

impl From<serde_yaml::Error> for JsonError {
    fn from(e: serde_yaml::Error) -> Self {
        JsonError::Yaml(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    #[default]
    Two,
    Four,
    Tab,
}

impl Indent {
    fn as_bytes(self) -> &'static [u8] {
        match self {
            Indent::Two => b"  ",
            Indent::Four => b"    ",
            Indent::Tab => b"\t",
        }
    }
}

pub fn parse(input: &str) -> Result<Value, JsonError> {
    Ok(serde_json::from_str(input)?)
}

pub fn pretty(value: &Value, indent: Indent) -> Result<String, JsonError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes UTF-8.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn format(input: &str, indent: Indent) -> Result<String, JsonError> {
    pretty(&parse(input)?, indent)
}

pub fn minify(input: &str) -> Result<String, JsonError> {
    Ok(serde_json::to_string(&parse(input)?)?)
}

// ============================================================================
// CSV
// ============================================================================

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

fn flatten(object: &Map<String, Value>, prefix: &str, row: &mut Vec<(String, String)>) {
    for (key, value) in object {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(nested) => flatten(nested, &name, row),
            other => row.push((name, cell(other))),
        }
    }
}

/// Flatten an array of objects (or a single object) into quoted CSV.
pub fn to_csv(input: &str) -> Result<String, JsonError> {
    let rows = match parse(input)? {
        Value::Array(items) => items,
        other => vec![other],
    };
    if rows.is_empty() {
        return Err(JsonError::Empty);
    }

    let flat: Vec<Vec<(String, String)>> = rows
        .iter()
        .map(|item| {
            let mut row = Vec::new();
            match item {
                Value::Object(object) => flatten(object, "", &mut row),
                scalar => row.push(("value".to_string(), cell(scalar))),
            }
            row
        })
        .collect();

    let mut headers: Vec<&str> = Vec::new();
    for (key, _) in flat.iter().flatten() {
        if !headers.contains(&key.as_str()) {
            headers.push(key);
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(&headers)?;
    for row in &flat {
        let record = headers.iter().map(|header| {
            row.iter()
                .find(|(key, _)| key.as_str() == *header)
                .map_or("", |(_, value)| value.as_str())
        });
        writer.write_record(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| JsonError::Csv(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).trim_end().to_string())
}

/// Parse CSV with a header row into an array of objects with string values.
pub fn from_csv(input: &str, delimiter: u8) -> Result<Value, JsonError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input.trim().as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let object: Map<String, Value> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = record.get(i).unwrap_or_default();
                (header.to_string(), Value::String(value.to_string()))
            })
            .collect();
        rows.push(Value::Object(object));
    }

    if headers.is_empty() || rows.is_empty() {
        return Err(JsonError::NotEnoughRows);
    }
    Ok(Value::Array(rows))
}

// ============================================================================
// YAML
// ============================================================================

pub fn to_yaml(input: &str) -> Result<String, JsonError> {
    Ok(serde_yaml::to_string(&parse(input)?)?)
}

pub fn from_yaml(input: &str) -> Result<Value, JsonError> {
    Ok(serde_yaml::from_str(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ============================================================================
    // format / minify tests
    // ============================================================================

    #[test]
    fn test_format_preserves_key_order() {
        let formatted = format(r#"{"b":1,"a":[true,null]}"#, Indent::Two).unwrap();
        assert_eq!(formatted, "{\n  \"b\": 1,\n  \"a\": [\n    true,\n    null\n  ]\n}");
    }

    #[test]
    fn test_format_indents() {
        assert_eq!(format(r#"{"a":1}"#, Indent::Four).unwrap(), "{\n    \"a\": 1\n}");
        assert_eq!(format(r#"{"a":1}"#, Indent::Tab).unwrap(), "{\n\t\"a\": 1\n}");
    }

    #[test]
    fn test_minify() {
        assert_eq!(
            minify("{\n  \"z\": 1,\n  \"a\": \"x y\"\n}").unwrap(),
            r#"{"z":1,"a":"x y"}"#
        );
    }

    #[test]
    fn test_parse_error_has_position() {
        match format("{\n  \"a\": 1,\n}", Indent::Two) {
            Err(JsonError::Parse { line, column, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(column, 1);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    // ============================================================================
    // CSV tests
    // ============================================================================

    #[test]
    fn test_to_csv_flattens_and_unions_headers() {
        let input = r#"[
            {"name": "Ada", "address": {"city": "London"}, "tags": ["math", "code"]},
            {"name": "Grace \"Amazing\"", "age": 85, "address": null}
        ]"#;
        let csv = to_csv(input).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], r#""name","address.city","tags","age","address""#);
        assert_eq!(lines[1], r#""Ada","London","math,code","","""#);
        assert_eq!(lines[2], r#""Grace ""Amazing""","","","85","""#);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_to_csv_single_object() {
        assert_eq!(to_csv(r#"{"a":1,"b":false}"#).unwrap(), "\"a\",\"b\"\n\"1\",\"false\"");
    }

    #[test]
    fn test_to_csv_empty_array() {
        assert_eq!(to_csv("[]"), Err(JsonError::Empty));
    }

    #[test]
    fn test_from_csv() {
        let value = from_csv("name, age\n\"Ada\", 36\nGrace\n", b',').unwrap();
        assert_eq!(
            value,
            json!([
                { "name": "Ada", "age": "36" },
                { "name": "Grace", "age": "" }
            ])
        );
    }

    #[test]
    fn test_from_csv_custom_delimiter() {
        let value = from_csv("a;b\n1;2", b';').unwrap();
        assert_eq!(value, json!([{ "a": "1", "b": "2" }]));
    }

    #[test]
    fn test_from_csv_needs_data_row() {
        assert_eq!(from_csv("a,b", b','), Err(JsonError::NotEnoughRows));
        assert_eq!(from_csv("", b','), Err(JsonError::NotEnoughRows));
    }

    // ============================================================================
    // YAML tests
    // ============================================================================

    #[test]
    fn test_to_yaml() {
        let yaml = to_yaml(r#"{"name":"devkit","tags":["a","b"],"nested":{"x":1}}"#).unwrap();
        assert_eq!(yaml, "name: devkit\ntags:\n- a\n- b\nnested:\n  x: 1\n");
    }

    #[test]
    fn test_from_yaml() {
        let value = from_yaml("b: 2\na:\n  - true\n  - text\n").unwrap();
        assert_eq!(value, json!({ "b": 2, "a": [true, "text"] }));
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_from_yaml_error() {
        assert!(matches!(from_yaml("a: [1, 2"), Err(JsonError::Yaml(_))));
    }
}
