//! TypeScript interface generation from a sample JSON document.
//!
//! Types are inferred from values: arrays take the type of their first
//! element, nested objects get their own interface named after the key in
//! PascalCase. The root interface comes first, followed by nested ones.

use serde_json::{Map, Value};

use crate::json::{self, JsonError};

pub const DEFAULT_ROOT: &str = "Root";

/// `user_profile`, `user-profile` and `userProfile` all become `UserProfile`.
pub fn pascal_case(name: &str) -> String {
    let mut out = String::new();
    for part in name.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }

    match out.chars().next() {
        None => "Item".to_string(),
        Some(c) if c.is_ascii_digit() => format!("T{out}"),
        Some(_) => out,
    }
}

fn property_name(key: &str) -> String {
    let mut chars = key.chars();
    let identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if identifier {
        key.to_string()
    } else {
        Value::String(key.to_string()).to_string()
    }
}

struct Generator {
    optional_nulls: bool,
    /// Finished interfaces in completion order (children before parents).
    interfaces: Vec<(String, String)>,
}

impl Generator {
    fn has(&self, name: &str) -> bool {
        self.interfaces.iter().any(|(n, _)| n == name)
    }

    fn infer(&mut self, value: &Value, key: &str) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "boolean".to_string(),
            Value::Number(_) => "number".to_string(),
            Value::String(_) => "string".to_string(),
            Value::Array(items) => match items.first() {
                None => "unknown[]".to_string(),
                Some(first) => format!("{}[]", self.infer(first, &format!("{key}Item"))),
            },
            Value::Object(fields) => {
                let name = pascal_case(key);
                self.interface(fields, &name);
                name
            }
        }
    }

    fn interface(&mut self, fields: &Map<String, Value>, name: &str) {
        if self.has(name) {
            return;
        }

        let mut lines = vec![format!("export interface {name} {{")];
        for (key, value) in fields {
            let ty = self.infer(value, &pascal_case(key));
            let mark = if self.optional_nulls && value.is_null() { "?" } else { "" };
            lines.push(format!("  {}{mark}: {ty};", property_name(key)));
        }
        lines.push("}".to_string());

        if !self.has(name) {
            self.interfaces.push((name.to_string(), lines.join("\n")));
        }
    }

    fn finish(self, alias: Option<String>) -> String {
        alias
            .into_iter()
            .chain(self.interfaces.into_iter().rev().map(|(_, body)| body))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Generate TypeScript declarations for `input`.
///
/// An object, or an array whose first element is an object, yields
/// `export interface <root>`. Anything else yields `export type <root> = ...`.
/// With `optional_nulls`, fields whose sample value is `null` are marked `?`.
pub fn to_typescript(
    input: &str,
    root_name: &str,
    optional_nulls: bool,
) -> Result<String, JsonError> {
    let value = json::parse(input)?;
    let root_name = root_name.trim();
    let root = pascal_case(if root_name.is_empty() {
        DEFAULT_ROOT
    } else {
        root_name
    });

    let mut generator = Generator {
        optional_nulls,
        interfaces: Vec::new(),
    };

    let sample = match &value {
        Value::Array(items) => items.first().and_then(Value::as_object),
        other => other.as_object(),
    };
    let alias = match sample {
        Some(fields) => {
            generator.interface(fields, &root);
            None
        }
        None => Some(format!(
            "export type {root} = {};",
            generator.infer(&value, &root)
        )),
    };

    Ok(generator.finish(alias))
}
