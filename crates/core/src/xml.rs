//! XML to JSON conversion.
//!
//! The root element becomes the top-level JSON value. For each element:
//!
//! - attributes are collected under `"@attributes"`
//! - child elements become keys, and repeated names collapse into an array
//! - an element holding non-blank text becomes that trimmed string
//! - an empty element becomes `{}`

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

pub const ATTRIBUTES_KEY: &str = "@attributes";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XmlError {
    #[error("Invalid XML at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    #[error("The document has no root element")]
    NoRoot,

    #[error("The document has more than one root element")]
    MultipleRoots,

    #[error("Element `<{0}>` is never closed")]
    Unclosed(String),
}

struct Element {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Element {
    fn open(start: &BytesStart) -> Result<Self, String> {
        let mut attributes = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| e.to_string())?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value().map_err(|e| e.to_string())?;
            attributes.insert(key, Value::String(value.into_owned()));
        }

        Ok(Element {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn into_value(self) -> Value {
        let text = self.text.trim();
        if !text.is_empty() {
            return Value::String(text.to_string());
        }

        let mut object = Map::new();
        if !self.attributes.is_empty() {
            object.insert(ATTRIBUTES_KEY.to_string(), Value::Object(self.attributes));
        }
        object.extend(self.children);
        Value::Object(object)
    }
}

fn insert_child(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(name, value);
        }
    }
}

fn close(element: Element, stack: &mut [Element], root: &mut Option<Value>) -> Result<(), XmlError> {
    let name = element.name.clone();
    let value = element.into_value();
    match stack.last_mut() {
        Some(parent) => insert_child(&mut parent.children, name, value),
        None if root.is_some() => return Err(XmlError::MultipleRoots),
        None => *root = Some(value),
    }
    Ok(())
}

fn syntax(reader: &Reader<&[u8]>, message: String) -> XmlError {
    XmlError::Syntax {
        position: reader.buffer_position() as u64,
        message,
    }
}

pub fn to_json(input: &str) -> Result<Value, XmlError> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| syntax(&reader, e.to_string()))?;

        match event {
            Event::Start(start) => {
                let element = Element::open(&start).map_err(|m| syntax(&reader, m))?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = Element::open(&start).map_err(|m| syntax(&reader, m))?;
                close(element, &mut stack, &mut root)?;
            }
            Event::End(end) => {
                let element = stack.pop().ok_or_else(|| {
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    syntax(&reader, format!("unexpected `</{name}>`"))
                })?;
                close(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                if let Some(element) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| syntax(&reader, e.to_string()))?;
                    element.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(element) = stack.last_mut() {
                    element.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(element) = stack.pop() {
        return Err(XmlError::Unclosed(element.name));
    }
    root.ok_or(XmlError::NoRoot)
}
