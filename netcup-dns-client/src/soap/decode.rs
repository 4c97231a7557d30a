//! SOAP 响应解码
//!
//! The response is first read into a small element tree, then the return
//! value is converted into a [`serde_json::Value`] so the record types can
//! deserialize from it.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use super::envelope::ARRAY_ITEM;
use crate::error::TransportFault;

#[derive(Debug, Default)]
struct Node {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
    text: String,
}

impl Node {
    fn attr(&self, local: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == local)
            .map(|(_, v)| v.as_str())
    }

    fn child(&self, local: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == local)
    }

    fn is_nil(&self) -> bool {
        matches!(self.attr("nil"), Some("true" | "1"))
    }

    /// Local part of `xsi:type`, e.g. `Array` for `SOAP-ENC:Array`.
    fn xsi_type(&self) -> Option<&str> {
        self.attr("type")
            .map(|t| t.rsplit_once(':').map_or(t, |(_, local)| local))
    }

    fn is_array(&self) -> bool {
        self.xsi_type() == Some("Array")
            || self.attr("arrayType").is_some()
            || (!self.children.is_empty() && self.children.iter().all(|c| c.name == ARRAY_ITEM))
    }

    fn is_map(&self) -> bool {
        self.xsi_type() == Some("Map")
    }
}

fn malformed(detail: impl std::fmt::Display) -> TransportFault {
    TransportFault::Malformed {
        detail: detail.to_string(),
    }
}

fn local_name(raw: &[u8]) -> String {
    let s = String::from_utf8_lossy(raw);
    s.rsplit_once(':')
        .map_or_else(|| s.to_string(), |(_, l)| l.to_string())
}

fn open(start: &BytesStart<'_>) -> Result<Node, TransportFault> {
    let mut node = Node {
        name: local_name(start.local_name().as_ref()),
        ..Default::default()
    };
    for attr in start.attributes() {
        let attr = attr.map_err(malformed)?;
        let key = local_name(attr.key.local_name().as_ref());
        let value = attr.unescape_value().map_err(malformed)?.into_owned();
        node.attrs.push((key, value));
    }
    Ok(node)
}

fn parse_tree(xml: &str) -> Result<Node, TransportFault> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        match reader.read_event().map_err(|e| {
            malformed(format!(
                "XML error at position {}: {e}",
                reader.buffer_position()
            ))
        })? {
            Event::Start(e) => stack.push(open(&e)?),
            Event::Empty(e) => {
                let node = open(&e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => root = Some(node),
                }
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| malformed("unbalanced closing tag"))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => root = Some(node),
                }
            }
            Event::Text(t) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&t.unescape().map_err(malformed)?);
                }
            }
            Event::CData(c) => {
                if let Some(node) = stack.last_mut() {
                    let bytes = c.into_inner();
                    node.text.push_str(&String::from_utf8_lossy(&bytes));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(malformed("unexpected end of document"));
    }
    root.ok_or_else(|| malformed("empty document"))
}

fn fault(node: &Node) -> TransportFault {
    let text = |name: &str| node.child(name).map(|c| c.text.trim().to_string());
    let detail = node.child("detail").and_then(|d| {
        let flat = flatten_text(d);
        (!flat.is_empty()).then_some(flat)
    });
    TransportFault::Fault {
        code: text("faultcode").unwrap_or_default(),
        message: text("faultstring").unwrap_or_default(),
        detail,
    }
}

fn flatten_text(node: &Node) -> String {
    if node.children.is_empty() {
        return node.text.trim().to_string();
    }
    node.children
        .iter()
        .map(flatten_text)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn to_value(node: &Node) -> Value {
    if node.is_nil() {
        return Value::Null;
    }
    if node.is_map() {
        // Apache Map: <item><key/><value/></item>
        let mut map = Map::new();
        for item in &node.children {
            let key = item
                .child("key")
                .map(|k| k.text.clone())
                .unwrap_or_default();
            let value = item.child("value").map_or(Value::Null, to_value);
            map.insert(key, value);
        }
        return Value::Object(map);
    }
    if node.children.is_empty() {
        // 数组类型但无元素
        if node.xsi_type() == Some("Array") || node.attr("arrayType").is_some() {
            return Value::Array(Vec::new());
        }
        return Value::String(node.text.clone());
    }
    if node.is_array() {
        return Value::Array(node.children.iter().map(to_value).collect());
    }

    // 同名元素重复出现时合并为数组
    let count = |name: &str| node.children.iter().filter(|c| c.name == name).count();
    let mut map = Map::new();
    for child in &node.children {
        let value = to_value(child);
        if count(&child.name) > 1 {
            if let Value::Array(items) = map
                .entry(child.name.clone())
                .or_insert_with(|| Value::Array(Vec::new()))
            {
                items.push(value);
            }
        } else {
            map.insert(child.name.clone(), value);
        }
    }
    Value::Object(map)
}

/// Decode a response document.
///
/// Returns the return value of the operation (the first child of the
/// `<method>Response` element, or `null` if it has none). A `Fault` in the
/// body is returned as [`TransportFault::Fault`].
pub fn decode_response(xml: &str) -> Result<Value, TransportFault> {
    let envelope = parse_tree(xml)?;
    if envelope.name != "Envelope" {
        return Err(malformed(format!(
            "expected Envelope, found <{}>",
            envelope.name
        )));
    }
    let body = envelope
        .child("Body")
        .ok_or_else(|| malformed("missing Body"))?;
    let payload = body
        .children
        .first()
        .ok_or_else(|| malformed("empty Body"))?;

    if payload.name == "Fault" {
        return Err(fault(payload));
    }

    Ok(payload.children.first().map_or(Value::Null, to_value))
}
