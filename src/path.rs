//! Optional-path access over untyped JSON.
//!
//! Navigators walk the embedded page state with chains of [`Node::get`].
//! The first missing key, wrong type or `null` turns the node [`Node::Absent`]
//! and every later step stays absent, so a single call chain never needs
//! manual presence checks.

use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Present(&'a Value),
    Absent,
}

impl<'a> Node<'a> {
    /// Wraps a value. `null` is treated as absent.
    pub fn new(value: &'a Value) -> Self {
        match value {
            Value::Null => Node::Absent,
            v => Node::Present(v),
        }
    }

    /// Descends into an object field.
    pub fn get(self, key: &str) -> Node<'a> {
        match self {
            Node::Present(Value::Object(map)) => map.get(key).map_or(Node::Absent, Node::new),
            _ => Node::Absent,
        }
    }

    /// Follows a sequence of object fields.
    pub fn path(self, keys: &[&str]) -> Node<'a> {
        keys.iter().fold(self, |node, key| node.get(key))
    }

    pub fn is_present(self) -> bool {
        matches!(self, Node::Present(_))
    }

    pub fn value(self) -> Option<&'a Value> {
        match self {
            Node::Present(v) => Some(v),
            Node::Absent => None,
        }
    }

    pub fn as_object(self) -> Option<&'a Map<String, Value>> {
        self.value().and_then(Value::as_object)
    }

    pub fn as_str(self) -> Option<&'a str> {
        self.value().and_then(Value::as_str)
    }

    /// A JSON string with non-whitespace content.
    pub fn as_text(self) -> Option<&'a str> {
        self.as_str().filter(|s| !s.trim().is_empty())
    }

    /// A non-negative JSON number, passed through without conversion.
    pub fn as_count(self) -> Option<Number> {
        match self.value() {
            Some(Value::Number(n)) if !is_negative(n) => Some(n.clone()),
            _ => None,
        }
    }

    /// Number of children of an object or array. Absent for anything else.
    pub fn len(self) -> Option<usize> {
        match self.value() {
            Some(Value::Object(map)) => Some(map.len()),
            Some(Value::Array(items)) => Some(items.len()),
            _ => None,
        }
    }

    /// Children of an object (in document order) or array. Empty for anything else.
    pub fn children(self) -> Vec<Node<'a>> {
        match self.value() {
            Some(Value::Object(map)) => map.values().map(Node::new).collect(),
            Some(Value::Array(items)) => items.iter().map(Node::new).collect(),
            _ => Vec::new(),
        }
    }
}

impl<'a> From<&'a Value> for Node<'a> {
    fn from(value: &'a Value) -> Self {
        Node::new(value)
    }
}

fn is_negative(n: &Number) -> bool {
    if n.is_u64() {
        return false;
    }
    n.as_i64()
        .map(|i| i < 0)
        .or_else(|| n.as_f64().map(|f| f.is_sign_negative() && f != 0.0))
        .unwrap_or(false)
}

/// JSON truthiness: `true`, non-zero numbers, non-empty strings and containers.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
