//! The universal value type.

use std::fmt;

use indexmap::IndexMap;

use crate::binary::BinaryPayload;
use crate::opaque::OpaqueValue;

/// Field map of a record. Iteration follows insertion order.
pub type Record = IndexMap<String, Value>;

/// A node of a form value tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Null,
    #[default]
    Undefined,
    Bool(bool),
    Number(f64),
    String(String),
    Binary(BinaryPayload),
    Sequence(Vec<Value>),
    Record(Record),
    Unknown(OpaqueValue),
}

/// Discriminant of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Undefined,
    Bool,
    Number,
    String,
    Binary,
    Sequence,
    Record,
    Unknown,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Binary => "binary",
            Self::Sequence => "array",
            Self::Record => "object",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Undefined => ValueKind::Undefined,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Binary(_) => ValueKind::Binary,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Record(_) => ValueKind::Record,
            Self::Unknown(_) => ValueKind::Unknown,
        }
    }

    /// Records and sequences are containers; binary payloads never are.
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Record(_) | Self::Sequence(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&BinaryPayload> {
        match self {
            Self::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Field lookup on a record; `None` for missing fields and non-records.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_record().and_then(|r| r.get(key))
    }

    /// Element lookup on a sequence.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_sequence().and_then(|s| s.get(index))
    }

    pub fn record() -> Self {
        Self::Record(Record::new())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<BinaryPayload> for Value {
    fn from(v: BinaryPayload) -> Self {
        Self::Binary(v)
    }
}

impl From<OpaqueValue> for Value {
    fn from(v: OpaqueValue) -> Self {
        Self::Unknown(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Sequence(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Self::Record(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Sequence(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::Record(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// JSON has no binary, undefined or opaque values, so the conversion is total
/// in this direction only.
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(fields) => {
                Self::Record(fields.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_preserves_field_order() {
        let v = Value::from(json!({"z": 1, "a": [true, null, "x"], "m": {"k": 2.5}}));
        let keys: Vec<&str> = v.as_record().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(v.get("z"), Some(&Value::Number(1.0)));
        assert_eq!(
            v.get("a"),
            Some(&Value::Sequence(vec![
                Value::Bool(true),
                Value::Null,
                Value::String("x".into())
            ]))
        );
        assert_eq!(v.get("m").and_then(|m| m.get("k")), Some(&Value::Number(2.5)));
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind().as_str(), "null");
        assert_eq!(Value::Undefined.kind().as_str(), "undefined");
        assert_eq!(Value::from(true).kind().as_str(), "boolean");
        assert_eq!(Value::from(1).kind().as_str(), "number");
        assert_eq!(Value::from("s").kind().as_str(), "string");
        assert_eq!(Value::from(BinaryPayload::new(vec![])).kind().as_str(), "binary");
        assert_eq!(Value::Sequence(vec![]).kind().as_str(), "array");
        assert_eq!(Value::record().kind().as_str(), "object");
        assert_eq!(
            Value::from(OpaqueValue::new("date", "x")).kind().as_str(),
            "unknown"
        );
    }

    #[test]
    fn containers() {
        assert!(Value::record().is_container());
        assert!(Value::Sequence(vec![]).is_container());
        assert!(!Value::from(BinaryPayload::new(vec![1])).is_container());
        assert!(!Value::from("x").is_container());
    }

    #[test]
    fn collect_into_record_and_sequence() {
        let r: Value = vec![("a", Value::from(1)), ("b", Value::from("x"))]
            .into_iter()
            .collect();
        assert_eq!(r.get("b"), Some(&Value::from("x")));
        let s: Value = (1..=3).map(Value::from).collect();
        assert_eq!(s.get_index(2), Some(&Value::from(3)));
        assert_eq!(s.get_index(3), None);
    }

    #[test]
    fn option_maps_none_to_null() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::from("a"));
    }
}
