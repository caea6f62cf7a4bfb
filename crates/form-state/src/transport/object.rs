use form_state_value::{BinaryPayload, Value};

/// One transport field value.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportValue {
    Text(String),
    /// The raw payload, never stringified.
    Binary(BinaryPayload),
}

impl TransportValue {
    /// Transport form of a leaf: binary payloads by handle, everything else
    /// as text.
    pub fn from_leaf(value: &Value) -> Self {
        match value {
            Value::Binary(payload) => Self::Binary(payload.clone()),
            other => Self::Text(other.to_text()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Binary(_) => None,
        }
    }

    pub fn as_binary(&self) -> Option<&BinaryPayload> {
        match self {
            Self::Binary(b) => Some(b),
            Self::Text(_) => None,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary(_))
    }
}

impl From<&str> for TransportValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for TransportValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<BinaryPayload> for TransportValue {
    fn from(b: BinaryPayload) -> Self {
        Self::Binary(b)
    }
}

/// Ordered multimap of transport keys to values, the shape of a multipart
/// form body. Appending never replaces: repeated keys keep every value in
/// append order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportObject {
    entries: Vec<(String, TransportValue)>,
}

impl TransportObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<TransportValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// First value appended under `key`.
    pub fn get(&self, key: &str) -> Option<&TransportValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Every value appended under `key`, in append order.
    pub fn get_all(&self, key: &str) -> Vec<&TransportValue> {
        self.entries
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v)
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Keys in append order, repeated keys included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TransportValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(String, TransportValue)> {
        self.entries
    }
}

impl<K: Into<String>, V: Into<TransportValue>> FromIterator<(K, V)> for TransportObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for TransportObject {
    type Item = (String, TransportValue);
    type IntoIter = std::vec::IntoIter<(String, TransportValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_keeps_repeated_keys() {
        let mut t = TransportObject::new();
        t.append("a", "1");
        t.append("b", "2");
        t.append("a", "3");
        assert_eq!(t.len(), 3);
        assert_eq!(t.get("a"), Some(&TransportValue::from("1")));
        assert_eq!(
            t.get_all("a"),
            vec![&TransportValue::from("1"), &TransportValue::from("3")]
        );
        assert_eq!(t.keys().collect::<Vec<_>>(), vec!["a", "b", "a"]);
        assert!(t.contains_key("b"));
        assert!(!t.contains_key("c"));
    }

    #[test]
    fn leaf_conversion() {
        let file = BinaryPayload::new(vec![1]);
        let v = TransportValue::from_leaf(&Value::from(file.clone()));
        assert!(v.is_binary());
        assert!(v.as_binary().unwrap().ptr_eq(&file));
        assert_eq!(TransportValue::from_leaf(&Value::from(2.5)).as_text(), Some("2.5"));
        assert_eq!(TransportValue::from_leaf(&Value::Null).as_text(), Some("null"));
    }

    #[test]
    fn collect_and_consume() {
        let t: TransportObject = vec![("x", "1"), ("y", "2")].into_iter().collect();
        let entries = t.into_entries();
        assert_eq!(entries[1], ("y".to_owned(), TransportValue::from("2")));
    }
}
