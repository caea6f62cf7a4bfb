//! Host values the rest of the workspace treats as a black box.

use std::fmt;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
struct Inner {
    kind: String,
    text: String,
}

/// A value that is neither a primitive, a container nor a binary payload,
/// e.g. a timestamp object or a callback handle.
///
/// Schema inference maps it to an accept-anything rule. Flattening emits its
/// textual form. Like [`crate::BinaryPayload`] it is shared by reference.
#[derive(Clone, Debug)]
pub struct OpaqueValue(Arc<Inner>);

impl OpaqueValue {
    /// `kind` labels the host type (`"date"`, `"function"`, ...), `text` is
    /// what the value renders as.
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self(Arc::new(Inner {
            kind: kind.into(),
            text: text.into(),
        }))
    }

    pub fn kind(&self) -> &str {
        &self.0.kind
    }

    pub fn text(&self) -> &str {
        &self.0.text
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl fmt::Display for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_text() {
        let d = OpaqueValue::new("date", "2024-01-02T00:00:00.000Z");
        assert_eq!(d.kind(), "date");
        assert_eq!(d.to_string(), "2024-01-02T00:00:00.000Z");
    }

    #[test]
    fn clones_share_identity() {
        let a = OpaqueValue::new("function", "function () {}");
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&OpaqueValue::new("function", "function () {}")));
    }
}
