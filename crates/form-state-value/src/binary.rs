//! Opaque binary attachments.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Binary content together with the metadata a multipart part needs.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Blob {
    pub data: Vec<u8>,
    /// File name, present when the blob came from a file input.
    pub name: Option<String>,
    /// MIME type, e.g. `image/png`.
    pub content_type: Option<String>,
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Shared handle to a [`Blob`].
///
/// Cloning a payload clones the handle, never the bytes, so a payload keeps
/// its identity wherever it travels: from the caller's input, through the
/// managed tree, into a rendered transport object. Use [`BinaryPayload::ptr_eq`]
/// to test identity.
#[derive(Clone)]
pub struct BinaryPayload(Arc<Blob>);

impl BinaryPayload {
    /// Anonymous blob with no name or content type.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self(Arc::new(Blob {
            data: data.into(),
            name: None,
            content_type: None,
        }))
    }

    /// Named file with a content type.
    pub fn file(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self(Arc::new(Blob {
            data: data.into(),
            name: Some(name.into()),
            content_type: Some(content_type.into()),
        }))
    }

    pub fn from_blob(blob: Blob) -> Self {
        Self(Arc::new(blob))
    }

    pub fn blob(&self) -> &Blob {
        &self.0
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0.data
    }

    pub fn len(&self) -> usize {
        self.0.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.data.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.0.content_type.as_deref()
    }

    /// Returns `true` when both handles point at the same blob.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Identical handles are equal without looking at the bytes; distinct
/// handles fall back to comparing content and metadata.
impl PartialEq for BinaryPayload {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl fmt::Debug for BinaryPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BinaryPayload").field(&*self.0).finish()
    }
}

impl From<Blob> for BinaryPayload {
    fn from(blob: Blob) -> Self {
        Self::from_blob(blob)
    }
}

/// Returns `true` for binary attachments and `false` for everything else,
/// records and sequences included.
///
/// Every recursive walk checks this before descending into a value.
#[inline]
pub fn is_binary_payload(value: &Value) -> bool {
    matches!(value, Value::Binary(_))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_identity() {
        let a = BinaryPayload::new(vec![1, 2, 3]);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_handles_with_same_content_are_equal_but_not_identical() {
        let a = BinaryPayload::new(vec![1, 2, 3]);
        let b = BinaryPayload::new(vec![1, 2, 3]);
        assert!(!a.ptr_eq(&b));
        assert_eq!(a, b);
        assert_ne!(a, BinaryPayload::new(vec![1, 2, 4]));
    }

    #[test]
    fn file_metadata() {
        let f = BinaryPayload::file("a.png", "image/png", vec![0x89, 0x50]);
        assert_eq!(f.name(), Some("a.png"));
        assert_eq!(f.content_type(), Some("image/png"));
        assert_eq!(f.len(), 2);
        assert!(!f.is_empty());
        assert!(BinaryPayload::new(Vec::new()).is_empty());
    }

    #[test]
    fn debug_does_not_dump_bytes() {
        let f = BinaryPayload::file("a.bin", "application/octet-stream", vec![7; 1024]);
        let s = format!("{f:?}");
        assert!(s.contains("len: 1024"));
        assert!(!s.contains("7, 7"));
    }

    #[test]
    fn classifier_matrix() {
        assert!(is_binary_payload(&Value::Binary(BinaryPayload::new(vec![]))));
        assert!(!is_binary_payload(&Value::Null));
        assert!(!is_binary_payload(&Value::Undefined));
        assert!(!is_binary_payload(&Value::from("bytes")));
        assert!(!is_binary_payload(&Value::Sequence(vec![Value::from(1)])));
        assert!(!is_binary_payload(&Value::Record(Default::default())));
    }
}
