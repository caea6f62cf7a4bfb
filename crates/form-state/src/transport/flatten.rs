//! Bracket-notation flattening.
//!
//! Key grammar, for a child under `prefix`:
//!
//! | child            | empty prefix | prefix `p` |
//! |------------------|--------------|------------|
//! | record field `k` | `k`          | `p[k]`     |
//! | sequence item `i`| `i`          | `p[i]`     |
//!
//! Containers add no entry of their own; their leaves do. Record fields are
//! visited in iteration order, sequence items in index order.

use form_state_value::{compose_key, is_binary_payload, Value};

use super::object::{TransportObject, TransportValue};
use crate::managed::ManagedValue;

/// Appends every leaf of `value` to `out`, keyed under `prefix`.
///
/// A leaf is appended only under a non-empty key. A managed root is always
/// a container, so the empty-key case only arises when a caller replaced
/// the root with a leaf or a record has a field named `""`; such leaves are
/// skipped.
pub fn flatten_into(value: &ManagedValue, out: &mut TransportObject, prefix: &str) {
    match value {
        ManagedValue::Record(fields) => {
            for (key, field) in fields {
                flatten_into(field, out, &compose_key(prefix, key));
            }
        }
        ManagedValue::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(item, out, &compose_key(prefix, index));
            }
        }
        ManagedValue::Scalar(leaf) => append_leaf(out, prefix, leaf),
    }
}

/// [`flatten_into`] for a plain value tree.
pub fn flatten_value_into(value: &Value, out: &mut TransportObject, prefix: &str) {
    if is_binary_payload(value) {
        append_leaf(out, prefix, value);
        return;
    }
    match value {
        Value::Record(fields) => {
            for (key, field) in fields {
                flatten_value_into(field, out, &compose_key(prefix, key));
            }
        }
        Value::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value_into(item, out, &compose_key(prefix, index));
            }
        }
        leaf => append_leaf(out, prefix, leaf),
    }
}

/// Renders a plain value tree into a fresh transport object.
pub fn flatten_value(value: &Value) -> TransportObject {
    let mut out = TransportObject::new();
    flatten_value_into(value, &mut out, "");
    out
}

fn append_leaf(out: &mut TransportObject, key: &str, leaf: &Value) {
    if key.is_empty() {
        return;
    }
    out.append(key, TransportValue::from_leaf(leaf));
}
