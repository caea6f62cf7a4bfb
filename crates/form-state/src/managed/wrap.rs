//! The write hook: every value entering a managed tree passes through here.

use form_state_value::{deep_clone, is_binary_payload, BinaryPayload, OpaqueValue, Record, Value};

use super::{Leaf, ManagedRecord, ManagedSequence, ManagedValue};

/// Converts a plain value into its managed form.
///
/// Records and sequences are wrapped bottom-up, so every container reachable
/// from the result is managed. Binary payloads and primitives are stored as
/// leaves unchanged; a payload keeps its identity.
pub fn wrap(value: Value) -> ManagedValue {
    if is_binary_payload(&value) {
        return ManagedValue::Scalar(Leaf(value));
    }
    match value {
        Value::Record(fields) => ManagedValue::Record(ManagedRecord::from_fields(fields)),
        Value::Sequence(items) => ManagedValue::Sequence(ManagedSequence::from_items(items)),
        other => ManagedValue::Scalar(Leaf(other)),
    }
}

/// Values that can be written into a managed container.
///
/// Plain values are wrapped on the way in. Values that are already managed
/// are stored as they are, so wrapping twice is a no-op.
pub trait IntoManaged {
    fn into_managed(self) -> ManagedValue;
}

impl IntoManaged for ManagedValue {
    fn into_managed(self) -> ManagedValue {
        self
    }
}

impl IntoManaged for ManagedRecord {
    fn into_managed(self) -> ManagedValue {
        ManagedValue::Record(self)
    }
}

impl IntoManaged for ManagedSequence {
    fn into_managed(self) -> ManagedValue {
        ManagedValue::Sequence(self)
    }
}

impl IntoManaged for Leaf {
    fn into_managed(self) -> ManagedValue {
        ManagedValue::Scalar(self)
    }
}

/// A borrowed value is copied first so the tree never aliases the caller's
/// containers.
impl IntoManaged for &Value {
    fn into_managed(self) -> ManagedValue {
        wrap(deep_clone(self))
    }
}

macro_rules! into_managed_via_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoManaged for $ty {
                fn into_managed(self) -> ManagedValue {
                    wrap(Value::from(self))
                }
            }
        )*
    };
}

into_managed_via_value!(
    Value,
    bool,
    f64,
    i64,
    i32,
    u32,
    &str,
    String,
    BinaryPayload,
    OpaqueValue,
    Vec<Value>,
    Record,
);

/// Runs the write hook for one intercepted write.
pub(crate) fn attach(value: impl IntoManaged) -> ManagedValue {
    let managed = value.into_managed();
    tracing::trace!(kind = %managed.kind(), "attaching value to managed tree");
    managed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn containers_are_wrapped_at_every_depth() {
        let managed = wrap(Value::from(json!({"a": [{"b": [1]}]})));
        let inner = managed
            .as_record()
            .and_then(|r| r.get("a"))
            .and_then(ManagedValue::as_sequence)
            .and_then(|s| s.get(0))
            .and_then(ManagedValue::as_record)
            .and_then(|r| r.get("b"))
            .and_then(ManagedValue::as_sequence);
        assert_eq!(inner.map(ManagedSequence::len), Some(1));
    }

    #[test]
    fn binary_is_a_leaf_with_identity() {
        let file = BinaryPayload::new(vec![1]);
        let managed = wrap(Value::from(file.clone()));
        let leaf = managed.as_leaf().unwrap();
        assert!(leaf.as_binary().unwrap().ptr_eq(&file));
    }

    #[test]
    fn managed_values_pass_through_unchanged() {
        let managed = wrap(Value::from(json!([1, 2])));
        let again = managed.clone().into_managed();
        assert_eq!(again, managed);
    }

    #[test]
    fn borrowed_values_are_copied() {
        let original = Value::from(json!({"x": 1}));
        let managed = (&original).into_managed();
        assert_eq!(managed, original);
    }
}
