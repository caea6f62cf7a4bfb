use std::ops::Index;

use form_state_value::Value;
use tracing::debug;

use super::{attach, wrap, IntoManaged, Leaf, ManagedRecord, ManagedValue, UNDEFINED};

/// Most `undefined` fillers a single sparse write may add.
pub const MAX_PADDING: usize = 1 << 16;

/// A managed sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManagedSequence {
    items: Vec<ManagedValue>,
}

impl ManagedSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn from_items(items: Vec<Value>) -> Self {
        Self {
            items: items.into_iter().map(wrap).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ManagedValue> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ManagedValue> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ManagedValue> {
        self.items.get_mut(index)
    }

    pub fn record_mut(&mut self, index: usize) -> Option<&mut ManagedRecord> {
        self.get_mut(index).and_then(ManagedValue::as_record_mut)
    }

    pub fn sequence_mut(&mut self, index: usize) -> Option<&mut ManagedSequence> {
        self.get_mut(index).and_then(ManagedValue::as_sequence_mut)
    }

    /// Grows the sequence with `undefined` so that `index` is in bounds, or
    /// refuses when that would take more than [`MAX_PADDING`] fillers.
    fn make_room(&mut self, index: usize) -> bool {
        let len = self.items.len();
        if index.saturating_sub(len) > MAX_PADDING {
            debug!(index, len, "sparse sequence write refused");
            return false;
        }
        if len < index {
            self.items
                .resize(index, ManagedValue::Scalar(Leaf(Value::Undefined)));
        }
        true
    }

    /// Stores `value` at `index`, wrapping it if it is a plain container.
    ///
    /// Writing past the end grows the sequence; the gap is filled with
    /// `undefined`. Returns the stored node, or `None` without touching the
    /// sequence when the gap is wider than [`MAX_PADDING`].
    pub fn set(&mut self, index: usize, value: impl IntoManaged) -> Option<&mut ManagedValue> {
        if !self.make_room(index) {
            return None;
        }
        let value = attach(value);
        if index == self.items.len() {
            self.items.push(value);
        } else {
            self.items[index] = value;
        }
        self.items.get_mut(index)
    }

    /// Appends `value`. Returns the stored node.
    pub fn push(&mut self, value: impl IntoManaged) -> &mut ManagedValue {
        let index = self.items.len();
        self.items.push(attach(value));
        &mut self.items[index]
    }

    /// Inserts `value` at `index`, shifting later elements right. An index
    /// past the end pads like [`set`](Self::set).
    pub fn insert(&mut self, index: usize, value: impl IntoManaged) -> Option<&mut ManagedValue> {
        if !self.make_room(index) {
            return None;
        }
        self.items.insert(index, attach(value));
        self.items.get_mut(index)
    }

    /// Removes the element at `index`, shifting later elements left.
    pub fn remove(&mut self, index: usize) -> Option<ManagedValue> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn pop(&mut self) -> Option<ManagedValue> {
        self.items.pop()
    }

    pub fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn to_value(&self) -> Value {
        Value::Sequence(self.items.iter().map(ManagedValue::to_value).collect())
    }
}

impl Index<usize> for ManagedSequence {
    type Output = ManagedValue;

    fn index(&self, index: usize) -> &ManagedValue {
        self.get(index).unwrap_or(&UNDEFINED)
    }
}

impl<'a> IntoIterator for &'a ManagedSequence {
    type Item = &'a ManagedValue;
    type IntoIter = std::slice::Iter<'a, ManagedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seq(j: serde_json::Value) -> ManagedSequence {
        match wrap(Value::from(j)) {
            ManagedValue::Sequence(s) => s,
            other => panic!("expected sequence, got {:?}", other.kind()),
        }
    }

    #[test]
    fn set_past_end_pads_with_undefined() {
        let mut s = seq(json!(["a"]));
        s.set(3, "d");
        assert_eq!(s.len(), 4);
        assert_eq!(s[1], Value::Undefined);
        assert_eq!(s[2], Value::Undefined);
        assert_eq!(s[3], Value::from("d"));
    }

    #[test]
    fn push_and_insert_wrap_containers() {
        let mut s = ManagedSequence::new();
        s.push(Value::from(json!({"n": 1})));
        s.insert(0, Value::from(json!([true])));
        assert!(s[0].as_sequence().is_some());
        s.record_mut(1).unwrap().set("m", Value::from(json!({"deep": []})));
        assert!(s[1]["m"]["deep"].as_sequence().is_some());
        s.sequence_mut(0).unwrap().push(false);
        assert_eq!(s.to_value(), Value::from(json!([[true, false], {"n": 1, "m": {"deep": []}}])));
    }

    #[test]
    fn insert_past_end_pads() {
        let mut s = ManagedSequence::new();
        s.insert(2, 1);
        assert_eq!(s.to_value(), Value::Sequence(vec![Value::Undefined, Value::Undefined, Value::from(1)]));
    }

    #[test]
    fn huge_indices_are_refused_without_change() {
        let mut s = seq(json!(["a"]));
        assert!(s.set(usize::MAX, 1).is_none());
        assert!(s.insert(usize::MAX, 1).is_none());
        assert!(s.set(1 + MAX_PADDING + 1, 1).is_none());
        assert_eq!(s.to_value(), Value::from(json!(["a"])));

        assert!(s.set(1 + MAX_PADDING, 1).is_some());
        assert_eq!(s.len(), MAX_PADDING + 2);
    }

    #[test]
    fn remove_pop_truncate() {
        let mut s = seq(json!([1, 2, 3, 4]));
        assert_eq!(s.remove(1), Some(wrap(Value::from(2))));
        assert_eq!(s.remove(10), None);
        assert_eq!(s.pop(), Some(wrap(Value::from(4))));
        s.truncate(1);
        assert_eq!(s.to_value(), Value::from(json!([1])));
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s[0], Value::Undefined);
    }

    #[test]
    fn iterates_in_index_order() {
        let s = seq(json!(["a", "b", "c"]));
        let texts: Vec<String> = s.iter().filter_map(|v| v.as_leaf().map(Value::to_text)).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!((&s).into_iter().count(), 3);
    }
}
