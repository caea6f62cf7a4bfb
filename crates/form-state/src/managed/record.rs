use std::ops::Index;

use form_state_value::{Record, Value};
use indexmap::map::Entry;
use indexmap::IndexMap;

use super::{attach, wrap, IntoManaged, ManagedSequence, ManagedValue, UNDEFINED};

/// A managed record. Field order follows insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManagedRecord {
    fields: IndexMap<String, ManagedValue>,
}

impl ManagedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn from_fields(fields: Record) -> Self {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k, wrap(v))).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ManagedValue)> {
        self.fields.iter()
    }

    pub fn get(&self, key: &str) -> Option<&ManagedValue> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ManagedValue> {
        self.fields.get_mut(key)
    }

    /// Field `key` if it holds a record.
    pub fn record(&self, key: &str) -> Option<&ManagedRecord> {
        self.get(key).and_then(ManagedValue::as_record)
    }

    pub fn record_mut(&mut self, key: &str) -> Option<&mut ManagedRecord> {
        self.get_mut(key).and_then(ManagedValue::as_record_mut)
    }

    /// Field `key` if it holds a sequence.
    pub fn sequence(&self, key: &str) -> Option<&ManagedSequence> {
        self.get(key).and_then(ManagedValue::as_sequence)
    }

    pub fn sequence_mut(&mut self, key: &str) -> Option<&mut ManagedSequence> {
        self.get_mut(key).and_then(ManagedValue::as_sequence_mut)
    }

    /// Stores `value` under `key`, wrapping it if it is a plain container.
    ///
    /// An existing field keeps its position; a new one is appended. Returns
    /// the stored node.
    pub fn set(&mut self, key: impl Into<String>, value: impl IntoManaged) -> &mut ManagedValue {
        let value = attach(value);
        match self.fields.entry(key.into()) {
            Entry::Occupied(mut slot) => {
                slot.insert(value);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(value),
        }
    }

    /// Deletes `key`, keeping the order of the remaining fields.
    pub fn remove(&mut self, key: &str) -> Option<ManagedValue> {
        self.fields.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn to_value(&self) -> Value {
        Value::Record(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl Index<&str> for ManagedRecord {
    type Output = ManagedValue;

    fn index(&self, key: &str) -> &ManagedValue {
        self.get(key).unwrap_or(&UNDEFINED)
    }
}

impl<'a> IntoIterator for &'a ManagedRecord {
    type Item = (&'a String, &'a ManagedValue);
    type IntoIter = indexmap::map::Iter<'a, String, ManagedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
