//! Mutation-wrapped value trees.
//!
//! A managed tree owns its data. Reads work like on a plain [`Value`];
//! every write goes through the wrap hook ([`wrap`]), which turns incoming
//! records and sequences into managed containers before storing them. The
//! types make the invariant structural: a [`Leaf`] can never hold a
//! container, so every reachable container is a [`ManagedRecord`] or a
//! [`ManagedSequence`].
//!
//! Writes never validate and never fail.

mod record;
mod sequence;
mod wrap;

use std::ops::{Deref, Index};

use form_state_value::{deep_equal, PathSeg, Value, ValueKind};

pub use record::ManagedRecord;
pub use sequence::{ManagedSequence, MAX_PADDING};
pub use wrap::{wrap, IntoManaged};

pub(crate) use wrap::attach;

static UNDEFINED: ManagedValue = ManagedValue::Scalar(Leaf(Value::Undefined));

/// A non-container value inside a managed tree: a primitive, a binary
/// payload or an opaque value.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf(Value);

impl Leaf {
    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Deref for Leaf {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.0
    }
}

/// A node of a managed tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ManagedValue {
    Scalar(Leaf),
    Record(ManagedRecord),
    Sequence(ManagedSequence),
}

impl ManagedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(leaf) => leaf.kind(),
            Self::Record(_) => ValueKind::Record,
            Self::Sequence(_) => ValueKind::Sequence,
        }
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, Self::Scalar(_))
    }

    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Self::Scalar(leaf) => Some(leaf.value()),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&ManagedRecord> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut ManagedRecord> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&ManagedSequence> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut ManagedSequence> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Child at one segment: a record field for a key, a sequence element
    /// for an index.
    pub fn child(&self, seg: &PathSeg) -> Option<&ManagedValue> {
        match (self, seg) {
            (Self::Record(r), PathSeg::Key(k)) => r.get(k),
            (Self::Sequence(s), PathSeg::Index(i)) => s.get(*i),
            _ => None,
        }
    }

    pub fn child_mut(&mut self, seg: &PathSeg) -> Option<&mut ManagedValue> {
        match (self, seg) {
            (Self::Record(r), PathSeg::Key(k)) => r.get_mut(k),
            (Self::Sequence(s), PathSeg::Index(i)) => s.get_mut(*i),
            _ => None,
        }
    }

    /// Descends along `path`; the empty path is `self`.
    pub fn get_path(&self, path: &[PathSeg]) -> Option<&ManagedValue> {
        path.iter().try_fold(self, |node, seg| node.child(seg))
    }

    pub fn get_path_mut(&mut self, path: &[PathSeg]) -> Option<&mut ManagedValue> {
        path.iter().try_fold(self, |node, seg| node.child_mut(seg))
    }

    /// Writes `value` at `path`, creating nothing on the way: the parent
    /// container must already exist. Returns `false` when it does not, or
    /// when a sequence refuses the index (see [`ManagedSequence::set`]).
    pub fn set_path(&mut self, path: &[PathSeg], value: impl IntoManaged) -> bool {
        let Some((last, parents)) = path.split_last() else {
            *self = attach(value);
            return true;
        };
        match (self.get_path_mut(parents), last) {
            (Some(Self::Record(r)), PathSeg::Key(k)) => {
                r.set(k.clone(), value);
                true
            }
            (Some(Self::Sequence(s)), PathSeg::Index(i)) => s.set(*i, value).is_some(),
            _ => false,
        }
    }

    /// Plain snapshot of the current state.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Scalar(leaf) => leaf.value().clone(),
            Self::Record(r) => r.to_value(),
            Self::Sequence(s) => s.to_value(),
        }
    }
}

/// Structural comparison with a plain value, without taking a snapshot.
impl PartialEq<Value> for ManagedValue {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Scalar(leaf), other) => deep_equal(leaf.value(), other),
            (Self::Record(r), Value::Record(fields)) => {
                r.len() == fields.len()
                    && r.iter()
                        .all(|(k, v)| fields.get(k).is_some_and(|f| v == f))
            }
            (Self::Sequence(s), Value::Sequence(items)) => {
                s.len() == items.len() && s.iter().zip(items).all(|(a, b)| a == b)
            }
            _ => false,
        }
    }
}

/// Missing fields and non-records read as `undefined`.
impl Index<&str> for ManagedValue {
    type Output = ManagedValue;

    fn index(&self, key: &str) -> &ManagedValue {
        self.as_record()
            .and_then(|r| r.get(key))
            .unwrap_or(&UNDEFINED)
    }
}

/// Out-of-range positions and non-sequences read as `undefined`.
impl Index<usize> for ManagedValue {
    type Output = ManagedValue;

    fn index(&self, index: usize) -> &ManagedValue {
        self.as_sequence()
            .and_then(|s| s.get(index))
            .unwrap_or(&UNDEFINED)
    }
}

impl From<Value> for ManagedValue {
    fn from(value: Value) -> Self {
        wrap(value)
    }
}
