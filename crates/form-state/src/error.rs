//! Construction errors.

use form_state_type::{SchemaError, ValidationError};
use form_state_value::ValueKind;
use thiserror::Error;

/// Why [`create_managed`](crate::create_managed) produced no handle.
///
/// Nothing fails after construction: writes and renders are infallible.
#[derive(Debug, Error)]
pub enum FormStateError {
    /// The initial value is neither a record nor a sequence.
    #[error("only object and array root types supported, received {kind}")]
    RootType { kind: ValueKind },
    /// The explicit schema can never accept a value.
    #[error(transparent)]
    InvalidSchema(#[from] SchemaError),
    /// The initial value does not match the schema. The validator's error
    /// is carried unchanged.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl FormStateError {
    /// The validator's error, when that is what this is.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}
