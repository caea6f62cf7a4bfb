//! Entry point: validate, copy, wrap.

use std::borrow::Cow;

use form_state_type::{infer, parse_with, validate_schema, ParseOptions, Schema, ValidationError};
use form_state_value::Value;
use tracing::debug;

use crate::error::FormStateError;
use crate::managed::{wrap, ManagedValue};
use crate::transport::{flatten_into, TransportObject};

/// Options for [`create_managed_with`].
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub parse: ParseOptions,
    /// Do not run the integrity check on an explicit schema.
    pub skip_schema_check: bool,
}

/// A validated, privately owned, mutation-wrapped value tree.
#[derive(Debug, Clone)]
pub struct ManagedData {
    data: ManagedValue,
    schema: Schema,
}

impl ManagedData {
    /// The live tree.
    pub fn data(&self) -> &ManagedValue {
        &self.data
    }

    /// Mutable access to the live tree. Every write below the root goes
    /// through the wrap hook and is not validated.
    pub fn data_mut(&mut self) -> &mut ManagedValue {
        &mut self.data
    }

    /// The schema the initial value was validated against: the explicit one,
    /// or the one inferred from the initial value.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Renders the current state into a fresh transport object.
    ///
    /// Reads the tree only; calling it repeatedly without writes in between
    /// yields equal results.
    pub fn render(&self) -> TransportObject {
        let mut out = TransportObject::new();
        flatten_into(&self.data, &mut out, "");
        debug!(entries = out.len(), "rendered transport object");
        out
    }

    /// Checks the current state against [`schema`](Self::schema).
    ///
    /// Writes are never validated; this is the way to ask whether the tree
    /// still has an accepted shape.
    pub fn validate(&self) -> Result<Value, ValidationError> {
        parse_with(&self.schema, &self.data.to_value(), &ParseOptions::default())
    }

    /// Plain snapshot of the current state.
    pub fn to_value(&self) -> Value {
        self.data.to_value()
    }

    pub fn into_inner(self) -> ManagedValue {
        self.data
    }
}

/// Builds managed data from `value`, validated against `schema` or, when
/// none is given, against the schema inferred from `value` itself.
///
/// `value` is only borrowed: the handle owns a separate copy, and later
/// changes to `value` do not reach it. Binary payloads are shared by handle.
///
/// # Errors
///
/// - [`FormStateError::RootType`] when `value` is not a record or sequence;
/// - [`FormStateError::InvalidSchema`] when the explicit schema fails its
///   integrity check;
/// - [`FormStateError::Validation`] when `value` does not match the schema.
pub fn create_managed(value: &Value, schema: Option<&Schema>) -> Result<ManagedData, FormStateError> {
    create_managed_with(value, schema, &CreateOptions::default())
}

/// [`create_managed`] with options.
pub fn create_managed_with(
    value: &Value,
    schema: Option<&Schema>,
    options: &CreateOptions,
) -> Result<ManagedData, FormStateError> {
    if !value.is_container() {
        return Err(FormStateError::RootType { kind: value.kind() });
    }

    let schema = match schema {
        Some(explicit) => {
            if !options.skip_schema_check {
                validate_schema(explicit)?;
            }
            Cow::Borrowed(explicit)
        }
        None => Cow::Owned(infer(value)),
    };
    debug!(
        root = %value.kind(),
        schema = schema.kind(),
        inferred = matches!(schema, Cow::Owned(_)),
        "creating managed data"
    );

    // The validator builds a fresh tree, so the accepted value shares no
    // container with `value`; wrapping consumes it.
    let validated = parse_with(&schema, value, &options.parse).map_err(|e| {
        debug!(issues = e.issues().len(), "initial value rejected");
        e
    })?;

    Ok(ManagedData {
        data: wrap(validated),
        schema: schema.into_owned(),
    })
}
