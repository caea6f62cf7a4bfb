//! form-state-type - schemas for form-state values.
//!
//! - [`Schema`]: a tagged tree of accepted shapes, built directly or with
//!   [`SchemaBuilder`];
//! - [`parse`]: validates a [`Value`](form_state_value::Value) and returns the
//!   accepted (possibly coerced or defaulted) value, or a [`ValidationError`]
//!   listing every failing field;
//! - [`infer`]: derives a structural schema from a sample value;
//! - [`validate_schema`]: integrity check for authored schemas.

pub mod error;
pub mod infer;
pub mod schema;
pub mod validator;

pub use error::{SchemaError, ValidationError};
pub use infer::infer;
pub use schema::*;
pub use validator::{parse, parse_with, IssueCode, ParseOptions, ValidationIssue};
