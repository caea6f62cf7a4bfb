//! Validator output and option types.

use std::fmt;

use form_state_value::{bracket_key, format_pointer, PathSeg};

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCode {
    /// Value has the wrong kind (string where a number was expected, ...).
    InvalidType,
    /// Value differs from the constant the schema requires.
    InvalidLiteral,
    /// String does not match its declared format.
    InvalidString,
    /// No member of a union accepted the value.
    InvalidUnion,
    NotInteger,
    TooSmall,
    TooBig,
    /// A strict object received fields it does not declare.
    UnrecognizedKeys,
    /// Binary payload with a content type outside the allowed list.
    InvalidContentType,
}

impl IssueCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidType => "invalid_type",
            Self::InvalidLiteral => "invalid_literal",
            Self::InvalidString => "invalid_string",
            Self::InvalidUnion => "invalid_union",
            Self::NotInteger => "not_integer",
            Self::TooSmall => "too_small",
            Self::TooBig => "too_big",
            Self::UnrecognizedKeys => "unrecognized_keys",
            Self::InvalidContentType => "invalid_content_type",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failing location.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub code: IssueCode,
    /// Human-readable explanation, suitable for showing next to a field.
    pub message: String,
    /// Segments from the root to the failing value.
    pub path: Vec<PathSeg>,
}

impl ValidationIssue {
    /// Bracket key of the failing field (`user[emails][0]`).
    pub fn key(&self) -> String {
        bracket_key(&self.path)
    }

    /// JSON Pointer of the failing field (`/user/emails/0`).
    pub fn pointer(&self) -> String {
        format_pointer(&self.path)
    }
}

/// Options for the validator.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Stop at the first issue instead of collecting all of them.
    pub abort_early: bool,
    /// Treat every object as [`UnknownKeys::Passthrough`](crate::UnknownKeys)
    /// regardless of its declared policy.
    pub skip_object_extra_fields_check: bool,
}
