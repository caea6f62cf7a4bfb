pub mod parse;
pub mod types;

pub use parse::{parse, parse_with};
pub use types::{IssueCode, ParseOptions, ValidationIssue};
