//! Error types.

use form_state_value::{escape_component, PathSeg};
use indexmap::IndexMap;
use thiserror::Error;

use crate::validator::ValidationIssue;

/// An authored schema that can never accept a value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid schema{}: {}", at_pointer(.path), .code)]
pub struct SchemaError {
    /// Short upper-case tag, e.g. `MIN_MAX`.
    pub code: &'static str,
    /// Segments leading to the offending node: object keys, `type` for an
    /// array's element schema, `value` for a map's value schema, and
    /// `types` followed by the position for a union member.
    pub path: Vec<String>,
}

impl SchemaError {
    pub fn new(code: &'static str) -> Self {
        Self {
            code,
            path: Vec::new(),
        }
    }

    /// Prefixes the error location with `segment`.
    pub(crate) fn at(mut self, segment: &str) -> Self {
        self.path.insert(0, segment.to_owned());
        self
    }
}

fn at_pointer(path: &[String]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut out = String::from(" at ");
    for key in path {
        out.push('/');
        out.push_str(&escape_component(key));
    }
    out
}

/// A value rejected by a schema.
///
/// Carries one [`ValidationIssue`] per failing location.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("validation failed: {}", summarize(.issues))]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| {
            if issue.path.is_empty() {
                issue.message.clone()
            } else {
                format!("{}: {}", issue.key(), issue.message)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    /// Issue messages grouped by the bracket key of the field they concern,
    /// i.e. the same key the field renders under in a transport object.
    /// Issues about the root are grouped under the empty key.
    pub fn field_errors(&self) -> IndexMap<String, Vec<String>> {
        let mut out: IndexMap<String, Vec<String>> = IndexMap::new();
        for issue in &self.issues {
            out.entry(issue.key())
                .or_default()
                .push(issue.message.clone());
        }
        out
    }

    /// Messages of issues located exactly at `path`.
    pub fn messages_at(&self, path: &[PathSeg]) -> Vec<&str> {
        self.issues
            .iter()
            .filter(|i| i.path == path)
            .map(|i| i.message.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::IssueCode;

    fn issue(path: Vec<PathSeg>, message: &str) -> ValidationIssue {
        ValidationIssue {
            code: IssueCode::InvalidType,
            message: message.to_owned(),
            path,
        }
    }

    #[test]
    fn schema_error_display() {
        assert_eq!(SchemaError::new("MIN_MAX").to_string(), "invalid schema: MIN_MAX");
        let e = SchemaError::new("KEY_EMPTY").at("b/c").at("a");
        assert_eq!(e.to_string(), "invalid schema at /a/b~1c: KEY_EMPTY");
    }

    #[test]
    fn validation_error_display_lists_issues() {
        let err = ValidationError::new(vec![
            issue(vec!["email".into()], "Invalid email"),
            issue(vec!["tags".into(), 1.into()], "Expected string, received number"),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: email: Invalid email; tags[1]: Expected string, received number"
        );
    }

    #[test]
    fn field_errors_group_by_key() {
        let err = ValidationError::new(vec![
            issue(vec!["a".into()], "one"),
            issue(vec![], "root"),
            issue(vec!["a".into()], "two"),
        ]);
        let fields = err.field_errors();
        assert_eq!(fields["a"], vec!["one", "two"]);
        assert_eq!(fields[""], vec!["root"]);
        assert_eq!(err.messages_at(&["a".into()]), vec!["one", "two"]);
        assert!(err.messages_at(&["b".into()]).is_empty());
    }
}
