//! Paths into a value tree and their two textual forms: bracket transport
//! keys (`user[tags][0]`) and JSON Pointers (`/user/tags/0`).

use std::fmt;

/// One step from a container to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSeg {
    /// Record field.
    Key(String),
    /// Sequence position.
    Index(usize),
}

impl fmt::Display for PathSeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSeg::Key(k) => f.write_str(k),
            PathSeg::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for PathSeg {
    fn from(k: &str) -> Self {
        PathSeg::Key(k.to_owned())
    }
}

impl From<String> for PathSeg {
    fn from(k: String) -> Self {
        PathSeg::Key(k)
    }
}

impl From<usize> for PathSeg {
    fn from(i: usize) -> Self {
        PathSeg::Index(i)
    }
}

/// Appends `segment` to a bracket-notation `prefix`.
///
/// An empty prefix means the segment is a root child and stays bare:
/// `("", name) -> "name"`, `("", 0) -> "0"`, `("user", name) -> "user[name]"`.
pub fn compose_key(prefix: &str, segment: impl fmt::Display) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}[{segment}]")
    }
}

/// Bracket-notation key for a whole path.
pub fn bracket_key(path: &[PathSeg]) -> String {
    path.iter()
        .fold(String::new(), |prefix, seg| compose_key(&prefix, seg))
}

/// Escapes one JSON Pointer token component.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// RFC 6901 pointer for a path; the root is the empty string.
pub fn format_pointer(path: &[PathSeg]) -> String {
    let mut out = String::new();
    for seg in path {
        out.push('/');
        out.push_str(&escape_component(&seg.to_string()));
    }
    out
}
