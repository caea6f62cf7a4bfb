//! Validates a value against a schema and produces the accepted value.
//!
//! The accepted value can differ from the input: defaults fill in missing
//! fields, coercing schemas convert primitives and stripping objects drop
//! undeclared fields. Binary payloads are passed through by handle.

use std::sync::OnceLock;

use form_state_value::{deep_equal, format_number, PathSeg, Record, Value};
use regex::Regex;

use super::types::{IssueCode, ParseOptions, ValidationIssue};
use crate::error::ValidationError;
use crate::schema::*;

static UNDEFINED: Value = Value::Undefined;

/// Parse `value` against `schema` with default options.
pub fn parse(schema: &Schema, value: &Value) -> Result<Value, ValidationError> {
    parse_with(schema, value, &ParseOptions::default())
}

/// Parse `value` against `schema`.
///
/// Returns the accepted value, or every issue found (only the first one when
/// [`ParseOptions::abort_early`] is set).
pub fn parse_with(
    schema: &Schema,
    value: &Value,
    options: &ParseOptions,
) -> Result<Value, ValidationError> {
    let mut cx = Context::new(options, Vec::new());
    let accepted = cx.check(schema, value);
    if cx.issues.is_empty() {
        Ok(accepted)
    } else {
        Err(ValidationError::new(cx.issues))
    }
}

struct Context<'a> {
    options: &'a ParseOptions,
    path: Vec<PathSeg>,
    issues: Vec<ValidationIssue>,
}

impl<'a> Context<'a> {
    fn new(options: &'a ParseOptions, path: Vec<PathSeg>) -> Self {
        Self {
            options,
            path,
            issues: Vec::new(),
        }
    }

    fn report(&mut self, code: IssueCode, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            code,
            message: message.into(),
            path: self.path.clone(),
        });
    }

    fn expected(&mut self, expected: &str, value: &Value) {
        let received = match value {
            Value::Number(n) if n.is_nan() => "nan",
            other => other.kind().as_str(),
        };
        self.report(
            IssueCode::InvalidType,
            format!("Expected {expected}, received {received}"),
        );
    }

    fn halted(&self) -> bool {
        self.options.abort_early && !self.issues.is_empty()
    }

    fn check(&mut self, schema: &Schema, value: &Value) -> Value {
        if value.is_undefined() {
            if let Some(default) = &schema.base().default {
                return self.check_node(schema, default);
            }
        }
        self.check_node(schema, value)
    }

    fn check_node(&mut self, schema: &Schema, value: &Value) -> Value {
        match schema {
            Schema::Any(_) => value.clone(),
            Schema::Undef(_) => {
                if !value.is_undefined() {
                    self.expected("undefined", value);
                }
                value.clone()
            }
            Schema::Nil(_) => {
                if !value.is_null() {
                    self.expected("null", value);
                }
                value.clone()
            }
            Schema::Bool(s) => self.check_bool(s, value),
            Schema::Num(s) => self.check_num(s, value),
            Schema::Str(s) => self.check_str(s, value),
            Schema::Bin(s) => self.check_bin(s, value),
            Schema::Con(s) => {
                if !deep_equal(&s.value, value) {
                    self.report(
                        IssueCode::InvalidLiteral,
                        format!("Invalid literal value, expected {}", literal(&s.value)),
                    );
                }
                value.clone()
            }
            Schema::Arr(s) => self.check_arr(s, value),
            Schema::Obj(s) => self.check_obj(s, value),
            Schema::Map(s) => self.check_map(s, value),
            Schema::Or(s) => self.check_or(s, value),
        }
    }

    fn check_bool(&mut self, s: &BoolSchema, value: &Value) -> Value {
        let value = if s.coerce {
            Value::Bool(truthy(value))
        } else {
            value.clone()
        };
        if value.as_bool().is_none() {
            self.expected("boolean", &value);
        }
        value
    }

    fn check_num(&mut self, s: &NumSchema, value: &Value) -> Value {
        let value = if s.coerce {
            coerce_number(value)
        } else {
            value.clone()
        };
        let n = match value {
            Value::Number(n) if !n.is_nan() => n,
            _ => {
                self.expected("number", &value);
                return value;
            }
        };
        if let Some(format) = s.format {
            if format.is_integer() && (n.fract() != 0.0 || !n.is_finite()) {
                self.report(IssueCode::NotInteger, "Expected integer, received float");
                return value;
            }
            if format.is_unsigned() && n < 0.0 {
                self.report(
                    IssueCode::TooSmall,
                    "Number must be greater than or equal to 0",
                );
                return value;
            }
        }
        if let Some(gt) = s.gt {
            if n <= gt {
                self.report(
                    IssueCode::TooSmall,
                    format!("Number must be greater than {}", format_number(gt)),
                );
            }
        }
        if let Some(gte) = s.gte {
            if n < gte {
                self.report(
                    IssueCode::TooSmall,
                    format!(
                        "Number must be greater than or equal to {}",
                        format_number(gte)
                    ),
                );
            }
        }
        if let Some(lt) = s.lt {
            if n >= lt {
                self.report(
                    IssueCode::TooBig,
                    format!("Number must be less than {}", format_number(lt)),
                );
            }
        }
        if let Some(lte) = s.lte {
            if n > lte {
                self.report(
                    IssueCode::TooBig,
                    format!("Number must be less than or equal to {}", format_number(lte)),
                );
            }
        }
        value
    }

    fn check_str(&mut self, s: &StrSchema, value: &Value) -> Value {
        let value = match value {
            Value::Null
            | Value::Undefined
            | Value::Bool(_)
            | Value::Number(_)
            | Value::Unknown(_)
                if s.coerce =>
            {
                Value::String(value.to_text())
            }
            other => other.clone(),
        };
        let Some(text) = value.as_str() else {
            self.expected("string", &value);
            return value;
        };
        let len = text.chars().count() as u64;
        if let Some(min) = s.min {
            if len < min {
                self.report(
                    IssueCode::TooSmall,
                    format!("String must contain at least {min} character(s)"),
                );
            }
        }
        if let Some(max) = s.max {
            if len > max {
                self.report(
                    IssueCode::TooBig,
                    format!("String must contain at most {max} character(s)"),
                );
            }
        }
        if let Some(format) = s.format {
            if !matches_format(format, text) {
                self.report(
                    IssueCode::InvalidString,
                    format!("Invalid {}", format.as_str()),
                );
            }
        }
        value
    }

    fn check_bin(&mut self, s: &BinSchema, value: &Value) -> Value {
        let Some(payload) = value.as_binary() else {
            self.expected("binary", value);
            return value.clone();
        };
        let size = payload.len() as u64;
        if let Some(min) = s.min {
            if size < min {
                self.report(
                    IssueCode::TooSmall,
                    format!("File must be at least {min} byte(s)"),
                );
            }
        }
        if let Some(max) = s.max {
            if size > max {
                self.report(
                    IssueCode::TooBig,
                    format!("File must be at most {max} byte(s)"),
                );
            }
        }
        if let Some(allowed) = &s.content_types {
            let actual = payload.content_type();
            if !actual.is_some_and(|ct| allowed.iter().any(|a| a == ct)) {
                self.report(
                    IssueCode::InvalidContentType,
                    format!(
                        "Invalid content type, expected one of {}, received '{}'",
                        quoted(allowed.iter().map(String::as_str)),
                        actual.unwrap_or("none")
                    ),
                );
            }
        }
        value.clone()
    }

    fn check_arr(&mut self, s: &ArrSchema, value: &Value) -> Value {
        let Some(items) = value.as_sequence() else {
            self.expected("array", value);
            return value.clone();
        };
        let len = items.len() as u64;
        if let Some(min) = s.min {
            if len < min {
                self.report(
                    IssueCode::TooSmall,
                    format!("Array must contain at least {min} element(s)"),
                );
            }
        }
        if let Some(max) = s.max {
            if len > max {
                self.report(
                    IssueCode::TooBig,
                    format!("Array must contain at most {max} element(s)"),
                );
            }
        }
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if self.halted() {
                return value.clone();
            }
            self.path.push(PathSeg::Index(i));
            out.push(self.check(&s.type_, item));
            self.path.pop();
        }
        Value::Sequence(out)
    }

    fn check_obj(&mut self, s: &ObjSchema, value: &Value) -> Value {
        let Some(fields) = value.as_record() else {
            self.expected("object", value);
            return value.clone();
        };
        let mut out = Record::with_capacity(fields.len());
        for key in &s.keys {
            if self.halted() {
                return value.clone();
            }
            let present = fields.get(&key.key);
            let field = present.unwrap_or(&UNDEFINED);
            if field.is_undefined() && key.optional && key.value.base().default.is_none() {
                if present.is_some() {
                    out.insert(key.key.clone(), Value::Undefined);
                }
                continue;
            }
            self.path.push(PathSeg::Key(key.key.clone()));
            let accepted = self.check(&key.value, field);
            self.path.pop();
            if present.is_some() || !accepted.is_undefined() {
                out.insert(key.key.clone(), accepted);
            }
        }

        let policy = if self.options.skip_object_extra_fields_check {
            UnknownKeys::Passthrough
        } else {
            s.unknown_keys
        };
        let mut extras = fields
            .iter()
            .filter(|(k, _)| !s.keys.iter().any(|key| &key.key == *k))
            .peekable();
        match policy {
            UnknownKeys::Strip => {}
            UnknownKeys::Passthrough => {
                for (k, v) in extras {
                    out.insert(k.clone(), v.clone());
                }
            }
            UnknownKeys::Strict => {
                if extras.peek().is_some() {
                    let names = quoted(extras.map(|(k, _)| k.as_str()));
                    self.report(
                        IssueCode::UnrecognizedKeys,
                        format!("Unrecognized key(s) in object: {names}"),
                    );
                }
            }
        }
        Value::Record(out)
    }

    fn check_map(&mut self, s: &MapSchema, value: &Value) -> Value {
        let Some(fields) = value.as_record() else {
            self.expected("object", value);
            return value.clone();
        };
        let mut out = Record::with_capacity(fields.len());
        for (k, v) in fields {
            if self.halted() {
                return value.clone();
            }
            self.path.push(PathSeg::Key(k.clone()));
            out.insert(k.clone(), self.check(&s.value, v));
            self.path.pop();
        }
        Value::Record(out)
    }

    fn check_or(&mut self, s: &OrSchema, value: &Value) -> Value {
        for member in &s.types {
            let mut sub = Context::new(self.options, self.path.clone());
            let accepted = sub.check(member, value);
            if sub.issues.is_empty() {
                return accepted;
            }
        }
        self.report(IssueCode::InvalidUnion, "Invalid input");
        value.clone()
    }
}

/// Truthiness of a primitive as a browser sees it.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Undefined => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Numeric conversion of a primitive; `NaN` when there is none.
fn coerce_number(value: &Value) -> Value {
    let n = match value {
        Value::Number(n) => *n,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                0.0
            } else {
                match t {
                    "Infinity" | "+Infinity" => f64::INFINITY,
                    "-Infinity" => f64::NEG_INFINITY,
                    _ if radix_prefix(t).is_some() => parse_radix(t),
                    // Rust accepts "inf"/"nan" spellings a browser would not
                    _ if t.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => {
                        f64::NAN
                    }
                    _ => t.parse::<f64>().unwrap_or(f64::NAN),
                }
            }
        }
        _ => f64::NAN,
    };
    Value::Number(n)
}

/// Radix of a `0x`/`0o`/`0b` literal. Signed forms have none.
fn radix_prefix(t: &str) -> Option<u32> {
    match t.get(..2)? {
        "0x" | "0X" => Some(16),
        "0o" | "0O" => Some(8),
        "0b" | "0B" => Some(2),
        _ => None,
    }
}

/// Unsigned integer literal with a radix prefix; `NaN` when malformed.
fn parse_radix(t: &str) -> f64 {
    let (Some(radix), Some(digits)) = (radix_prefix(t), t.get(2..)) else {
        return f64::NAN;
    };
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => other.to_text(),
    }
}

fn quoted<'s>(items: impl Iterator<Item = &'s str>) -> String {
    items
        .map(|s| format!("'{s}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_regex(format: StrFormat) -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    static URL: OnceLock<Option<Regex>> = OnceLock::new();
    static UUID: OnceLock<Option<Regex>> = OnceLock::new();
    let (cell, pattern) = match format {
        StrFormat::Email => (
            &EMAIL,
            r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
        ),
        StrFormat::Url => (&URL, r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+[^\s]*$"),
        StrFormat::Uuid => (
            &UUID,
            r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
        ),
    };
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn matches_format(format: StrFormat, text: &str) -> bool {
    if format == StrFormat::Email && (text.starts_with('.') || text.contains("..")) {
        return false;
    }
    format_regex(format).is_some_and(|re| re.is_match(text))
}
