//! Textual form of leaf values, as a browser would stringify them into a
//! form-data field.

use crate::value::Value;

/// Formats a number the way ECMAScript `Number.prototype.toString` does.
///
/// Integral values print without a fraction, magnitudes of `1e21` and above
/// or below `1e-6` switch to exponent notation with an explicit sign.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        // covers -0
        return "0".to_owned();
    }
    let abs = n.abs();
    if !(1e-6..1e21).contains(&abs) {
        let exp = format!("{n:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{mantissa}e+{power}")
            }
            _ => exp,
        };
    }
    format!("{n}")
}

impl Value {
    /// Default string conversion of a leaf.
    ///
    /// Containers join their elements with commas like an array's
    /// `toString`; records render as `[object Object]`. Binary payloads have
    /// no textual form in transport and render as `[object Blob]`.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => "null".to_owned(),
            Value::Undefined => "undefined".to_owned(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Binary(b) if b.name().is_some() => "[object File]".to_owned(),
            Value::Binary(_) => "[object Blob]".to_owned(),
            Value::Unknown(o) => o.to_string(),
            Value::Record(_) => "[object Object]".to_owned(),
            Value::Sequence(items) => items
                .iter()
                .map(|item| match item {
                    Value::Null | Value::Undefined => String::new(),
                    other => other.to_text(),
                })
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}
