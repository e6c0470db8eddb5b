//! Text conversion of JSON values matching what a browser prints for them.
//!
//! The conversion service returns loosely typed lists, and the page that
//! historically rendered them relied on the default string conversion of
//! whatever came back. These helpers reproduce that output byte for byte for
//! every value JSON can carry.

use serde_json::{Number, Value};

/// Default string conversion, as used by template literals.
pub fn js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        other => join_element(other),
    }
}

/// Conversion applied to each element when a list is joined.
///
/// Differs from [`js_string`] only for `null`, which joins as nothing.
pub fn join_element(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => format_number(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => join_with(items, ","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Elements joined with `", "`.
pub fn join_values(values: &[Value]) -> String {
    join_with(values, ", ")
}

/// `[a, b, c]` form shown in the result region and in history lines.
pub fn bracketed(values: &[Value]) -> String {
    format!("[{}]", join_values(values))
}

pub fn js_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn join_with(values: &[Value], separator: &str) -> String {
    values
        .iter()
        .map(join_element)
        .collect::<Vec<_>>()
        .join(separator)
}

fn format_number(number: &Number) -> String {
    if let Some(n) = number.as_i64() {
        return n.to_string();
    }
    if let Some(n) = number.as_u64() {
        return n.to_string();
    }
    let Some(n) = number.as_f64() else {
        return number.to_string();
    };
    if n == 0.0 {
        // covers -0
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{n}");
    }
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exp,
    }
}
