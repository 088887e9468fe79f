//! Value comparison shared by filtering and sorting

use std::cmp::Ordering;

use chrono::DateTime;
use serde_json::Value;

/// Compares two strings, as instants when both are RFC 3339 timestamps and
/// ordinally otherwise.
pub(crate) fn compare_strings(a: &str, b: &str) -> Ordering {
    match (
        DateTime::parse_from_rfc3339(a),
        DateTime::parse_from_rfc3339(b),
    ) {
        (Ok(a_ts), Ok(b_ts)) => a_ts.cmp(&b_ts),
        _ => a.cmp(b),
    }
}

/// Compares a record value with a raw parameter, coercing the parameter to
/// the value's JSON type.
///
/// Returns `None` when the parameter does not coerce or the value is not a
/// scalar.
pub(crate) fn compare_with_param(actual: &Value, raw: &str) -> Option<Ordering> {
    match actual {
        Value::Number(n) => {
            let a = n.as_f64()?;
            let b: f64 = raw.trim().parse().ok()?;
            a.partial_cmp(&b)
        }
        Value::Bool(a) => {
            let b: bool = raw.trim().parse().ok()?;
            Some(a.cmp(&b))
        }
        Value::String(a) => Some(compare_strings(a, raw)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Total order over record values.
///
/// Ordering rules:
/// - missing < null < bool < number < string < array < object
/// - For same types, natural ordering
pub(crate) fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a_val), Some(b_val)) => {
            let a_type = type_order(a_val);
            let b_type = type_order(b_val);

            if a_type != b_type {
                return a_type.cmp(&b_type);
            }

            match (a_val, b_val) {
                (Value::Bool(a_b), Value::Bool(b_b)) => a_b.cmp(b_b),
                (Value::Number(a_n), Value::Number(b_n)) => {
                    let a_f = a_n.as_f64().unwrap_or(0.0);
                    let b_f = b_n.as_f64().unwrap_or(0.0);
                    a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
                }
                (Value::String(a_s), Value::String(b_s)) => compare_strings(a_s, b_s),
                _ => Ordering::Equal,
            }
        }
    }
}

fn type_order(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
