//! Turning raw command-line tokens into typed attribute values.
//!
//! Values typed at the prompt are bare tokens (`update Place 1 max_guest 4`),
//! while values that came through the dotted mapping syntax are already JSON.
//! [`coerce`] accepts both without the caller naming a type.

use crate::model::FieldType;
use serde_json::{Number, Value};

/// Coerces a raw token to its most specific value.
///
/// Tried in order: a JSON literal, a case-insensitive `true`/`false`, an
/// integer, a finite float. Anything else is returned as the original string.
pub fn coerce(raw: &str) -> Value {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        return value;
    }
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(raw.to_string())
}

/// Coerces a raw token for a declared field. `None` when it does not fit.
pub fn coerce_for(ty: FieldType, raw: &str) -> Option<Value> {
    match ty {
        // Unquoted tokens stay verbatim so "123" is a string, not a number.
        FieldType::Str => match serde_json::from_str::<Value>(raw) {
            Ok(Value::String(s)) => Some(Value::String(s)),
            _ => Some(Value::String(raw.to_string())),
        },
        FieldType::Int => match coerce(raw) {
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(Value::Number(n)),
            _ => None,
        },
        FieldType::Float => match coerce(raw) {
            Value::Number(n) => n.as_f64().and_then(Number::from_f64).map(Value::Number),
            _ => None,
        },
        FieldType::StrList => match coerce(raw) {
            Value::Array(items) if items.iter().all(Value::is_string) => {
                Some(Value::Array(items))
            }
            _ => None,
        },
    }
}
