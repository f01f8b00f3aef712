//! Type converters

use async_trait::async_trait;
use serde_json::{Number, Value};

use super::{FieldContext, Transform};
use crate::error::Result;

/// Largest integer an `f64` holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Numeric coercion, see [`as_number`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AsNumber;

/// Coerce a scalar to a number.
///
/// Follows the usual loose numeric parsing: surrounding whitespace is
/// ignored, an empty string is `0`, booleans are `1`/`0`, and `0x` hex
/// literals are accepted. Input that is not a number becomes `null` rather
/// than an error, since JSON numbers have no NaN.
pub fn as_number() -> AsNumber {
    AsNumber
}

#[async_trait]
impl Transform for AsNumber {
    fn name(&self) -> &str {
        "as_number"
    }

    async fn apply(&self, value: Value, _cx: &FieldContext<'_>) -> Result<Value> {
        if value.is_number() {
            return Ok(value);
        }
        Ok(coerce_number(&value).map_or(Value::Null, number_value))
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::String(s) => parse_number(s),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16).ok().map(|n| n as f64);
    }

    // `f64::from_str` also takes "inf" and "nan", which are not numbers here
    if text
        .chars()
        .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E')
    {
        return None;
    }

    text.parse::<f64>().ok()
}

/// Integral values become JSON integers so they deserialize into integer fields
fn number_value(n: f64) -> Value {
    if !n.is_finite() {
        return Value::Null;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Value::from(n as i64);
    }
    Number::from_f64(n).map_or(Value::Null, Value::Number)
}

/// Boolean coercion, see [`as_boolean`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AsBoolean;

/// `true` iff the value is the string `"true"` in any letter case.
///
/// Every other string is `false`, including `"yes"` and `"1"`. A JSON
/// boolean passes through unchanged; anything else is `false`.
pub fn as_boolean() -> AsBoolean {
    AsBoolean
}

#[async_trait]
impl Transform for AsBoolean {
    fn name(&self) -> &str {
        "as_boolean"
    }

    async fn apply(&self, value: Value, _cx: &FieldContext<'_>) -> Result<Value> {
        let flag = match &value {
            Value::String(s) => s.eq_ignore_ascii_case("true"),
            Value::Bool(b) => *b,
            _ => false,
        };
        Ok(Value::Bool(flag))
    }
}
