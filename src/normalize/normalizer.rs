//! Recursive float-to-decimal conversion

use super::value::{AttrValue, Item, Number};
use crate::types::{JsonValue, Record};
use rust_decimal::Decimal;

/// Normalize any JSON value.
///
/// Lists keep their order and length, maps keep their keys in insertion
/// order, floats become exact decimals and every other scalar is returned
/// unchanged. The input is not modified.
pub fn normalize(value: &JsonValue) -> AttrValue {
    match value {
        JsonValue::Null => AttrValue::Null,
        JsonValue::Bool(b) => AttrValue::Bool(*b),
        JsonValue::String(s) => AttrValue::String(s.clone()),
        JsonValue::Number(n) => AttrValue::Number(normalize_number(n)),
        JsonValue::Array(items) => AttrValue::List(items.iter().map(normalize).collect()),
        JsonValue::Object(map) => AttrValue::Map(normalize_map(map)),
    }
}

/// Integers keep their exact digits, whatever their size; only number text
/// with a fraction or exponent is read as a float.
fn normalize_number(n: &serde_json::Number) -> Number {
    if let Some(i) = n.as_i64() {
        return Number::Integer(i);
    }
    if let Some(u) = n.as_u64() {
        return Number::Unsigned(u);
    }

    let text = n.to_string();
    if !text.contains(['.', 'e', 'E']) {
        return Number::BigInteger(text);
    }
    match n.as_f64() {
        Some(value) => float_to_number(value),
        // overflows f64 (e.g. `1e400`); keep the source text
        None => Number::Exponent(text),
    }
}

/// Normalize one top-level record
pub fn normalize_record(record: &Record) -> Item {
    normalize_map(record)
}

fn normalize_map(map: &Record) -> Item {
    map.iter()
        .map(|(key, value)| (key.clone(), normalize(value)))
        .collect()
}

/// Convert a float to an exact decimal via its shortest round-trip text.
///
/// `{:?}` on `f64` yields the shortest text that parses back to the same
/// float and keeps a trailing `.0` on integral values; very large or small
/// magnitudes come out in exponent form (`1e21`, `1e-7`).
pub fn float_to_number(value: f64) -> Number {
    let text = format!("{value:?}");
    let parsed = if text.contains('e') {
        Decimal::from_scientific(&text)
    } else {
        Decimal::from_str_exact(&text)
    };

    match parsed {
        Ok(decimal) => Number::Decimal(decimal),
        Err(_) => Number::Exponent(format!("{value:e}")),
    }
}
