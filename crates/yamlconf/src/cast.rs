//! Type inference for scalar strings
//!
//! String scalars, after placeholder substitution, are inferred into
//! booleans, integers, floats, or comma separated lists of those. String
//! casting never fails: anything unrecognised stays a string.

use crate::document::RawValue;
use crate::value::{Primitive, Value};

/// Result of casting a non-empty raw value
#[derive(Debug, Clone, PartialEq)]
pub enum Cast {
    /// A single primitive
    One(Primitive),
    /// A comma separated string or a sequence, cast element by element
    Many(Vec<Primitive>),
}

impl From<Cast> for Value {
    fn from(cast: Cast) -> Self {
        match cast {
            Cast::One(p) => Value::Scalar(p),
            Cast::Many(items) => Value::List(items),
        }
    }
}

/// Cast a single string into a primitive
///
/// Only the exact keywords `true` and `false` (in any case) become booleans.
/// The fallback keeps the original casing.
pub fn cast_primitive(raw: &str) -> Primitive {
    let lower = raw.to_lowercase();
    match lower.as_str() {
        "true" => return Primitive::Bool(true),
        "false" => return Primitive::Bool(false),
        _ => {}
    }

    let numeric = lower.trim();
    if let Ok(i) = numeric.parse::<i64>() {
        return Primitive::Integer(i);
    }
    if let Ok(f) = numeric.parse::<f64>() {
        return Primitive::Float(f);
    }

    Primitive::String(raw.to_string())
}

/// Cast a string, splitting it into a list when it contains a comma
///
/// Returns `None` for the empty string.
pub fn cast_str(raw: &str) -> Option<Cast> {
    if raw.is_empty() {
        return None;
    }
    if raw.contains(',') {
        return Some(Cast::Many(raw.split(',').map(cast_primitive).collect()));
    }
    Some(Cast::One(cast_primitive(raw)))
}

/// Cast a raw document value
///
/// Returns `None` for null, the empty string, and the empty sequence.
/// Typed scalars pass through unchanged. Sequence items are cast one by one
/// without comma splitting. Items that are not scalars, and a mapping handed
/// in directly, are kept as their flow-style text.
pub fn cast(raw: &RawValue) -> Option<Cast> {
    match raw {
        RawValue::Null => None,
        RawValue::String(s) => cast_str(s),
        RawValue::Sequence(items) if items.is_empty() => None,
        RawValue::Sequence(items) => Some(Cast::Many(items.iter().map(item).collect())),
        other => Some(Cast::One(item(other))),
    }
}

fn item(raw: &RawValue) -> Primitive {
    match raw {
        RawValue::Bool(b) => Primitive::Bool(*b),
        RawValue::Integer(i) => Primitive::Integer(*i),
        RawValue::Float(f) => Primitive::Float(*f),
        RawValue::String(s) => cast_primitive(s),
        RawValue::Null | RawValue::Sequence(_) | RawValue::Mapping(_) => {
            Primitive::String(raw.to_string())
        }
    }
}
