//! Tag inference for plain-mode decoding.
//!
//! Plain-mode text carries no tag annotations, so every value's node kind
//! must be guessed from its JSON shape. This is best-effort by design: the
//! exact numeric width (Byte vs Short vs Int vs Long) is unrecoverable once
//! the tag is discarded, so numbers land in the widest safe container. That
//! lossiness is the accepted cost of the human-editable form; lossless mode
//! exists for exact round trips.

use serde_json::Value;

use crate::value::TagId;

/// Decide which tagged-tree node kind an untagged JSON value represents.
///
/// Rules, in order:
/// - object → Compound
/// - array → ByteArray if every element is an integral number fitting 8 bits,
///   IntArray if every element is integral fitting 32 bits, otherwise List.
///   Empty arrays default to List.
/// - boolean → Byte (decoded as 1/0; legacy data stored booleans as bytes)
/// - string → String
/// - number → Long if integral, Double otherwise
pub fn infer(value: &Value) -> TagId {
    match value {
        Value::Object(_) => TagId::Compound,
        Value::Array(items) => infer_array(items),
        Value::Bool(_) => TagId::Byte,
        Value::String(_) => TagId::String,
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                TagId::Long
            } else {
                TagId::Double
            }
        }
        // Null has no tagged representation; classify like the other
        // non-primitive shapes and let the decoder degrade it.
        Value::Null => TagId::Compound,
    }
}

/// Pick the narrowest uniform array encoding.
fn infer_array(items: &[Value]) -> TagId {
    if items.is_empty() {
        return TagId::List;
    }
    let integrals: Option<Vec<i64>> = items.iter().map(as_integral).collect();
    match integrals {
        Some(values) if values.iter().all(|v| i8::try_from(*v).is_ok()) => TagId::ByteArray,
        Some(values) if values.iter().all(|v| i32::try_from(*v).is_ok()) => TagId::IntArray,
        _ => TagId::List,
    }
}

/// The element's exact integer value, if it is an integral JSON number.
/// Fractional numbers, strings, booleans, and nested structures all
/// disqualify the narrow array encodings.
pub(crate) fn as_integral(value: &Value) -> Option<i64> {
    let n = value.as_number()?;
    n.as_i64()
        .or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok()))
}
