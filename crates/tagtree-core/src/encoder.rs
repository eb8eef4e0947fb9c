//! Encoder — renders a tagged tree into the textual (JSON) model.
//!
//! Two modes share one recursion:
//!
//! - **Lossless**: every compound key is rewritten `"<key>:<tagId>"` and
//!   every list becomes an object keyed `"<index>:<tagId>"`, so each node's
//!   exact tag survives even though JSON itself is untyped. Guaranteed round
//!   trip: `decode(encode(v, Lossless), Lossless) == v`.
//! - **Plain**: bare keys in sorted order, ordinary arrays, no tag ids. This
//!   is the hand-editable, diff-friendly form; reading it back goes through
//!   [`crate::infer`] and is best-effort.
//!
//! Encoding never fails: an End node (or anything else with no textual
//! equivalent) renders as an empty object placeholder.

use serde_json::{Map, Number, Value};

use crate::error::Result;
use crate::value::{Compound, FormatMode, TreeValue};

/// Encode a compound (the document root) into a JSON object.
pub fn encode(root: &Compound, mode: FormatMode) -> Value {
    Value::Object(encode_compound(root, mode))
}

/// Encode a single tree value into its JSON form.
pub fn encode_value(value: &TreeValue, mode: FormatMode) -> Value {
    match value {
        // Safe placeholder for the terminator / absent marker.
        TreeValue::End => Value::Object(Map::new()),
        TreeValue::Byte(b) => match mode {
            // Byte 0/1 is boolean content in the plain form; inference maps
            // it straight back to a byte.
            FormatMode::Plain if *b == 0 || *b == 1 => Value::Bool(*b == 1),
            _ => Value::Number((*b).into()),
        },
        TreeValue::Short(v) => Value::Number((*v).into()),
        TreeValue::Int(v) => Value::Number((*v).into()),
        TreeValue::Long(v) => Value::Number((*v).into()),
        TreeValue::Float(v) => float_value(*v as f64),
        TreeValue::Double(v) => float_value(*v),
        TreeValue::ByteArray(bytes) => {
            Value::Array(bytes.iter().map(|b| Value::Number((*b).into())).collect())
        }
        TreeValue::String(s) => Value::String(s.clone()),
        TreeValue::List(items) => match mode {
            FormatMode::Lossless => {
                let mut obj = Map::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    obj.insert(
                        format!("{}:{}", i, item.tag()),
                        encode_value(item, FormatMode::Lossless),
                    );
                }
                Value::Object(obj)
            }
            FormatMode::Plain => Value::Array(
                items
                    .iter()
                    .map(|item| encode_value(item, FormatMode::Plain))
                    .collect(),
            ),
        },
        TreeValue::Compound(compound) => Value::Object(encode_compound(compound, mode)),
        TreeValue::IntArray(ints) => {
            Value::Array(ints.iter().map(|i| Value::Number((*i).into())).collect())
        }
    }
}

/// Encode a compound's entries. Lossless keeps native order and annotates
/// keys; plain iterates sorted so the output is deterministic regardless of
/// how the compound was built.
fn encode_compound(compound: &Compound, mode: FormatMode) -> Map<String, Value> {
    let mut obj = Map::with_capacity(compound.len());
    match mode {
        FormatMode::Lossless => {
            for (key, value) in compound.iter() {
                obj.insert(
                    format!("{}:{}", key, value.tag()),
                    encode_value(value, mode),
                );
            }
        }
        FormatMode::Plain => {
            for (key, value) in compound.iter_sorted() {
                obj.insert(key.to_string(), encode_value(value, mode));
            }
        }
    }
    obj
}

/// Encode to a compact JSON string.
pub fn encode_to_string(root: &Compound, mode: FormatMode) -> Result<String> {
    Ok(serde_json::to_string(&encode(root, mode))?)
}

/// Encode to a pretty-printed JSON string (the form meant for hand editing
/// and version control).
pub fn encode_to_string_pretty(root: &Compound, mode: FormatMode) -> Result<String> {
    Ok(serde_json::to_string_pretty(&encode(root, mode))?)
}

/// JSON numbers cannot carry NaN or infinities; those degrade to `null`.
fn float_value(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}
