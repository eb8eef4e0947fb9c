//! Decoder — parses the textual (JSON) model back into a tagged tree.
//!
//! Lossless input carries a `:<tagId>` suffix on every object key; plain
//! input carries nothing and every value's kind comes from [`crate::infer`].
//!
//! The overriding policy is damage containment: save files arrive from old
//! game versions, hand edits, and external tools, and one malformed entry
//! must never destroy the rest of the document. Every anomaly is reported to
//! the injected [`DiagSink`] and resolved locally:
//!
//! - a key whose suffix is missing or unparseable decodes under an inferred
//!   tag, unless the bare key already exists — then the entry is skipped so
//!   already-decoded data is never overwritten
//! - an unknown tag id, or a value that does not fit its declared tag, falls
//!   back to a String node holding the value's JSON text
//! - out-of-range byte/int array elements are dropped individually; the
//!   surviving elements and all sibling nodes still load

use serde_json::{Map, Value};

use crate::diag::{DiagSink, Diagnostic, Severity};
use crate::error::{Result, TagTreeError};
use crate::infer::{as_integral, infer};
use crate::value::{Compound, FormatMode, TagId, TreeValue};

/// Decode a JSON document root into a compound.
///
/// Errors only if `json` is not an object; every anomaly below the root is
/// reported through `sink` and degraded per the module policy.
pub fn decode(json: &Value, mode: FormatMode, sink: &mut dyn DiagSink) -> Result<Compound> {
    let obj = json
        .as_object()
        .ok_or_else(|| TagTreeError::RootNotObject(json_kind(json)))?;
    let mut ctx = Ctx { mode, sink };
    Ok(ctx.compound(obj))
}

/// Parse a JSON string and decode it. The parse error path is the only
/// hard failure in the whole decoder.
pub fn decode_from_str(text: &str, mode: FormatMode, sink: &mut dyn DiagSink) -> Result<Compound> {
    let json: Value = serde_json::from_str(text)?;
    decode(&json, mode, sink)
}

/// Decode state: the mode and the diagnostic sink, threaded through the
/// recursion together.
struct Ctx<'a> {
    mode: FormatMode,
    sink: &'a mut dyn DiagSink,
}

impl Ctx<'_> {
    fn compound(&mut self, obj: &Map<String, Value>) -> Compound {
        let mut out = Compound::new();
        for (key, value) in obj {
            match self.mode {
                FormatMode::Plain => {
                    let decoded = self.element(value, 0);
                    out.insert(key.clone(), decoded);
                }
                FormatMode::Lossless => match split_tag_suffix(key) {
                    Some((stem, raw)) => {
                        if out.contains_key(stem) {
                            self.sink.report(Diagnostic::warning(format!(
                                "formatting conflict on key '{stem}': entry '{key}' collides \
                                 with an already-decoded value, skipping"
                            )));
                            continue;
                        }
                        let decoded = self.element(value, raw);
                        out.insert(stem.to_string(), decoded);
                    }
                    None => {
                        if out.contains_key(key.as_str()) {
                            self.sink.report(Diagnostic::warning(format!(
                                "formatting conflict on key '{key}': no tag suffix and the \
                                 key already exists, skipping"
                            )));
                            continue;
                        }
                        // Untagged entry in a lossless document; best effort.
                        let decoded = self.element(value, 0);
                        out.insert(key.clone(), decoded);
                    }
                },
            }
        }
        out
    }

    /// Decode one value under a raw tag id. `raw <= 0` means no usable tag
    /// was declared and the kind is inferred from the JSON shape.
    fn element(&mut self, json: &Value, raw: i8) -> TreeValue {
        let raw = if raw <= 0 { infer(json).raw() } else { raw };
        let Some(tag) = TagId::from_raw(raw) else {
            return self.fallback(json, raw, Severity::Warning);
        };
        match tag {
            // Legacy exception: older files stored boolean flags as literal
            // true/false under the byte tag.
            TagId::Byte if json.is_boolean() => {
                TreeValue::Byte(if json.as_bool().unwrap_or(false) { 1 } else { 0 })
            }
            TagId::Byte
            | TagId::Short
            | TagId::Int
            | TagId::Long
            | TagId::Float
            | TagId::Double => match numeric(json, tag) {
                Some(value) => value,
                None => self.fallback(json, raw, Severity::Error),
            },
            TagId::String => match json {
                Value::String(s) => TreeValue::String(s.clone()),
                // Scalars stringify rather than fail.
                Value::Number(n) => TreeValue::String(n.to_string()),
                Value::Bool(b) => TreeValue::String(b.to_string()),
                _ => self.fallback(json, raw, Severity::Error),
            },
            TagId::ByteArray => match json.as_array() {
                Some(items) => TreeValue::ByteArray(self.narrow_array(items, "byte", |v| {
                    i8::try_from(v).ok()
                })),
                None => self.fallback(json, raw, Severity::Error),
            },
            TagId::IntArray => match json.as_array() {
                Some(items) => TreeValue::IntArray(self.narrow_array(items, "int", |v| {
                    i32::try_from(v).ok()
                })),
                None => self.fallback(json, raw, Severity::Error),
            },
            TagId::List => self.list(json),
            TagId::Compound => match json.as_object() {
                Some(obj) => TreeValue::Compound(self.compound(obj)),
                None => self.fallback(json, raw, Severity::Error),
            },
            // Tag 0 only reaches here via an explicit annotation; nothing to
            // decode under it.
            TagId::End => self.fallback(json, raw, Severity::Warning),
        }
    }

    /// Decode a list from either of its two encodings: the lossless object
    /// form (`"<index>:<tagId>"` keys, element order = iteration order) or
    /// the plain array form (elements inferred). Both are accepted in both
    /// modes, since legacy files mix them.
    fn list(&mut self, json: &Value) -> TreeValue {
        match json {
            Value::Array(items) => TreeValue::List(
                items.iter().map(|item| self.element(item, 0)).collect(),
            ),
            Value::Object(obj) => TreeValue::List(
                obj.iter()
                    .map(|(key, value)| {
                        let raw = split_tag_suffix(key).map(|(_, raw)| raw).unwrap_or(0);
                        self.element(value, raw)
                    })
                    .collect(),
            ),
            other => {
                self.sink.report(Diagnostic::warning(format!(
                    "expected an array or object for a list, found {}; producing an empty list",
                    json_kind(other)
                )));
                TreeValue::List(Vec::new())
            }
        }
    }

    /// Per-element narrowing for byte/int arrays. Elements that are not
    /// integral or do not fit the target width are dropped with a
    /// diagnostic; the rest survive.
    fn narrow_array<T>(
        &mut self,
        items: &[Value],
        kind: &str,
        narrow: impl Fn(i64) -> Option<T>,
    ) -> Vec<T> {
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match as_integral(item).and_then(&narrow) {
                Some(v) => out.push(v),
                None => self.sink.report(Diagnostic::error(format!(
                    "element {i} of a {kind} array is not a valid {kind} ({item}), dropping it"
                ))),
            }
        }
        out
    }

    /// The universal degraded result: a String node holding the value's JSON
    /// text, so nothing the input contained is discarded outright.
    fn fallback(&mut self, json: &Value, raw: i8, severity: Severity) -> TreeValue {
        self.sink.report(Diagnostic {
            severity,
            message: format!(
                "no tagged-tree representation for {json} (tag {raw}); keeping it as a string"
            ),
        });
        TreeValue::String(json.to_string())
    }
}

/// Split the trailing `:<tagId>` off a lossless key. Returns `None` when
/// there is no colon or the suffix does not parse as a tag id, leaving the
/// key untouched for the conflict/best-effort path.
fn split_tag_suffix(key: &str) -> Option<(&str, i8)> {
    let (stem, suffix) = key.rsplit_once(':')?;
    let raw = suffix.parse::<i8>().ok()?;
    Some((stem, raw))
}

/// Build the numeric variant matching `tag` from a JSON value. Numeric
/// strings are accepted; anything else is `None`.
fn numeric(json: &Value, tag: TagId) -> Option<TreeValue> {
    enum Num {
        Int(i64),
        Float(f64),
    }

    let num = match json {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Num::Int(i)
            } else if let Some(u) = n.as_u64() {
                Num::Int(u as i64)
            } else {
                Num::Float(n.as_f64()?)
            }
        }
        Value::String(s) => {
            if let Ok(i) = s.parse::<i64>() {
                Num::Int(i)
            } else {
                Num::Float(s.parse::<f64>().ok()?)
            }
        }
        _ => return None,
    };

    let (int, float) = match num {
        Num::Int(i) => (i, i as f64),
        Num::Float(f) => (f as i64, f),
    };

    Some(match tag {
        TagId::Byte => TreeValue::Byte(int as i8),
        TagId::Short => TreeValue::Short(int as i16),
        TagId::Int => TreeValue::Int(int as i32),
        TagId::Long => TreeValue::Long(int),
        TagId::Float => TreeValue::Float(float as f32),
        TagId::Double => TreeValue::Double(float),
        _ => unreachable!("numeric() is only called for tags 1-6"),
    })
}

/// Short JSON kind name for messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
