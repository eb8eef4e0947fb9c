//! Identifier field codec.
//!
//! Cross-references between persisted entities are 128-bit identifiers
//! stored inside a compound as a pair of 64-bit `Long` fields named
//! `<name>High` / `<name>Low`. A secondary single-field string form exists
//! for compounds meant to be edited by hand: a fixed-length URL-safe base64
//! rendering of the identifier's 16 bytes, with a backward-compatibility
//! path that accepts the canonical hyphenated form written before the
//! compact encoding existed.
//!
//! Absence is a normal outcome, not an error: a missing or malformed
//! reference reads as `None` so callers can treat "no link" as data.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use uuid::Uuid;

use crate::value::{Compound, TreeValue};

/// Length of the compact string form: 16 bytes base64-encoded without
/// padding.
pub const ENCODED_LEN: usize = 22;

// Strings longer than this are treated as the pre-encoding legacy form
// (canonical hyphenated text, 36 chars). Sits between the two lengths with
// slack on the compact side.
const LEGACY_MIN_LEN: usize = 25;

/// Field-name scheme for one identifier slot, e.g. `UuidFields::new("owner")`
/// reads and writes `ownerHigh`/`ownerLow` and the string field `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UuidFields {
    field: String,
    high_field: String,
    low_field: String,
}

impl UuidFields {
    pub fn new(name: impl Into<String>) -> Self {
        let field = name.into();
        UuidFields {
            high_field: format!("{field}High"),
            low_field: format!("{field}Low"),
            field,
        }
    }

    /// The single-field (string form) name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Write the identifier as its two 64-bit halves.
    pub fn write(&self, id: Uuid, tag: &mut Compound) {
        let (high, low) = id.as_u64_pair();
        tag.insert(self.high_field.clone(), TreeValue::Long(high as i64));
        tag.insert(self.low_field.clone(), TreeValue::Long(low as i64));
    }

    /// Write the identifier into a fresh compound.
    pub fn to_compound(&self, id: Uuid) -> Compound {
        let mut tag = Compound::new();
        self.write(id, &mut tag);
        tag
    }

    /// Write the identifier if present; a `None` leaves the compound
    /// untouched (absence is key absence).
    pub fn try_write(&self, id: Option<Uuid>, tag: &mut Compound) {
        if let Some(id) = id {
            self.write(id, tag);
        }
    }

    /// Read the paired 64-bit fields. Succeeds only if **both** halves are
    /// present with a numeric representation; anything else is absence.
    pub fn try_read(&self, tag: &Compound) -> Option<Uuid> {
        let high = tag.get(&self.high_field).filter(|v| v.is_numeric())?;
        let low = tag.get(&self.low_field).filter(|v| v.is_numeric())?;
        Some(Uuid::from_u64_pair(
            high.as_i64()? as u64,
            low.as_i64()? as u64,
        ))
    }

    /// Write the string form, for compounds the player edits by hand. A
    /// `None` writes an empty string, which reads back as absent.
    pub fn write_string(&self, id: Option<Uuid>, tag: &mut Compound) {
        let text = id.map(encode_uuid).unwrap_or_default();
        tag.insert(self.field.clone(), TreeValue::String(text));
    }

    /// Read the string form. Empty, short, or malformed strings are absent;
    /// strings longer than the compact encoding are parsed as the legacy
    /// canonical hyphenated form.
    pub fn try_read_string(&self, tag: &Compound) -> Option<Uuid> {
        let text = tag.get(&self.field)?.as_str()?;
        if text.is_empty() {
            return None;
        }
        if text.len() >= LEGACY_MIN_LEN {
            // Old data, from before identifiers were base64-encoded.
            return Uuid::try_parse(text).ok();
        }
        decode_uuid(text)
    }

    /// Write a collection of identifiers as a list of paired-field
    /// compounds.
    pub fn write_many(&self, ids: impl IntoIterator<Item = Uuid>) -> TreeValue {
        TreeValue::List(
            ids.into_iter()
                .map(|id| TreeValue::Compound(self.to_compound(id)))
                .collect(),
        )
    }

    /// Read every readable identifier out of a list of compounds. Elements
    /// that are not compounds or lack the paired fields are skipped.
    pub fn read_many(&self, list: &TreeValue) -> Vec<Uuid> {
        list.as_list()
            .unwrap_or(&[])
            .iter()
            .filter_map(|item| item.as_compound())
            .filter_map(|tag| self.try_read(tag))
            .collect()
    }
}

/// Compact reversible string form: URL-safe base64 of the identifier's 16
/// big-endian bytes, no padding. Always [`ENCODED_LEN`] characters.
pub fn encode_uuid(id: Uuid) -> String {
    URL_SAFE_NO_PAD.encode(id.as_bytes())
}

/// Invert [`encode_uuid`]. `None` for anything that does not decode to
/// exactly 16 bytes.
pub fn decode_uuid(text: &str) -> Option<Uuid> {
    let bytes = URL_SAFE_NO_PAD.decode(text).ok()?;
    let bytes: [u8; 16] = bytes.try_into().ok()?;
    Some(Uuid::from_bytes(bytes))
}
