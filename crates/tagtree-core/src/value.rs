//! The tagged tree value model.
//!
//! Save data is persisted as a recursive tree where every node's shape is
//! determined by a small integer tag (0–11). [`TreeValue`] is the closed
//! union over those node kinds; [`Compound`] is its mapping node. Uses
//! `Vec<(String, TreeValue)>` for compounds to maintain insertion order
//! without depending on `IndexMap`.

use std::fmt;

/// The integer tag identifying a [`TreeValue`] node kind on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagId {
    End,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    ByteArray,
    String,
    List,
    Compound,
    IntArray,
}

impl TagId {
    /// The raw tag id as persisted in lossless key suffixes.
    pub const fn raw(self) -> i8 {
        match self {
            TagId::End => 0,
            TagId::Byte => 1,
            TagId::Short => 2,
            TagId::Int => 3,
            TagId::Long => 4,
            TagId::Float => 5,
            TagId::Double => 6,
            TagId::ByteArray => 7,
            TagId::String => 8,
            TagId::List => 9,
            TagId::Compound => 10,
            TagId::IntArray => 11,
        }
    }

    /// Map a raw tag id back to a known kind. Returns `None` for ids outside
    /// 0–11 — the decoder treats those as the unknown-tag fallback case.
    pub const fn from_raw(raw: i8) -> Option<TagId> {
        Some(match raw {
            0 => TagId::End,
            1 => TagId::Byte,
            2 => TagId::Short,
            3 => TagId::Int,
            4 => TagId::Long,
            5 => TagId::Float,
            6 => TagId::Double,
            7 => TagId::ByteArray,
            8 => TagId::String,
            9 => TagId::List,
            10 => TagId::Compound,
            11 => TagId::IntArray,
            _ => return None,
        })
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

/// Conversion mode threaded through every encode/decode call.
///
/// `Lossless` embeds exact tag ids in object keys so the tree is
/// byte-for-byte reconstructible; `Plain` produces tag-free, human-editable
/// JSON that must be read back through type inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    Lossless,
    Plain,
}

/// A tagged tree node. One variant per tag id.
///
/// Lists are heterogeneous: the model does not require elements to share a
/// tag, though plain-mode inference picks the narrowest uniform array
/// encoding when one exists.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeValue {
    /// Terminator / absent marker. Never meaningful inside a [`Compound`];
    /// encodes to an empty object placeholder.
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<TreeValue>),
    Compound(Compound),
    IntArray(Vec<i32>),
}

impl TreeValue {
    /// The tag id of this node.
    pub fn tag(&self) -> TagId {
        match self {
            TreeValue::End => TagId::End,
            TreeValue::Byte(_) => TagId::Byte,
            TreeValue::Short(_) => TagId::Short,
            TreeValue::Int(_) => TagId::Int,
            TreeValue::Long(_) => TagId::Long,
            TreeValue::Float(_) => TagId::Float,
            TreeValue::Double(_) => TagId::Double,
            TreeValue::ByteArray(_) => TagId::ByteArray,
            TreeValue::String(_) => TagId::String,
            TreeValue::List(_) => TagId::List,
            TreeValue::Compound(_) => TagId::Compound,
            TreeValue::IntArray(_) => TagId::IntArray,
        }
    }

    /// True for the numeric kinds (tags 1–6).
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TreeValue::Byte(_)
                | TreeValue::Short(_)
                | TreeValue::Int(_)
                | TreeValue::Long(_)
                | TreeValue::Float(_)
                | TreeValue::Double(_)
        )
    }

    /// Numeric value widened (floats truncated) to `i64`. `None` for
    /// non-numeric kinds.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            TreeValue::Byte(v) => Some(v as i64),
            TreeValue::Short(v) => Some(v as i64),
            TreeValue::Int(v) => Some(v as i64),
            TreeValue::Long(v) => Some(v),
            TreeValue::Float(v) => Some(v as i64),
            TreeValue::Double(v) => Some(v as i64),
            _ => None,
        }
    }

    /// Numeric value widened to `f64`. `None` for non-numeric kinds.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            TreeValue::Byte(v) => Some(v as f64),
            TreeValue::Short(v) => Some(v as f64),
            TreeValue::Int(v) => Some(v as f64),
            TreeValue::Long(v) => Some(v as f64),
            TreeValue::Float(v) => Some(v as f64),
            TreeValue::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the string payload, if this is a String node.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TreeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the compound payload, if this is a Compound node.
    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            TreeValue::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// Borrow the list elements, if this is a List node.
    pub fn as_list(&self) -> Option<&[TreeValue]> {
        match self {
            TreeValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<Compound> for TreeValue {
    fn from(value: Compound) -> Self {
        TreeValue::Compound(value)
    }
}

/// The tagged tree's mapping node: string key → [`TreeValue`], keys unique.
///
/// Entries keep their insertion ("native") order; [`Compound::iter_sorted`]
/// provides the key-sorted view plain-mode encoding needs for deterministic,
/// diff-friendly output. Equality is map equality — entry order does not
/// participate.
#[derive(Debug, Clone, Default)]
pub struct Compound {
    entries: Vec<(String, TreeValue)>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&TreeValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Insert an entry, replacing any existing value under the same key in
    /// place (the entry keeps its original position). Returns the previous
    /// value if the key was present.
    pub fn insert(&mut self, key: impl Into<String>, value: TreeValue) -> Option<TreeValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove an entry, returning its value if the key was present.
    pub fn remove(&mut self, key: &str) -> Option<TreeValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Iterate entries in native (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TreeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate entries sorted by key. Used by plain-mode encoding so the
    /// output is independent of insertion order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&str, &TreeValue)> {
        let mut refs: Vec<_> = self.entries.iter().map(|(k, v)| (k.as_str(), v)).collect();
        refs.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        refs.into_iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl PartialEq for Compound {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

impl FromIterator<(String, TreeValue)> for Compound {
    fn from_iter<T: IntoIterator<Item = (String, TreeValue)>>(iter: T) -> Self {
        let mut compound = Compound::new();
        compound.extend(iter);
        compound
    }
}

impl Extend<(String, TreeValue)> for Compound {
    fn extend<T: IntoIterator<Item = (String, TreeValue)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
