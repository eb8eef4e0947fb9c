//! # tagtree-core
//!
//! Bidirectional codec between the **tagged tree format** used to persist
//! structured game state (a recursive value model with twelve node kinds,
//! each identified by a small integer tag) and a **textual tree format**
//! (JSON), in two modes:
//!
//! - **Lossless** embeds every node's tag id in its key (`"health:5"`,
//!   list elements as `"<index>:<tagId>"`), so tree → text → tree is
//!   byte-for-byte reconstructible.
//! - **Plain** emits ordinary JSON with sorted keys and no annotations —
//!   hand-editable and diff-friendly — and reads it back through type
//!   inference, including heuristics for legacy data that predates the
//!   tagging scheme.
//!
//! ## Quick start
//!
//! ```rust
//! use tagtree_core::{decode, encode, Compound, FormatMode, LogSink, TreeValue};
//!
//! let mut root = Compound::new();
//! root.insert("name", TreeValue::String("Stonewatch".into()));
//! root.insert("claimed", TreeValue::Byte(1));
//!
//! let text = encode(&root, FormatMode::Lossless);
//! let back = decode(&text, FormatMode::Lossless, &mut LogSink).unwrap();
//! assert_eq!(back, root);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `TreeValue` / `Compound` tree model and `FormatMode`
//! - [`infer`] — tag inference for untagged (plain) values
//! - [`encoder`] — tree → JSON, both modes
//! - [`decoder`] — JSON → tree, both modes, damage-contained
//! - [`ident`] — 128-bit identifier fields (paired longs / compact string)
//! - [`diag`] — injected diagnostic sink (warnings/errors, never aborts)
//! - [`error`] — error types for the string-level entry points

pub mod decoder;
pub mod diag;
pub mod encoder;
pub mod error;
pub mod ident;
pub mod infer;
pub mod value;

pub use decoder::{decode, decode_from_str};
pub use diag::{CollectSink, DiagSink, Diagnostic, LogSink, Severity};
pub use encoder::{encode, encode_to_string, encode_to_string_pretty, encode_value};
pub use error::TagTreeError;
pub use ident::{decode_uuid, encode_uuid, UuidFields};
pub use infer::infer;
pub use value::{Compound, FormatMode, TagId, TreeValue};
