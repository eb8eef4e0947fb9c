use serde_json::json;
use tagtree_core::{
    decode, decode_from_str, CollectSink, Compound, FormatMode, Severity, TagTreeError, TreeValue,
};

/// Helper: decode in lossless mode, collecting diagnostics.
fn decode_lossless(json: &serde_json::Value) -> (Compound, CollectSink) {
    let mut sink = CollectSink::new();
    let root = decode(json, FormatMode::Lossless, &mut sink).expect("root must be an object");
    (root, sink)
}

/// Helper: decode in plain mode, collecting diagnostics.
fn decode_plain(json: &serde_json::Value) -> (Compound, CollectSink) {
    let mut sink = CollectSink::new();
    let root = decode(json, FormatMode::Plain, &mut sink).expect("root must be an object");
    (root, sink)
}

// ============================================================================
// Lossless: tag suffix handling
// ============================================================================

#[test]
fn suffix_selects_the_numeric_variant() {
    let (root, sink) = decode_lossless(&json!({
        "b:1": 7, "s:2": -2, "i:3": 300, "l:4": 1_i64 << 40, "f:5": 0.5, "d:6": 2.25
    }));
    assert_eq!(root.get("b"), Some(&TreeValue::Byte(7)));
    assert_eq!(root.get("s"), Some(&TreeValue::Short(-2)));
    assert_eq!(root.get("i"), Some(&TreeValue::Int(300)));
    assert_eq!(root.get("l"), Some(&TreeValue::Long(1 << 40)));
    assert_eq!(root.get("f"), Some(&TreeValue::Float(0.5)));
    assert_eq!(root.get("d"), Some(&TreeValue::Double(2.25)));
    assert!(sink.diagnostics.is_empty());
}

#[test]
fn suffix_is_split_at_the_last_colon() {
    let (root, _) = decode_lossless(&json!({"mod:item:8": "x"}));
    assert_eq!(root.get("mod:item"), Some(&TreeValue::String("x".into())));
}

#[test]
fn legacy_boolean_decodes_as_byte() {
    // Older files stored boolean flags as literal true/false.
    let (from_bool, sink) = decode_lossless(&json!({"flag:1": true}));
    let (from_number, _) = decode_lossless(&json!({"flag:1": 1}));
    assert_eq!(from_bool, from_number);
    assert_eq!(from_bool.get("flag"), Some(&TreeValue::Byte(1)));
    assert!(sink.diagnostics.is_empty());

    let (from_false, _) = decode_lossless(&json!({"flag:1": false}));
    assert_eq!(from_false.get("flag"), Some(&TreeValue::Byte(0)));
}

#[test]
fn key_conflict_keeps_the_first_entry() {
    let (root, sink) = decode_lossless(&json!({"x": 1, "x:3": 2}));
    assert_eq!(root.len(), 1);
    // The bare key decoded first (inferred Long); the tagged duplicate is
    // skipped, never overwriting it.
    assert_eq!(root.get("x"), Some(&TreeValue::Long(1)));
    assert_eq!(sink.diagnostics.len(), 1);
    assert_eq!(sink.diagnostics[0].severity, Severity::Warning);
}

#[test]
fn bare_key_conflicting_with_decoded_stem_is_skipped() {
    let (root, sink) = decode_lossless(&json!({"x:3": 2, "x": 1}));
    assert_eq!(root.len(), 1);
    assert_eq!(root.get("x"), Some(&TreeValue::Int(2)));
    assert_eq!(sink.diagnostics.len(), 1);
}

#[test]
fn missing_suffix_falls_back_to_inference() {
    let (root, sink) = decode_lossless(&json!({"plainKey": "hello"}));
    assert_eq!(root.get("plainKey"), Some(&TreeValue::String("hello".into())));
    assert!(sink.diagnostics.is_empty());
}

#[test]
fn unparseable_suffix_keeps_the_whole_key() {
    // 300 does not fit a tag id; the key is treated as untagged.
    let (root, _) = decode_lossless(&json!({"x:300": 5}));
    assert_eq!(root.get("x:300"), Some(&TreeValue::Long(5)));
}

#[test]
fn unknown_tag_id_falls_back_to_string() {
    let (root, sink) = decode_lossless(&json!({"x:99": 5}));
    assert_eq!(root.get("x"), Some(&TreeValue::String("5".into())));
    assert_eq!(sink.diagnostics.len(), 1);
    assert_eq!(sink.diagnostics[0].severity, Severity::Warning);
}

#[test]
fn explicit_end_tag_defers_to_inference() {
    let (root, sink) = decode_lossless(&json!({"x:0": {}}));
    // Tag 0 or below defers to inference; {} infers as a compound.
    assert_eq!(root.get("x"), Some(&TreeValue::Compound(Compound::new())));
    assert!(sink.diagnostics.is_empty());
}

// ============================================================================
// Lossless: containers
// ============================================================================

#[test]
fn list_object_form_decodes_in_iteration_order() {
    let (root, _) = decode_lossless(&json!({
        "items:9": {"0:1": 1, "1:8": "sword", "2:3": 12}
    }));
    assert_eq!(
        root.get("items"),
        Some(&TreeValue::List(vec![
            TreeValue::Byte(1),
            TreeValue::String("sword".into()),
            TreeValue::Int(12),
        ]))
    );
}

#[test]
fn list_array_form_is_accepted_with_inferred_elements() {
    let (root, _) = decode_lossless(&json!({"items:9": ["a", 2]}));
    assert_eq!(
        root.get("items"),
        Some(&TreeValue::List(vec![
            TreeValue::String("a".into()),
            TreeValue::Long(2),
        ]))
    );
}

#[test]
fn list_entry_with_bad_suffix_infers_its_element() {
    let (root, _) = decode_lossless(&json!({"items:9": {"zero": true}}));
    assert_eq!(
        root.get("items"),
        Some(&TreeValue::List(vec![TreeValue::Byte(1)]))
    );
}

#[test]
fn scalar_under_list_tag_degrades_to_empty_list() {
    let (root, sink) = decode_lossless(&json!({"items:9": 5}));
    assert_eq!(root.get("items"), Some(&TreeValue::List(vec![])));
    assert_eq!(sink.diagnostics.len(), 1);
}

#[test]
fn nested_compounds_recurse() {
    let (root, _) = decode_lossless(&json!({"player:10": {"hp:3": 20}}));
    let player = root.get("player").and_then(|v| v.as_compound()).unwrap();
    assert_eq!(player.get("hp"), Some(&TreeValue::Int(20)));
}

#[test]
fn byte_array_elements_are_isolated() {
    // 300 does not fit a byte: it is dropped with a diagnostic, the rest of
    // the array and the sibling entry still load.
    let (root, sink) = decode_lossless(&json!({"bytes:7": [1, 300, 3], "next:3": 9}));
    assert_eq!(root.get("bytes"), Some(&TreeValue::ByteArray(vec![1, 3])));
    assert_eq!(root.get("next"), Some(&TreeValue::Int(9)));
    assert_eq!(sink.diagnostics.len(), 1);
    assert_eq!(sink.diagnostics[0].severity, Severity::Error);
}

#[test]
fn int_array_elements_are_isolated() {
    let (root, sink) = decode_lossless(&json!({"ints:11": [1, "bad", 5_000_000_000_i64, 3]}));
    assert_eq!(root.get("ints"), Some(&TreeValue::IntArray(vec![1, 3])));
    assert_eq!(sink.diagnostics.len(), 2);
}

// ============================================================================
// Lossless: malformed values
// ============================================================================

#[test]
fn numeric_strings_are_accepted_leniently() {
    let (root, sink) = decode_lossless(&json!({"i:3": "42", "d:6": "2.5"}));
    assert_eq!(root.get("i"), Some(&TreeValue::Int(42)));
    assert_eq!(root.get("d"), Some(&TreeValue::Double(2.5)));
    assert!(sink.diagnostics.is_empty());
}

#[test]
fn non_numeric_under_numeric_tag_falls_back_to_string() {
    let (root, sink) = decode_lossless(&json!({"i:3": {"oops": 1}}));
    assert_eq!(
        root.get("i"),
        Some(&TreeValue::String(r#"{"oops":1}"#.into()))
    );
    assert_eq!(sink.diagnostics.len(), 1);
    assert_eq!(sink.diagnostics[0].severity, Severity::Error);
}

#[test]
fn null_degrades_to_string_fallback() {
    let (root, sink) = decode_lossless(&json!({"x:3": null}));
    assert_eq!(root.get("x"), Some(&TreeValue::String("null".into())));
    assert_eq!(sink.diagnostics.len(), 1);
}

#[test]
fn scalars_stringify_under_the_string_tag() {
    let (root, _) = decode_lossless(&json!({"a:8": 12, "b:8": true}));
    assert_eq!(root.get("a"), Some(&TreeValue::String("12".into())));
    assert_eq!(root.get("b"), Some(&TreeValue::String("true".into())));
}

#[test]
fn one_bad_node_never_poisons_its_siblings() {
    let (root, sink) = decode_lossless(&json!({
        "bad:5": [1, 2],
        "good:8": "still here",
        "alsoGood:10": {"n:4": 1}
    }));
    assert_eq!(root.len(), 3);
    assert_eq!(root.get("good"), Some(&TreeValue::String("still here".into())));
    assert!(root.get("alsoGood").is_some());
    assert_eq!(sink.diagnostics.len(), 1);
}

// ============================================================================
// Plain mode
// ============================================================================

#[test]
fn plain_decodes_everything_by_inference() {
    let (root, sink) = decode_plain(&json!({
        "name": "Alice",
        "claimed": true,
        "count": 5,
        "ratio": 0.5,
        "bytes": [1, 2, 3],
        "ints": [1, 300, 3],
        "mixed": [1, 2.5],
        "nested": {"hp": 20}
    }));
    assert_eq!(root.get("name"), Some(&TreeValue::String("Alice".into())));
    assert_eq!(root.get("claimed"), Some(&TreeValue::Byte(1)));
    assert_eq!(root.get("count"), Some(&TreeValue::Long(5)));
    assert_eq!(root.get("ratio"), Some(&TreeValue::Double(0.5)));
    assert_eq!(root.get("bytes"), Some(&TreeValue::ByteArray(vec![1, 2, 3])));
    assert_eq!(root.get("ints"), Some(&TreeValue::IntArray(vec![1, 300, 3])));
    assert_eq!(
        root.get("mixed"),
        Some(&TreeValue::List(vec![
            TreeValue::Long(1),
            TreeValue::Double(2.5),
        ]))
    );
    let nested = root.get("nested").and_then(|v| v.as_compound()).unwrap();
    assert_eq!(nested.get("hp"), Some(&TreeValue::Long(20)));
    assert!(sink.diagnostics.is_empty());
}

#[test]
fn plain_keys_keep_their_colons() {
    // No suffix splitting in plain mode, even for keys that look tagged.
    let (root, _) = decode_plain(&json!({"x:3": 5}));
    assert_eq!(root.get("x:3"), Some(&TreeValue::Long(5)));
    assert!(root.get("x").is_none());
}

// ============================================================================
// Entry points
// ============================================================================

#[test]
fn root_must_be_an_object() {
    let mut sink = CollectSink::new();
    let err = decode(&json!([1, 2, 3]), FormatMode::Plain, &mut sink).unwrap_err();
    assert!(matches!(err, TagTreeError::RootNotObject("an array")));
}

#[test]
fn decode_from_str_reports_parse_errors() {
    let mut sink = CollectSink::new();
    let err = decode_from_str("{not json", FormatMode::Plain, &mut sink).unwrap_err();
    assert!(matches!(err, TagTreeError::Json(_)));
}

#[test]
fn decode_from_str_roundtrips_text() {
    let mut sink = CollectSink::new();
    let root =
        decode_from_str(r#"{"hp:3": 20}"#, FormatMode::Lossless, &mut sink).unwrap();
    assert_eq!(root.get("hp"), Some(&TreeValue::Int(20)));
}
