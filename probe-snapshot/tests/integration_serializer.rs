//! End-to-end tests for bounded serialization into the JSON snapshot shape.
//!
//! These tests exercise the integration of:
//! - the `BoundedSerializer` budgets and policies,
//! - `Captured` implementations for std containers, and
//! - the `JsonTokenWriter` wire shape.

#![cfg(feature = "json")]

use std::collections::{BTreeMap, HashMap};

use probe_snapshot::{
    BoundedSerializer, CaptureConfig, Captured, DEFAULT_COLLECTION_SIZE, DEFAULT_FIELD_COUNT,
    DEFAULT_LENGTH, DEFAULT_MAX_SNAPSHOT_SIZE, DEFAULT_PRUNE_MIN_LEVEL, DEFAULT_REFERENCE_DEPTH,
    DEFAULT_TIMEOUT, Deadline, JsonTokenWriter, KeywordRedaction, Limits, TextTokenWriter,
};
use serde_json::{Value, json};

fn capture(value: &dyn Captured, type_name: &str, limits: &Limits) -> Value {
    let mut writer = JsonTokenWriter::new();
    BoundedSerializer::new(&mut writer)
        .serialize(value, type_name, limits)
        .unwrap();
    writer.into_value().unwrap()
}

#[test]
fn defaults_are_exported() {
    assert_eq!(
        Limits::default(),
        Limits::new(
            DEFAULT_REFERENCE_DEPTH,
            DEFAULT_COLLECTION_SIZE,
            DEFAULT_LENGTH,
            DEFAULT_FIELD_COUNT
        )
    );
    let config = CaptureConfig::default();
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    assert_eq!(config.max_snapshot_size, DEFAULT_MAX_SNAPSHOT_SIZE);
    assert_eq!(config.prune_min_level, DEFAULT_PRUNE_MIN_LEVEL);
}

mod scalars_and_strings {
    use super::*;

    #[test]
    fn integer() {
        assert_eq!(
            capture(&42_i32, "i32", &Limits::default()),
            json!({"type": "i32", "value": "42"})
        );
    }

    #[test]
    fn truncated_string_reports_original_size() {
        let limits = Limits {
            max_length: 5,
            ..Limits::default()
        };
        assert_eq!(
            capture(&"hello world".to_string(), "alloc::string::String", &limits),
            json!({
                "type": "alloc::string::String",
                "value": "hello",
                "truncated": true,
                "size": "11"
            })
        );
    }

    #[test]
    fn none_is_null() {
        assert_eq!(
            capture(&None::<String>, "core::option::Option<alloc::string::String>", &Limits::default()),
            json!({"type": "core::option::Option<alloc::string::String>", "isNull": true})
        );
    }

    #[test]
    fn floats_and_booleans_render_as_text() {
        assert_eq!(capture(&1.25_f64, "f64", &Limits::default())["value"], "1.25");
        assert_eq!(capture(&false, "bool", &Limits::default())["value"], "false");
    }
}

mod containers {
    use super::*;

    #[test]
    fn primitive_array_elements_carry_their_type() {
        let limits = Limits {
            max_collection_size: 3,
            ..Limits::default()
        };
        assert_eq!(
            capture(&[1_i32, 2, 3, 4, 5], "[i32; 5]", &limits),
            json!({
                "type": "[i32; 5]",
                "elements": [
                    {"type": "i32", "value": "1"},
                    {"type": "i32", "value": "2"},
                    {"type": "i32", "value": "3"}
                ],
                "notCapturedReason": "collectionSize",
                "size": "5"
            })
        );
    }

    #[test]
    fn complete_collection_still_reports_size() {
        assert_eq!(
            capture(&vec!["a", "b"], "alloc::vec::Vec<&str>", &Limits::default()),
            json!({
                "type": "alloc::vec::Vec<&str>",
                "elements": [
                    {"type": "str", "value": "a"},
                    {"type": "str", "value": "b"}
                ],
                "size": "2"
            })
        );
    }

    #[test]
    fn map_entries_are_pairs() {
        let map = BTreeMap::from([("retries", 3_u32)]);
        assert_eq!(
            capture(
                &map,
                "alloc::collections::btree::map::BTreeMap<&str, u32>",
                &Limits::default()
            ),
            json!({
                "type": "alloc::collections::btree::map::BTreeMap<&str, u32>",
                "entries": [[
                    {"type": "str", "value": "retries"},
                    {"type": "u32", "value": "3"}
                ]],
                "size": "1"
            })
        );
    }

    #[test]
    fn nested_beyond_depth_is_marked() {
        let limits = Limits {
            max_reference_depth: 1,
            ..Limits::default()
        };
        let value = capture(
            &vec![vec![1_u8]],
            "alloc::vec::Vec<alloc::vec::Vec<u8>>",
            &limits,
        );
        assert_eq!(
            value["elements"][0],
            json!({"type": "alloc::vec::Vec<u8>", "notCapturedReason": "depth"})
        );
    }

    #[test]
    fn json_values_can_be_captured() {
        let document = json!({"user": "alice", "tags": ["a"]});
        let value = capture(&document, "serde_json::value::Value", &Limits::default());
        assert_eq!(value["entries"][0][1]["value"], "alice");
        assert_eq!(value["entries"][1][1]["elements"][0]["value"], "a");
        assert_eq!(value["size"], "2");
    }
}

mod policies {
    use super::*;

    #[test]
    fn sensitive_map_keys_hide_values() {
        let headers = HashMap::from([("Authorization".to_string(), "Bearer abc".to_string())]);
        let value = capture(
            &headers,
            "std::collections::hash::map::HashMap<alloc::string::String, alloc::string::String>",
            &Limits::default(),
        );
        assert_eq!(
            value["entries"][0][1],
            json!({"type": "alloc::string::String", "notCapturedReason": "redactedIdent"})
        );
    }

    #[test]
    fn configured_type_patterns_redact() {
        let policy = KeywordRedaction::builder().redact_type("billing::*").build();
        let mut writer = JsonTokenWriter::new();
        BoundedSerializer::new(&mut writer)
            .with_redaction(&policy)
            .serialize(&"4111".to_string(), "billing::CardNumber", &Limits::default())
            .unwrap();
        assert_eq!(
            writer.into_value().unwrap(),
            json!({"type": "billing::CardNumber", "notCapturedReason": "redactedType"})
        );
    }

    #[test]
    fn expired_deadline_stops_capture() {
        let mut writer = JsonTokenWriter::new();
        BoundedSerializer::new(&mut writer)
            .with_deadline(Deadline::after(std::time::Duration::ZERO))
            .serialize(&vec![1_u8], "alloc::vec::Vec<u8>", &Limits::default())
            .unwrap();
        assert_eq!(
            writer.into_value().unwrap(),
            json!({"type": "alloc::vec::Vec<u8>", "notCapturedReason": "timeout"})
        );
    }
}

mod text {
    use super::*;

    #[test]
    fn same_events_render_as_text() {
        let map = BTreeMap::from([("ids", vec![1_u8, 2, 3]), ("empty", vec![])]);
        let limits = Limits {
            max_collection_size: 2,
            ..Limits::default()
        };
        let mut writer = TextTokenWriter::new();
        BoundedSerializer::new(&mut writer)
            .serialize(
                &map,
                "alloc::collections::btree::map::BTreeMap<&str, alloc::vec::Vec<u8>>",
                &limits,
            )
            .unwrap();
        assert_eq!(writer.into_string(), "{empty=[], ids=[1, 2, ...]}");
    }
}
