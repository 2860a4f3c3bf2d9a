#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::{json, Map, Value};

use kindgate_core::{Event, Kind};

fn event(v: Value) -> Event {
    match v {
        Value::Object(obj) => Event::from_map(obj),
        other => panic!("not an object: {other}"),
    }
}

#[test]
fn complete_event_has_no_missing_fields() {
    let ev = event(json!({"id":"abc","pubkey":"def","created_at":100,"sig":"xyz","kind":3}));
    assert!(ev.missing_fields().is_empty());
    assert_eq!(ev.kind, Kind::Code(3));
    assert_eq!(ev.kind.code(), Some(3));
}

#[test]
fn each_required_field_is_reported() {
    let full = json!({"id":"abc","pubkey":"def","created_at":100,"sig":"xyz","kind":3});
    for field in ["id", "pubkey", "created_at", "sig"] {
        let mut v = full.clone();
        v.as_object_mut().unwrap().remove(field);
        assert_eq!(event(v).missing_fields(), vec![field]);
    }
}

#[test]
fn empty_strings_and_zero_timestamp_count_as_absent() {
    let ev = event(json!({"id":"","pubkey":"def","created_at":0,"sig":"xyz","kind":3}));
    assert_eq!(ev.missing_fields(), vec!["id", "created_at"]);
}

#[test]
fn kind_classification() {
    assert_eq!(event(json!({"kind": 10002})).kind, Kind::Code(10002));
    assert_eq!(event(json!({"kind": -1})).kind, Kind::Invalid("-1".into()));
    assert_eq!(event(json!({"kind": 1.5})).kind, Kind::Invalid("1.5".into()));
    assert_eq!(event(json!({"kind": "3"})).kind, Kind::Invalid("\"3\"".into()));
    assert_eq!(event(json!({"kind": null})).kind, Kind::Missing);
    assert_eq!(event(json!({})).kind, Kind::Missing);
    assert_eq!(Kind::Missing.to_string(), "missing");
}

#[test]
fn whole_floats_read_as_integers() {
    let ev = event(json!({"id":"abc","pubkey":"def","created_at":1.7e9,"sig":"xyz","kind":3.0}));
    assert_eq!(ev.kind, Kind::Code(3));
    assert_eq!(ev.created_at, Some(1_700_000_000));
    assert!(ev.missing_fields().is_empty());

    assert_eq!(event(json!({"kind": 10002.0})).kind, Kind::Code(10002));
    assert_eq!(event(json!({"kind": -3.0})).kind, Kind::Invalid("-3.0".into()));
    assert_eq!(event(json!({"created_at": 0.0})).created_at, None);
    assert_eq!(event(json!({"created_at": 100.5})).created_at, None);
}

#[test]
fn extra_fields_are_kept_opaque() {
    let ev = event(json!({
        "id":"abc","pubkey":"def","created_at":100,"sig":"xyz","kind":3,
        "tags":[["p","abc"]],"content":"hi"
    }));
    let mut expected = Map::new();
    expected.insert("content".into(), json!("hi"));
    expected.insert("tags".into(), json!([["p", "abc"]]));
    assert_eq!(ev.extra, expected);
}

#[test]
fn short_pubkey_truncates_to_eight_chars() {
    let ev = event(json!({"pubkey":"0123456789abcdef"}));
    assert_eq!(ev.short_pubkey(), "01234567...");
    assert_eq!(event(json!({"pubkey":"abc"})).short_pubkey(), "abc");
    assert_eq!(event(json!({})).short_pubkey(), "<none>");
}
