#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeSet;

use serde_json::{json, Value};

use kindgate_core::{Event, Verdict};
use kindgate_plugin::policy::{AdmissionPolicy, KindPolicy};

fn event(v: Value) -> Event {
    match v {
        Value::Object(obj) => Event::from_map(obj),
        other => panic!("not an object: {other}"),
    }
}

fn well_formed(kind: Value) -> Event {
    event(json!({"id":"abc","pubkey":"def","created_at":100,"sig":"xyz","kind":kind}))
}

#[test]
fn allowed_kinds_are_accepted() {
    let policy = KindPolicy::discovery_relay();
    for kind in [3, 10002] {
        let v = policy.evaluate(&well_formed(json!(kind)));
        assert_eq!(v, Verdict::Accept, "kind={kind}");
        assert_eq!(v.msg(), "");
    }
}

#[test]
fn disallowed_kinds_are_rejected_by_name() {
    let policy = KindPolicy::discovery_relay();
    for kind in [0u64, 1, 4, 7, 10000, 10003, 30023] {
        let v = policy.evaluate(&well_formed(json!(kind)));
        assert_eq!(
            v,
            Verdict::reject(format!("Event kind {kind} not allowed for discovery relay sync")),
        );
    }
}

#[test]
fn unclassifiable_kinds_are_rejected() {
    let policy = KindPolicy::discovery_relay();

    let v = policy.evaluate(&well_formed(json!("3")));
    assert_eq!(v.msg(), r#"Event kind "3" not allowed for discovery relay sync"#);

    let v = policy.evaluate(&well_formed(Value::Null));
    assert_eq!(v.msg(), "Event kind missing not allowed for discovery relay sync");

    let no_kind = json!({"id":"abc","pubkey":"def","created_at":100,"sig":"xyz"});
    let v = policy.evaluate(&event(no_kind));
    assert_eq!(v.msg(), "Event kind missing not allowed for discovery relay sync");

    let v = policy.evaluate(&well_formed(json!(1.5)));
    assert_eq!(v.msg(), "Event kind 1.5 not allowed for discovery relay sync");
}

#[test]
fn whole_float_kinds_match_integer_kinds() {
    let policy = KindPolicy::discovery_relay();
    assert!(policy.evaluate(&well_formed(json!(3.0))).is_accept());
    assert_eq!(
        policy.evaluate(&well_formed(json!(1.0))).msg(),
        "Event kind 1 not allowed for discovery relay sync"
    );
}

#[test]
fn malformed_events_are_rejected_regardless_of_kind() {
    let policy = KindPolicy::discovery_relay();
    let full = json!({"id":"abc","pubkey":"def","created_at":100,"sig":"xyz"});

    for field in ["id", "pubkey", "created_at", "sig"] {
        for kind in [json!(3), json!(10002), json!(1), Value::Null] {
            let mut v = full.clone();
            let obj = v.as_object_mut().unwrap();
            obj.remove(field);
            obj.insert("kind".into(), kind.clone());

            let verdict = policy.evaluate(&event(v));
            assert_eq!(
                verdict,
                Verdict::reject("Event missing required fields"),
                "field={field} kind={kind}"
            );
        }
    }
}

#[test]
fn evaluate_is_idempotent() {
    let policy = KindPolicy::discovery_relay();
    for ev in [
        well_formed(json!(3)),
        well_formed(json!(1)),
        event(json!({"kind": 3})),
    ] {
        assert_eq!(policy.evaluate(&ev), policy.evaluate(&ev));
    }
}

#[test]
fn kind_set_can_be_swapped() {
    let policy = KindPolicy::discovery_relay().with_kinds(BTreeSet::from([1u64, 7]));

    assert!(policy.evaluate(&well_formed(json!(1))).is_accept());
    assert!(!policy.evaluate(&well_formed(json!(3))).is_accept());
    assert_eq!(policy.allowed_summary(), "1, 7");
    assert_eq!(policy.kind_label(1), None);

    // Structural check is untouched.
    let v = policy.evaluate(&event(json!({"kind": 1})));
    assert_eq!(v.msg(), "Event missing required fields");
}

#[test]
fn well_formedness_can_be_swapped() {
    let policy = KindPolicy::discovery_relay().with_shape(|e: &Event| e.id.is_some());

    let v = policy.evaluate(&event(json!({"id":"abc","kind":3})));
    assert!(v.is_accept());

    let v = policy.evaluate(&event(json!({"pubkey":"def","kind":3})));
    assert_eq!(v.msg(), "Event missing required fields");

    // Allowed set is untouched.
    let v = policy.evaluate(&event(json!({"id":"abc","kind":1})));
    assert_eq!(v.msg(), "Event kind 1 not allowed for discovery relay sync");
}

#[test]
fn policy_works_behind_trait_object() {
    let policy: Box<dyn AdmissionPolicy> = Box::new(KindPolicy::discovery_relay());
    assert!(policy.evaluate(&well_formed(json!(10002))).is_accept());
    assert_eq!(policy.kind_label(10002), Some("relay list"));
}
