//! Partial-update sanitization: `owner` is never client-settable, and an
//! empty string means "leave unchanged".

use serde_json::{Map, Value, json};

use pulse_core::update::sanitize_update;

fn map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(m) => m,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn owner_key_is_stripped_whatever_its_value() {
    for owner in [json!("attacker"), json!(null), json!({"id": "x"}), json!("")] {
        let clean = sanitize_update(map(json!({ "owner": owner, "question": "Q" })));
        assert!(!clean.contains_key("owner"));
        assert_eq!(clean["question"], "Q");
    }
}

#[test]
fn empty_strings_are_dropped() {
    let clean = sanitize_update(map(json!({ "question": "", "value": "" })));
    assert!(clean.is_empty());
}

#[test]
fn false_and_zero_are_not_no_change_sentinels() {
    let clean = sanitize_update(map(json!({
        "value": false,
        "count": 0,
        "note": "",
    })));

    assert_eq!(clean["value"], false);
    assert_eq!(clean["count"], 0);
    assert!(!clean.contains_key("note"));
}

#[test]
fn null_and_nested_empties_survive() {
    // Only the literal top-level empty string is the sentinel.
    let clean = sanitize_update(map(json!({
        "a": null,
        "b": [""],
        "c": {"inner": ""},
    })));

    assert_eq!(clean.len(), 3);
}

#[test]
fn empty_payload_is_a_valid_no_op() {
    let clean = sanitize_update(Map::new());
    assert!(clean.is_empty());
}

#[test]
fn sanitization_is_idempotent() {
    let raw = map(json!({
        "owner": "attacker",
        "question": "Q",
        "note": "",
        "flag": false,
    }));

    let once = sanitize_update(raw);
    let twice = sanitize_update(once.clone());
    assert_eq!(once, twice);
}
