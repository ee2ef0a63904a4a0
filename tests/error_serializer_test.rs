//! Error serializer behavior tests.

use serde_json::{json, Value};
use tasklog::error_serializer::{is_truthy, serialize_error, serialize_error_opt};

// ============================================================================
// Pass-through Tests
// ============================================================================

#[test]
fn test_identity_for_values_without_stack() {
    let values = [
        json!("plain string"),
        json!(7),
        json!(true),
        json!([1, "two"]),
        json!({ "message": "no stack here" }),
        json!({ "nested": { "stack": "deeper" } }),
    ];
    for value in values {
        assert_eq!(serialize_error(&value), value);
    }
}

#[test]
fn test_identity_for_empty_values() {
    assert_eq!(serialize_error(&Value::Null), Value::Null);
    assert_eq!(serialize_error(&json!("")), json!(""));
    assert_eq!(serialize_error_opt(None), None);
}

#[test]
fn test_falsy_stack_boundary() {
    for stack in [json!(0), json!(false), json!(""), json!(0.0)] {
        let value = json!({ "stack": stack, "code": "E1" });
        assert_eq!(serialize_error(&value), value, "stack {:?}", stack);
    }
}

// ============================================================================
// Error-like Tests
// ============================================================================

#[test]
fn test_string_stack_becomes_lines() {
    let err = json!({ "name": "TypeError", "message": "bad", "stack": "L1\nL2\nL3" });
    assert_eq!(
        serialize_error(&err),
        json!({ "name": "TypeError", "message": "bad", "stack": ["L1", "L2", "L3"] })
    );
}

#[test]
fn test_non_string_stack_unchanged() {
    for stack in [json!(12345), json!(true), json!(["frame"]), json!({ "frames": 2 })] {
        let out = serialize_error(&json!({ "stack": stack }));
        assert_eq!(out["stack"], stack);
    }
}

#[test]
fn test_missing_attributes_are_absent() {
    let out = serialize_error(&json!({ "stack": "only" }));
    let obj = out.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    for key in ["code", "details", "message", "name", "signal"] {
        assert!(!obj.contains_key(key));
    }
}

#[test]
fn test_explicit_null_attributes_are_kept() {
    let out = serialize_error(&json!({ "stack": "s", "code": null }));
    assert_eq!(out["code"], Value::Null);
    assert!(out.as_object().unwrap().contains_key("code"));
}

// ============================================================================
// Truthiness Tests
// ============================================================================

#[test]
fn test_truthiness() {
    assert!(!is_truthy(&Value::Null));
    assert!(!is_truthy(&json!(false)));
    assert!(!is_truthy(&json!(0)));
    assert!(!is_truthy(&json!(-0.0)));
    assert!(!is_truthy(&json!("")));
    assert!(is_truthy(&json!("0")));
    assert!(is_truthy(&json!(-1)));
    assert!(is_truthy(&json!([])));
    assert!(is_truthy(&json!({})));
}
