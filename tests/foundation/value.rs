//! Value behavior tests.

use marginalia::foundation::{Annotation, Value};

#[test]
fn conversions_from_rust_types() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(42i64), Value::Int(42));
    assert_eq!(Value::from(2.5f64), Value::Float(2.5));
    assert_eq!(Value::from("hello"), Value::String("hello".to_string()));
    assert_eq!(
        Value::from(vec![Value::Int(1)]),
        Value::Array(vec![Value::Int(1)])
    );
}

#[test]
fn nested_annotation_round_trip() {
    let inner = Annotation::new("App\\Inner").with("value", Value::Array(vec![Value::Int(1)]));
    let value = Value::from(inner.clone());

    let extracted = value.as_annotation().expect("annotation value");
    assert_eq!(extracted, &inner);
    assert_eq!(extracted.class(), "App\\Inner");
}

#[test]
fn only_null_and_false_are_falsy() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::Bool(false).is_truthy());

    // Everything else is truthy, including zero and empty collections.
    assert!(Value::Int(0).is_truthy());
    assert!(Value::Float(0.0).is_truthy());
    assert!(Value::String(String::new()).is_truthy());
    assert!(Value::Array(vec![]).is_truthy());
}

#[test]
fn display_renders_source_like_text() {
    assert_eq!(format!("{}", Value::Null), "null");
    assert_eq!(format!("{}", Value::from("a")), "\"a\"");
    assert_eq!(
        format!("{}", Value::Array(vec![Value::Int(1), Value::Bool(true)])),
        "[1, true]"
    );
}
