//! Annotation record and argument collection tests.

use marginalia::foundation::{Annotation, Arguments, Value};

#[test]
fn arguments_separate_positional_and_named() {
    let mut args = Arguments::new();
    args.push(Value::from("first"));
    args.insert("key", Value::Int(1));
    args.push(Value::from("second"));

    assert_eq!(args.positional().len(), 2);
    assert_eq!(args.named().len(), 1);
    assert_eq!(args.get("key"), Some(&Value::Int(1)));
    assert!(!args.is_empty());
}

#[test]
fn fields_keep_assignment_order() {
    let annotation = Annotation::new("App\\Route")
        .with("path", Value::from("/books"))
        .with("priority", Value::Int(3));

    let names: Vec<_> = annotation
        .fields()
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(names, vec!["path", "priority"]);
}

#[test]
fn value_field_is_the_positional_holder() {
    let annotation =
        Annotation::new("App\\Route").with("value", Value::Array(vec![Value::from("/books")]));

    let value = annotation.value().and_then(Value::as_array).unwrap();
    assert_eq!(value, &[Value::from("/books")]);

    let bare = Annotation::new("App\\Route");
    assert!(bare.value().is_none());
}

#[test]
fn reassignment_replaces_in_place() {
    let mut annotation = Annotation::new("App\\Route");
    annotation.set("path", Value::from("/old"));
    annotation.set("method", Value::from("GET"));
    annotation.set("path", Value::from("/new"));

    assert_eq!(annotation.fields().len(), 2);
    assert_eq!(annotation.get("path"), Some(&Value::from("/new")));
    // Replacement keeps the original position.
    assert_eq!(annotation.fields()[0].0, "path");
}
