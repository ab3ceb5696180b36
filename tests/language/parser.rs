//! Parser tests.
//!
//! End-to-end parsing of doc comments against an in-memory reflection
//! fixture: argument shapes, value kinds, resolution, and error cases.

use std::sync::Arc;

use marginalia::foundation::{ErrorKind, Value};
use marginalia::language::{Context, Parser};
use marginalia::reflect::{Import, MemoryReflector, TypeDef};

fn reflector() -> MemoryReflector {
    MemoryReflector::new()
        .with_type(
            TypeDef::new("App\\Annotations\\Route")
                .with_doc("/**\n * @Annotation\n * @Target(\"class\", \"method\")\n */")
                .with_field("path", "/**\n * @var string\n * @Required\n */")
                .with_field("methods", "/** @var string[] */")
                .with_field("priority", "/** @var int */")
                .with_field("flag", "/** @var bool */")
                .with_field("extra", "/** @var mixed */"),
        )
        .with_type(
            TypeDef::new("App\\Annotations\\Tag")
                .with_doc("/** @Annotation */")
                .with_field("value", "/** @var string[] */"),
        )
        .with_type(
            TypeDef::new("App\\Annotations\\Level")
                .with_doc("/** @Annotation */")
                .with_field("value", "/**\n * @var int[]\n * @Enum(1, 2, 3)\n */"),
        )
        .with_type(
            TypeDef::new("App\\Annotations\\Inner")
                .with_doc("/** @Annotation */")
                .with_field("name", "/** @var string */"),
        )
        .with_type(TypeDef::new("App\\Plain"))
        .with_type(TypeDef::new("App\\Vehicle"))
        .with_type(
            TypeDef::new("App\\Controller")
                .with_import(Import::new("App\\Annotations\\Route"))
                .with_import(Import::new("App\\Annotations\\Tag"))
                .with_import(Import::new("App\\Annotations\\Level"))
                .with_import(Import::aliased("App\\Annotations\\Inner", "Nested"))
                .with_import(Import::new("App\\Plain"))
                .with_import(Import::new("App\\Vehicle")),
        )
        .with_constant("PRIORITY_HIGH", Value::Int(9))
}

fn parser_and_context() -> (Parser, Context) {
    let reflector = Arc::new(reflector());
    let context = Context::for_class(reflector.as_ref(), "App\\Controller");
    (Parser::new(reflector), context)
}

#[test]
fn parse_named_arguments() {
    let (parser, context) = parser_and_context();
    let doc = "/**\n * @Route(path = \"/books\", methods = [\"GET\", \"POST\"], priority = 2)\n */";

    let annotations = parser.parse(doc, &context).unwrap();
    assert_eq!(annotations.len(), 1);

    let route = &annotations[0];
    assert_eq!(route.class(), "App\\Annotations\\Route");
    assert_eq!(route.get("path"), Some(&Value::from("/books")));
    assert_eq!(
        route.get("methods"),
        Some(&Value::Array(vec![Value::from("GET"), Value::from("POST")]))
    );
    assert_eq!(route.get("priority"), Some(&Value::Int(2)));
}

#[test]
fn parse_boolean_and_null_values() {
    let (parser, context) = parser_and_context();
    let doc = "@Route(path = \"/x\", flag = true, extra = null)";

    let route = &parser.parse(doc, &context).unwrap()[0];
    assert_eq!(route.get("flag"), Some(&Value::Bool(true)));
    assert_eq!(route.get("extra"), Some(&Value::Null));
}

#[test]
fn positional_arguments_collect_into_value_field() {
    let (parser, context) = parser_and_context();

    let tag = &parser.parse("@Tag(\"db\", \"slow\")", &context).unwrap()[0];
    assert_eq!(
        tag.value(),
        Some(&Value::Array(vec![Value::from("db"), Value::from("slow")]))
    );

    // No arguments still yields an (empty) value field.
    let bare = &parser.parse("@Tag", &context).unwrap()[0];
    assert_eq!(bare.value(), Some(&Value::Array(vec![])));
}

#[test]
fn trailing_comma_after_positional_argument() {
    let (parser, context) = parser_and_context();

    let tag = &parser.parse("@Tag(\"db\",)", &context).unwrap()[0];
    assert_eq!(tag.value(), Some(&Value::Array(vec![Value::from("db")])));
}

#[test]
fn annotation_must_start_its_line() {
    let (parser, context) = parser_and_context();
    let doc = "/**\n * Contact us at support@example.com for help.\n * @Tag(\"db\")\n */";

    let annotations = parser.parse(doc, &context).unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].class(), "App\\Annotations\\Tag");
}

#[test]
fn doc_tags_are_skipped() {
    let (parser, context) = parser_and_context();
    let doc = "/**\n * @param string $path\n * @return void\n * @throws RuntimeError\n */";

    assert!(parser.parse(doc, &context).unwrap().is_empty());
}

#[test]
fn doc_tag_prose_in_parentheses_does_not_abort_the_parse() {
    let (parser, context) = parser_and_context();
    let doc = "/**\n * @todo (fix this)\n * @Tag(\"db\")\n */";

    let annotations = parser.parse(doc, &context).unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].class(), "App\\Annotations\\Tag");
}

#[test]
fn prose_only_input_yields_nothing() {
    let (parser, context) = parser_and_context();
    assert!(parser.parse("", &context).unwrap().is_empty());
    assert!(parser.parse("/** Nothing here. */", &context).unwrap().is_empty());
}

#[test]
fn annotations_keep_source_order() {
    let (parser, context) = parser_and_context();
    let doc = "/**\n * @Route(path = \"/a\")\n * @Tag(\"x\")\n */";

    let annotations = parser.parse(doc, &context).unwrap();
    assert_eq!(annotations.len(), 2);
    assert_eq!(annotations[0].class(), "App\\Annotations\\Route");
    assert_eq!(annotations[1].class(), "App\\Annotations\\Tag");
}

#[test]
fn builtin_markers_parse_in_source_order() {
    let reflector = Arc::new(reflector().with_constant("ALL", Value::from("all")));
    let context = Context::for_class(reflector.as_ref(), "App\\Controller");
    let parser = Parser::new(reflector);

    let doc = "/**\n * @Annotation()\n * @Target(ALL)\n * @Enum(1, 2, 3)\n */";
    let annotations = parser.parse(doc, &context).unwrap();

    assert_eq!(annotations.len(), 3);
    assert_eq!(annotations[0].class(), "Marginalia\\Annotation");
    assert_eq!(annotations[1].class(), "Marginalia\\Target");
    assert_eq!(
        annotations[1].value(),
        Some(&Value::Array(vec![Value::from("all")]))
    );
    assert_eq!(annotations[2].class(), "Marginalia\\Enum");
    assert_eq!(
        annotations[2].value(),
        Some(&Value::Array(vec![
            Value::Int(1),
            Value::Int(2),
            Value::Int(3)
        ]))
    );
}

#[test]
fn nested_annotation_as_value() {
    let (parser, context) = parser_and_context();
    let doc = "@Route(path = \"/a\", extra = @Nested(name = \"x\"))";

    let route = &parser.parse(doc, &context).unwrap()[0];
    let inner = route.get("extra").and_then(Value::as_annotation).unwrap();
    assert_eq!(inner.class(), "App\\Annotations\\Inner");
    assert_eq!(inner.get("name"), Some(&Value::from("x")));
}

#[test]
fn class_reference_resolves_to_qualified_name() {
    let (parser, context) = parser_and_context();
    let doc = "@Route(path = Vehicle::class)";

    let route = &parser.parse(doc, &context).unwrap()[0];
    assert_eq!(route.get("path"), Some(&Value::from("App\\Vehicle")));
}

#[test]
fn constant_reference_resolves_to_its_value() {
    let (parser, context) = parser_and_context();
    let doc = "@Route(path = \"/x\", priority = PRIORITY_HIGH)";

    let route = &parser.parse(doc, &context).unwrap()[0];
    assert_eq!(route.get("priority"), Some(&Value::Int(9)));
}

#[test]
fn undefined_constant_fails() {
    let (parser, context) = parser_and_context();
    let err = parser.parse("@Route(path = NOT_DEFINED)", &context).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UndefinedConstant { ref name } if name == "NOT_DEFINED"
    ));
}

#[test]
fn missing_required_attribute_fails() {
    let (parser, context) = parser_and_context();
    let err = parser
        .parse("@Route(methods = [\"GET\"])", &context)
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidAttribute { ref attribute, .. } if attribute == "path"
    ));
}

#[test]
fn mistyped_attribute_fails() {
    let (parser, context) = parser_and_context();
    let err = parser.parse("@Route(path = 42)", &context).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidAttribute { ref attribute, .. } if attribute == "path"
    ));
}

#[test]
fn enum_constraint_applies_at_parse_time() {
    let (parser, context) = parser_and_context();

    let level = &parser.parse("@Level(2)", &context).unwrap()[0];
    assert_eq!(level.value(), Some(&Value::Array(vec![Value::Int(2)])));

    let err = parser.parse("@Level(7)", &context).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidAttribute { ref attribute, .. } if attribute == "value"
    ));
}

#[test]
fn unknown_named_arguments_are_dropped() {
    let (parser, context) = parser_and_context();
    let doc = "@Route(path = \"/x\", bogus = 1)";

    let route = &parser.parse(doc, &context).unwrap()[0];
    assert_eq!(route.get("bogus"), None);
    assert_eq!(route.get("path"), Some(&Value::from("/x")));
}

#[test]
fn unknown_annotation_class_fails() {
    let (parser, context) = parser_and_context();
    let err = parser.parse("@Mystery(1)", &context).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnknownAnnotationClass { ref name } if name == "Mystery"
    ));
}

#[test]
fn ignore_not_imported_mode_drops_unknown_names() {
    let (mut parser, context) = parser_and_context();
    parser.ignore_not_imported(true);

    let annotations = parser
        .parse("/**\n * @Mystery(1)\n * @Tag(\"x\")\n */", &context)
        .unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].class(), "App\\Annotations\\Tag");
}

#[test]
fn caller_ignore_list_drops_named_annotations() {
    let (mut parser, context) = parser_and_context();
    parser.ignore("Route");

    let annotations = parser
        .parse("/**\n * @Route(path = \"/a\")\n * @Tag(\"x\")\n */", &context)
        .unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].class(), "App\\Annotations\\Tag");
}

#[test]
fn type_without_marker_is_not_an_annotation() {
    let (parser, context) = parser_and_context();
    let err = parser.parse("@Plain(1)", &context).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::NotAnAnnotation { ref class } if class == "App\\Plain"
    ));
}

#[test]
fn unterminated_argument_list_fails() {
    let (parser, context) = parser_and_context();
    let err = parser.parse("@Route(path = \"/x\"", &context).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnexpectedToken { .. }));
}

#[test]
fn missing_value_after_equals_fails() {
    let (parser, context) = parser_and_context();
    let err = parser.parse("@Route(path = )", &context).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnexpectedToken { .. }));
}

#[test]
fn multiline_arguments_with_trailing_commas() {
    let (parser, context) = parser_and_context();
    let doc = concat!(
        "/**\n",
        " * @Route(\n",
        " *     path = \"/books\",\n",
        " *     methods = [\n",
        " *         \"GET\",\n",
        " *         \"POST\",\n",
        " *     ],\n",
        " * )\n",
        " */",
    );

    let route = &parser.parse(doc, &context).unwrap()[0];
    assert_eq!(route.get("path"), Some(&Value::from("/books")));
    assert_eq!(
        route.get("methods"),
        Some(&Value::Array(vec![Value::from("GET"), Value::from("POST")]))
    );
}

#[test]
fn fully_qualified_name_needs_no_import() {
    let reflector = Arc::new(reflector());
    // A context with no imports at all.
    let context = Context::for_class(reflector.as_ref(), "App\\Vehicle");
    let parser = Parser::new(reflector);

    let doc = "@\\App\\Annotations\\Tag(\"x\")";
    let annotations = parser.parse(doc, &context).unwrap();
    assert_eq!(annotations[0].class(), "App\\Annotations\\Tag");
}
