//! End-to-end scenario tests.
//!
//! A small annotated codebase modeled with the in-memory reflector:
//! annotation types, a controller with annotated methods and properties,
//! and the parse sites a host would drive.

use std::sync::Arc;

use marginalia::foundation::{Target, Value};
use marginalia::language::{Context, Parser};
use marginalia::reflect::{Import, MemoryReflector, Reflector, Site, TypeDef};

fn codebase() -> Arc<MemoryReflector> {
    Arc::new(
        MemoryReflector::new()
            .with_type(
                TypeDef::new("Framework\\Routing\\Route")
                    .with_doc(concat!(
                        "/**\n",
                        " * Maps an HTTP route onto a handler.\n",
                        " *\n",
                        " * @Annotation\n",
                        " * @Target(\"method\")\n",
                        " */",
                    ))
                    .with_field("path", "/**\n * @var string\n * @Required\n */")
                    .with_field("methods", "/** @var string[] */"),
            )
            .with_type(
                TypeDef::new("Framework\\Orm\\Column")
                    .with_doc("/**\n * @Annotation\n * @Target(\"property\")\n */")
                    .with_field("name", "/** @var string */")
                    .with_field("nullable", "/** @var bool */"),
            )
            .with_type(
                TypeDef::new("App\\BookController")
                    .with_doc("/** A controller, not an annotation. */")
                    .with_import(Import::new("Framework\\Routing\\Route"))
                    .with_import(Import::aliased("Framework\\Orm\\Column", "Col")),
            ),
    )
}

#[test]
fn method_site_parses_route() {
    let reflector = codebase();
    let parser = Parser::new(reflector.clone());
    let context = Context::for_method(reflector.as_ref(), "App\\BookController", "list");

    let doc = concat!(
        "/**\n",
        " * Lists all books.\n",
        " *\n",
        " * @Route(path = \"/books\", methods = [\"GET\"])\n",
        " */",
    );
    let annotations = parser.parse(doc, &context).unwrap();
    assert_eq!(annotations.len(), 1);

    let route = &annotations[0];
    assert_eq!(route.class(), "Framework\\Routing\\Route");
    assert_eq!(route.get("path"), Some(&Value::from("/books")));

    // The schema records where the annotation belongs; target checks are
    // the host's call to make against the site it parsed.
    let schema = parser.schema(route.class()).unwrap();
    assert!(schema.allows_target(context.target()));
    assert!(!schema.allows_target(Target::Property));
}

#[test]
fn property_site_parses_aliased_column() {
    let reflector = codebase();
    let parser = Parser::new(reflector.clone());
    let context = Context::for_property(reflector.as_ref(), "App\\BookController", "title");

    let doc = "/**\n * @Col(name = \"title\", nullable = false)\n */";
    let annotations = parser.parse(doc, &context).unwrap();

    let column = &annotations[0];
    assert_eq!(column.class(), "Framework\\Orm\\Column");
    assert_eq!(column.get("name"), Some(&Value::from("title")));
    assert_eq!(column.get("nullable"), Some(&Value::Bool(false)));
}

#[test]
fn reflector_supplies_the_doc_comment() {
    let reflector = codebase();
    let parser = Parser::new(reflector.clone());

    // Parse a class site's own doc comment, pulled through the reflector
    // the way schema discovery does.
    let doc = reflector.doc_comment(&Site::class("App\\BookController"));
    let context = Context::for_class(reflector.as_ref(), "App\\BookController");
    assert!(parser.parse(&doc, &context).unwrap().is_empty());
}

#[test]
fn one_doc_comment_many_annotations() {
    let reflector = codebase();
    let parser = Parser::new(reflector.clone());
    let context = Context::for_method(reflector.as_ref(), "App\\BookController", "create");

    let doc = concat!(
        "/**\n",
        " * @Route(path = \"/books\", methods = [\"POST\"])\n",
        " * @Route(path = \"/books/import\", methods = [\"POST\", \"PUT\"])\n",
        " */",
    );
    let annotations = parser.parse(doc, &context).unwrap();
    assert_eq!(annotations.len(), 2);
    assert_eq!(
        annotations[1].get("path"),
        Some(&Value::from("/books/import"))
    );
}

#[test]
fn instances_render_back_to_annotation_syntax() {
    let reflector = codebase();
    let parser = Parser::new(reflector.clone());
    let context = Context::for_method(reflector.as_ref(), "App\\BookController", "list");

    let annotations = parser
        .parse("@Route(path = \"/books\")", &context)
        .unwrap();
    assert_eq!(
        format!("{}", annotations[0]),
        "@Framework\\Routing\\Route(path = \"/books\")"
    );
}
