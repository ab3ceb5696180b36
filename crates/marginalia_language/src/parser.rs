//! Recursive-descent parser for the annotation language.
//!
//! The parser walks the token stream produced by the [`Tokenizer`],
//! resolves identifiers through a [`Context`], fetches schemas through the
//! [`SchemaCache`], and emits fully-formed, validated [`Annotation`]
//! instances. It is also the engine behind schema discovery: an annotation
//! type's own doc comment is parsed with the same machinery to learn its
//! schema.

use std::collections::HashSet;
use std::sync::Arc;

use marginalia_foundation::{
    Annotation, Arguments, ElementType, Error, ErrorContext, Result, Target, Value,
};
use marginalia_reflect::{ConstructorArgs, Reflector, Site};

use crate::builtin;
use crate::cache::SchemaCache;
use crate::context::Context;
use crate::schema::{Attribute, Schema};
use crate::token::{Token, TokenKind};
use crate::tokenizer::Tokenizer;

/// Well-known non-semantic documentation tags, discarded silently.
///
/// These are the vocabulary of generic documentation and tooling
/// conventions; they carry prose, not annotations.
const DOC_TAGS: &[&str] = &[
    "api",
    "author",
    "category",
    "copyright",
    "deprecated",
    "example",
    "filesource",
    "global",
    "ignore",
    "internal",
    "license",
    "link",
    "method",
    "package",
    "param",
    "property",
    "property-read",
    "property-write",
    "return",
    "see",
    "since",
    "source",
    "subpackage",
    "throws",
    "todo",
    "uses",
    "used-by",
    "var",
    "version",
    // Coverage tooling
    "codeCoverageIgnore",
    "codeCoverageIgnoreEnd",
    "codeCoverageIgnoreStart",
    // IDE inline directives
    "noinspection",
    // Style checkers
    "codingStandardsIgnoreStart",
    "codingStandardsIgnoreEnd",
    // Packaging
    "package_version",
];

/// Parser for doc-comment annotations.
///
/// A parser is cheap to share: parsing borrows it immutably, and the
/// schema cache it carries serializes concurrent discovery internally.
pub struct Parser {
    /// Supplies host-declaration facts.
    reflector: Arc<dyn Reflector>,
    /// Memoized schemas, one per annotation type name.
    cache: Arc<SchemaCache>,
    /// Caller-registered annotation names to discard silently.
    ignored: HashSet<String>,
    /// When set, unresolvable annotation names are discarded instead of
    /// failing the parse.
    ignore_not_imported: bool,
}

impl Parser {
    /// Creates a parser with a fresh schema cache.
    #[must_use]
    pub fn new(reflector: Arc<dyn Reflector>) -> Self {
        Self::with_cache(reflector, Arc::new(SchemaCache::new()))
    }

    /// Creates a parser sharing an existing schema cache.
    #[must_use]
    pub fn with_cache(reflector: Arc<dyn Reflector>, cache: Arc<SchemaCache>) -> Self {
        Self {
            reflector,
            cache,
            ignored: HashSet::new(),
            ignore_not_imported: false,
        }
    }

    /// Registers an annotation name to discard silently.
    pub fn ignore(&mut self, name: impl Into<String>) {
        self.ignored.insert(name.into());
    }

    /// Sets whether annotations whose type cannot be resolved are
    /// discarded instead of failing the parse.
    pub fn ignore_not_imported(&mut self, ignore: bool) {
        self.ignore_not_imported = ignore;
    }

    /// Returns the schema cache this parser consults.
    #[must_use]
    pub fn cache(&self) -> &Arc<SchemaCache> {
        &self.cache
    }

    /// Parses a doc comment into its annotation instances, in source order.
    ///
    /// Input with no `@` occurrence yields an empty sequence. An `@` is
    /// only treated as the start of an annotation when it is the first
    /// token on its comment line.
    ///
    /// # Errors
    /// Lexical, grammatical, resolution, and validation errors abort the
    /// whole call; no partial annotation list is returned.
    pub fn parse(&self, doc: &str, context: &Context) -> Result<Vec<Annotation>> {
        let mut tokenizer = Tokenizer::new(doc);

        if !tokenizer.seek(TokenKind::At) {
            // No annotations in the doc comment.
            return Ok(Vec::new());
        }

        let mut annotations = Vec::new();
        while tokenizer.valid() && tokenizer.seek(TokenKind::At) {
            // An annotation must start its comment line: the `@` is either
            // the very first token or immediately preceded by a newline.
            let key = tokenizer.key();
            if key > 0 && tokenizer.kind_at(key - 1) != TokenKind::Eol {
                tokenizer.next();
                continue;
            }
            tokenizer.next(); // skip @
            if let Some(annotation) = self.parse_annotation(&mut tokenizer, context)? {
                annotations.push(annotation);
            }
        }

        Ok(annotations)
    }

    /// Returns the schema for an annotation type, discovering it on first
    /// use.
    ///
    /// # Errors
    /// Propagates discovery failures, including cyclic self-reference.
    pub fn schema(&self, class: &str) -> Result<Arc<Schema>> {
        self.cache.get_or_discover(class, || self.discover(class))
    }

    /// Parses one annotation; the cursor sits just past the `@`.
    ///
    /// Returns `Ok(None)` for the silently-discarded cases: documentation
    /// tags, caller-ignored names, and (in ignore-not-imported mode)
    /// unresolvable names. Documentation tags bail before argument
    /// parsing, since the text after them is prose rather than an
    /// argument list; the other discarded cases still consume their
    /// arguments to keep the cursor consistent.
    fn parse_annotation(
        &self,
        tokenizer: &mut Tokenizer,
        context: &Context,
    ) -> Result<Option<Annotation>> {
        if tokenizer.current().kind != TokenKind::Identifier {
            // A stray `@` in prose; not an annotation.
            return Ok(None);
        }
        let identifier = tokenizer.current().value.clone();
        tokenizer.next();

        if DOC_TAGS.contains(&identifier.as_str()) {
            return Ok(None);
        }

        let arguments = self.parse_arguments(tokenizer, context)?;

        if self.ignored.contains(&identifier) {
            return Ok(None);
        }

        let Some(class) = context.resolve(self.reflector.as_ref(), &identifier) else {
            if self.ignore_not_imported {
                return Ok(None);
            }
            return Err(Error::unknown_annotation_class(identifier)
                .with_context(ErrorContext::new().with_symbol(context.symbol())));
        };

        let schema = self.schema(&class)?;
        if !schema.is_annotation() {
            return Err(Error::not_an_annotation(class)
                .with_context(ErrorContext::new().with_symbol(context.symbol())));
        }

        self.instantiate(&schema, arguments, context).map(Some)
    }

    /// Assembles arguments into an instance and validates it.
    fn instantiate(
        &self,
        schema: &Schema,
        arguments: Arguments,
        context: &Context,
    ) -> Result<Annotation> {
        let fields: Vec<(String, Value)>;
        let instance = if schema.has_constructor() {
            fields = arguments.named().to_vec();
            self.reflector
                .instantiate(schema.class(), ConstructorArgs::Aggregate(arguments))?
        } else {
            let mut assigned: Vec<(String, Value)> = arguments
                .named()
                .iter()
                .filter(|(name, _)| schema.has_attribute(name))
                .cloned()
                .collect();
            if schema.has_attribute("value") {
                assigned.retain(|(name, _)| name != "value");
                assigned.push((
                    "value".to_string(),
                    Value::Array(arguments.positional().to_vec()),
                ));
            }
            fields = assigned.clone();
            self.reflector
                .instantiate(schema.class(), ConstructorArgs::Fields(assigned))?
        };

        if schema.validation_enabled() {
            let result = schema.validate_arguments(&fields);
            if let Some(attribute) = result.failed_attribute() {
                return Err(Error::invalid_attribute(
                    schema.class().to_string(),
                    attribute.to_string(),
                )
                .with_context(ErrorContext::new().with_symbol(context.symbol())));
            }
        }

        Ok(instance)
    }

    /// Parses an optional parenthesized argument list.
    fn parse_arguments(
        &self,
        tokenizer: &mut Tokenizer,
        context: &Context,
    ) -> Result<Arguments> {
        let mut arguments = Arguments::new();
        if tokenizer.current().kind != TokenKind::OpenParenthesis {
            return Ok(arguments);
        }
        tokenizer.next();

        self.parse_argument(tokenizer, context, &mut arguments)?;
        loop {
            skip_eol(tokenizer);
            if tokenizer.current().kind != TokenKind::Comma {
                break;
            }
            tokenizer.next();
            self.parse_argument(tokenizer, context, &mut arguments)?;
        }

        expect(tokenizer, context, TokenKind::CloseParenthesis)?;
        tokenizer.next();
        Ok(arguments)
    }

    /// Parses one argument: `value`, or `identifier = value`.
    fn parse_argument(
        &self,
        tokenizer: &mut Tokenizer,
        context: &Context,
        arguments: &mut Arguments,
    ) -> Result<()> {
        skip_eol(tokenizer);

        // A comma with nothing after it before the closing parenthesis.
        if tokenizer.current().kind == TokenKind::CloseParenthesis {
            return Ok(());
        }

        // Key/value pair.
        if tokenizer.current().kind == TokenKind::Identifier
            && tokenizer.kind_at(tokenizer.key() + 1) == TokenKind::Equals
        {
            let name = tokenizer.current().value.clone();
            tokenizer.next();
            tokenizer.next();
            skip_eol(tokenizer);
            let value = self.parse_value(tokenizer, context)?;
            arguments.insert(name, value);
            return Ok(());
        }

        // Just a value.
        let value = self.parse_value(tokenizer, context)?;
        arguments.push(value);
        Ok(())
    }

    /// Parses one value; the cursor is on the value's first token.
    fn parse_value(&self, tokenizer: &mut Tokenizer, context: &Context) -> Result<Value> {
        let token = tokenizer.current().clone();
        tokenizer.next();
        match token.kind {
            TokenKind::At => {
                let nested = self.parse_annotation(tokenizer, context)?;
                Ok(nested.map_or(Value::Null, Value::from))
            }
            TokenKind::OpenBracket => self.parse_array(tokenizer, context),
            TokenKind::String => Ok(Value::String(token.value)),
            TokenKind::Integer => token
                .value
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| number_error(&token, context)),
            TokenKind::Float => token
                .value
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| number_error(&token, context)),
            TokenKind::Null => Ok(Value::Null),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Identifier => self.resolve_constant(&token, context),
            _ => Err(Error::unexpected_token(token.to_string(), token.position)
                .with_context(
                    ErrorContext::new()
                        .with_symbol(context.symbol())
                        .with_position(token.position),
                )),
        }
    }

    /// Resolves an identifier token used as a value.
    ///
    /// `Type::class` yields the resolved fully-qualified type name itself;
    /// any other `Type::MEMBER` is looked up as a qualified constant; a
    /// bare identifier is looked up as a global constant.
    fn resolve_constant(&self, token: &Token, context: &Context) -> Result<Value> {
        let reflector = self.reflector.as_ref();
        let written = &token.value;

        let name = if let Some((class_part, member)) = written.split_once("::") {
            match (member, context.resolve(reflector, class_part)) {
                ("class", Some(class)) => return Ok(Value::String(class)),
                (_, Some(class)) => format!("{class}::{member}"),
                (_, None) => written.clone(),
            }
        } else {
            written.clone()
        };

        reflector.constant(&name).ok_or_else(|| {
            Error::undefined_constant(written.clone()).with_context(
                ErrorContext::new()
                    .with_symbol(context.symbol())
                    .with_position(token.position),
            )
        })
    }

    /// Parses an array literal; the cursor sits just past the `[`.
    fn parse_array(&self, tokenizer: &mut Tokenizer, context: &Context) -> Result<Value> {
        let mut items = Vec::new();
        skip_eol(tokenizer);

        // Empty array literal.
        if tokenizer.current().kind == TokenKind::CloseBracket {
            tokenizer.next();
            return Ok(Value::Array(items));
        }

        items.push(self.parse_value(tokenizer, context)?);
        loop {
            skip_eol(tokenizer);
            if tokenizer.current().kind != TokenKind::Comma {
                break;
            }
            tokenizer.next();
            skip_eol(tokenizer);
            if tokenizer.current().kind == TokenKind::CloseBracket {
                break;
            }
            items.push(self.parse_value(tokenizer, context)?);
        }

        expect(tokenizer, context, TokenKind::CloseBracket)?;
        tokenizer.next();
        Ok(Value::Array(items))
    }

    /// Discovers one annotation type's schema by parsing its declarations.
    fn discover(&self, class: &str) -> Result<Schema> {
        // The built-in kinds are hand-authored; discovering them through
        // their own doc comments would recurse forever.
        if let Some(schema) = builtin::schema(class) {
            return Ok(schema);
        }

        let reflector = self.reflector.as_ref();
        let context = Context::for_class(reflector, class);
        let doc = reflector.doc_comment(&Site::class(class));

        let mut schema = Schema::new(class);
        for annotation in self.parse(&doc, &context)? {
            match annotation.class() {
                builtin::ANNOTATION => schema = schema.annotation(),
                builtin::TARGET => {
                    schema = schema.with_targets(collect_targets(&annotation, &context)?);
                }
                builtin::NO_VALIDATE => schema = schema.without_validation(),
                _ => {}
            }
        }

        for field in reflector.public_fields(class) {
            let attribute = self.collect_attribute(class, &field, &context)?;
            schema = schema.with_attribute(attribute);
        }

        if reflector.has_constructor(class) {
            schema = schema.with_constructor();
        }

        Ok(schema)
    }

    /// Builds one schema attribute from a public field's doc comment.
    fn collect_attribute(&self, class: &str, field: &str, owner: &Context) -> Result<Attribute> {
        let reflector = self.reflector.as_ref();
        let doc = reflector.doc_comment(&Site::property(class, field));
        let field_context = Context::for_property(reflector, class, field);

        let element_type = declared_element_type(&doc, owner, reflector);
        let mut attribute = Attribute::new(field, element_type);

        for annotation in self.parse(&doc, &field_context)? {
            match annotation.class() {
                builtin::ENUM => {
                    let values = annotation
                        .value()
                        .and_then(Value::as_array)
                        .map(<[Value]>::to_vec)
                        .unwrap_or_default();
                    attribute = attribute.enumerate(values);
                }
                builtin::REQUIRED => {
                    if required_flag(&annotation) {
                        attribute = attribute.required();
                    }
                }
                builtin::NO_VALIDATE => attribute = attribute.without_validation(),
                _ => {}
            }
        }

        Ok(attribute)
    }
}

/// Interprets a `@Required` instance: bare means required, an explicit
/// first argument decides by truthiness.
fn required_flag(annotation: &Annotation) -> bool {
    match annotation.value().and_then(Value::as_array) {
        None => true,
        Some(items) => items.first().is_none_or(Value::is_truthy),
    }
}

/// Interprets a `@Target` instance into the closed target set.
fn collect_targets(annotation: &Annotation, context: &Context) -> Result<Vec<Target>> {
    let items = annotation
        .value()
        .and_then(Value::as_array)
        .unwrap_or(&[]);

    let mut targets = Vec::new();
    for item in items {
        let target = item
            .as_str()
            .and_then(Target::parse)
            .ok_or_else(|| {
                Error::invalid_target(item.to_string())
                    .with_context(ErrorContext::new().with_symbol(context.symbol()))
            })?;
        targets.push(target);
    }
    if targets.is_empty() {
        return Err(Error::invalid_target("(none)".to_string())
            .with_context(ErrorContext::new().with_symbol(context.symbol())));
    }
    Ok(targets)
}

/// Extracts the declared element type from a field's doc comment.
///
/// Looks for a `@var` tag followed by a type name and an optional `[]`
/// array marker. Union types collapse to `mixed`; names that resolve
/// through the owning context become class types; anything else falls back
/// to `mixed`.
fn declared_element_type(doc: &str, context: &Context, reflector: &dyn Reflector) -> ElementType {
    let mut search = doc;
    while let Some(index) = search.find("@var") {
        let rest = &search[index + 4..];
        if !rest.starts_with(char::is_whitespace) {
            // `@var` embedded inside a longer word; keep looking.
            search = rest;
            continue;
        }

        let end = rest.find(['*', '\n', '[']).unwrap_or(rest.len());
        let name = rest[..end].trim();
        let is_array = rest[end..]
            .strip_prefix('[')
            .map(str::trim_start)
            .is_some_and(|tail| tail.starts_with(']'));

        if name.is_empty() || name.contains('|') {
            return ElementType::Mixed;
        }
        let element = if let Some(primitive) = ElementType::parse_primitive(name) {
            primitive
        } else if let Some(class) = context.resolve(reflector, name) {
            ElementType::Class(class)
        } else {
            return ElementType::Mixed;
        };
        return if is_array {
            ElementType::array(element)
        } else {
            element
        };
    }
    ElementType::Mixed
}

/// Skips any run of newline tokens.
fn skip_eol(tokenizer: &mut Tokenizer) {
    while tokenizer.current().kind == TokenKind::Eol {
        tokenizer.next();
    }
}

/// Requires the current token (after newline skipping) to be of a kind.
fn expect(tokenizer: &mut Tokenizer, context: &Context, kind: TokenKind) -> Result<()> {
    skip_eol(tokenizer);
    let token = tokenizer.current();
    if token.kind == kind {
        Ok(())
    } else {
        Err(
            Error::unexpected_token(token.to_string(), token.position).with_context(
                ErrorContext::new()
                    .with_symbol(context.symbol())
                    .with_position(token.position),
            ),
        )
    }
}

/// Error for numeric literal text the tokenizer accepted but the parser
/// cannot represent.
fn number_error(token: &Token, context: &Context) -> Error {
    Error::unexpected_token(token.to_string(), token.position).with_context(
        ErrorContext::new()
            .with_symbol(context.symbol())
            .with_position(token.position),
    )
}
