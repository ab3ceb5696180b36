//! In-memory reflection provider.
//!
//! `MemoryReflector` serves hosts without native reflection facilities and
//! every test in the workspace: types, fields, functions, imports, and
//! constants are registered up front and served back through the
//! [`Reflector`] trait.

use std::collections::HashMap;

use marginalia_foundation::Value;

use crate::reflector::Reflector;
use crate::site::{Import, Site, namespace_of};

/// A registered field of a type.
#[derive(Clone, Debug)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// The field's own doc comment.
    pub doc: String,
}

/// A registered type declaration.
#[derive(Clone, Debug)]
pub struct TypeDef {
    /// Fully-qualified type name.
    name: String,
    /// The type's doc comment.
    doc: String,
    /// Public fields, in declaration order.
    fields: Vec<FieldDef>,
    /// Whether the type exposes a parameterized constructor.
    has_constructor: bool,
    /// Imports in scope at the type's declaration.
    imports: Vec<Import>,
}

impl TypeDef {
    /// Creates a type definition with no doc comment or fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            fields: Vec::new(),
            has_constructor: false,
            imports: Vec::new(),
        }
    }

    /// Sets the type's doc comment.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Adds a public field with its doc comment.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, doc: impl Into<String>) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            doc: doc.into(),
        });
        self
    }

    /// Marks the type as exposing a parameterized constructor.
    #[must_use]
    pub fn with_constructor(mut self) -> Self {
        self.has_constructor = true;
        self
    }

    /// Adds an import visible at the type's declaration.
    #[must_use]
    pub fn with_import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }
}

/// A registered free function.
#[derive(Clone, Debug)]
pub struct FunctionDef {
    /// Fully-qualified function name.
    name: String,
    /// The function's doc comment.
    doc: String,
    /// Imports in scope at the function's declaration.
    imports: Vec<Import>,
}

impl FunctionDef {
    /// Creates a function definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            imports: Vec::new(),
        }
    }

    /// Sets the function's doc comment.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Adds an import visible at the function's declaration.
    #[must_use]
    pub fn with_import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }
}

/// In-memory [`Reflector`] implementation.
#[derive(Debug, Default)]
pub struct MemoryReflector {
    /// Registered types, keyed by fully-qualified name.
    types: HashMap<String, TypeDef>,
    /// Registered functions, keyed by fully-qualified name.
    functions: HashMap<String, FunctionDef>,
    /// Defined constants, keyed by qualified name.
    constants: HashMap<String, Value>,
}

impl MemoryReflector {
    /// Creates an empty reflector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type, builder-style.
    #[must_use]
    pub fn with_type(mut self, def: TypeDef) -> Self {
        self.register_type(def);
        self
    }

    /// Registers a function, builder-style.
    #[must_use]
    pub fn with_function(mut self, def: FunctionDef) -> Self {
        self.functions.insert(def.name.clone(), def);
        self
    }

    /// Defines a constant, builder-style.
    #[must_use]
    pub fn with_constant(mut self, name: impl Into<String>, value: Value) -> Self {
        self.constants.insert(name.into(), value);
        self
    }

    /// Registers a type.
    pub fn register_type(&mut self, def: TypeDef) {
        self.types.insert(def.name.clone(), def);
    }

    /// Defines a constant.
    pub fn define_constant(&mut self, name: impl Into<String>, value: Value) {
        self.constants.insert(name.into(), value);
    }

    fn type_of_site<'a>(&'a self, site: &Site) -> Option<&'a TypeDef> {
        match site {
            Site::Class(name) => self.types.get(name),
            Site::Method { class, .. } | Site::Property { class, .. } => self.types.get(class),
            Site::Function(_) => None,
        }
    }
}

impl Reflector for MemoryReflector {
    fn doc_comment(&self, site: &Site) -> String {
        match site {
            Site::Class(name) => self
                .types
                .get(name)
                .map(|def| def.doc.clone())
                .unwrap_or_default(),
            Site::Function(name) => self
                .functions
                .get(name)
                .map(|def| def.doc.clone())
                .unwrap_or_default(),
            Site::Property { class, name } => self
                .types
                .get(class)
                .and_then(|def| def.fields.iter().find(|field| &field.name == name))
                .map(|field| field.doc.clone())
                .unwrap_or_default(),
            Site::Method { .. } => String::new(),
        }
    }

    fn namespace(&self, site: &Site) -> String {
        let name = match site {
            Site::Class(name) | Site::Function(name) => name,
            Site::Method { class, .. } | Site::Property { class, .. } => class,
        };
        namespace_of(name).to_string()
    }

    fn imports(&self, site: &Site) -> Vec<Import> {
        if let Site::Function(name) = site {
            return self
                .functions
                .get(name)
                .map(|def| def.imports.clone())
                .unwrap_or_default();
        }
        self.type_of_site(site)
            .map(|def| def.imports.clone())
            .unwrap_or_default()
    }

    fn type_exists(&self, class: &str) -> bool {
        self.types.contains_key(class)
    }

    fn public_fields(&self, class: &str) -> Vec<String> {
        self.types
            .get(class)
            .map(|def| def.fields.iter().map(|field| field.name.clone()).collect())
            .unwrap_or_default()
    }

    fn has_constructor(&self, class: &str) -> bool {
        self.types
            .get(class)
            .is_some_and(|def| def.has_constructor)
    }

    fn constant(&self, name: &str) -> Option<Value> {
        self.constants.get(name).cloned()
    }
}
