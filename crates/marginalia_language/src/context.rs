//! Name-resolution context.
//!
//! A `Context` describes where parsing is happening: the usage-site kind,
//! its enclosing namespace, a human-readable symbol for diagnostics, and
//! the import-alias table used to resolve bare identifiers to
//! fully-qualified annotation type names.

use std::fmt;

use marginalia_foundation::Target;
use marginalia_reflect::{Import, Reflector, SEPARATOR, Site};

use crate::builtin;

/// The name-resolution environment active at one parse site.
///
/// Created once per parse entry point; immutable after construction except
/// for import registration while it is being built.
#[derive(Clone, Debug)]
pub struct Context {
    /// The usage-site kind annotations here decorate.
    target: Target,
    /// Enclosing namespace of the site.
    namespace: String,
    /// Human-readable site identifier, used only in diagnostics.
    symbol: String,
    /// Import-alias table in scope at the site.
    imports: Vec<Import>,
}

impl Context {
    /// Creates a context from explicit parts.
    #[must_use]
    pub fn new(target: Target, namespace: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            target,
            namespace: namespace.into(),
            symbol: symbol.into(),
            imports: Vec::new(),
        }
    }

    /// Creates the context for a type declaration site.
    #[must_use]
    pub fn for_class(reflector: &dyn Reflector, class: &str) -> Self {
        let site = Site::class(class);
        let mut context = Self::new(Target::Class, reflector.namespace(&site), class);
        context.imports = reflector.imports(&site);
        context
    }

    /// Creates the context for a method site.
    #[must_use]
    pub fn for_method(reflector: &dyn Reflector, class: &str, method: &str) -> Self {
        let site = Site::method(class, method);
        let mut context = Self::new(
            Target::Method,
            reflector.namespace(&site),
            format!("{class}::{method}()"),
        );
        context.imports = reflector.imports(&site);
        context
    }

    /// Creates the context for a property site.
    #[must_use]
    pub fn for_property(reflector: &dyn Reflector, class: &str, property: &str) -> Self {
        let site = Site::property(class, property);
        let mut context = Self::new(
            Target::Property,
            reflector.namespace(&site),
            format!("{class}::${property}"),
        );
        context.imports = reflector.imports(&site);
        context
    }

    /// Creates the context for a free-function site.
    #[must_use]
    pub fn for_function(reflector: &dyn Reflector, function: &str) -> Self {
        let site = Site::function(function);
        let mut context = Self::new(
            Target::Function,
            reflector.namespace(&site),
            format!("{function}()"),
        );
        context.imports = reflector.imports(&site);
        context
    }

    /// Returns the usage-site kind.
    #[must_use]
    pub fn target(&self) -> Target {
        self.target
    }

    /// Returns the enclosing namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the diagnostic symbol for the site.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the import-alias table.
    #[must_use]
    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// Registers an import alias.
    pub fn add_import(&mut self, import: Import) {
        self.imports.push(import);
    }

    /// Resolves an identifier written in an annotation to a fully-qualified
    /// annotation-type name.
    ///
    /// Resolution order: built-in annotation names, the identifier as
    /// written, the identifier under the site's namespace, then
    /// import-alias substitution on the first path segment. Returns `None`
    /// when nothing matches; the caller decides whether that is fatal.
    #[must_use]
    pub fn resolve(&self, reflector: &dyn Reflector, identifier: &str) -> Option<String> {
        if let Some(class) = builtin::resolve(identifier) {
            return Some(class.to_string());
        }

        let identifier = identifier.trim_start_matches(SEPARATOR);
        if reflector.type_exists(identifier) {
            return Some(identifier.to_string());
        }

        if !self.namespace.is_empty() {
            let qualified = format!("{}{SEPARATOR}{identifier}", self.namespace);
            if reflector.type_exists(&qualified) {
                return Some(qualified);
            }
        }

        let (first, rest) = identifier
            .split_once(SEPARATOR)
            .map_or((identifier, None), |(first, rest)| (first, Some(rest)));
        let import = self.imports.iter().find(|import| import.alias == first)?;
        let substituted = match rest {
            Some(rest) => format!("{}{SEPARATOR}{rest}", import.path),
            None => import.path.clone(),
        };
        reflector.type_exists(&substituted).then_some(substituted)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
