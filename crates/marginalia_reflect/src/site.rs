//! Source sites and import-alias entries.

use std::fmt;

/// Separator between namespace path segments.
pub const SEPARATOR: char = '\\';

/// Returns the last path segment of a qualified name.
#[must_use]
pub fn short_name(qualified: &str) -> &str {
    qualified
        .rsplit(SEPARATOR)
        .next()
        .unwrap_or(qualified)
}

/// Returns the namespace part of a qualified name (empty for bare names).
#[must_use]
pub fn namespace_of(qualified: &str) -> &str {
    qualified
        .rfind(SEPARATOR)
        .map_or("", |index| &qualified[..index])
}

/// A reference to a source declaration that can carry annotations.
///
/// Sites identify what a doc comment is attached to; the four variants
/// mirror the four kinds of annotated declarations.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Site {
    /// A type declaration, by fully-qualified name.
    Class(String),
    /// A free function, by fully-qualified name.
    Function(String),
    /// A method of a type.
    Method {
        /// Fully-qualified name of the declaring type.
        class: String,
        /// Method name.
        name: String,
    },
    /// A property of a type.
    Property {
        /// Fully-qualified name of the declaring type.
        class: String,
        /// Property name.
        name: String,
    },
}

impl Site {
    /// Creates a class site.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    /// Creates a property site.
    #[must_use]
    pub fn property(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Property {
            class: class.into(),
            name: name.into(),
        }
    }

    /// Creates a method site.
    #[must_use]
    pub fn method(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Method {
            class: class.into(),
            name: name.into(),
        }
    }

    /// Creates a function site.
    #[must_use]
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function(name.into())
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => write!(f, "{name}"),
            Self::Function(name) => write!(f, "{name}()"),
            Self::Method { class, name } => write!(f, "{class}::{name}()"),
            Self::Property { class, name } => write!(f, "{class}::${name}"),
        }
    }
}

/// One entry of a site's import-alias table.
///
/// An import without an explicit alias is registered under its own last
/// path segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Import {
    /// The alias the import is known by at the site.
    pub alias: String,
    /// The fully-qualified name the alias stands for.
    pub path: String,
}

impl Import {
    /// Creates an import with an implicit last-segment alias.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let alias = short_name(&path).to_string();
        Self { alias, path }
    }

    /// Creates an import with an explicit alias.
    #[must_use]
    pub fn aliased(path: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            path: path.into(),
        }
    }
}
