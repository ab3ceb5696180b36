//! Error types for the Marginalia system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Result type alias using the Marginalia [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Marginalia operations.
#[derive(Debug, Error)]
#[error("{kind}{}", context.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an out-of-bounds token access error.
    #[must_use]
    pub fn out_of_bounds(index: usize) -> Self {
        Self::new(ErrorKind::OutOfBounds { index })
    }

    /// Creates an unexpected-token error.
    #[must_use]
    pub fn unexpected_token(token: String, position: usize) -> Self {
        Self::new(ErrorKind::UnexpectedToken { token, position })
    }

    /// Creates an unknown-annotation-class error.
    #[must_use]
    pub fn unknown_annotation_class(name: String) -> Self {
        Self::new(ErrorKind::UnknownAnnotationClass { name })
    }

    /// Creates a not-an-annotation error.
    #[must_use]
    pub fn not_an_annotation(class: String) -> Self {
        Self::new(ErrorKind::NotAnAnnotation { class })
    }

    /// Creates an undefined-constant error.
    #[must_use]
    pub fn undefined_constant(name: String) -> Self {
        Self::new(ErrorKind::UndefinedConstant { name })
    }

    /// Creates an invalid-target error.
    #[must_use]
    pub fn invalid_target(target: String) -> Self {
        Self::new(ErrorKind::InvalidTarget { target })
    }

    /// Creates an undefined-attribute error.
    #[must_use]
    pub fn undefined_attribute(class: String, attribute: String) -> Self {
        Self::new(ErrorKind::UndefinedAttribute { class, attribute })
    }

    /// Creates an invalid-attribute error.
    #[must_use]
    pub fn invalid_attribute(class: String, attribute: String) -> Self {
        Self::new(ErrorKind::InvalidAttribute { class, attribute })
    }

    /// Creates a schema-cycle error.
    #[must_use]
    pub fn schema_cycle(class: String) -> Self {
        Self::new(ErrorKind::SchemaCycle { class })
    }

    /// Creates an instantiation error.
    #[must_use]
    pub fn instantiation(class: String, message: String) -> Self {
        Self::new(ErrorKind::Instantiation { class, message })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Token cursor advanced or peeked past the end of the token sequence.
    #[error("trying to get token at {index}, when index is out of bounds")]
    OutOfBounds {
        /// The index that was accessed.
        index: usize,
    },

    /// A required delimiter or value was not found where the grammar requires it.
    #[error("unexpected `{token}` at index {position}")]
    UnexpectedToken {
        /// The offending token's text.
        token: String,
        /// The offending token's index in the token stream.
        position: usize,
    },

    /// An identifier could not be resolved to any known type.
    #[error(
        "could not find annotation class {name}; check your imports or register the namespace"
    )]
    UnknownAnnotationClass {
        /// The written identifier.
        name: String,
    },

    /// The identifier resolved to a real type that never opted into being an annotation.
    #[error("used {class} as annotation - class is not marked with @Annotation")]
    NotAnAnnotation {
        /// The resolved class name.
        class: String,
    },

    /// A symbolic reference used as a value has no matching defined constant.
    #[error("using undefined constant `{name}`")]
    UndefinedConstant {
        /// The written constant name.
        name: String,
    },

    /// A target constraint lists a target kind outside the fixed closed set.
    #[error("invalid target `{target}`")]
    InvalidTarget {
        /// The offending target literal.
        target: String,
    },

    /// A schema was asked for an attribute name it does not declare.
    #[error("annotation class {class} defines no attribute {attribute}")]
    UndefinedAttribute {
        /// The annotation class.
        class: String,
        /// The attribute name that was requested.
        attribute: String,
    },

    /// An attribute value failed schema validation.
    #[error("failed to validate `{attribute}` attribute in @{class}")]
    InvalidAttribute {
        /// The annotation class.
        class: String,
        /// The attribute that failed validation.
        attribute: String,
    },

    /// Schema discovery re-entered a class whose discovery is still in progress.
    #[error("cyclic schema discovery for annotation class {class}")]
    SchemaCycle {
        /// The class whose discovery recursed.
        class: String,
    },

    /// The reflection provider failed to construct an annotation instance.
    #[error("could not instantiate {class}: {message}")]
    Instantiation {
        /// The annotation class.
        class: String,
        /// Provider-supplied failure description.
        message: String,
    },
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Human-readable identifier of the parse site (class, method, property).
    pub symbol: Option<String>,
    /// Token index in the stream being parsed.
    pub position: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parse-site symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Sets the token position.
    #[must_use]
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(symbol) = &self.symbol {
            write!(f, "in {symbol}")?;
            if self.position.is_some() {
                write!(f, " ")?;
            }
        }
        if let Some(position) = self.position {
            write!(f, "at index {position}")?;
        }
        Ok(())
    }
}
