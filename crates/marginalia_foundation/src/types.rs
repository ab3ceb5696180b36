//! Type descriptors for attribute validation.

use std::fmt;

use crate::value::Value;

/// Declared element type of an annotation attribute.
///
/// Discovered from a field's doc comment and used to validate argument
/// values at parse time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementType {
    /// Any value (also the fallback for undeclared or union types).
    Mixed,
    /// String type.
    String,
    /// Boolean type.
    Bool,
    /// Integer type.
    Int,
    /// Floating point type.
    Float,
    /// Any non-scalar value (nested annotation instance).
    Object,
    /// A specific annotation type, by fully-qualified name.
    Class(String),
    /// Homogeneous array of the inner element type.
    Array(Box<ElementType>),
}

impl ElementType {
    /// Creates an array type with the given element type.
    #[must_use]
    pub fn array(element: ElementType) -> Self {
        Self::Array(Box::new(element))
    }

    /// Parses one of the fixed primitive names, accepting the aliases the
    /// annotation language allows (`bool`/`boolean`, `int`/`integer`,
    /// `float`/`double`).
    #[must_use]
    pub fn parse_primitive(name: &str) -> Option<Self> {
        match name {
            "mixed" => Some(Self::Mixed),
            "string" => Some(Self::String),
            "bool" | "boolean" => Some(Self::Bool),
            "int" | "integer" => Some(Self::Int),
            "float" | "double" => Some(Self::Float),
            "object" => Some(Self::Object),
            _ => None,
        }
    }

    /// Checks whether a value conforms to this type.
    ///
    /// `Mixed` accepts everything; `Class` compares the annotation class
    /// name of the value; `Array` requires an array value whose every
    /// element conforms to the inner type.
    #[must_use]
    pub fn check(&self, value: &Value) -> bool {
        match self {
            Self::Mixed => true,
            Self::String => matches!(value, Value::String(_)),
            Self::Bool => matches!(value, Value::Bool(_)),
            Self::Int => matches!(value, Value::Int(_)),
            Self::Float => matches!(value, Value::Float(_)),
            Self::Object => matches!(value, Value::Annotation(_)),
            Self::Class(class) => value
                .as_annotation()
                .is_some_and(|inner| inner.class() == class),
            Self::Array(element) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|item| element.check(item))),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mixed => write!(f, "mixed"),
            Self::String => write!(f, "string"),
            Self::Bool => write!(f, "boolean"),
            Self::Int => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Object => write!(f, "object"),
            Self::Class(class) => write!(f, "{class}"),
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}
