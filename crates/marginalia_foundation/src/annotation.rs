//! Annotation instances and argument collections.
//!
//! [`Arguments`] is what the parser assembles from a parenthesized argument
//! list; [`Annotation`] is the generic instance record the default
//! instantiation strategy produces from it.

use std::fmt;

use crate::value::Value;

/// Arguments parsed from an annotation's parenthesized list.
///
/// Positional and named arguments are kept separately, each preserving
/// source order. Named lookup is linear; argument lists are small.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    /// Purely positional values, in source order.
    positional: Vec<Value>,
    /// `name = value` pairs, in source order.
    named: Vec<(String, Value)>,
}

impl Arguments {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn push(&mut self, value: Value) {
        self.positional.push(value);
    }

    /// Appends a named argument.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.named.push((name.into(), value));
    }

    /// Returns the positional arguments in source order.
    #[must_use]
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Returns the named arguments in source order.
    #[must_use]
    pub fn named(&self) -> &[(String, Value)] {
        &self.named
    }

    /// Looks up a named argument.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.named
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns the total number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// Returns true if no arguments were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

/// A constructed annotation instance.
///
/// Fields are stored in assignment order with by-name lookup. Hosts that
/// need typed annotation objects convert from this record; the parser holds
/// no reference after returning it.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    /// Fully-qualified name of the annotation type.
    class: String,
    /// Assigned fields, in assignment order.
    fields: Vec<(String, Value)>,
}

impl Annotation {
    /// Creates an annotation instance with no fields assigned.
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            fields: Vec::new(),
        }
    }

    /// Returns the fully-qualified annotation type name.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Assigns a field, replacing any previous assignment of the same name.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    /// Assigns a field, builder-style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.set(name, value);
        self
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns the assigned fields in assignment order.
    #[must_use]
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    /// Returns the `value` field, the conventional holder for positional
    /// arguments.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.get("value")
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}(", self.class)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name} = {value}")?;
        }
        write!(f, ")")
    }
}
