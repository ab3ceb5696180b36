//! Annotation type schemas.
//!
//! A [`Schema`] describes what one annotation type accepts: its declared
//! attributes, valid usage targets, validation policy, and constructor
//! arity. Schemas for user types are discovered by parsing the type's own
//! doc comment (see the parser); the built-in kinds are hand-authored in
//! [`crate::builtin`].

use marginalia_foundation::{ElementType, Error, Result, Target, Value};

/// One schema entry: a declared attribute of an annotation type.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    /// Attribute name (mirrors the public field name).
    name: String,
    /// Declared element type.
    element_type: ElementType,
    /// Whether the attribute must be supplied.
    required: bool,
    /// Permitted literal values; when present, only membership is checked.
    enum_values: Option<Vec<Value>>,
    /// Whether this attribute participates in validation.
    validate: bool,
}

impl Attribute {
    /// Creates an optional, validated attribute of the given type.
    #[must_use]
    pub fn new(name: impl Into<String>, element_type: ElementType) -> Self {
        Self {
            name: name.into(),
            element_type,
            required: false,
            enum_values: None,
            validate: true,
        }
    }

    /// Marks the attribute as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Constrains the attribute to a fixed set of literal values.
    #[must_use]
    pub fn enumerate(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Switches validation off for this attribute.
    #[must_use]
    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }

    /// Returns the attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared element type.
    #[must_use]
    pub fn element_type(&self) -> &ElementType {
        &self.element_type
    }

    /// Returns true if the attribute must be supplied.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns true if an enum constraint is present.
    #[must_use]
    pub fn is_enum(&self) -> bool {
        self.enum_values.is_some()
    }

    /// Returns the enum constraint, if any.
    #[must_use]
    pub fn enum_values(&self) -> Option<&[Value]> {
        self.enum_values.as_deref()
    }

    /// Checks one value against this attribute's constraints.
    ///
    /// Validation-disabled attributes accept anything. Null passes exactly
    /// when the attribute is optional. An enum constraint checks literal
    /// membership (element-wise for array-typed attributes) instead of the
    /// declared type.
    #[must_use]
    pub fn validate(&self, value: &Value) -> bool {
        if !self.validate {
            return true;
        }
        if value.is_null() {
            return !self.required;
        }
        if let Some(permitted) = &self.enum_values {
            if matches!(self.element_type, ElementType::Array(_)) {
                return value
                    .as_array()
                    .is_some_and(|items| items.iter().all(|item| permitted.contains(item)));
            }
            return permitted.contains(value);
        }
        self.element_type.check(value)
    }
}

/// Outcome of checking assembled arguments against a schema.
///
/// Validation failures are structured results rather than errors so a
/// caller can collect failures across a batch of annotated sites before
/// reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationResult {
    /// Every declared attribute was satisfied.
    Valid,
    /// An attribute was missing or its value did not conform.
    Invalid {
        /// The first attribute that failed.
        attribute: String,
    },
}

impl ValidationResult {
    /// Returns true if validation succeeded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the failed attribute name, if any.
    #[must_use]
    pub fn failed_attribute(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid { attribute } => Some(attribute),
        }
    }
}

/// Discovered shape of one annotation type.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    /// Fully-qualified annotation type name.
    class: String,
    /// Declared attributes, in declaration order, unique by name.
    attributes: Vec<Attribute>,
    /// Valid usage targets; never empty.
    targets: Vec<Target>,
    /// Whether arguments are validated at all for this type.
    validate: bool,
    /// Whether arguments are passed as one aggregate to a constructor.
    has_constructor: bool,
    /// Whether the type opted into being usable as an annotation.
    is_annotation: bool,
}

impl Schema {
    /// Creates a schema with default policy: all targets valid, validation
    /// enabled, field-by-field construction, not (yet) an annotation.
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            attributes: Vec::new(),
            targets: vec![Target::All],
            validate: true,
            has_constructor: false,
            is_annotation: false,
        }
    }

    /// Marks the type as having opted into annotation usage.
    #[must_use]
    pub fn annotation(mut self) -> Self {
        self.is_annotation = true;
        self
    }

    /// Replaces the valid usage targets.
    #[must_use]
    pub fn with_targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = targets;
        self
    }

    /// Adds a declared attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Switches validation off for the whole type.
    #[must_use]
    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }

    /// Marks the type as exposing a parameterized constructor.
    #[must_use]
    pub fn with_constructor(mut self) -> Self {
        self.has_constructor = true;
        self
    }

    /// Returns the fully-qualified annotation type name.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Returns true if the type opted into annotation usage.
    #[must_use]
    pub fn is_annotation(&self) -> bool {
        self.is_annotation
    }

    /// Returns true if arguments are passed as one constructor aggregate.
    #[must_use]
    pub fn has_constructor(&self) -> bool {
        self.has_constructor
    }

    /// Returns true if argument validation is enabled for this type.
    #[must_use]
    pub fn validation_enabled(&self) -> bool {
        self.validate
    }

    /// Returns the valid usage targets.
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Returns the declared attributes in declaration order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns true if an attribute of the given name is declared.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attribute| attribute.name == name)
    }

    /// Returns the declared attribute of the given name.
    ///
    /// # Errors
    /// Returns an undefined-attribute error for unknown names.
    pub fn attribute(&self, name: &str) -> Result<&Attribute> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .ok_or_else(|| Error::undefined_attribute(self.class.clone(), name.to_string()))
    }

    /// Checks whether the annotation may decorate the given target kind.
    #[must_use]
    pub fn allows_target(&self, target: Target) -> bool {
        self.targets.contains(&Target::All) || self.targets.contains(&target)
    }

    /// Checks assembled field assignments against the declared attributes.
    ///
    /// A required attribute that was not supplied fails; a supplied value
    /// that does not satisfy its attribute's constraints fails. The first
    /// failing attribute is reported. Returns `Valid` without checking
    /// anything when validation is disabled for the type.
    #[must_use]
    pub fn validate_arguments(&self, fields: &[(String, Value)]) -> ValidationResult {
        if !self.validate {
            return ValidationResult::Valid;
        }
        for attribute in &self.attributes {
            let supplied = fields
                .iter()
                .find(|(name, _)| name == &attribute.name)
                .map(|(_, value)| value);
            match supplied {
                None => {
                    if attribute.required {
                        return ValidationResult::Invalid {
                            attribute: attribute.name.clone(),
                        };
                    }
                }
                Some(value) => {
                    if !attribute.validate(value) {
                        return ValidationResult::Invalid {
                            attribute: attribute.name.clone(),
                        };
                    }
                }
            }
        }
        ValidationResult::Valid
    }
}
