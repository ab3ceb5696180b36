//! The built-in annotation vocabulary.
//!
//! Five annotation kinds describe annotation types themselves: the
//! `@Annotation` marker, `@Target` usage constraints, per-field `@Required`
//! and `@Enum` constraints, and the `@NoValidate` switch. Their schemas are
//! hand-authored here so that schema discovery never recurses into them.

use marginalia_foundation::{ElementType, Target};

use crate::schema::{Attribute, Schema};

/// Fully-qualified name of the `@Annotation` marker.
pub const ANNOTATION: &str = "Marginalia\\Annotation";
/// Fully-qualified name of the `@Target` constraint.
pub const TARGET: &str = "Marginalia\\Target";
/// Fully-qualified name of the `@Required` flag.
pub const REQUIRED: &str = "Marginalia\\Required";
/// Fully-qualified name of the `@Enum` constraint.
pub const ENUM: &str = "Marginalia\\Enum";
/// Fully-qualified name of the `@NoValidate` switch.
pub const NO_VALIDATE: &str = "Marginalia\\NoValidate";

/// Resolves a bare built-in annotation name to its qualified name.
#[must_use]
pub fn resolve(identifier: &str) -> Option<&'static str> {
    match identifier {
        "Annotation" => Some(ANNOTATION),
        "Target" => Some(TARGET),
        "Required" => Some(REQUIRED),
        "Enum" => Some(ENUM),
        "NoValidate" => Some(NO_VALIDATE),
        _ => None,
    }
}

/// Returns the fixed, hand-authored schema for a built-in kind.
///
/// The `value` attributes carry validation disabled: the built-ins are
/// self-referential, and their arguments are interpreted directly by
/// schema discovery rather than type-checked.
#[must_use]
pub fn schema(class: &str) -> Option<Schema> {
    match class {
        ANNOTATION => Some(
            Schema::new(ANNOTATION)
                .annotation()
                .with_targets(vec![Target::Class]),
        ),
        TARGET => Some(
            Schema::new(TARGET)
                .annotation()
                .with_targets(vec![Target::Class])
                .with_attribute(
                    Attribute::new("value", ElementType::array(ElementType::String))
                        .without_validation(),
                ),
        ),
        REQUIRED => Some(
            Schema::new(REQUIRED)
                .annotation()
                .with_targets(vec![Target::Property])
                .with_attribute(
                    Attribute::new("value", ElementType::array(ElementType::Bool))
                        .without_validation(),
                ),
        ),
        ENUM => Some(
            Schema::new(ENUM)
                .annotation()
                .with_targets(vec![Target::Property])
                .with_attribute(
                    Attribute::new("value", ElementType::array(ElementType::Mixed))
                        .without_validation(),
                ),
        ),
        NO_VALIDATE => Some(
            Schema::new(NO_VALIDATE)
                .annotation()
                .with_targets(vec![Target::Class, Target::Property]),
        ),
        _ => None,
    }
}
