//! The reflection-provider trait.

use marginalia_foundation::{Annotation, Arguments, Result, Value};

use crate::site::{Import, Site};

/// Arguments handed to [`Reflector::instantiate`].
///
/// Which variant is used depends on the annotation type's constructor
/// arity: types with a parameterized constructor receive the whole argument
/// collection as one aggregate; all others are assigned field by field.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstructorArgs {
    /// Field assignments, already filtered to declared fields.
    Fields(Vec<(String, Value)>),
    /// The raw argument collection, for parameterized constructors.
    Aggregate(Arguments),
}

/// Supplies host-declaration facts to the parser and schema discovery.
///
/// Implementations must be cheap to query; the parser may call these
/// methods several times per annotation while discovering schemas.
pub trait Reflector: Send + Sync {
    /// Returns the doc comment attached to a site (possibly empty).
    fn doc_comment(&self, site: &Site) -> String;

    /// Returns the enclosing namespace of a site.
    fn namespace(&self, site: &Site) -> String;

    /// Returns the import-alias table in scope at a site, including
    /// implicit last-segment aliases.
    fn imports(&self, site: &Site) -> Vec<Import>;

    /// Checks whether a fully-qualified type name exists.
    fn type_exists(&self, class: &str) -> bool;

    /// Returns the names of a type's public fields, in declaration order.
    fn public_fields(&self, class: &str) -> Vec<String>;

    /// Checks whether a type exposes a parameterized constructor.
    fn has_constructor(&self, class: &str) -> bool;

    /// Looks up a defined constant by qualified name.
    fn constant(&self, name: &str) -> Option<Value>;

    /// Constructs an annotation instance from assembled arguments.
    ///
    /// The default implementation builds the generic [`Annotation`] record:
    /// field assignments are applied in order, and an aggregate stores its
    /// named pairs as fields with positional values collected under
    /// `value`. Hosts with richer construction facilities may override.
    ///
    /// # Errors
    /// Returns an error if the instance cannot be constructed.
    fn instantiate(&self, class: &str, args: ConstructorArgs) -> Result<Annotation> {
        let mut annotation = Annotation::new(class);
        match args {
            ConstructorArgs::Fields(fields) => {
                for (name, value) in fields {
                    annotation.set(name, value);
                }
            }
            ConstructorArgs::Aggregate(arguments) => {
                for (name, value) in arguments.named() {
                    annotation.set(name.clone(), value.clone());
                }
                if !arguments.positional().is_empty() {
                    annotation.set("value", Value::Array(arguments.positional().to_vec()));
                }
            }
        }
        Ok(annotation)
    }
}
