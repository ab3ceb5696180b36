//! Core types, values, and errors for Marginalia.
//!
//! This crate provides:
//! - [`Value`] - The value type carried by annotation arguments
//! - [`Annotation`] - The generic annotation instance record
//! - [`Arguments`] - Ordered positional/named argument collection
//! - [`Target`] - Closed set of declaration kinds an annotation may decorate
//! - [`ElementType`] - Declared attribute type descriptors
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod annotation;
mod error;
mod target;
mod types;
mod value;

pub use annotation::{Annotation, Arguments};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use target::Target;
pub use types::ElementType;
pub use value::Value;
