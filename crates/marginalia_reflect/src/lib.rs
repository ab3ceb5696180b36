//! Reflection-provider seam for Marginalia.
//!
//! The parser never inspects host-language declarations directly; it
//! consumes the facts it needs (doc comments, namespaces, imports, public
//! fields, constructors, constants) through the [`Reflector`] trait. Any
//! host introspection facility that can supply these facts can drive the
//! same parser and validator.
//!
//! This crate provides:
//! - [`Site`] - A reference to a source declaration carrying annotations
//! - [`Import`] - One import-alias table entry
//! - [`Reflector`] - The provider trait
//! - [`MemoryReflector`] - An in-memory provider for hosts and tests

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod memory;
mod reflector;
mod site;

pub use memory::{FieldDef, FunctionDef, MemoryReflector, TypeDef};
pub use reflector::{ConstructorArgs, Reflector};
pub use site::{Import, SEPARATOR, Site, namespace_of, short_name};
