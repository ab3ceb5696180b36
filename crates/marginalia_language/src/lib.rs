//! Tokenizer, parser, and schema engine for doc-comment annotations.
//!
//! This crate provides:
//! - `Tokenizer` - Tokenization of doc-comment text
//! - `Parser` - Parsing token streams into annotation instances
//! - `Context` - Symbol resolution against host declarations
//! - `Schema` / `SchemaCache` - Discovery and validation of annotation types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builtin;
pub mod cache;
pub mod context;
pub mod parser;
pub mod schema;
pub mod token;
pub mod tokenizer;


pub use cache::SchemaCache;
pub use context::Context;
pub use parser::Parser;
pub use schema::{Attribute, Schema, ValidationResult};
pub use token::{Token, TokenKind};
pub use tokenizer::Tokenizer;
