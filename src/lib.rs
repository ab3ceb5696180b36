//! Marginalia - Doc-comment annotation parser with schema validation
//!
//! This crate re-exports all layers of the Marginalia system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: marginalia_language   — Tokenizer, context, schemas, parser
//! Layer 1: marginalia_reflect    — Reflection-provider seam
//! Layer 0: marginalia_foundation — Core types (Value, Annotation, Error)
//! ```

pub use marginalia_foundation as foundation;
pub use marginalia_language as language;
pub use marginalia_reflect as reflect;
