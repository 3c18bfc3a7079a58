//! Metadata providers
//!
//! Sources of type descriptors for the generator.

pub mod declaration;
pub mod json;

pub use declaration::{parse_type_ref, DeclarationProvider, TypeRef, DEFAULT_ITERABLE_CONTAINERS};
pub use json::{to_json, JsonProvider};
