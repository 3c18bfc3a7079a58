//! Metadata provider trait
//!
//! The graph engine never inspects a live type system. Anything that can
//! describe types (a parsed source file, a JSON schema, a hand-built list)
//! implements this trait and hands over immutable descriptors.

use anyhow::Result;

use super::types::TypeDescriptor;

/// Source of type descriptors
pub trait MetadataProvider: Send + Sync {
    /// Produce the descriptors, in the order they should be declared
    fn types(&self) -> Result<Vec<TypeDescriptor>>;

    /// Get the name of this provider
    fn name(&self) -> &'static str;
}

/// Manual registration: a list of descriptors is its own provider
impl MetadataProvider for Vec<TypeDescriptor> {
    fn types(&self) -> Result<Vec<TypeDescriptor>> {
        Ok(self.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
