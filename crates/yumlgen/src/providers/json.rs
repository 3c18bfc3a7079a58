//! JSON schema provider
//!
//! Reads an array of serialized [`TypeDescriptor`]s:
//!
//! ```json
//! [
//!   { "name": "IShiny", "kind": "interface" },
//!   {
//!     "name": "Key",
//!     "interfaces": ["IShiny"],
//!     "members": [
//!       { "name": "shine", "type": { "shape": "single", "name": "IShiny" } },
//!       {
//!         "name": "notches",
//!         "visibility": "non_public",
//!         "type": { "shape": "container", "container": "List", "element": "INotch", "iterable": true }
//!       }
//!     ]
//!   }
//! ]
//! ```

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::core::{DiagramError, MetadataProvider, TypeDescriptor};

/// Provider backed by a JSON document
#[derive(Debug, Clone)]
pub struct JsonProvider {
    document: String,
}

impl JsonProvider {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DiagramError> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }

    pub fn parse(&self) -> Result<Vec<TypeDescriptor>, DiagramError> {
        let types: Vec<TypeDescriptor> = serde_json::from_str(&self.document).map_err(|e| {
            DiagramError::parse_error(e.to_string(), e.line(), e.column())
        })?;
        debug!(types = types.len(), "Loaded JSON descriptors");
        Ok(types)
    }
}

impl MetadataProvider for JsonProvider {
    fn types(&self) -> Result<Vec<TypeDescriptor>> {
        Ok(self.parse()?)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

/// Serialize descriptors in the format [`JsonProvider`] reads
pub fn to_json(types: &[TypeDescriptor]) -> Result<String, DiagramError> {
    serde_json::to_string_pretty(types).map_err(|e| DiagramError::provider_error(e.to_string()))
}
