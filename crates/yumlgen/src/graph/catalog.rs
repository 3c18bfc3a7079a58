//! Type catalog
//!
//! The set of types a diagram is drawn from. Every inclusion decision in the
//! builder is a membership test against this set.

use std::collections::HashMap;

use anyhow::Result;
use tracing::debug;

use crate::core::{MetadataProvider, TypeDescriptor};

/// Predicate deciding which provider types enter a catalog
pub type TypeFilter<'a> = &'a dyn Fn(&TypeDescriptor) -> bool;

/// Insertion-ordered set of type descriptors keyed by name
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: Vec<TypeDescriptor>,
    index: HashMap<String, usize>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type. Returns false if a type with the same name was already
    /// present; the first descriptor wins.
    pub fn add(&mut self, descriptor: TypeDescriptor) -> bool {
        if self.index.contains_key(&descriptor.name) {
            return false;
        }
        self.index.insert(descriptor.name.clone(), self.types.len());
        self.types.push(descriptor);
        true
    }

    pub fn add_all<I>(&mut self, descriptors: I)
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        for descriptor in descriptors {
            self.add(descriptor);
        }
    }

    /// Add every type `provider` yields that passes `filter`, or all of them
    /// without a filter. Returns how many were newly added.
    pub fn add_from(
        &mut self,
        provider: &dyn MetadataProvider,
        filter: Option<TypeFilter<'_>>,
    ) -> Result<usize> {
        let types = provider.types()?;
        let offered = types.len();
        let mut added = 0;
        for descriptor in types {
            if filter.map_or(true, |keep| keep(&descriptor)) && self.add(descriptor) {
                added += 1;
            }
        }
        debug!(provider = provider.name(), offered, added, "Provider types added");
        Ok(added)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.index.get(name).map(|&i| &self.types[i])
    }

    pub fn is_interface(&self, name: &str) -> bool {
        self.get(name).is_some_and(TypeDescriptor::is_interface)
    }

    /// Interfaces implemented by `descriptor` that are themselves in the
    /// catalog, deduplicated, in declaration order
    pub fn implemented_interfaces<'a>(&self, descriptor: &'a TypeDescriptor) -> Vec<&'a str> {
        let mut found: Vec<&str> = Vec::new();
        for interface in &descriptor.interfaces {
            if self.contains(interface) && !found.contains(&interface.as_str()) {
                found.push(interface);
            }
        }
        found
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FromIterator<TypeDescriptor> for TypeCatalog {
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        let mut catalog = TypeCatalog::new();
        catalog.add_all(iter);
        catalog
    }
}

impl Extend<TypeDescriptor> for TypeCatalog {
    fn extend<I: IntoIterator<Item = TypeDescriptor>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}
