//! Graph builder
//!
//! Computes, for a single type, the node it contributes and the candidate
//! relationships it originates. Only the type's own declarations are read:
//! its direct base, its implemented interfaces and the members declared on
//! it. Inherited members are the ancestor's business.

use tracing::{debug, trace};

use super::association::{AssociationCandidate, Multiplicity};
use super::catalog::TypeCatalog;
use crate::core::{GeneratorConfig, TypeDescriptor, TypeKind, TypeShape};

/// `[Base]^-[Derived]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InheritanceEdge {
    pub base: String,
    pub derived: String,
}

/// `[<<Interface>>]^-.-[Implementor]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceEdge {
    pub interface: String,
    pub implementor: String,
}

/// Everything one type contributes to the diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRelations {
    pub name: String,
    /// Node to declare, if the type is visible on its own
    pub node: Option<TypeKind>,
    pub interface_edges: Vec<InterfaceEdge>,
    pub inheritance: Option<InheritanceEdge>,
    /// At most one candidate per target type
    pub candidates: Vec<AssociationCandidate>,
}

/// Per-type relationship extraction against a fixed catalog
pub struct GraphBuilder<'a> {
    catalog: &'a TypeCatalog,
    config: &'a GeneratorConfig,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(catalog: &'a TypeCatalog, config: &'a GeneratorConfig) -> Self {
        Self { catalog, config }
    }

    /// Relations of every catalog type, in catalog order
    pub fn build_all(&self) -> Vec<TypeRelations> {
        self.catalog.iter().map(|ty| self.build(ty)).collect()
    }

    pub fn build(&self, ty: &TypeDescriptor) -> TypeRelations {
        match ty.kind {
            TypeKind::Interface => TypeRelations {
                name: ty.name.clone(),
                node: self.config.is_explicit().then_some(TypeKind::Interface),
                interface_edges: Vec::new(),
                inheritance: None,
                candidates: Vec::new(),
            },
            TypeKind::Class => TypeRelations {
                name: ty.name.clone(),
                node: Some(TypeKind::Class),
                interface_edges: self.interface_edges(ty),
                inheritance: self.inheritance(ty),
                candidates: self.associations(ty),
            },
        }
    }

    fn interface_edges(&self, ty: &TypeDescriptor) -> Vec<InterfaceEdge> {
        if !self.config.is_explicit() {
            return Vec::new();
        }
        self.catalog
            .implemented_interfaces(ty)
            .into_iter()
            .map(|interface| InterfaceEdge {
                interface: interface.to_string(),
                implementor: ty.name.clone(),
            })
            .collect()
    }

    // Direct parent only; an absent base ends the chain for this type.
    fn inheritance(&self, ty: &TypeDescriptor) -> Option<InheritanceEdge> {
        let base = ty.base.as_deref()?;
        if !self.catalog.contains(base) {
            trace!(derived = %ty.name, base, "Base not in catalog");
            return None;
        }
        Some(InheritanceEdge {
            base: base.to_string(),
            derived: ty.name.clone(),
        })
    }

    fn associations(&self, ty: &TypeDescriptor) -> Vec<AssociationCandidate> {
        let mut candidates: Vec<AssociationCandidate> = Vec::new();

        for member in &ty.members {
            if !self.config.scans(member.visibility) {
                trace!(owner = %ty.name, member = %member.name, "Skipping non-public member");
                continue;
            }

            match &member.shape {
                TypeShape::Single { name } => {
                    if self.catalog.contains(name) {
                        note(&mut candidates, &ty.name, name, Multiplicity::One);
                    }
                }
                // A wrapper that is itself a catalog type is referenced as-is.
                TypeShape::Container { container, .. } if self.catalog.contains(container) => {
                    note(&mut candidates, &ty.name, container, Multiplicity::One);
                }
                TypeShape::Container {
                    element,
                    type_arguments,
                    iterable: true,
                    ..
                } => match element.as_ref().or(type_arguments.first()) {
                    Some(element) if self.catalog.contains(element) => {
                        note(&mut candidates, &ty.name, element, Multiplicity::Many);
                    }
                    Some(_) => {}
                    None => {
                        debug!(owner = %ty.name, member = %member.name, "Collection without element type skipped");
                    }
                },
                TypeShape::Container {
                    type_arguments,
                    iterable: false,
                    ..
                } => {
                    if type_arguments.is_empty() {
                        debug!(owner = %ty.name, member = %member.name, "Wrapper without type arguments skipped");
                    }
                    for argument in type_arguments {
                        if self.catalog.contains(argument) {
                            note(&mut candidates, &ty.name, argument, Multiplicity::One);
                        }
                    }
                }
            }
        }

        candidates
    }
}

// Collapse repeated targets into one candidate; any iterable member makes it many.
fn note(
    candidates: &mut Vec<AssociationCandidate>,
    source: &str,
    target: &str,
    multiplicity: Multiplicity,
) {
    match candidates.iter_mut().find(|c| c.target == target) {
        Some(existing) => existing.multiplicity = existing.multiplicity.merge(multiplicity),
        None => candidates.push(AssociationCandidate::new(source, target, multiplicity)),
    }
}
