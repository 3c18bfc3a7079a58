//! yUML emitter
//!
//! Serializes built relations and merged associations into the yUML class
//! diagram DSL:
//!
//! ```text
//! [<<IBirdOfPrey>>;Eagle]        class node with inline interface tag
//! [<<IAnimalPrey>>]              interface node (explicit mode)
//! [Bird]^-[Eagle]                inheritance
//! [<<IAnimalPrey>>]^-.-[Swallow] interface implementation (explicit mode)
//! [Eagle]->[Claw]                one-way association
//! [A]<->[B]                      two-way association
//! [Eagle]1-0..*[Wing]            one-way association with a many side
//! [A]<1-0..*>[B]                 two-way association with a many side
//! ```

use std::collections::HashSet;

use super::association::{AssociationEdge, AssociationIndex};
use super::builder::{InheritanceEdge, InterfaceEdge, TypeRelations};
use super::catalog::TypeCatalog;
use crate::core::{GeneratorConfig, TypeKind};

/// Renders the diagram text
pub struct DslEmitter<'a> {
    catalog: &'a TypeCatalog,
    config: &'a GeneratorConfig,
}

impl<'a> DslEmitter<'a> {
    pub fn new(catalog: &'a TypeCatalog, config: &'a GeneratorConfig) -> Self {
        Self { catalog, config }
    }

    /// Node declarations follow `relations` order; each type's own edges
    /// follow its node. Every entry appears once.
    pub fn emit(&self, relations: &[TypeRelations], associations: &AssociationIndex) -> String {
        let mut entries: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut push = |entry: String| {
            if seen.insert(entry.clone()) {
                entries.push(entry);
            }
        };

        for relation in relations {
            if let Some(kind) = relation.node {
                push(self.node(&relation.name, kind));
            }
            for edge in &relation.interface_edges {
                push(self.interface_edge(edge));
            }
            if let Some(edge) = &relation.inheritance {
                push(self.inheritance_edge(edge));
            }
            for edge in associations.edges_from(&relation.name) {
                push(self.association(edge));
            }
        }

        entries.join(",")
    }

    /// Text inside the brackets for a type
    pub fn label(&self, name: &str) -> String {
        let Some(descriptor) = self.catalog.get(name) else {
            return name.to_string();
        };
        if descriptor.is_interface() {
            return format!("<<{}>>", name);
        }
        if self.config.is_explicit() {
            return name.to_string();
        }

        let mut label = String::new();
        for interface in self.catalog.implemented_interfaces(descriptor) {
            label.push_str(&format!("<<{}>>;", interface));
        }
        label.push_str(name);
        label
    }

    fn node(&self, name: &str, kind: TypeKind) -> String {
        match kind {
            TypeKind::Interface => format!("[<<{}>>]", name),
            TypeKind::Class => format!("[{}]", self.label(name)),
        }
    }

    fn interface_edge(&self, edge: &InterfaceEdge) -> String {
        format!("[<<{}>>]^-.-[{}]", edge.interface, self.label(&edge.implementor))
    }

    fn inheritance_edge(&self, edge: &InheritanceEdge) -> String {
        format!("[{}]^-[{}]", self.label(&edge.base), self.label(&edge.derived))
    }

    fn association(&self, edge: &AssociationEdge) -> String {
        let first = self.label(&edge.first);
        let second = self.label(&edge.second);

        match (edge.has_many(), edge.is_bidirectional()) {
            (false, false) => format!("[{}]->[{}]", first, second),
            (false, true) => format!("[{}]<->[{}]", first, second),
            (true, false) => format!(
                "[{}]{}-{}[{}]",
                first, edge.first_multiplicity, edge.second_multiplicity, second
            ),
            (true, true) => format!(
                "[{}]<{}-{}>[{}]",
                first, edge.first_multiplicity, edge.second_multiplicity, second
            ),
        }
    }
}
