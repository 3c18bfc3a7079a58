//! Relationship graph engine
//!
//! catalog → builder (per type) → association index (merge) → emitter.

pub mod association;
pub mod builder;
pub mod catalog;
pub mod emitter;

pub use association::{AssociationCandidate, AssociationEdge, AssociationIndex, Multiplicity};
pub use builder::{GraphBuilder, InheritanceEdge, InterfaceEdge, TypeRelations};
pub use catalog::{TypeCatalog, TypeFilter};
pub use emitter::DslEmitter;
