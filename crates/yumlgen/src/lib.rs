//! yumlgen - Derive yUML class diagrams from type descriptors
//!
//! Given a set of types, yumlgen decides which inheritance edges, interface
//! edges and field associations exist between them and writes the result in
//! the yUML class diagram DSL.
//!
//! # Quick Start
//!
//! ```rust
//! use yumlgen::{generate, GeneratorConfig, MemberDescriptor, TypeDescriptor, TypeShape};
//!
//! let types = vec![
//!     TypeDescriptor::class("Animal"),
//!     TypeDescriptor::class("Bird").with_base("Animal"),
//!     TypeDescriptor::class("Eagle")
//!         .with_base("Bird")
//!         .with_member(MemberDescriptor::new("claw", TypeShape::single("Claw"))),
//!     TypeDescriptor::class("Claw"),
//! ];
//!
//! let yuml = generate(types, GeneratorConfig::default()).unwrap();
//! assert_eq!(yuml, "[Animal],[Bird],[Animal]^-[Bird],[Eagle],[Bird]^-[Eagle],[Eagle]->[Claw],[Claw]");
//! ```
//!
//! # Declaration Sources
//!
//! ```rust
//! use yumlgen::prelude::*;
//!
//! let provider = DeclarationProvider::new(
//!     "class A { b: B }\n\
//!      class B { a: A }",
//! );
//! let yuml = Generator::default().generate_from(&provider).unwrap();
//! assert_eq!(yuml, "[A],[A]<->[B],[B]");
//! ```
//!
//! Only the order of node declarations is guaranteed. Compare edge lists as
//! sets (see [`entries`]).

pub mod core;
pub mod generator;
pub mod graph;
pub mod providers;
pub mod service;

use std::collections::HashSet;

pub use crate::core::*;
pub use generator::Generator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        DiagramError, GeneratorConfig, InterfaceMode, MemberDescriptor, MetadataProvider,
        TypeDescriptor, TypeKind, TypeShape, Visibility,
    };
    pub use crate::generator::Generator;
    pub use crate::graph::{AssociationIndex, DslEmitter, GraphBuilder, Multiplicity, TypeCatalog};
    pub use crate::providers::{DeclarationProvider, JsonProvider};
    pub use crate::service::{DiagramService, DiagramStyle, RenderedDiagram, YumlClient};
}

/// Generate yUML for `types` with the given configuration
///
/// # Example
/// ```rust
/// use yumlgen::{generate, GeneratorConfig};
///
/// assert_eq!(generate(Vec::new(), GeneratorConfig::default()).unwrap(), "");
/// ```
pub fn generate(
    types: Vec<TypeDescriptor>,
    config: GeneratorConfig,
) -> Result<String, DiagramError> {
    Generator::new(config).generate(types)
}

/// Parse a declaration source and generate yUML from it
///
/// # Example
/// ```rust
/// use yumlgen::{generate_from_declarations, GeneratorConfig};
///
/// let yuml = generate_from_declarations(
///     "interface IShiny\nclass Key { shine: IShiny }",
///     GeneratorConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(yuml, "[Key],[Key]->[<<IShiny>>]");
/// ```
pub fn generate_from_declarations(source: &str, config: GeneratorConfig) -> anyhow::Result<String> {
    let provider = providers::DeclarationProvider::new(source);
    Generator::new(config).generate_from(&provider)
}

/// Generate yUML and hand it to a rendering service
///
/// The DSL is finalized before the service is called; a service failure
/// fails the whole request.
pub fn render_diagram(
    service: &dyn service::DiagramService,
    types: Vec<TypeDescriptor>,
    config: GeneratorConfig,
    style: service::DiagramStyle,
) -> anyhow::Result<service::RenderedDiagram> {
    let yuml = generate(types, config)?;
    service.render(&yuml, style)
}

/// Split yUML output into its entries as a set
///
/// Edge order is unspecified, so outputs should be compared this way.
pub fn entries(yuml: &str) -> HashSet<&str> {
    yuml.split(',').filter(|entry| !entry.is_empty()).collect()
}
