//! Diagram generator
//!
//! Runs the whole pipeline for one request:
//! Provider → Catalog → Builder → Association index → Emitter
//!
//! A generator only holds its configuration. Catalog and edge state live
//! inside a single [`Generator::generate`] call, so repeated calls on the
//! same generator never influence each other.

use anyhow::Result;
use tracing::{debug, info, span, Level};

use crate::core::{DiagramError, GeneratorConfig, MetadataProvider, TypeDescriptor};
use crate::graph::{AssociationIndex, DslEmitter, GraphBuilder, TypeCatalog, TypeFilter};

/// Entry point for turning type descriptors into yUML
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate from descriptors; duplicates by name are dropped, first wins
    pub fn generate<I>(&self, types: I) -> Result<String, DiagramError>
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        let catalog: TypeCatalog = types.into_iter().collect();
        self.generate_catalog(&catalog)
    }

    /// Generate from an already assembled catalog
    pub fn generate_catalog(&self, catalog: &TypeCatalog) -> Result<String, DiagramError> {
        let generate_span = span!(
            Level::INFO,
            "generate",
            types = catalog.len(),
            interface_mode = %self.config.interface_mode,
            non_public = self.config.include_non_public_members
        );
        let _enter = generate_span.enter();

        let build_span = span!(Level::DEBUG, "build_relations");
        let _build_enter = build_span.enter();
        let relations = GraphBuilder::new(catalog, &self.config).build_all();
        let candidate_count: usize = relations.iter().map(|r| r.candidates.len()).sum();
        debug!(candidates = candidate_count, "Relations built");
        drop(_build_enter);

        let merge_span = span!(Level::DEBUG, "merge_associations");
        let _merge_enter = merge_span.enter();
        let mut associations = AssociationIndex::new();
        for relation in &relations {
            associations.observe_all(&relation.candidates)?;
        }
        debug!(associations = associations.len(), "Associations merged");
        drop(_merge_enter);

        let yuml = DslEmitter::new(catalog, &self.config).emit(&relations, &associations);
        info!(length = yuml.len(), "Diagram generated");
        Ok(yuml)
    }

    /// Pull descriptors from a provider, then generate
    pub fn generate_from(&self, provider: &dyn MetadataProvider) -> Result<String> {
        self.generate_from_filtered(provider, None)
    }

    /// Generate from the provider types accepted by `filter`
    ///
    /// Rejected types are absent from the catalog, so edges to them vanish
    /// too.
    pub fn generate_from_filtered(
        &self,
        provider: &dyn MetadataProvider,
        filter: Option<TypeFilter<'_>>,
    ) -> Result<String> {
        let mut catalog = TypeCatalog::new();
        let added = catalog.add_from(provider, filter)?;
        debug!(provider = provider.name(), types = added, "Descriptors loaded");
        Ok(self.generate_catalog(&catalog)?)
    }
}
