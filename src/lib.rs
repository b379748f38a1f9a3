//! # ldp-bridge: Identifier Translation for a Versioned Resource Tree
//!
//! Exposes a hierarchical, path-addressed resource store as Linked Data:
//! internal paths map to external resource URIs and back, node properties
//! map to RDF statements and back.
//!
//! ## Design Principles
//!
//! 1. **Invertible converters**: every path step implements
//!    `IdentifierConverter` with both directions, composed into a chain
//! 2. **Clean DTOs**: `Node`, `Value`, `Term`, `Statement` cross all boundaries
//! 3. **Trait-first storage**: `NodeStore` is the only contract with the tree
//! 4. **Operation-scoped state**: translators and statement writers are
//!    built per request; nothing mutable is shared between operations
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ldp_bridge::{Repository, TranslatorConfig, NodeStore};
//!
//! # fn example() -> ldp_bridge::Result<()> {
//! let repo = Repository::open_memory(TranslatorConfig::new("http://localhost:8080/rest"))?;
//! repo.store().find_or_create_node("/some/path")?;
//!
//! let translator = repo.translator(None)?;
//! let path = translator.path_from_external("http://localhost:8080/rest/some/path#frag")?;
//! assert_eq!(path.as_deref(), Some("/some/path/#/frag"));
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod convert;
pub mod model;
pub mod rdf;
pub mod storage;
pub mod translate;
pub mod vocab;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    BlankId, Literal, Node, PropertyMap, PropertyType, ResourceVariant, Statement, Term, Value,
};

// ============================================================================
// Re-exports: Converters, storage, translation, RDF
// ============================================================================

pub use config::{HierarchyConfig, TranslatorConfig};
pub use convert::{IdentifierConverter, NodeResourceConverter, TranslationChain};
pub use rdf::{PropertyConverter, Skolemizer, StatementWriter, ValueConverter};
pub use storage::{MemoryStore, NodeStore};
pub use translate::{HttpTranslator, ResourceTranslator, Resolver};

// ============================================================================
// Top-level Repository handle
// ============================================================================

/// The primary entry point. A `Repository` pairs a node store with the
/// translation configuration and hands out operation-scoped translators
/// and statement writers.
pub struct Repository<S: NodeStore> {
    store: S,
    config: TranslatorConfig,
}

impl<S: NodeStore> Repository<S> {
    pub fn with_store(store: S, config: TranslatorConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translator for one read or write operation, optionally inside a
    /// transaction.
    pub fn translator(&self, tx: Option<&str>) -> Result<ResourceTranslator<'_, S>> {
        let base = HttpTranslator::new(
            self.config.base_uri.clone(),
            self.config.translation_chain(tx)?,
        )
        .with_hash_uris(self.config.hash_uris);
        Ok(ResourceTranslator::new(&self.store, base))
    }

    /// Statement writer for one write operation. Its blank-node map lives
    /// and dies with the writer.
    pub fn writer(&self, tx: Option<&str>) -> Result<StatementWriter<'_, S>> {
        let translator = self.translator(tx)?;
        let skolemizer = Skolemizer::new(
            self.config.skolem_container.clone(),
            self.config.skolem_hierarchy()?,
        );
        Ok(StatementWriter::new(translator, skolemizer))
    }

    /// RDF statements describing the node at `path`.
    pub fn triples(&self, path: &str) -> Result<Vec<Statement>> {
        let node = self
            .store
            .get_node(path)?
            .ok_or_else(|| Error::NotFound(path.to_string()))?;
        rdf::node_triples(&self.translator(None)?, &node)
    }
}

/// In-memory repository for testing and embedding.
impl Repository<MemoryStore> {
    pub fn open_memory(config: TranslatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_store(MemoryStore::new(), config))
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Reserved namespace: {0}")]
    ReservedNamespace(String),

    #[error("Unsupported reference target: {0}")]
    UnsupportedReferenceTarget(String),

    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Path lies beneath a deleted resource: {0}")]
    Tombstone(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error means "no such resource" to a caller.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
