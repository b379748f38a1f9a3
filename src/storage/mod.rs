//! # Node Store Trait
//!
//! The contract between the translation layer and whatever holds the
//! resource tree. The layer only needs a handful of capabilities: look
//! nodes up by path or identifier, create them idempotently, edit their
//! properties and type flags, and manage the namespace registry.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory tree for testing/embedding, with snapshot versioning |

pub mod memory;

use crate::model::{path, Node, PropertyType, Value};
use crate::{Error, Result};

pub use memory::MemoryStore;

// ============================================================================
// NodeStore Trait
// ============================================================================

/// Node store capabilities consumed by translators and the RDF bridge.
///
/// Implementations must make [`NodeStore::find_or_create_node`]
/// idempotent under concurrency: two callers racing to create the same
/// path both succeed and observe the same node.
pub trait NodeStore: Send + Sync {
    // ========================================================================
    // Lookup
    // ========================================================================

    fn node_exists(&self, path: &str) -> Result<bool>;

    fn get_node(&self, path: &str) -> Result<Option<Node>>;

    fn get_node_by_identifier(&self, identifier: &str) -> Result<Option<Node>>;

    /// Deepest existing ancestor-or-self of `path`.
    fn closest_existing_ancestor(&self, path: &str) -> Result<Option<Node>> {
        let mut current = Some(path);
        while let Some(p) = current {
            if let Some(node) = self.get_node(p)? {
                return Ok(Some(node));
            }
            current = path::parent(p);
        }
        Ok(None)
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Return the node at `path`, creating it and any missing ancestors.
    fn find_or_create_node(&self, path: &str) -> Result<Node>;

    // ========================================================================
    // Properties and type flags
    // ========================================================================

    /// Replace all values of a property.
    fn set_property(&self, path: &str, name: &str, values: Vec<Value>) -> Result<()>;

    /// Append one value; duplicates are ignored.
    fn add_property_value(&self, path: &str, name: &str, value: Value) -> Result<()>;

    /// Remove one value; the property disappears with its last value.
    fn remove_property_value(&self, path: &str, name: &str, value: &Value) -> Result<()>;

    fn remove_property(&self, path: &str, name: &str) -> Result<()>;

    fn add_mixin(&self, path: &str, mixin: &str) -> Result<()>;

    fn remove_mixin(&self, path: &str, mixin: &str) -> Result<()>;

    /// Declared type of a property slot. Stores without property
    /// definitions report `Undefined`.
    fn property_type(&self, _path: &str, _name: &str) -> Result<PropertyType> {
        Ok(PropertyType::Undefined)
    }

    // ========================================================================
    // Versions
    // ========================================================================

    /// Frozen snapshot root of the resource at `path` carrying `label`.
    fn version_by_label(&self, _path: &str, _label: &str) -> Result<Option<Node>> {
        Err(Error::Unsupported("version labels not supported by this store".into()))
    }

    // ========================================================================
    // Namespace registry
    // ========================================================================

    fn namespace_prefix(&self, uri: &str) -> Result<Option<String>>;

    fn namespace_uri(&self, prefix: &str) -> Result<Option<String>>;

    /// Register `uri`, returning its prefix. An already registered URI
    /// keeps its prefix; otherwise `preferred` is used when free, or a
    /// fresh prefix is generated.
    fn register_namespace(&self, uri: &str, preferred: Option<&str>) -> Result<String>;
}
