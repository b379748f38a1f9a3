//! In-memory node store.
//!
//! This is the reference implementation of `NodeStore`. The tree is a
//! map from absolute path to node, protected by RwLocks.
//!
//! ## Limitations
//!
//! - **No transactions**: writes are applied immediately.
//! - **Lock order**: `nodes` is always taken before `identifiers`;
//!   multi-node operations hold both write locks for their duration.
//! - **Snapshots are deep copies**: `create_version()` clones the whole
//!   subtree under the version storage root.
//!
//! Use this store for:
//! - Testing converters, translators and the RDF bridge
//! - Embedding the translation layer without a persistent backend

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::model::{path, Node, PropertyType, Value};
use crate::vocab::{markers, mixins, ns, props};
use crate::{Error, Result};
use super::NodeStore;

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory resource tree.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

struct MemoryInner {
    nodes: RwLock<HashMap<String, Node>>,
    /// identifier → path
    identifiers: RwLock<HashMap<String, String>>,
    namespaces: RwLock<NamespaceRegistry>,
    /// property name → declared slot type
    property_types: RwLock<HashMap<String, PropertyType>>,
    /// versionable node identifier → its version history
    versions: RwLock<HashMap<String, Vec<VersionEntry>>>,
}

#[derive(Debug, Clone)]
struct VersionEntry {
    label: Option<String>,
    frozen_identifier: String,
}

struct NamespaceRegistry {
    by_prefix: HashMap<String, String>,
    by_uri: HashMap<String, String>,
    generated: u32,
}

impl NamespaceRegistry {
    fn new() -> Self {
        let mut registry = Self { by_prefix: HashMap::new(), by_uri: HashMap::new(), generated: 0 };
        for (prefix, uri) in [
            ("jcr", ns::JCR),
            ("nt", ns::NT),
            ("mix", ns::MIX),
            ("xml", ns::XML),
            ("fedora", ns::FEDORA),
        ] {
            registry.bind(prefix, uri);
        }
        registry
    }

    fn bind(&mut self, prefix: &str, uri: &str) {
        self.by_prefix.insert(prefix.to_string(), uri.to_string());
        self.by_uri.insert(uri.to_string(), prefix.to_string());
    }

    fn register(&mut self, uri: &str, preferred: Option<&str>) -> Result<String> {
        if let Some(prefix) = self.by_uri.get(uri) {
            return Ok(prefix.clone());
        }
        if preferred == Some("fcr") {
            return Err(Error::ReservedNamespace(format!("prefix fcr may not be bound to {uri}")));
        }
        let prefix = match preferred {
            Some(p) if !p.is_empty() && !self.by_prefix.contains_key(p) => p.to_string(),
            _ => loop {
                self.generated += 1;
                let candidate = format!("ns{:03}", self.generated);
                if !self.by_prefix.contains_key(&candidate) {
                    break candidate;
                }
            },
        };
        self.bind(&prefix, uri);
        Ok(prefix)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let store = Self {
            inner: Arc::new(MemoryInner {
                nodes: RwLock::new(HashMap::new()),
                identifiers: RwLock::new(HashMap::new()),
                namespaces: RwLock::new(NamespaceRegistry::new()),
                property_types: RwLock::new(HashMap::new()),
                versions: RwLock::new(HashMap::new()),
            }),
        };
        {
            let mut nodes = store.inner.nodes.write();
            let mut ids = store.inner.identifiers.write();
            create_locked(&mut nodes, &mut ids, path::ROOT);
        }
        store
    }

    /// Declare the slot type of a property name.
    pub fn declare_property_type(&self, name: &str, ty: PropertyType) {
        self.inner.property_types.write().insert(name.to_string(), ty);
    }

    pub fn node_count(&self) -> usize {
        self.inner.nodes.read().len()
    }

    /// Create a binary: a description node at `path` and the content node
    /// beneath it. Returns the description.
    pub fn create_binary(&self, path: &str, content: Vec<u8>) -> Result<Node> {
        self.find_or_create_node(path)?;
        self.add_mixin(path, mixins::BINARY_DESCRIPTION)?;
        let content_path = path::join(path, markers::INTERNAL_CONTENT);
        self.find_or_create_node(&content_path)?;
        self.add_mixin(&content_path, mixins::BINARY)?;
        self.set_property(&content_path, "jcr:data", vec![Value::Binary(content)])?;
        self.get_node(path)?.ok_or_else(|| Error::NotFound(path.to_string()))
    }

    /// Delete the subtree at `path`.
    pub fn remove_node(&self, path: &str) -> Result<()> {
        let path = normalize(path)?;
        let mut nodes = self.inner.nodes.write();
        let mut ids = self.inner.identifiers.write();
        if !nodes.contains_key(&path) {
            return Err(Error::NotFound(path));
        }
        remove_subtree(&mut nodes, &mut ids, &path, true);
        Ok(())
    }

    /// Delete the subtree at `path`, leaving a tombstone in its place.
    pub fn tombstone(&self, path: &str) -> Result<()> {
        let path = normalize(path)?;
        let mut nodes = self.inner.nodes.write();
        let mut ids = self.inner.identifiers.write();
        if !nodes.contains_key(&path) {
            return Err(Error::NotFound(path));
        }
        remove_subtree(&mut nodes, &mut ids, &path, false);
        if let Some(node) = nodes.get_mut(&path) {
            node.properties.clear();
            node.mixins = vec![mixins::TOMBSTONE.to_string()];
        }
        debug!(path = %path, "tombstoned");
        Ok(())
    }

    /// Freeze the subtree at `path` as a new version snapshot.
    ///
    /// The resource becomes versionable. Copies live under the version
    /// storage root, carry the frozen flag and record the identifier of
    /// the node they were taken from. Returns the snapshot root.
    pub fn create_version(&self, path: &str, label: Option<&str>) -> Result<Node> {
        let path = normalize(path)?;
        if path == path::ROOT || path.starts_with(markers::VERSION_STORAGE) {
            return Err(Error::Unsupported(format!("cannot version {path}")));
        }

        let mut nodes = self.inner.nodes.write();
        let mut ids = self.inner.identifiers.write();
        let mut versions = self.inner.versions.write();

        let history_id = nodes
            .get(&path)
            .map(|n| n.identifier.clone())
            .ok_or_else(|| Error::NotFound(path.clone()))?;
        let history = versions.entry(history_id.clone()).or_default();
        if let Some(label) = label {
            if history.iter().any(|v| v.label.as_deref() == Some(label)) {
                return Err(Error::StorageError(format!("label {label} already used for {path}")));
            }
        }
        if let Some(original) = nodes.get_mut(&path) {
            if !original.has_mixin(mixins::VERSIONABLE) {
                original.mixins.push(mixins::VERSIONABLE.to_string());
            }
        }

        let frozen_identifier = Uuid::new_v4().to_string();
        let root_path = format!("{}/{history_id}/{frozen_identifier}", markers::VERSION_STORAGE);
        if let Some(parent) = path::parent(&root_path) {
            create_locked(&mut nodes, &mut ids, parent);
        }

        let subtree: Vec<Node> = nodes
            .values()
            .filter(|n| path::relative_to(&path, &n.path).is_some())
            .cloned()
            .collect();
        for source in subtree {
            let rel = path::relative_to(&path, &source.path).unwrap_or_default();
            let identifier = if rel.is_empty() {
                frozen_identifier.clone()
            } else {
                Uuid::new_v4().to_string()
            };
            let mut frozen = Node::new(path::join(&root_path, rel), identifier);
            frozen.mixins = source
                .mixins
                .iter()
                .filter(|m| m.as_str() != mixins::VERSIONABLE)
                .cloned()
                .collect();
            frozen.mixins.push(mixins::FROZEN.to_string());
            frozen.properties = source.properties.clone();
            frozen
                .properties
                .insert(props::FROZEN_UUID.to_string(), vec![Value::String(source.identifier.clone())]);
            ids.insert(frozen.identifier.clone(), frozen.path.clone());
            nodes.insert(frozen.path.clone(), frozen);
        }

        history.push(VersionEntry {
            label: label.map(str::to_string),
            frozen_identifier: frozen_identifier.clone(),
        });
        debug!(path = %path, version = %frozen_identifier, ?label, "created version");

        nodes.get(&root_path).cloned().ok_or(Error::NotFound(root_path))
    }

    fn update<F>(&self, path: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Node),
    {
        let path = normalize(path)?;
        let mut nodes = self.inner.nodes.write();
        let node = nodes.get_mut(&path).ok_or(Error::NotFound(path))?;
        f(node);
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tree helpers (callers hold the write locks)
// ============================================================================

fn normalize(path: &str) -> Result<String> {
    if !path.starts_with(path::SEPARATOR) {
        return Err(Error::StorageError(format!("path {path:?} is not absolute")));
    }
    let trimmed = path.trim_end_matches(path::SEPARATOR);
    Ok(if trimmed.is_empty() { path::ROOT.to_string() } else { trimmed.to_string() })
}

/// Create `path` and its missing ancestors, top-down.
fn create_locked(
    nodes: &mut HashMap<String, Node>,
    ids: &mut HashMap<String, String>,
    path: &str,
) -> Node {
    let mut missing = Vec::new();
    let mut current = Some(path);
    while let Some(p) = current {
        if nodes.contains_key(p) {
            break;
        }
        missing.push(p.to_string());
        current = path::parent(p);
    }
    for p in missing.into_iter().rev() {
        let node = Node::new(p.clone(), Uuid::new_v4().to_string());
        ids.insert(node.identifier.clone(), p.clone());
        nodes.insert(p, node);
    }
    nodes.get(path).cloned().unwrap_or_else(|| Node::new(path, ""))
}

fn remove_subtree(
    nodes: &mut HashMap<String, Node>,
    ids: &mut HashMap<String, String>,
    path: &str,
    include_self: bool,
) {
    nodes.retain(|p, node| {
        let doomed = match path::relative_to(path, p) {
            Some("") => include_self,
            Some(_) => true,
            None => false,
        };
        if doomed {
            ids.remove(&node.identifier);
        }
        !doomed
    });
}

// ============================================================================
// NodeStore impl
// ============================================================================

impl NodeStore for MemoryStore {
    fn node_exists(&self, path: &str) -> Result<bool> {
        let path = normalize(path)?;
        Ok(self.inner.nodes.read().contains_key(&path))
    }

    fn get_node(&self, path: &str) -> Result<Option<Node>> {
        let path = normalize(path)?;
        Ok(self.inner.nodes.read().get(&path).cloned())
    }

    fn get_node_by_identifier(&self, identifier: &str) -> Result<Option<Node>> {
        let nodes = self.inner.nodes.read();
        let ids = self.inner.identifiers.read();
        Ok(ids.get(identifier).and_then(|p| nodes.get(p)).cloned())
    }

    fn find_or_create_node(&self, path: &str) -> Result<Node> {
        let path = normalize(path)?;
        if let Some(node) = self.inner.nodes.read().get(&path) {
            return Ok(node.clone());
        }
        let mut nodes = self.inner.nodes.write();
        let mut ids = self.inner.identifiers.write();
        Ok(create_locked(&mut nodes, &mut ids, &path))
    }

    fn set_property(&self, path: &str, name: &str, values: Vec<Value>) -> Result<()> {
        self.update(path, |node| {
            if values.is_empty() {
                node.properties.remove(name);
            } else {
                node.properties.insert(name.to_string(), values);
            }
        })
    }

    fn add_property_value(&self, path: &str, name: &str, value: Value) -> Result<()> {
        self.update(path, |node| {
            let values = node.properties.entry(name.to_string()).or_default();
            if !values.contains(&value) {
                values.push(value);
            }
        })
    }

    fn remove_property_value(&self, path: &str, name: &str, value: &Value) -> Result<()> {
        self.update(path, |node| {
            if let Some(values) = node.properties.get_mut(name) {
                values.retain(|v| v != value);
                if values.is_empty() {
                    node.properties.remove(name);
                }
            }
        })
    }

    fn remove_property(&self, path: &str, name: &str) -> Result<()> {
        self.update(path, |node| {
            node.properties.remove(name);
        })
    }

    fn add_mixin(&self, path: &str, mixin: &str) -> Result<()> {
        self.update(path, |node| {
            if !node.has_mixin(mixin) {
                node.mixins.push(mixin.to_string());
            }
        })
    }

    fn remove_mixin(&self, path: &str, mixin: &str) -> Result<()> {
        self.update(path, |node| node.mixins.retain(|m| m != mixin))
    }

    fn property_type(&self, _path: &str, name: &str) -> Result<PropertyType> {
        Ok(self
            .inner
            .property_types
            .read()
            .get(name)
            .copied()
            .unwrap_or(PropertyType::Undefined))
    }

    fn version_by_label(&self, path: &str, label: &str) -> Result<Option<Node>> {
        let Some(node) = self.get_node(path)? else {
            return Ok(None);
        };
        let frozen_identifier = {
            let versions = self.inner.versions.read();
            versions
                .get(&node.identifier)
                .and_then(|history| history.iter().find(|v| v.label.as_deref() == Some(label)))
                .map(|v| v.frozen_identifier.clone())
        };
        match frozen_identifier {
            Some(id) => self.get_node_by_identifier(&id),
            None => Ok(None),
        }
    }

    fn namespace_prefix(&self, uri: &str) -> Result<Option<String>> {
        Ok(self.inner.namespaces.read().by_uri.get(uri).cloned())
    }

    fn namespace_uri(&self, prefix: &str) -> Result<Option<String>> {
        Ok(self.inner.namespaces.read().by_prefix.get(prefix).cloned())
    }

    fn register_namespace(&self, uri: &str, preferred: Option<&str>) -> Result<String> {
        let prefix = self.inner.namespaces.write().register(uri, preferred)?;
        debug!(%uri, %prefix, "namespace registered");
        Ok(prefix)
    }
}
