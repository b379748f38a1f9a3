//! # Resource Translation
//!
//! Turns external URIs into internal paths and resources, and nodes back
//! into URIs. A [`ResourceTranslator`] wraps the base [`HttpTranslator`]
//! with an ordered list of [`Resolver`]s:
//!
//! | Order | Resolver | Handles |
//! |-------|----------|---------|
//! | 1 | `Version` | `…/fcr:versions/<label>[/…]`, frozen nodes |
//! | 2 | `HashUri` | URIs with fragments, nodes under `#` |
//! | 3 | `Default` | everything else, via the translation chain |
//!
//! A translator borrows the store and lives for one operation.

pub mod http;
pub mod resolver;
pub mod version;

use tracing::debug;

use crate::convert::NodeResourceConverter;
use crate::model::{Node, ResourceVariant};
use crate::storage::NodeStore;
use crate::vocab::mixins;
use crate::{Error, Result};

pub use http::HttpTranslator;
pub use resolver::Resolver;

pub struct ResourceTranslator<'a, S: NodeStore> {
    store: &'a S,
    base: HttpTranslator,
    resolvers: Vec<Resolver>,
    nodes: NodeResourceConverter,
}

impl<'a, S: NodeStore> ResourceTranslator<'a, S> {
    pub fn new(store: &'a S, base: HttpTranslator) -> Self {
        let mut resolvers = vec![Resolver::Version];
        if base.hash_uris() {
            resolvers.push(Resolver::HashUri);
        }
        resolvers.push(Resolver::Default);
        Self { store, base, resolvers, nodes: NodeResourceConverter }
    }

    /// Replace the resolver list.
    pub fn with_resolvers(mut self, resolvers: Vec<Resolver>) -> Self {
        self.resolvers = resolvers;
        self
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    pub fn base(&self) -> &HttpTranslator {
        &self.base
    }

    pub fn resolvers(&self) -> &[Resolver] {
        &self.resolvers
    }

    pub fn in_domain(&self, uri: &str) -> bool {
        self.base.in_domain(uri)
    }

    /// Internal path for `uri`; `None` outside the domain.
    pub fn path_from_external(&self, uri: &str) -> Result<Option<String>> {
        if !self.in_domain(uri) {
            return Ok(None);
        }
        for resolver in &self.resolvers {
            if let Some(path) = resolver.path_from_external(self, uri)? {
                return Ok(Some(path));
            }
        }
        self.base.path_from_external(uri)
    }

    /// External URI of a node.
    pub fn subject_from_internal(&self, node: &Node) -> Result<String> {
        for resolver in &self.resolvers {
            if let Some(uri) = resolver.subject_from_internal(self, node)? {
                return Ok(uri);
            }
        }
        self.base.to_domain(&node.path)
    }

    /// External URI of a path, using the stored node when there is one.
    pub fn subject_for_path(&self, path: &str) -> Result<String> {
        match self.store.get_node(path)? {
            Some(node) => self.subject_from_internal(&node),
            None => self.subject_from_internal(&Node::new(path, "")),
        }
    }

    /// Resource addressed by `uri`; `None` outside the domain.
    ///
    /// A missing node beneath a tombstone yields [`Error::Tombstone`],
    /// any other missing node [`Error::NotFound`].
    pub fn resolve(&self, uri: &str) -> Result<Option<ResourceVariant>> {
        let Some(path) = self.path_from_external(uri)? else {
            return Ok(None);
        };
        if let Some(node) = self.store.get_node(&path)? {
            let resource = self.nodes.classify(node);
            debug!(%uri, %path, kind = resource.kind(), "resolved");
            return Ok(Some(resource));
        }
        match self.store.closest_existing_ancestor(&path)? {
            Some(ancestor) if ancestor.has_mixin(mixins::TOMBSTONE) => {
                Err(Error::Tombstone(ancestor.path))
            }
            _ => Err(Error::NotFound(uri.to_string())),
        }
    }

    /// External URI of a resource.
    pub fn from_resource(&self, resource: &ResourceVariant) -> Result<String> {
        self.subject_from_internal(resource.node())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslatorConfig;
    use crate::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    const BASE: &str = "http://localhost:8080/rest";

    fn translator(store: &MemoryStore) -> ResourceTranslator<'_, MemoryStore> {
        let config = TranslatorConfig::new(BASE);
        ResourceTranslator::new(store, HttpTranslator::new(BASE, config.translation_chain(None).unwrap()))
    }

    #[test]
    fn test_resolver_order() {
        let store = MemoryStore::new();
        let t = translator(&store);
        assert_eq!(t.resolvers(), &[Resolver::Version, Resolver::HashUri, Resolver::Default]);
        let t = ResourceTranslator::new(
            &store,
            HttpTranslator::new(BASE, crate::convert::TranslationChain::minimal()).with_hash_uris(false),
        );
        assert_eq!(t.resolvers(), &[Resolver::Version, Resolver::Default]);
    }

    #[test]
    fn test_resolve_variants() {
        let store = MemoryStore::new();
        store.find_or_create_node("/box").unwrap();
        store.create_binary("/file", b"x".to_vec()).unwrap();
        let t = translator(&store);

        let container = t.resolve(&format!("{BASE}/box")).unwrap().unwrap();
        assert_eq!(container.kind(), "container");
        let description = t.resolve(&format!("{BASE}/file")).unwrap().unwrap();
        assert_eq!(description.kind(), "binary-description");
        let binary = t.resolve(&format!("{BASE}/file/fcr:content")).unwrap().unwrap();
        assert_eq!(binary.kind(), "binary");
        assert_eq!(t.from_resource(&binary).unwrap(), format!("{BASE}/file/fcr:content"));

        assert_eq!(t.resolve("http://elsewhere/box").unwrap(), None);
    }

    #[test]
    fn test_missing_and_tombstoned() {
        let store = MemoryStore::new();
        store.find_or_create_node("/dead/child").unwrap();
        store.tombstone("/dead").unwrap();
        let t = translator(&store);

        let err = t.resolve(&format!("{BASE}/nothing/here")).unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(t.resolve(&format!("{BASE}/dead/child")), Err(Error::Tombstone(p)) if p == "/dead"));
        assert_eq!(t.resolve(&format!("{BASE}/dead")).unwrap().unwrap().kind(), "tombstone");
    }

    #[test]
    fn test_hash_subject() {
        let store = MemoryStore::new();
        store.find_or_create_node("/a/#/frag%2Fment").unwrap();
        let t = translator(&store);
        let node = store.get_node("/a/#/frag%2Fment").unwrap().unwrap();
        assert_eq!(t.subject_from_internal(&node).unwrap(), format!("{BASE}/a#frag/ment"));
        assert_eq!(
            t.path_from_external(&format!("{BASE}/a#frag/ment")).unwrap().as_deref(),
            Some("/a/#/frag%2Fment")
        );
    }
}
