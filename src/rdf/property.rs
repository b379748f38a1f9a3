//! Predicate ↔ property name mapping.

use tracing::debug;

use crate::storage::NodeStore;
use crate::vocab::{markers::REFERENCE_SUFFIX, ns};
use crate::{Error, Result};

/// Maps RDF predicates (and type IRIs) to prefixed property names and
/// back, registering unseen namespaces on demand.
pub struct PropertyConverter<'a, S: NodeStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: NodeStore + ?Sized> PropertyConverter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// `http://purl.org/dc/elements/1.1/title` → `ns001:title`.
    ///
    /// Names in a reserved prefix are rejected.
    pub fn property_name(&self, predicate: &str) -> Result<String> {
        let (namespace, local) = split_iri(predicate)?;
        let namespace = ns::internal_for_rdf(namespace);
        let prefix = match self.store.namespace_prefix(namespace)? {
            Some(prefix) => prefix,
            None => {
                let prefix = self.store.register_namespace(namespace, None)?;
                debug!(%namespace, %prefix, "registered namespace for predicate");
                prefix
            }
        };
        if ns::RESERVED_PREFIXES.contains(&prefix.as_str()) {
            return Err(Error::ReservedNamespace(format!("{predicate} maps into {prefix}:")));
        }
        Ok(format!("{prefix}:{local}"))
    }

    /// Inverse of [`property_name`](Self::property_name). Reference
    /// placeholders have no predicate and are reported as unsupported.
    pub fn predicate(&self, property_name: &str) -> Result<String> {
        if is_reference_placeholder(property_name) {
            return Err(Error::Unsupported(format!(
                "{property_name} is an internal reference placeholder"
            )));
        }
        let Some((prefix, local)) = property_name.split_once(':') else {
            return Err(Error::Conversion(format!("{property_name} has no namespace prefix")));
        };
        let uri = self
            .store
            .namespace_uri(prefix)?
            .ok_or_else(|| Error::NotFound(format!("namespace prefix {prefix}")))?;
        Ok(format!("{}{local}", ns::rdf_for_internal(&uri)))
    }
}

/// Whether `name` is a synthesized reference placeholder.
pub fn is_reference_placeholder(name: &str) -> bool {
    name.ends_with(REFERENCE_SUFFIX)
}

/// Placeholder property recording references made through `name`.
pub fn reference_property_name(name: &str) -> String {
    format!("{name}{REFERENCE_SUFFIX}")
}

/// Whether `name` lies in a reserved prefix.
pub fn is_reserved(name: &str) -> bool {
    name.split_once(':')
        .is_some_and(|(prefix, _)| ns::RESERVED_PREFIXES.contains(&prefix))
}

/// Split an IRI into namespace and local name at the last `#` or `/`.
fn split_iri(iri: &str) -> Result<(&str, &str)> {
    let ix = iri
        .rfind(['#', '/'])
        .ok_or_else(|| Error::Conversion(format!("{iri} has no namespace")))?;
    let (namespace, local) = (&iri[..=ix], &iri[ix + 1..]);
    if local.is_empty() {
        return Err(Error::Conversion(format!("{iri} has no local name")));
    }
    Ok((namespace, local))
}
