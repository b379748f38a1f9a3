//! Version snapshot addressing.
//!
//! A snapshot is addressed as `<resource-uri>/fcr:versions/<label>[/<path>]`
//! where `<label>` is either the snapshot's own identifier or a label
//! assigned in the resource's version history.
//!
//! Identifier lookup is tried first. A node found that way only counts if
//! it is a snapshot of the addressed resource; otherwise the segment is
//! looked up as a label. Snapshots and labels share one namespace, so an
//! identifier that happens to name another resource's snapshot falls
//! through to label lookup.

use tracing::{debug, warn};

use crate::convert::{IdentifierConverter, NamespaceConverter};
use crate::model::{path, Node};
use crate::storage::NodeStore;
use crate::vocab::{markers, mixins, props};
use crate::{Error, Result};

use super::http::encode_path;
use super::ResourceTranslator;

/// Internal path of a version URI. `None` when the URI carries no version
/// section (or a fragment, left to the hash-URI resolver).
pub(crate) fn path_from_external<S: NodeStore>(
    t: &ResourceTranslator<'_, S>,
    uri: &str,
) -> Result<Option<String>> {
    if uri.contains('#') {
        return Ok(None);
    }
    let Some(external) = t.base().external_path(uri)? else {
        return Ok(None);
    };

    let segments: Vec<&str> = external.split('/').collect();
    let Some(marker) = segments.iter().position(|s| *s == markers::VERSIONS) else {
        return Ok(None);
    };
    // the bare version listing has no label
    let Some(label) = segments.get(marker + 1).copied().filter(|l| !l.is_empty()) else {
        return Ok(None);
    };

    let resource_external = match segments[..marker].join("/") {
        p if p.is_empty() => path::ROOT.to_string(),
        p => p,
    };
    let resource_path = t.base().chain().convert(resource_external)?;
    let resource = t
        .store()
        .get_node(&resource_path)?
        .ok_or_else(|| Error::NotFound(format!("versioned resource {resource_path}")))?;

    let Some(snapshot) = resolve_label(t.store(), &resource, label)? else {
        warn!(%label, path = %resource_path, "unknown version");
        return Err(Error::NotFound(format!("version {label} of {resource_path}")));
    };

    let rel = segments[marker + 2..].join("/");
    let path = if rel.is_empty() {
        snapshot.path
    } else {
        let rel = NamespaceConverter::default().convert(rel)?;
        path::join(&snapshot.path, &rel)
    };
    debug!(%uri, %path, "resolved version");
    Ok(Some(path))
}

/// Snapshot of `resource` named by `label`.
pub fn resolve_label<S: NodeStore + ?Sized>(
    store: &S,
    resource: &Node,
    label: &str,
) -> Result<Option<Node>> {
    if let Some(candidate) = store.get_node_by_identifier(label)? {
        if is_snapshot_of(&candidate, resource) {
            return Ok(Some(candidate));
        }
        debug!(%label, path = %resource.path, "identifier names another node; trying as label");
    }
    match store.version_by_label(&resource.path, label) {
        Err(Error::Unsupported(_)) => Ok(None),
        other => other,
    }
}

fn is_snapshot_of(candidate: &Node, resource: &Node) -> bool {
    candidate.has_mixin(mixins::FROZEN)
        && candidate.get(props::FROZEN_UUID).and_then(|v| v.as_str()) == Some(resource.identifier.as_str())
}

/// External URI of a frozen node. `None` for live nodes and for nodes
/// inside a hash section.
pub(crate) fn subject_from_internal<S: NodeStore>(
    t: &ResourceTranslator<'_, S>,
    node: &Node,
) -> Result<Option<String>> {
    if !node.has_mixin(mixins::FROZEN) || path::has_hash_section(&node.path) {
        return Ok(None);
    }

    // Walk up until the frozen node whose origin is versionable.
    let mut current = node.clone();
    let mut rel = String::new();
    let origin = loop {
        let origin = match current.get(props::FROZEN_UUID).and_then(|v| v.as_str()) {
            Some(id) => t.store().get_node_by_identifier(id)?,
            None => None,
        };
        if let Some(origin) = origin.filter(|o| o.has_mixin(mixins::VERSIONABLE)) {
            break origin;
        }
        rel = format!("/{}{rel}", current.name());
        let parent = match current.parent_path() {
            Some(p) => t.store().get_node(p)?,
            None => None,
        };
        match parent {
            Some(parent) if parent.has_mixin(mixins::FROZEN) => current = parent,
            _ => {
                debug!(path = %node.path, "frozen node without versioned origin");
                return Ok(None);
            }
        }
    };

    let versioned = t.subject_from_internal(&origin)?;
    let rel = NamespaceConverter::default().revert(rel)?;
    Ok(Some(format!(
        "{}/{}/{}{}",
        versioned.trim_end_matches('/'),
        markers::VERSIONS,
        current.identifier,
        encode_path(&rel)
    )))
}
