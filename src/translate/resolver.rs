//! Special-case resolvers, tried in order by [`ResourceTranslator`].

use crate::convert::{HashConverter, IdentifierConverter};
use crate::model::{path, Node};
use crate::storage::NodeStore;
use crate::Result;

use super::http::{decode, encode_fragment};
use super::{version, ResourceTranslator};

/// One resolution strategy. Each either handles an identifier or declines
/// (`Ok(None)`), letting the next one try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolver {
    /// `…/fcr:versions/<label>` URIs and frozen snapshot nodes.
    Version,
    /// URIs with a fragment and nodes inside a hash section. The host
    /// part is resolved through the full resolver list, so fragments
    /// compose with version addressing.
    HashUri,
    /// The base translator's chain. Never declines.
    Default,
}

impl Resolver {
    pub fn name(&self) -> &'static str {
        match self {
            Resolver::Version => "version",
            Resolver::HashUri => "hash-uri",
            Resolver::Default => "default",
        }
    }

    pub fn path_from_external<S: NodeStore>(
        &self,
        t: &ResourceTranslator<'_, S>,
        uri: &str,
    ) -> Result<Option<String>> {
        match self {
            Resolver::Version => version::path_from_external(t, uri),
            Resolver::HashUri => hash_path_from_external(t, uri),
            Resolver::Default => t.base().path_from_external(uri),
        }
    }

    pub fn subject_from_internal<S: NodeStore>(
        &self,
        t: &ResourceTranslator<'_, S>,
        node: &Node,
    ) -> Result<Option<String>> {
        match self {
            Resolver::Version => version::subject_from_internal(t, node),
            Resolver::HashUri => hash_subject_from_internal(t, node),
            Resolver::Default => t.base().to_domain(&node.path).map(Some),
        }
    }
}

fn hash_path_from_external<S: NodeStore>(
    t: &ResourceTranslator<'_, S>,
    uri: &str,
) -> Result<Option<String>> {
    let Some((host, fragment)) = uri.split_once('#') else {
        return Ok(None);
    };
    let Some(host_path) = t.path_from_external(host)? else {
        return Ok(None);
    };
    if fragment.is_empty() {
        return Ok(Some(host_path));
    }
    HashConverter
        .convert(format!("{host_path}#{}", decode(fragment)?))
        .map(Some)
}

fn hash_subject_from_internal<S: NodeStore>(
    t: &ResourceTranslator<'_, S>,
    node: &Node,
) -> Result<Option<String>> {
    let (host_path, section) = path::split_hash_section(&node.path);
    if section.is_empty() {
        return Ok(None);
    }
    let host_path = if host_path.is_empty() { path::ROOT } else { host_path };
    let host_uri = t.subject_for_path(host_path)?;

    let external = HashConverter.revert(node.path.clone())?;
    Ok(Some(match external.split_once('#') {
        Some((_, fragment)) => format!("{host_uri}#{}", encode_fragment(fragment)),
        None => host_uri,
    }))
}
