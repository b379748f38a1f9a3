//! Blank node skolemization.
//!
//! Each blank node seen during one write operation is replaced by a fresh
//! resource under the skolem container, laid out as a pairtree:
//!
//! ```text
//! _:b0  →  /.well-known/genid/3f/2a/9c/01/3f2a9c01-…
//! ```
//!
//! The same blank label maps to the same resource for the lifetime of the
//! [`Skolemizer`]. Intermediate pairtree nodes created on the way are
//! flagged so they can be told apart from real containers.

use hashbrown::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::convert::{HierarchyConverter, IdentifierConverter};
use crate::model::{path, BlankId, Statement, Term};
use crate::storage::NodeStore;
use crate::translate::ResourceTranslator;
use crate::vocab::mixins;
use crate::{Error, Result};

pub struct Skolemizer {
    container: String,
    pairtree: HierarchyConverter,
    minted: HashMap<BlankId, String>,
}

impl Skolemizer {
    pub fn new(container: impl Into<String>, pairtree: HierarchyConverter) -> Self {
        Self { container: container.into(), pairtree, minted: HashMap::new() }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Number of blank nodes replaced so far.
    pub fn len(&self) -> usize {
        self.minted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minted.is_empty()
    }

    /// URI minted for `blank`, if any.
    pub fn get(&self, blank: &BlankId) -> Option<&str> {
        self.minted.get(blank).map(String::as_str)
    }

    /// Replace a blank term by its skolem URI; other terms pass through.
    pub fn skolemize<S: NodeStore>(&mut self, t: &ResourceTranslator<'_, S>, term: &Term) -> Result<Term> {
        match term {
            Term::Blank(blank) => Ok(Term::Iri(self.mint(t, blank)?)),
            other => Ok(other.clone()),
        }
    }

    /// Skolemize subject and object of a statement.
    pub fn skolemize_statement<S: NodeStore>(
        &mut self,
        t: &ResourceTranslator<'_, S>,
        statement: &Statement,
    ) -> Result<Statement> {
        Ok(Statement {
            subject: self.skolemize(t, &statement.subject)?,
            predicate: statement.predicate.clone(),
            object: self.skolemize(t, &statement.object)?,
        })
    }

    fn mint<S: NodeStore>(&mut self, t: &ResourceTranslator<'_, S>, blank: &BlankId) -> Result<String> {
        if let Some(uri) = self.minted.get(blank) {
            return Ok(uri.clone());
        }
        let leaf = Uuid::new_v4().to_string();
        let uri = self.mint_leaf(t, blank, &leaf)?;
        Ok(uri)
    }

    fn mint_leaf<S: NodeStore>(
        &mut self,
        t: &ResourceTranslator<'_, S>,
        blank: &BlankId,
        leaf: &str,
    ) -> Result<String> {
        let store = t.store();
        store.find_or_create_node(&self.container)?;

        let path = self.pairtree.convert(path::join(&self.container, leaf))?;
        let existing = store
            .closest_existing_ancestor(&path)?
            .map(|n| n.path)
            .unwrap_or_else(|| path::ROOT.to_string());

        store.find_or_create_node(&path)?;
        store.add_mixin(&path, mixins::SKOLEM)?;

        // flag the intermediate nodes this call brought into existence
        let mut current = path::parent(&path);
        while let Some(p) = current {
            if p == self.container || path::relative_to(p, &existing).is_some() {
                break;
            }
            store.add_mixin(p, mixins::PAIRTREE)?;
            current = path::parent(p);
        }

        let uri = t.subject_for_path(&path)?;
        debug!(%blank, %uri, "skolemized");
        self.minted.insert(blank.clone(), uri.clone());
        Ok(uri)
    }
}

/// Make sure the resource behind an in-domain hash URI exists.
///
/// The hash resource is created together with its `#` container, but only
/// when the resource hosting the fragment already exists.
pub fn ensure_hash_resource<S: NodeStore>(t: &ResourceTranslator<'_, S>, iri: &str) -> Result<()> {
    if !iri.contains('#') {
        return Ok(());
    }
    let Some(hash_path) = t.path_from_external(iri)? else {
        return Ok(());
    };
    let (host, section) = path::split_hash_section(&hash_path);
    if section.is_empty() {
        return Ok(());
    }
    let store = t.store();
    if store.node_exists(&hash_path)? {
        return Ok(());
    }

    let host = if host.is_empty() { path::ROOT } else { host };
    let hash_container = path::join(host, crate::vocab::markers::HASH);
    let parent = path::parent(&hash_path).unwrap_or(path::ROOT);
    let closest = store.closest_existing_ancestor(&hash_path)?.map(|n| n.path);
    match closest.as_deref() {
        Some(p) if p == parent || (p == host && parent == hash_container) => {}
        _ => return Err(Error::NotFound(format!("no resource to hold {iri}"))),
    }

    let container_is_new = !store.node_exists(&hash_container)?;
    store.find_or_create_node(&hash_path)?;
    if container_is_new {
        store.add_mixin(&hash_container, mixins::PAIRTREE)?;
    }
    store.add_mixin(&hash_path, mixins::RESOURCE)?;
    debug!(%iri, path = %hash_path, "created hash resource");
    Ok(())
}
