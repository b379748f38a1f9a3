//! Projection of a node into RDF statements.

use tracing::debug;

use crate::model::{Node, Statement, Term};
use crate::storage::NodeStore;
use crate::translate::ResourceTranslator;
use crate::vocab::{props, rdf};
use crate::Result;

use super::property::{is_reference_placeholder, is_reserved};
use super::{PropertyConverter, ValueConverter};

/// Repository internals never exposed as statements.
const HIDDEN: &[&str] = &[props::FROZEN_UUID, "jcr:data"];

/// Statements describing `node`: one `rdf:type` per user-visible type flag
/// and one statement per property value, properties in name order.
///
/// Reference placeholders, internal bookkeeping properties and names in
/// reserved prefixes are skipped, as are references whose target is gone.
pub fn node_triples<S: NodeStore>(t: &ResourceTranslator<'_, S>, node: &Node) -> Result<Vec<Statement>> {
    let subject = Term::Iri(t.subject_from_internal(node)?);
    let props = PropertyConverter::new(t.store());
    let values = ValueConverter::new(t);
    let mut statements = Vec::new();

    for mixin in &node.mixins {
        if is_reserved(mixin) {
            continue;
        }
        match props.predicate(mixin) {
            Ok(ty) => statements.push(Statement::new(subject.clone(), rdf::TYPE, Term::Iri(ty))),
            Err(e) => debug!(%mixin, error = %e, "type flag without RDF form"),
        }
    }

    let mut names: Vec<&String> = node.properties.keys().collect();
    names.sort();
    for name in names {
        if HIDDEN.contains(&name.as_str()) || is_reserved(name) || is_reference_placeholder(name) {
            continue;
        }
        let predicate = match props.predicate(name) {
            Ok(predicate) => predicate,
            Err(e) => {
                debug!(%name, error = %e, "property without RDF form");
                continue;
            }
        };
        for value in node.values(name) {
            match values.to_term(value) {
                Ok(object) => statements.push(Statement::new(subject.clone(), predicate.clone(), object)),
                Err(e) if e.is_not_found() => debug!(%name, error = %e, "dangling reference"),
                Err(e) => return Err(e),
            }
        }
    }
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslatorConfig;
    use crate::model::{Literal, Value};
    use crate::vocab::{mixins, xsd};
    use crate::{MemoryStore, Repository};
    use pretty_assertions::assert_eq;

    const BASE: &str = "http://localhost:8080/rest";

    #[test]
    fn test_projects_types_and_values() {
        let repo = Repository::open_memory(TranslatorConfig::new(BASE)).unwrap();
        let store = repo.store();
        store.find_or_create_node("/doc").unwrap();
        let ex = store.register_namespace("http://example.org/ns#", Some("ex")).unwrap();
        store.add_mixin("/doc", mixins::CONTAINER).unwrap();
        store.add_mixin("/doc", mixins::VERSIONABLE).unwrap();
        store.add_property_value("/doc", &format!("{ex}:b"), Value::Long(2)).unwrap();
        store.add_property_value("/doc", &format!("{ex}:a"), Value::from("x")).unwrap();
        store.add_property_value("/doc", "ex:a_ref", Value::WeakReference("nope".into())).unwrap();
        store.add_property_value("/doc", "jcr:uuid", Value::from("hidden")).unwrap();

        let subject = Term::iri(format!("{BASE}/doc"));
        assert_eq!(
            repo.triples("/doc").unwrap(),
            vec![
                Statement::new(subject.clone(), rdf::TYPE, Term::iri("http://fedora.info/definitions/v4/fedora#Container")),
                Statement::new(subject.clone(), "http://example.org/ns#a", Literal::string("x")),
                Statement::new(subject, "http://example.org/ns#b", Literal::typed("2", xsd::LONG)),
            ]
        );
    }

    #[test]
    fn test_dangling_reference_skipped() {
        let store = MemoryStore::new();
        store.find_or_create_node("/doc").unwrap();
        store.register_namespace("http://example.org/ns#", Some("ex")).unwrap();
        store.add_property_value("/doc", "ex:link", Value::Reference("gone".into())).unwrap();
        let repo = Repository::with_store(store, TranslatorConfig::new(BASE));
        assert!(repo.triples("/doc").unwrap().is_empty());
        assert!(repo.triples("/missing").unwrap_err().is_not_found());
    }
}
