//! Applies RDF statements to the node tree.

use tracing::{debug, trace};

use crate::model::{PropertyType, Statement, Term, Value};
use crate::storage::NodeStore;
use crate::translate::ResourceTranslator;
use crate::vocab::rdf;
use crate::{Error, Result};

use super::property::reference_property_name;
use super::skolem::ensure_hash_resource;
use super::{PropertyConverter, Skolemizer, ValueConverter};

/// Writes statements about resources in one operation.
///
/// Owns the operation's [`Skolemizer`], so blank labels are stable across
/// every statement passed to the same writer and forgotten afterwards.
pub struct StatementWriter<'a, S: NodeStore> {
    translator: ResourceTranslator<'a, S>,
    skolemizer: Skolemizer,
}

/// Statement with both ends mapped into the tree.
struct Target {
    path: String,
    property: String,
    object: Term,
}

impl<'a, S: NodeStore> StatementWriter<'a, S> {
    pub fn new(translator: ResourceTranslator<'a, S>, skolemizer: Skolemizer) -> Self {
        Self { translator, skolemizer }
    }

    pub fn translator(&self) -> &ResourceTranslator<'a, S> {
        &self.translator
    }

    pub fn skolemizer(&self) -> &Skolemizer {
        &self.skolemizer
    }

    /// Add one statement.
    ///
    /// `rdf:type` statements add a type flag; anything else adds a property
    /// value. An in-domain IRI stored in a slot that is not a reference also
    /// records a weak reference placeholder next to the property.
    pub fn insert(&mut self, statement: &Statement) -> Result<()> {
        let statement = self.skolemizer.skolemize_statement(&self.translator, statement)?;
        for term in [&statement.subject, &statement.object] {
            if let Term::Iri(iri) = term {
                if self.translator.in_domain(iri) {
                    ensure_hash_resource(&self.translator, iri)?;
                }
            }
        }
        let target = self.target(&statement)?;
        let store = self.translator.store();

        if statement.predicate == rdf::TYPE {
            store.add_mixin(&target.path, &target.property)?;
            debug!(path = %target.path, mixin = %target.property, "added type");
            return Ok(());
        }

        let slot = store.property_type(&target.path, &target.property)?;
        let value = ValueConverter::new(&self.translator).to_value(&target.object, slot)?;
        store.add_property_value(&target.path, &target.property, value)?;
        if let Some(placeholder) = self.placeholder(&target.object, slot)? {
            store.add_property_value(&target.path, &reference_property_name(&target.property), placeholder)?;
        }
        trace!(path = %target.path, property = %target.property, "added value");
        Ok(())
    }

    /// Remove one statement. Blank nodes cannot be matched and are rejected.
    pub fn delete(&mut self, statement: &Statement) -> Result<()> {
        if statement.subject.is_blank() || statement.object.is_blank() {
            return Err(Error::Conversion(format!("cannot delete a statement with blank nodes: {statement}")));
        }
        let target = self.target(statement)?;
        let store = self.translator.store();

        if statement.predicate == rdf::TYPE {
            store.remove_mixin(&target.path, &target.property)?;
            debug!(path = %target.path, mixin = %target.property, "removed type");
            return Ok(());
        }

        let slot = store.property_type(&target.path, &target.property)?;
        let value = ValueConverter::new(&self.translator).to_value(&target.object, slot)?;
        store.remove_property_value(&target.path, &target.property, &value)?;
        if let Some(placeholder) = self.placeholder(&target.object, slot)? {
            store.remove_property_value(&target.path, &reference_property_name(&target.property), &placeholder)?;
        }
        Ok(())
    }

    /// Insert every statement, stopping at the first failure.
    pub fn insert_all<'s>(&mut self, statements: impl IntoIterator<Item = &'s Statement>) -> Result<usize> {
        let mut count = 0;
        for statement in statements {
            self.insert(statement)?;
            count += 1;
        }
        Ok(count)
    }

    fn target(&self, statement: &Statement) -> Result<Target> {
        let Term::Iri(subject) = &statement.subject else {
            return Err(Error::Conversion(format!("subject must be an IRI: {}", statement.subject)));
        };
        let path = self
            .translator
            .path_from_external(subject)?
            .ok_or_else(|| Error::Conversion(format!("subject {subject} lies outside the repository")))?;
        if !self.translator.store().node_exists(&path)? {
            return Err(Error::NotFound(subject.clone()));
        }

        let props = PropertyConverter::new(self.translator.store());
        let property = if statement.predicate == rdf::TYPE {
            let Term::Iri(ty) = &statement.object else {
                return Err(Error::TypeMismatch {
                    expected: "IRI".to_string(),
                    got: statement.object.to_string(),
                });
            };
            props.property_name(ty)?
        } else {
            props.property_name(&statement.predicate)?
        };
        Ok(Target { path, property, object: statement.object.clone() })
    }

    /// Weak reference placeholder for an in-domain IRI stored as a plain
    /// URI. `None` when the slot already holds references or the target
    /// does not exist.
    fn placeholder(&self, object: &Term, slot: PropertyType) -> Result<Option<Value>> {
        let Term::Iri(iri) = object else {
            return Ok(None);
        };
        if slot.is_reference() {
            return Ok(None);
        }
        let Some(path) = self.translator.path_from_external(iri)? else {
            return Ok(None);
        };
        Ok(self
            .translator
            .store()
            .get_node(&path)?
            .map(|node| Value::WeakReference(node.identifier)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslatorConfig;
    use crate::model::Literal;
    use crate::vocab::mixins;
    use crate::{MemoryStore, Repository};
    use pretty_assertions::assert_eq;

    const BASE: &str = "http://localhost:8080/rest";
    const TITLE: &str = "http://purl.org/dc/elements/1.1/title";
    const SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";

    fn repo() -> Repository<MemoryStore> {
        let repo = Repository::open_memory(TranslatorConfig::new(BASE)).unwrap();
        repo.store().find_or_create_node("/doc").unwrap();
        repo
    }

    fn doc() -> Term {
        Term::iri(format!("{BASE}/doc"))
    }

    #[test]
    fn test_insert_and_delete_literal() {
        let repo = repo();
        let mut writer = repo.writer(None).unwrap();
        let st = Statement::new(doc(), TITLE, Literal::string("Hello"));
        writer.insert(&st).unwrap();
        assert_eq!(
            repo.store().get_node("/doc").unwrap().unwrap().get("ns001:title"),
            Some(&Value::from("Hello"))
        );

        writer.delete(&st).unwrap();
        assert!(repo.store().get_node("/doc").unwrap().unwrap().get("ns001:title").is_none());
    }

    #[test]
    fn test_type_statements_become_mixins() {
        let repo = repo();
        let mut writer = repo.writer(None).unwrap();
        let st = Statement::new(doc(), rdf::TYPE, Term::iri("http://example.org/ns#Book"));
        writer.insert(&st).unwrap();
        assert!(repo.store().get_node("/doc").unwrap().unwrap().has_mixin("ns001:Book"));
        writer.delete(&st).unwrap();
        assert!(!repo.store().get_node("/doc").unwrap().unwrap().has_mixin("ns001:Book"));

        let bad = Statement::new(doc(), rdf::TYPE, Literal::string("Book"));
        assert!(matches!(writer.insert(&bad), Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_in_domain_uri_records_placeholder() {
        let repo = repo();
        let other = repo.store().find_or_create_node("/other").unwrap();
        let mut writer = repo.writer(None).unwrap();
        writer
            .insert(&Statement::new(doc(), SEE_ALSO, Term::iri(format!("{BASE}/other"))))
            .unwrap();

        let node = repo.store().get_node("/doc").unwrap().unwrap();
        assert_eq!(node.get("ns001:seeAlso"), Some(&Value::Uri(format!("{BASE}/other"))));
        assert_eq!(node.get("ns001:seeAlso_ref"), Some(&Value::WeakReference(other.identifier)));

        writer
            .insert(&Statement::new(doc(), SEE_ALSO, Term::iri("http://elsewhere/x")))
            .unwrap();
        assert_eq!(repo.store().get_node("/doc").unwrap().unwrap().values("ns001:seeAlso_ref").len(), 1);
    }

    #[test]
    fn test_declared_reference_slot() {
        let repo = repo();
        let other = repo.store().find_or_create_node("/other").unwrap();
        repo.store().declare_property_type("ns001:seeAlso", PropertyType::Reference);
        let mut writer = repo.writer(None).unwrap();
        // registers the namespace as ns001
        writer.insert(&Statement::new(doc(), SEE_ALSO, Term::iri(format!("{BASE}/other")))).unwrap();

        let node = repo.store().get_node("/doc").unwrap().unwrap();
        assert_eq!(node.get("ns001:seeAlso"), Some(&Value::Reference(other.identifier)));
        assert!(node.get("ns001:seeAlso_ref").is_none());
    }

    #[test]
    fn test_blank_nodes_are_skolemized() {
        let repo = repo();
        let mut writer = repo.writer(None).unwrap();
        writer.insert(&Statement::new(doc(), SEE_ALSO, Term::blank("b0"))).unwrap();
        writer.insert(&Statement::new(Term::blank("b0"), TITLE, Literal::string("inner"))).unwrap();
        assert_eq!(writer.skolemizer().len(), 1);

        let node = repo.store().get_node("/doc").unwrap().unwrap();
        let Some(Value::Uri(uri)) = node.get("ns001:seeAlso") else {
            panic!("expected a skolem URI, got {node:?}");
        };
        let path = writer.translator().path_from_external(uri).unwrap().unwrap();
        let skolem = repo.store().get_node(&path).unwrap().unwrap();
        assert!(skolem.has_mixin(mixins::SKOLEM));
        assert_eq!(skolem.get("ns002:title"), Some(&Value::from("inner")));

        assert!(matches!(
            writer.delete(&Statement::new(doc(), SEE_ALSO, Term::blank("b0"))),
            Err(Error::Conversion(_))
        ));
    }

    #[test]
    fn test_hash_subject_created_under_existing_host() {
        let repo = repo();
        let mut writer = repo.writer(None).unwrap();
        let subject = Term::iri(format!("{BASE}/doc#section"));
        writer.insert(&Statement::new(subject, TITLE, Literal::string("Part"))).unwrap();
        assert_eq!(
            repo.store().get_node("/doc/#/section").unwrap().unwrap().get("ns001:title"),
            Some(&Value::from("Part"))
        );
    }

    #[test]
    fn test_rejected_statements() {
        let repo = repo();
        let mut writer = repo.writer(None).unwrap();
        let outside = Statement::new(Term::iri("http://elsewhere/x"), TITLE, Literal::string("x"));
        assert!(matches!(writer.insert(&outside), Err(Error::Conversion(_))));

        let missing = Statement::new(Term::iri(format!("{BASE}/missing")), TITLE, Literal::string("x"));
        assert!(writer.insert(&missing).unwrap_err().is_not_found());

        let reserved = Statement::new(doc(), "http://fedora.info/definitions/v4/repository#uuid", Literal::string("x"));
        assert!(matches!(writer.insert(&reserved), Err(Error::ReservedNamespace(_))));
    }
}
