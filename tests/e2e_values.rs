//! End-to-end tests for literal storage: statements written through
//! `StatementWriter` come back from `Repository::triples` with the same
//! value, compared datatype-aware.

use ldp_bridge::vocab::xsd;
use ldp_bridge::{
    Literal, MemoryStore, NodeStore, PropertyType, Repository, Statement, Term, TranslatorConfig,
    Value,
};
use proptest::prelude::*;

const BASE: &str = "http://localhost:8080/rest";
const NS: &str = "http://example.org/v#";

fn repo() -> Repository<MemoryStore> {
    let repo = Repository::open_memory(TranslatorConfig::new(BASE)).unwrap();
    repo.store().find_or_create_node("/doc").unwrap();
    repo
}

fn doc() -> Term {
    Term::iri(format!("{BASE}/doc"))
}

/// Write `object` under a fresh predicate and read back what the
/// projection emits for it.
fn store_and_project(repo: &Repository<MemoryStore>, local: &str, object: Term) -> Term {
    let predicate = format!("{NS}{local}");
    let mut writer = repo.writer(None).unwrap();
    writer.insert(&Statement::new(doc(), predicate.clone(), object)).unwrap();

    let mut found: Vec<Term> = repo
        .triples("/doc")
        .unwrap()
        .into_iter()
        .filter(|s| s.predicate == predicate)
        .map(|s| s.object)
        .collect();
    assert_eq!(found.len(), 1, "{predicate}");
    found.remove(0)
}

// ============================================================================
// 1. Literal kinds
// ============================================================================

#[test]
fn test_literals_keep_their_value() {
    let repo = repo();
    let cases = [
        Literal::string("plain text"),
        Literal::typed("42", xsd::INT),
        Literal::typed("-9000000000", xsd::LONG),
        Literal::typed("7", xsd::INTEGER),
        Literal::typed("10.50", xsd::DECIMAL),
        Literal::typed("1.5E2", xsd::DOUBLE),
        Literal::typed("2.5", xsd::FLOAT),
        Literal::typed("1", xsd::BOOLEAN),
        Literal::typed("2001-10-26T23:32:52+02:00", xsd::DATE_TIME),
        Literal::typed("2001-10-26T21:32:52", xsd::DATE_TIME),
        Literal::typed("2001-10-26", xsd::DATE),
        Literal::typed("18446744073709551615", xsd::UNSIGNED_LONG),
        Literal::typed("cafe", xsd::HEX_BINARY),
        Literal::typed("not a number", xsd::INT),
        Literal::lang("chat", "fr"),
    ];

    for (i, literal) in cases.iter().enumerate() {
        let projected = store_and_project(&repo, &format!("p{i}"), Term::Literal(literal.clone()));
        let projected = match projected {
            Term::Literal(projected) => projected,
            other => panic!("{literal} came back as {other}"),
        };
        assert!(literal.same_value_as(&projected), "{literal} came back as {projected}");
    }
}

#[test]
fn test_external_uri_object() {
    let repo = repo();
    let object = Term::iri("http://example.org/elsewhere");
    assert_eq!(store_and_project(&repo, "link", object.clone()), object);
}

#[test]
fn test_reference_object() {
    let repo = repo();
    repo.store().find_or_create_node("/target").unwrap();
    let object = Term::iri(format!("{BASE}/target"));

    // the first write registers the namespace as ns001
    assert_eq!(store_and_project(&repo, "link", object.clone()), object);
    repo.store().declare_property_type("ns001:strong", PropertyType::Reference);
    assert_eq!(store_and_project(&repo, "strong", object.clone()), object);

    let doc = repo.store().get_node("/doc").unwrap().unwrap();
    assert!(matches!(doc.get("ns001:link"), Some(Value::Uri(_))));
    assert!(matches!(doc.get("ns001:link_ref"), Some(Value::WeakReference(_))));
    assert!(matches!(doc.get("ns001:strong"), Some(Value::Reference(_))));
}

// ============================================================================
// 2. Native longs survive storage
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_long_values(v in any::<i64>()) {
        let repo = repo();
        let projected = store_and_project(&repo, "n", Term::Literal(Literal::long(v)));
        prop_assert_eq!(projected, Term::Literal(Literal::long(v)));
        let stored = repo.store().get_node("/doc").unwrap().unwrap();
        prop_assert_eq!(stored.get("ns001:n").cloned(), Some(Value::Long(v)));
    }
}
