//! Ordered path conversion chain.

use tracing::trace;

use crate::Result;

use super::{
    HashConverter, HierarchyConverter, IdentifierConverter, NamespaceConverter,
    TransactionConverter,
};

/// One step of a [`TranslationChain`].
#[derive(Debug, Clone)]
pub enum PathConverter {
    Transaction(TransactionConverter),
    Namespace(NamespaceConverter),
    Hash(HashConverter),
    Hierarchy(HierarchyConverter),
}

impl PathConverter {
    pub fn name(&self) -> &'static str {
        match self {
            PathConverter::Transaction(_) => "transaction",
            PathConverter::Namespace(_) => "namespace",
            PathConverter::Hash(_) => "hash",
            PathConverter::Hierarchy(_) => "hierarchy",
        }
    }
}

impl IdentifierConverter<String, String> for PathConverter {
    fn convert(&self, external: String) -> Result<String> {
        match self {
            PathConverter::Transaction(c) => c.convert(external),
            PathConverter::Namespace(c) => c.convert(external),
            PathConverter::Hash(c) => c.convert(external),
            PathConverter::Hierarchy(c) => c.convert(external),
        }
    }

    fn revert(&self, internal: String) -> Result<String> {
        match self {
            PathConverter::Transaction(c) => c.revert(internal),
            PathConverter::Namespace(c) => c.revert(internal),
            PathConverter::Hash(c) => c.revert(internal),
            PathConverter::Hierarchy(c) => c.revert(internal),
        }
    }
}

impl From<TransactionConverter> for PathConverter {
    fn from(c: TransactionConverter) -> Self { PathConverter::Transaction(c) }
}
impl From<NamespaceConverter> for PathConverter {
    fn from(c: NamespaceConverter) -> Self { PathConverter::Namespace(c) }
}
impl From<HashConverter> for PathConverter {
    fn from(c: HashConverter) -> Self { PathConverter::Hash(c) }
}
impl From<HierarchyConverter> for PathConverter {
    fn from(c: HierarchyConverter) -> Self { PathConverter::Hierarchy(c) }
}

/// External paths run through the steps first to last; internal paths
/// run back through them last to first.
#[derive(Debug, Clone, Default)]
pub struct TranslationChain {
    steps: Vec<PathConverter>,
}

impl TranslationChain {
    pub fn new(steps: Vec<PathConverter>) -> Self {
        Self { steps }
    }

    /// Namespace and hash conversion only.
    pub fn minimal() -> Self {
        Self::new(vec![NamespaceConverter::default().into(), HashConverter.into()])
    }

    pub fn push(&mut self, step: impl Into<PathConverter>) {
        self.steps.push(step.into());
    }

    pub fn steps(&self) -> &[PathConverter] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl IdentifierConverter<String, String> for TranslationChain {
    fn convert(&self, external: String) -> Result<String> {
        self.steps.iter().try_fold(external, |path, step| {
            let next = step.convert(path)?;
            trace!(step = step.name(), path = %next, "converted");
            Ok(next)
        })
    }

    fn revert(&self, internal: String) -> Result<String> {
        self.steps.iter().rev().try_fold(internal, |path, step| {
            let next = step.revert(path)?;
            trace!(step = step.name(), path = %next, "reverted");
            Ok(next)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full_chain() -> TranslationChain {
        TranslationChain::new(vec![
            TransactionConverter::new(Some("t1")).into(),
            NamespaceConverter::default().into(),
            HashConverter.into(),
            HierarchyConverter::new("", 2, 1).unwrap().into(),
        ])
    }

    #[test]
    fn test_order_of_application() {
        let chain = full_chain();
        let internal = chain.convert("/tx:t1/ab/cd#x/y".to_string()).unwrap();
        assert_eq!(internal, "/ab/c/d/cd/#/x%2Fy");
        assert_eq!(chain.revert(internal).unwrap(), "/tx:t1/ab/cd#x/y");
    }

    #[test]
    fn test_content_marker_through_chain() {
        let chain = full_chain();
        let internal = chain.convert("/tx:t1/ab/fcr:content".to_string()).unwrap();
        assert_eq!(internal, "/a/b/ab/jcr:content");
        assert_eq!(chain.revert(internal).unwrap(), "/tx:t1/ab/fcr:content");
    }

    #[test]
    fn test_minimal_chain() {
        let chain = TranslationChain::minimal();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.convert("/a#b".to_string()).unwrap(), "/a/#/b");
    }
}
