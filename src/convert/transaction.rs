//! Transaction segment handling.

use crate::vocab::markers::TX_PREFIX;
use crate::{Error, Result};

use super::IdentifierConverter;

/// Strips the current transaction's `/tx:<id>` segment from incoming
/// paths and adds it back to outgoing ones.
///
/// Without a transaction the converter is the identity.
#[derive(Debug, Clone, Default)]
pub struct TransactionConverter {
    segment: Option<String>,
}

impl TransactionConverter {
    pub fn new(tx: Option<&str>) -> Self {
        Self { segment: tx.map(|id| format!("/{TX_PREFIX}{id}")) }
    }

    pub fn is_active(&self) -> bool {
        self.segment.is_some()
    }
}

impl IdentifierConverter<String, String> for TransactionConverter {
    fn convert(&self, external: String) -> Result<String> {
        let Some(segment) = &self.segment else {
            return Ok(external);
        };
        let first_is_tx = external
            .trim_start_matches('/')
            .split('/')
            .next()
            .is_some_and(|s| s.starts_with(TX_PREFIX));
        if !first_is_tx {
            return Ok(external);
        }
        match external.strip_prefix(segment.as_str()) {
            Some("") => Ok("/".to_string()),
            Some(rest) if rest.starts_with('/') => Ok(rest.to_string()),
            _ => Err(Error::Conversion(format!(
                "path {external} is not in the current transaction"
            ))),
        }
    }

    fn revert(&self, internal: String) -> Result<String> {
        Ok(match &self.segment {
            Some(segment) if internal == "/" => segment.clone(),
            Some(segment) => format!("{segment}{internal}"),
            None => internal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_current_transaction() {
        let c = TransactionConverter::new(Some("abc"));
        assert_eq!(c.convert("/tx:abc/a/b".into()).unwrap(), "/a/b");
        assert_eq!(c.convert("/tx:abc".into()).unwrap(), "/");
        assert_eq!(c.revert("/a/b".into()).unwrap(), "/tx:abc/a/b");
        assert_eq!(c.revert("/".into()).unwrap(), "/tx:abc");
    }

    #[test]
    fn test_foreign_transaction_rejected() {
        let c = TransactionConverter::new(Some("abc"));
        assert!(matches!(c.convert("/tx:other/a".into()), Err(Error::Conversion(_))));
        assert!(matches!(c.convert("/tx:abcd/a".into()), Err(Error::Conversion(_))));
    }

    #[test]
    fn test_without_transaction() {
        let c = TransactionConverter::new(None);
        assert!(!c.is_active());
        assert_eq!(c.convert("/a".into()).unwrap(), "/a");
        assert_eq!(c.revert("/a".into()).unwrap(), "/a");
    }
}
