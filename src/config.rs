//! Translator configuration, loadable from TOML.
//!
//! ```toml
//! base_uri = "http://localhost:8080/rest"
//! hash_uris = true
//! skolem_container = "/.well-known/genid"
//! skolem_levels = 4
//! skolem_length = 2
//!
//! [hierarchy]
//! levels = 0
//! length = 2
//! prefix = ""
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::convert::{
    HashConverter, HierarchyConverter, NamespaceConverter, PathConverter, TransactionConverter,
    TranslationChain,
};
use crate::vocab::markers::SKOLEM_CONTAINER;
use crate::{Error, Result};

/// Pairtree layout applied to stored paths. `levels = 0` disables it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    pub levels: usize,
    pub length: usize,
    pub prefix: String,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self { levels: 0, length: 2, prefix: String::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// External URI of the repository root, without trailing slash.
    pub base_uri: String,
    /// Map URI fragments to hash sections.
    pub hash_uris: bool,
    /// Container beneath which blank nodes are skolemized.
    pub skolem_container: String,
    pub skolem_levels: usize,
    pub skolem_length: usize,
    pub hierarchy: HierarchyConfig,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_uri: "http://localhost:8080/rest".to_string(),
            hash_uris: true,
            skolem_container: SKOLEM_CONTAINER.to_string(),
            skolem_levels: 4,
            skolem_length: 2,
            hierarchy: HierarchyConfig::default(),
        }
    }
}

impl TranslatorConfig {
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self { base_uri: base_uri.into(), ..Self::default() }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        tracing::debug!("Reading translator config from {:?}", path.as_ref());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_uri.is_empty() {
            return Err(Error::Config("base_uri must not be empty".into()));
        }
        if !self.skolem_container.starts_with('/') {
            return Err(Error::Config(format!(
                "skolem_container {:?} must be an absolute path",
                self.skolem_container
            )));
        }
        if self.hierarchy.length == 0 || self.skolem_length == 0 {
            return Err(Error::Config("hierarchy segment length must be at least 1".into()));
        }
        Ok(())
    }

    /// Ordered path chain: transaction (when inside one), namespace,
    /// hash (when enabled), hierarchy (when enabled).
    pub fn translation_chain(&self, tx: Option<&str>) -> Result<TranslationChain> {
        let mut steps: Vec<PathConverter> = Vec::with_capacity(4);
        if tx.is_some() {
            steps.push(TransactionConverter::new(tx).into());
        }
        steps.push(NamespaceConverter::default().into());
        if self.hash_uris {
            steps.push(HashConverter.into());
        }
        if self.hierarchy.levels > 0 {
            steps.push(
                HierarchyConverter::new(
                    self.hierarchy.prefix.clone(),
                    self.hierarchy.levels,
                    self.hierarchy.length,
                )?
                .into(),
            );
        }
        Ok(TranslationChain::new(steps))
    }

    /// Pairtree layout for minted skolem leaves.
    pub fn skolem_hierarchy(&self) -> Result<HierarchyConverter> {
        HierarchyConverter::new(self.skolem_container.clone(), self.skolem_levels, self.skolem_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TranslatorConfig::default();
        assert!(config.hash_uris);
        assert_eq!(config.skolem_container, "/.well-known/genid");
        assert_eq!(config.hierarchy.levels, 0);
        let names: Vec<_> = config.translation_chain(None).unwrap().steps().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["namespace", "hash"]);
    }

    #[test]
    fn test_from_toml() {
        let config = TranslatorConfig::from_toml_str(
            r#"
            base_uri = "http://host/rest"
            hash_uris = false

            [hierarchy]
            levels = 3
            length = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.base_uri, "http://host/rest");
        assert_eq!(config.skolem_levels, 4);
        assert_eq!(config.hierarchy.length, 1);
        let names: Vec<_> = config.translation_chain(Some("t")).unwrap().steps().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["transaction", "namespace", "hierarchy"]);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            TranslatorConfig::from_toml_str("[hierarchy]\nlevels = 2\nlength = 0\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(TranslatorConfig::from_toml_str("hash_uris = 3"), Err(Error::Toml(_))));
        assert!(matches!(
            TranslatorConfig::from_file("/definitely/not/here.toml"),
            Err(Error::Io(_))
        ));
    }
}
