//! Node in the resource tree.

use serde::{Deserialize, Serialize};
use super::{path, PropertyMap, Value};

/// A stored node, addressed by its absolute internal path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Absolute internal path, e.g. `/a/b/#/frag`.
    pub path: String,
    /// Stable identifier assigned by the store. Frozen snapshots are
    /// addressed externally by this identifier.
    pub identifier: String,
    /// Type flags.
    pub mixins: Vec<String>,
    pub properties: PropertyMap,
}

impl Node {
    pub fn new(path: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            identifier: identifier.into(),
            mixins: Vec::new(),
            properties: PropertyMap::new(),
        }
    }

    pub fn with_mixins(mut self, mixins: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.mixins = mixins.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.entry(key.into()).or_default().push(value.into());
        self
    }

    pub fn has_mixin(&self, mixin: &str) -> bool {
        self.mixins.iter().any(|m| m == mixin)
    }

    /// First value of a property.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key).and_then(|values| values.first())
    }

    /// All values of a property; empty when absent.
    pub fn values(&self, key: &str) -> &[Value] {
        self.properties.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Last path segment (empty for the root).
    pub fn name(&self) -> &str {
        path::name(&self.path)
    }

    pub fn parent_path(&self) -> Option<&str> {
        path::parent(&self.path)
    }

    pub fn is_root(&self) -> bool {
        self.path == path::ROOT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let node = Node::new("/a/b", "id-1")
            .with_mixins(["fedora:Container"])
            .with_property("dc:title", "x")
            .with_property("dc:title", "y");

        assert!(node.has_mixin("fedora:Container"));
        assert_eq!(node.get("dc:title"), Some(&Value::from("x")));
        assert_eq!(node.values("dc:title").len(), 2);
        assert!(node.values("missing").is_empty());
        assert_eq!(node.name(), "b");
        assert_eq!(node.parent_path(), Some("/a"));
    }
}
