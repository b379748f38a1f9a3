//! Classification of nodes into resource variants.

use crate::model::{Node, ResourceVariant};
use crate::vocab::mixins;
use crate::Result;

use super::IdentifierConverter;

/// Maps between a [`ResourceVariant`] and the node beneath it.
///
/// `revert` classifies a node by its type flags. A node may carry several
/// flags; the first match wins, in this order:
///
/// 1. tombstone
/// 2. binary description
/// 3. binary
/// 4. frozen snapshot (version root)
/// 5. container
///
/// `convert` unwraps any variant back to its node.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeResourceConverter;

impl NodeResourceConverter {
    pub fn classify(&self, node: Node) -> ResourceVariant {
        if node.has_mixin(mixins::TOMBSTONE) {
            ResourceVariant::Tombstone(node)
        } else if node.has_mixin(mixins::BINARY_DESCRIPTION) {
            ResourceVariant::BinaryDescription(node)
        } else if node.has_mixin(mixins::BINARY) {
            ResourceVariant::Binary(node)
        } else if node.has_mixin(mixins::FROZEN) {
            ResourceVariant::VersionRoot(node)
        } else {
            ResourceVariant::Container(node)
        }
    }
}

impl IdentifierConverter<ResourceVariant, Node> for NodeResourceConverter {
    fn convert(&self, external: ResourceVariant) -> Result<Node> {
        Ok(external.into_node())
    }

    fn revert(&self, internal: Node) -> Result<ResourceVariant> {
        Ok(self.classify(internal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(flags: &[&str]) -> Node {
        Node::new("/n", "id").with_mixins(flags.iter().copied())
    }

    #[test]
    fn test_priority_order() {
        let c = NodeResourceConverter;
        let all = [mixins::CONTAINER, mixins::FROZEN, mixins::BINARY, mixins::BINARY_DESCRIPTION, mixins::TOMBSTONE];
        assert_eq!(c.classify(node(&all)).kind(), "tombstone");
        assert_eq!(c.classify(node(&all[..4])).kind(), "binary-description");
        assert_eq!(c.classify(node(&all[..3])).kind(), "binary");
        assert_eq!(c.classify(node(&all[..2])).kind(), "version-root");
        assert_eq!(c.classify(node(&all[..1])).kind(), "container");
        assert_eq!(c.classify(node(&[])).kind(), "container");
    }

    #[test]
    fn test_unwrap_returns_same_node() {
        let c = NodeResourceConverter;
        let n = node(&[mixins::BINARY]);
        let variant = c.revert(n.clone()).unwrap();
        assert!(matches!(variant, ResourceVariant::Binary(_)));
        assert_eq!(c.convert(variant).unwrap(), n);
        assert_eq!(c.revert_opt(None).unwrap(), None);
    }
}
