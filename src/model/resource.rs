//! External resource variants.

use serde::{Deserialize, Serialize};

use super::Node;

/// A node as seen from outside, classified by its type flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResourceVariant {
    Container(Node),
    Binary(Node),
    BinaryDescription(Node),
    Tombstone(Node),
    /// A frozen snapshot of a versioned resource.
    VersionRoot(Node),
}

impl ResourceVariant {
    pub fn node(&self) -> &Node {
        match self {
            ResourceVariant::Container(n)
            | ResourceVariant::Binary(n)
            | ResourceVariant::BinaryDescription(n)
            | ResourceVariant::Tombstone(n)
            | ResourceVariant::VersionRoot(n) => n,
        }
    }

    pub fn into_node(self) -> Node {
        match self {
            ResourceVariant::Container(n)
            | ResourceVariant::Binary(n)
            | ResourceVariant::BinaryDescription(n)
            | ResourceVariant::Tombstone(n)
            | ResourceVariant::VersionRoot(n) => n,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ResourceVariant::Container(_) => "container",
            ResourceVariant::Binary(_) => "binary",
            ResourceVariant::BinaryDescription(_) => "binary-description",
            ResourceVariant::Tombstone(_) => "tombstone",
            ResourceVariant::VersionRoot(_) => "version-root",
        }
    }
}
