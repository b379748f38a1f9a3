//! Namespace prefix remapping inside path segments.

use crate::vocab::markers::{EXTERNAL_PREFIX, INTERNAL_PREFIX};
use crate::Result;

use super::IdentifierConverter;

/// Rewrites one leading segment prefix to another, segment by segment.
///
/// With the default prefixes an external `/a/fcr:content` becomes the
/// internal `/a/jcr:content` and back. Segments carrying any other prefix
/// pass through unchanged.
#[derive(Debug, Clone)]
pub struct NamespaceConverter {
    external: String,
    internal: String,
}

impl NamespaceConverter {
    pub fn new(external: impl Into<String>, internal: impl Into<String>) -> Self {
        Self { external: external.into(), internal: internal.into() }
    }

    fn swap(path: &str, from: &str, to: &str) -> String {
        if !path.contains(from) {
            return path.to_string();
        }
        path.split('/')
            .map(|segment| match segment.strip_prefix(from) {
                Some(rest) => format!("{to}{rest}"),
                None => segment.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl Default for NamespaceConverter {
    fn default() -> Self {
        Self::new(EXTERNAL_PREFIX, INTERNAL_PREFIX)
    }
}

impl IdentifierConverter<String, String> for NamespaceConverter {
    fn convert(&self, external: String) -> Result<String> {
        Ok(Self::swap(&external, &self.external, &self.internal))
    }

    fn revert(&self, internal: String) -> Result<String> {
        Ok(Self::swap(&internal, &self.internal, &self.external))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_marker_follows_prefix() {
        let ns = NamespaceConverter::default();
        assert_eq!(ns.convert("/a/b/fcr:content".into()).unwrap(), "/a/b/jcr:content");
        assert_eq!(ns.revert("/a/b/jcr:content".into()).unwrap(), "/a/b/fcr:content");
    }

    #[test]
    fn test_other_prefixes_pass_through() {
        let ns = NamespaceConverter::default();
        assert_eq!(ns.convert("/dc:title/x".into()).unwrap(), "/dc:title/x");
        assert_eq!(ns.convert("/a/xfcr:b".into()).unwrap(), "/a/xfcr:b");
        assert_eq!(ns.convert("".into()).unwrap(), "");
    }

    #[test]
    fn test_hash_section_untouched() {
        let ns = NamespaceConverter::default();
        assert_eq!(ns.revert("/a/#/frag".into()).unwrap(), "/a/#/frag");
    }
}
