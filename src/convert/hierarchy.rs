//! Pairtree-style segmenting of leaf identifiers.
//!
//! A leaf such as `/genid/abcdef` is stored as `/genid/ab/cd/ef/ab/abcdef`
//! (levels = 4, length = 2): the synthetic segments are drawn from the
//! leaf's own characters, left to right, wrapping when the leaf is short.
//! Decoding drops exactly `levels` segments in front of the leaf.

use smallvec::SmallVec;

use crate::model::path::{self, ROOT, SEPARATOR};
use crate::vocab::markers::{EXTERNAL_PREFIX, INTERNAL_PREFIX};
use crate::{Error, Result};

use super::IdentifierConverter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyConverter {
    prefix: String,
    levels: usize,
    length: usize,
}

/// A path taken apart around its leaf.
struct Parts<'a> {
    /// Part after the prefix, without leading separators.
    body: &'a str,
    /// Whether the body had at least one leading separator.
    rooted: bool,
    /// Trailing reserved segments and hash section, kept verbatim.
    suffix: &'a str,
}

impl HierarchyConverter {
    /// `levels = 0` disables the converter. `length` must be at least 1.
    pub fn new(prefix: impl Into<String>, levels: usize, length: usize) -> Result<Self> {
        if length == 0 {
            return Err(Error::Config("hierarchy segment length must be at least 1".into()));
        }
        let prefix = prefix.into().trim_end_matches(SEPARATOR).to_string();
        Ok(Self { prefix, levels, length })
    }

    /// A converter that never alters its input.
    pub fn disabled() -> Self {
        Self { prefix: String::new(), levels: 0, length: 1 }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn is_enabled(&self) -> bool {
        self.levels > 0
    }

    /// The synthetic segments inserted in front of `leaf`.
    pub fn segments_for(&self, leaf: &str) -> Vec<String> {
        let mut chars = leaf.chars().cycle();
        (0..self.levels)
            .map(|_| chars.by_ref().take(self.length).collect())
            .collect()
    }

    /// Split off the prefix and any trailing reserved segments.
    /// `None` when the path lies outside the prefix.
    fn parts<'a>(&self, full: &'a str) -> Option<Parts<'a>> {
        let (base, _) = path::split_hash_section(full);
        let base_end = reserved_tail_start(base);
        let suffix = &full[base_end..];

        let rest = if self.prefix.is_empty() {
            &base[..base_end]
        } else {
            let rest = base[..base_end].strip_prefix(self.prefix.as_str())?;
            if !rest.is_empty() && !rest.starts_with(SEPARATOR) {
                return None;
            }
            rest
        };
        let body = rest.trim_start_matches(SEPARATOR);
        Some(Parts { body, rooted: body.len() != rest.len(), suffix })
    }

    fn assemble(&self, rooted: bool, segments: &[&str], suffix: &str) -> String {
        let mut out = self.prefix.clone();
        if rooted || !self.prefix.is_empty() {
            out.push(SEPARATOR);
        }
        out.push_str(&segments.join("/"));
        out.push_str(suffix);
        out
    }

    /// The bare prefix, used when nothing remains beneath it.
    fn empty_result(&self, rooted: bool, suffix: &str) -> String {
        if self.prefix.is_empty() {
            if rooted && !suffix.is_empty() {
                format!("{ROOT}{}", suffix.trim_start_matches(SEPARATOR))
            } else {
                suffix.to_string()
            }
        } else {
            format!("{}{suffix}", self.prefix)
        }
    }
}

/// Offset where the trailing run of reserved (`jcr:`/`fcr:`) segments begins.
fn reserved_tail_start(base: &str) -> usize {
    let mut end = base.len();
    while let Some(ix) = base[..end].rfind(SEPARATOR) {
        let segment = &base[ix + 1..end];
        if segment.starts_with(INTERNAL_PREFIX) || segment.starts_with(EXTERNAL_PREFIX) {
            end = ix;
        } else {
            break;
        }
    }
    end
}

fn split_body(body: &str) -> Result<SmallVec<[&str; 8]>> {
    let segments: SmallVec<[&str; 8]> = body.split(SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(Error::Conversion(format!("empty path segment in {body:?}")));
    }
    Ok(segments)
}

impl IdentifierConverter<String, String> for HierarchyConverter {
    /// Insert the pairtree segments in front of the leaf.
    fn convert(&self, external: String) -> Result<String> {
        if !self.is_enabled() || external.is_empty() {
            return Ok(external);
        }
        let Some(parts) = self.parts(&external) else {
            return Ok(external);
        };
        if parts.body.is_empty() {
            return Ok(self.empty_result(parts.rooted, parts.suffix));
        }

        let leaf = parts.body.rsplit(SEPARATOR).next().unwrap_or_default();
        let inserted = self.segments_for(leaf);
        let mut segments = split_body(parts.body)?;
        segments.pop();
        segments.extend(inserted.iter().map(String::as_str));
        segments.push(leaf);

        Ok(self.assemble(parts.rooted, &segments, parts.suffix))
    }

    /// Drop the `levels` segments in front of the leaf.
    fn revert(&self, internal: String) -> Result<String> {
        if !self.is_enabled() || internal.is_empty() {
            return Ok(internal);
        }
        let Some(parts) = self.parts(&internal) else {
            return Ok(internal);
        };
        if parts.body.is_empty() {
            return Ok(self.empty_result(parts.rooted, parts.suffix));
        }

        let mut segments = split_body(parts.body)?;
        if segments.len() <= self.levels {
            return Ok(self.empty_result(parts.rooted, ""));
        }
        let leaf_ix = segments.len() - 1;
        segments.drain(leaf_ix - self.levels..leaf_ix);

        Ok(self.assemble(parts.rooted, &segments, parts.suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_ID: &str = "/test1/test2/test3";

    fn converter(levels: usize, length: usize) -> HierarchyConverter {
        HierarchyConverter::new("", levels, length).unwrap()
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(matches!(HierarchyConverter::new("", 2, 0), Err(Error::Config(_))));
    }

    #[test]
    fn test_disabled_is_identity() {
        let c = converter(0, 1);
        assert_eq!(c.convert(TEST_ID.into()).unwrap(), TEST_ID);
        assert_eq!(c.revert(TEST_ID.into()).unwrap(), TEST_ID);
    }

    #[test]
    fn test_null_passes_through() {
        let c = converter(4, 2);
        assert_eq!(c.convert_opt(None).unwrap(), None);
    }

    #[test]
    fn test_encode_layout() {
        let c = converter(4, 2);
        assert_eq!(c.convert(TEST_ID.into()).unwrap(), "/test1/test2/te/st/3t/es/test3");

        let short = converter(3, 2);
        assert_eq!(short.convert("/ab".into()).unwrap(), "/ab/ab/ab/ab");
    }

    #[test]
    fn test_varying_segments_round_trip() {
        for length in 1..5 {
            for levels in 1..5 {
                let c = converter(levels, length);
                let encoded = c.convert(TEST_ID.into()).unwrap();
                assert_eq!(path::segments(&encoded).len(), 3 + levels);
                assert!(path::segments(&encoded)[2..2 + levels].iter().all(|s| s.chars().count() == length));
                assert_eq!(c.revert(encoded).unwrap(), TEST_ID);
            }
        }
    }

    #[test]
    fn test_incoming_slashes_collapse() {
        let c = converter(4, 2);
        let expected = c.convert(TEST_ID.into()).unwrap();
        assert_eq!(c.convert(format!("///{TEST_ID}")).unwrap(), expected);
    }

    #[test]
    fn test_recurse_twice() {
        let c = converter(3, 3);
        let first = c.convert(TEST_ID.into()).unwrap();
        let second = c.convert(first).unwrap();
        assert_eq!(c.revert(c.revert(second).unwrap()).unwrap(), TEST_ID);
    }

    #[test]
    fn test_weird_ids() {
        let c = converter(3, 3);
        assert_eq!(c.convert("".into()).unwrap(), "");
        assert_eq!(c.revert("".into()).unwrap(), "");
        assert_eq!(c.convert("/".into()).unwrap(), "");
        assert_eq!(c.convert("///".into()).unwrap(), "");
    }

    #[test]
    fn test_empty_inner_segment_rejected() {
        let c = converter(2, 2);
        assert!(matches!(c.convert("/a//b".into()), Err(Error::Conversion(_))));
    }

    #[test]
    fn test_reserved_tail_and_hash_untouched() {
        let c = converter(2, 1);
        assert_eq!(c.convert("/a/bc/jcr:content".into()).unwrap(), "/a/b/c/bc/jcr:content");
        assert_eq!(c.convert("/a/bc/#/frag".into()).unwrap(), "/a/b/c/bc/#/frag");
        assert_eq!(c.revert("/a/b/c/bc/#/frag".into()).unwrap(), "/a/bc/#/frag");
    }

    #[test]
    fn test_prefix_scope() {
        let c = HierarchyConverter::new("/.well-known/genid/", 2, 2).unwrap();
        assert_eq!(c.prefix(), "/.well-known/genid");
        assert_eq!(c.convert("/.well-known/genid/abcd".into()).unwrap(), "/.well-known/genid/ab/cd/abcd");
        assert_eq!(c.revert("/.well-known/genid/ab/cd/abcd".into()).unwrap(), "/.well-known/genid/abcd");
        assert_eq!(c.convert("/other/abcd".into()).unwrap(), "/other/abcd");
        assert_eq!(c.convert("/.well-known/genidx/abcd".into()).unwrap(), "/.well-known/genidx/abcd");
        // pairtree intermediates decode to the container
        assert_eq!(c.revert("/.well-known/genid/ab".into()).unwrap(), "/.well-known/genid");
        assert_eq!(c.revert("/.well-known/genid/ab/cd".into()).unwrap(), "/.well-known/genid");
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            levels in 0usize..5,
            length in 1usize..5,
            segments in prop::collection::vec("[a-z0-9]{1,9}", 1..5),
        ) {
            let c = converter(levels, length);
            let id = format!("/{}", segments.join("/"));
            let encoded = c.convert(id.clone()).unwrap();
            prop_assert_eq!(c.revert(encoded.clone()).unwrap(), id.clone());

            let twice = c.convert(encoded).unwrap();
            let back = c.revert(c.revert(twice).unwrap()).unwrap();
            prop_assert_eq!(back, id);
        }
    }
}
