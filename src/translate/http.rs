//! Base URI ↔ path translation.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use tracing::trace;

use crate::convert::{IdentifierConverter, TranslationChain};
use crate::model::path::ROOT;
use crate::{Error, Result};

/// Characters escaped in the path part of an outgoing URI.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'#');

/// Escapes kept verbatim in stored path names.
const KEPT_ESCAPES: [&str; 2] = ["%23", "%25"];

/// Characters escaped in the fragment of an outgoing URI.
const FRAGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`').add(b'%');

/// Translates between external URIs under one base URI and internal
/// paths, through a [`TranslationChain`].
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    base_uri: String,
    chain: TranslationChain,
    hash_uris: bool,
}

impl HttpTranslator {
    pub fn new(base_uri: impl Into<String>, chain: TranslationChain) -> Self {
        let base_uri = base_uri.into().trim_end_matches('/').to_string();
        Self { base_uri, chain, hash_uris: true }
    }

    /// When disabled, fragments are dropped from incoming URIs.
    pub fn with_hash_uris(mut self, enabled: bool) -> Self {
        self.hash_uris = enabled;
        self
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn chain(&self) -> &TranslationChain {
        &self.chain
    }

    pub fn hash_uris(&self) -> bool {
        self.hash_uris
    }

    /// Whether `uri` lies under the base URI.
    pub fn in_domain(&self, uri: &str) -> bool {
        match uri.strip_prefix(self.base_uri.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('#'),
            None => false,
        }
    }

    /// External path of `uri` relative to the base, percent-decoded, always
    /// starting with `/`. `None` outside the domain.
    pub fn external_path(&self, uri: &str) -> Result<Option<String>> {
        let Some(rest) = uri.strip_prefix(self.base_uri.as_str()) else {
            return Ok(None);
        };
        if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with('#')) {
            return Ok(None);
        }
        let (path, fragment) = match rest.split_once('#') {
            Some((p, f)) => (p, Some(f)),
            None => (rest, None),
        };
        let path = path.split('?').next().unwrap_or_default();

        let path = decode_path(path)?;
        if path.contains("//") {
            return Err(Error::Conversion(format!("invalid resource identifier {uri}")));
        }
        let mut external = if path.is_empty() { ROOT.to_string() } else { path };
        if let (true, Some(fragment)) = (self.hash_uris, fragment) {
            external.push('#');
            external.push_str(&decode(fragment)?);
        }
        Ok(Some(external))
    }

    /// Internal path for `uri`; `None` outside the domain.
    pub fn path_from_external(&self, uri: &str) -> Result<Option<String>> {
        let Some(external) = self.external_path(uri)? else {
            return Ok(None);
        };
        let internal = self.chain.convert(external)?;
        trace!(%uri, path = %internal, "external → internal");
        Ok(Some(internal))
    }

    /// External URI for an internal path.
    pub fn to_domain(&self, path: &str) -> Result<String> {
        let external = self.chain.revert(path.to_string())?;
        let uri = self.uri_for_external(&external);
        trace!(%path, %uri, "internal → external");
        Ok(uri)
    }

    /// Attach an external path (possibly with `#fragment`) to the base URI.
    pub fn uri_for_external(&self, external: &str) -> String {
        let (path, fragment) = match external.split_once('#') {
            Some((p, f)) => (p, Some(f)),
            None => (external, None),
        };
        let mut uri = self.base_uri.clone();
        if path.is_empty() || path == ROOT {
            uri.push('/');
        } else {
            if !path.starts_with('/') {
                uri.push('/');
            }
            uri.push_str(&encode_path(path));
        }
        if let Some(fragment) = fragment {
            uri.push('#');
            uri.push_str(&encode_fragment(fragment));
        }
        uri
    }
}

pub(crate) fn encode_path(path: &str) -> String {
    outside_kept_escapes(path, |run| Ok::<_, Error>(utf8_percent_encode(run, PATH).to_string()))
        .unwrap_or_default()
}

pub(crate) fn encode_fragment(fragment: &str) -> String {
    utf8_percent_encode(fragment, FRAGMENT).to_string()
}

/// Decode a URI path, leaving `%23` and `%25` encoded so a `#` inside a
/// segment never reads as a hash section.
pub(crate) fn decode_path(s: &str) -> Result<String> {
    outside_kept_escapes(s, decode)
}

/// Apply `f` to the runs between kept escapes, copying the escapes as-is.
fn outside_kept_escapes<E>(
    s: &str,
    mut f: impl FnMut(&str) -> std::result::Result<String, E>,
) -> std::result::Result<String, E> {
    let mut out = String::with_capacity(s.len());
    let mut start = 0;
    for (ix, _) in s.match_indices('%') {
        let Some(escape) = s.get(ix..ix + 3) else {
            continue;
        };
        if KEPT_ESCAPES.contains(&escape) {
            out.push_str(&f(&s[start..ix])?);
            out.push_str(escape);
            start = ix + 3;
        }
    }
    out.push_str(&f(&s[start..])?);
    Ok(out)
}

pub(crate) fn decode(s: &str) -> Result<String> {
    percent_decode_str(s)
        .decode_utf8()
        .map(|c| c.into_owned())
        .map_err(|e| Error::Conversion(format!("{s} is not valid UTF-8 once decoded: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslatorConfig;

    fn translator() -> HttpTranslator {
        let config = TranslatorConfig::new("http://host/rest/");
        HttpTranslator::new(config.base_uri.clone(), config.translation_chain(None).unwrap())
    }

    #[test]
    fn test_domain() {
        let t = translator();
        assert_eq!(t.base_uri(), "http://host/rest");
        assert!(t.in_domain("http://host/rest"));
        assert!(t.in_domain("http://host/rest/a"));
        assert!(!t.in_domain("http://host/restx/a"));
        assert!(!t.in_domain("http://elsewhere/a"));
        assert_eq!(t.path_from_external("http://elsewhere/a").unwrap(), None);
    }

    #[test]
    fn test_root() {
        let t = translator();
        assert_eq!(t.path_from_external("http://host/rest").unwrap().as_deref(), Some("/"));
        assert_eq!(t.path_from_external("http://host/rest/").unwrap().as_deref(), Some("/"));
        assert_eq!(t.to_domain("/").unwrap(), "http://host/rest/");
    }

    #[test]
    fn test_decoding_and_encoding() {
        let t = translator();
        let path = t.path_from_external("http://host/rest/a%20b/c?x=1").unwrap().unwrap();
        assert_eq!(path, "/a b/c");
        assert_eq!(t.to_domain(&path).unwrap(), "http://host/rest/a%20b/c");
    }

    #[test]
    fn test_double_slash_rejected() {
        let t = translator();
        assert!(matches!(t.path_from_external("http://host/rest/a//b"), Err(Error::Conversion(_))));
    }

    #[test]
    fn test_hash_uri_round_trip() {
        let t = translator();
        let uri = "http://host/rest/some/path#with/a/hash/uri";
        let path = t.path_from_external(uri).unwrap().unwrap();
        assert_eq!(path, "/some/path/#/with%2Fa%2Fhash%2Furi");
        assert_eq!(t.to_domain(&path).unwrap(), uri);
    }

    #[test]
    fn test_fragment_dropped_without_hash_uris() {
        let t = translator().with_hash_uris(false);
        assert_eq!(t.path_from_external("http://host/rest/a#b").unwrap().as_deref(), Some("/a"));
    }

    #[test]
    fn test_encoded_hash_in_path_stays_in_segment() {
        let t = translator();
        let uri = "http://host/rest/a%23b";
        let path = t.path_from_external(uri).unwrap().unwrap();
        assert_eq!(path, "/a%23b");
        assert_eq!(t.to_domain(&path).unwrap(), uri);

        let uri = "http://host/rest/100%25/c%23d#frag";
        let path = t.path_from_external(uri).unwrap().unwrap();
        assert_eq!(path, "/100%25/c%23d/#/frag");
        assert_eq!(t.to_domain(&path).unwrap(), uri);
    }

    #[test]
    fn test_query_in_fragment_is_kept() {
        let t = translator();
        let path = t.path_from_external("http://host/rest/a#x?y").unwrap().unwrap();
        assert_eq!(path, "/a/#/x?y");
        assert_eq!(t.to_domain(&path).unwrap(), "http://host/rest/a#x?y");
        assert_eq!(t.path_from_external("http://host/rest/a?q=1#x").unwrap().as_deref(), Some("/a/#/x"));
    }

    #[test]
    fn test_content_marker() {
        let t = translator();
        assert_eq!(
            t.path_from_external("http://host/rest/file/fcr:content").unwrap().as_deref(),
            Some("/file/jcr:content")
        );
        assert_eq!(t.to_domain("/file/jcr:content").unwrap(), "http://host/rest/file/fcr:content");
    }
}
