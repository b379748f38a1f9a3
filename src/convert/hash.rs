//! Hash-URI sub-resources.
//!
//! An external `/a/b#frag` is stored as the internal path `/a/b/#/frag`.
//! Separators inside the fragment are percent-encoded so the fragment
//! always occupies exactly one internal segment.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::model::path::{self, ROOT, SEPARATOR};
use crate::vocab::markers::HASH;
use crate::{Error, Result};

use super::IdentifierConverter;

/// Characters escaped inside a stored fragment segment.
const FRAGMENT: &AsciiSet = &CONTROLS.add(b'/').add(b'%').add(b'#');

#[derive(Debug, Clone, Copy, Default)]
pub struct HashConverter;

impl HashConverter {
    pub fn new() -> Self {
        Self
    }
}

impl IdentifierConverter<String, String> for HashConverter {
    fn convert(&self, external: String) -> Result<String> {
        let Some(ix) = external.find('#') else {
            return Ok(external);
        };
        let base = external[..ix].trim_end_matches(SEPARATOR);
        let fragment = &external[ix + 1..];
        if fragment.is_empty() {
            return Ok(if base.is_empty() { ROOT.to_string() } else { base.to_string() });
        }
        Ok(format!("{base}/{HASH}/{}", utf8_percent_encode(fragment, FRAGMENT)))
    }

    fn revert(&self, internal: String) -> Result<String> {
        let (base, section) = path::split_hash_section(&internal);
        if section.is_empty() {
            return Ok(internal);
        }
        let base = if base.is_empty() { ROOT } else { base };

        // section is "/#", "/#/" or "/#/<fragment>"
        let fragment = section[1 + HASH.len()..].trim_start_matches(SEPARATOR);
        if fragment.is_empty() {
            return Ok(base.to_string());
        }
        if fragment.contains(SEPARATOR) {
            return Err(Error::Conversion(format!(
                "hash section of {internal} spans more than one segment"
            )));
        }
        let decoded = percent_decode_str(fragment)
            .decode_utf8()
            .map_err(|e| Error::Conversion(format!("fragment of {internal} is not UTF-8: {e}")))?;
        Ok(format!("{base}#{decoded}"))
    }
}
