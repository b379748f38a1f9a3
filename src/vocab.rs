//! Vocabulary constants shared by the converters.
//!
//! Internal names use the repository's own prefixes (`jcr:`, `fedora:` …);
//! external names are what appears in URIs and RDF graphs.

/// Path markers: reserved segments with a fixed meaning inside paths.
pub mod markers {
    /// Internal prefix of repository-managed path segments.
    pub const INTERNAL_PREFIX: &str = "jcr:";

    /// External counterpart of [`INTERNAL_PREFIX`].
    pub const EXTERNAL_PREFIX: &str = "fcr:";

    /// Internal segment holding a binary's bytes.
    pub const INTERNAL_CONTENT: &str = "jcr:content";

    /// External segment addressing a binary's bytes.
    pub const EXTERNAL_CONTENT: &str = "fcr:content";

    /// External segment introducing a version label.
    pub const VERSIONS: &str = "fcr:versions";

    /// Segment introducing a hash section.
    pub const HASH: &str = "#";

    /// Prefix of the transaction segment in external paths.
    pub const TX_PREFIX: &str = "tx:";

    /// Root of frozen version snapshots.
    pub const VERSION_STORAGE: &str = "/jcr:system/jcr:versionStorage";

    /// Default container for skolemized blank nodes.
    pub const SKOLEM_CONTAINER: &str = "/.well-known/genid";

    /// Suffix of reference placeholder properties.
    pub const REFERENCE_SUFFIX: &str = "_ref";
}

/// Mixin names (type flags) carried by nodes.
pub mod mixins {
    pub const RESOURCE: &str = "fedora:Resource";
    pub const CONTAINER: &str = "fedora:Container";
    pub const BINARY: &str = "fedora:Binary";
    pub const BINARY_DESCRIPTION: &str = "fedora:NonRdfSourceDescription";
    pub const TOMBSTONE: &str = "fedora:Tombstone";
    pub const PAIRTREE: &str = "fedora:Pairtree";
    pub const SKOLEM: &str = "fedora:Skolem";
    pub const VERSIONABLE: &str = "mix:versionable";
    pub const FROZEN: &str = "nt:frozenNode";
}

/// Repository-managed property names.
pub mod props {
    /// Identifier of the node a frozen copy was taken from.
    pub const FROZEN_UUID: &str = "jcr:frozenUuid";
}

/// Namespace URIs.
pub mod ns {
    /// Internal namespace of repository-managed names.
    pub const JCR: &str = "http://www.jcp.org/jcr/1.0";

    /// External RDF namespace that stands in for [`JCR`].
    pub const REPOSITORY: &str = "http://fedora.info/definitions/v4/repository#";

    pub const FEDORA: &str = "http://fedora.info/definitions/v4/fedora#";
    pub const MIX: &str = "http://www.jcp.org/jcr/mix/1.0";
    pub const NT: &str = "http://www.jcp.org/jcr/nt/1.0";
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

    /// Prefixes that user data may never coin properties in.
    pub const RESERVED_PREFIXES: &[&str] = &["jcr", "nt", "mix", "mode", "xml", "fcr"];

    /// Translate an RDF namespace into the internal namespace it stands for.
    pub fn internal_for_rdf(uri: &str) -> &str {
        if uri == REPOSITORY { JCR } else { uri }
    }

    /// Translate an internal namespace into its RDF form.
    pub fn rdf_for_internal(uri: &str) -> &str {
        if uri == JCR { REPOSITORY } else { uri }
    }
}

/// RDF vocabulary constants.
pub mod rdf {
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// XSD vocabulary constants.
pub mod xsd {
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
    pub const UNSIGNED_LONG: &str = "http://www.w3.org/2001/XMLSchema#unsignedLong";
    pub const UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";
    pub const UNSIGNED_SHORT: &str = "http://www.w3.org/2001/XMLSchema#unsignedShort";
    pub const UNSIGNED_BYTE: &str = "http://www.w3.org/2001/XMLSchema#unsignedByte";
    pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
    pub const NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";
    pub const NON_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonPositiveInteger";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const TIME: &str = "http://www.w3.org/2001/XMLSchema#time";
    pub const G_YEAR: &str = "http://www.w3.org/2001/XMLSchema#gYear";
    pub const G_MONTH: &str = "http://www.w3.org/2001/XMLSchema#gMonth";
    pub const G_DAY: &str = "http://www.w3.org/2001/XMLSchema#gDay";
    pub const G_MONTH_DAY: &str = "http://www.w3.org/2001/XMLSchema#gMonthDay";
    pub const HEX_BINARY: &str = "http://www.w3.org/2001/XMLSchema#hexBinary";
    pub const BASE64_BINARY: &str = "http://www.w3.org/2001/XMLSchema#base64Binary";
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
    pub const TOKEN: &str = "http://www.w3.org/2001/XMLSchema#token";
    pub const NAME: &str = "http://www.w3.org/2001/XMLSchema#Name";
    pub const QNAME: &str = "http://www.w3.org/2001/XMLSchema#QName";
    pub const ID: &str = "http://www.w3.org/2001/XMLSchema#ID";

    /// Signed integer types that fit the repository's 64-bit long.
    pub fn is_native_integer(dt: &str) -> bool {
        matches!(dt, INTEGER | LONG | INT | SHORT | BYTE)
    }

    /// Every XSD integer-derived type, bounded or not.
    pub fn is_integer_family(dt: &str) -> bool {
        is_native_integer(dt)
            || matches!(
                dt,
                UNSIGNED_LONG
                    | UNSIGNED_INT
                    | UNSIGNED_SHORT
                    | UNSIGNED_BYTE
                    | POSITIVE_INTEGER
                    | NON_NEGATIVE_INTEGER
                    | NEGATIVE_INTEGER
                    | NON_POSITIVE_INTEGER
            )
    }

    /// Floating point types.
    pub fn is_floating(dt: &str) -> bool {
        matches!(dt, DOUBLE | FLOAT)
    }
}
