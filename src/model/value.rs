//! Typed repository values.

use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A value stored in a node property.
///
/// Covers the repository's native type set. Anything outside it (date-only,
/// time-only, hex/base64 strings, language-tagged text …) is carried as a
/// `String` in the typed-string encoding of `rdf::value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    String(String),
    Long(i64),
    Double(f64),
    Decimal(BigDecimal),
    Boolean(bool),
    Date(DateTime<FixedOffset>),
    Uri(String),
    Binary(Vec<u8>),

    // Node references, by target identifier
    Reference(String),
    WeakReference(String),
}

/// The slot type a property expects.
///
/// `Undefined` lets the value's own shape decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Undefined,
    String,
    Long,
    Double,
    Decimal,
    Boolean,
    Date,
    Uri,
    Binary,
    Reference,
    WeakReference,
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        self.property_type().name()
    }

    pub fn property_type(&self) -> PropertyType {
        match self {
            Value::String(_) => PropertyType::String,
            Value::Long(_) => PropertyType::Long,
            Value::Double(_) => PropertyType::Double,
            Value::Decimal(_) => PropertyType::Decimal,
            Value::Boolean(_) => PropertyType::Boolean,
            Value::Date(_) => PropertyType::Date,
            Value::Uri(_) => PropertyType::Uri,
            Value::Binary(_) => PropertyType::Binary,
            Value::Reference(_) => PropertyType::Reference,
            Value::WeakReference(_) => PropertyType::WeakReference,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Value::Reference(_) | Value::WeakReference(_))
    }

    /// Identifier of the referenced node, for reference values.
    pub fn reference_target(&self) -> Option<&str> {
        match self {
            Value::Reference(id) | Value::WeakReference(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Uri(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(i) => Some(*i),
            _ => None,
        }
    }
}

impl PropertyType {
    pub fn name(self) -> &'static str {
        match self {
            PropertyType::Undefined => "UNDEFINED",
            PropertyType::String => "STRING",
            PropertyType::Long => "LONG",
            PropertyType::Double => "DOUBLE",
            PropertyType::Decimal => "DECIMAL",
            PropertyType::Boolean => "BOOLEAN",
            PropertyType::Date => "DATE",
            PropertyType::Uri => "URI",
            PropertyType::Binary => "BINARY",
            PropertyType::Reference => "REFERENCE",
            PropertyType::WeakReference => "WEAKREFERENCE",
        }
    }

    pub fn is_reference(self) -> bool {
        matches!(self, PropertyType::Reference | PropertyType::WeakReference)
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Boolean(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Long(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Long(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Double(v) } }
impl From<BigDecimal> for Value { fn from(v: BigDecimal) -> Self { Value::Decimal(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<DateTime<FixedOffset>> for Value { fn from(v: DateTime<FixedOffset>) -> Self { Value::Date(v) } }

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Long(i) => write!(f, "{i}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Date(d) => write!(f, "{}", d.to_rfc3339()),
            Value::Uri(u) => write!(f, "<{u}>"),
            Value::Binary(b) => write!(f, "<bytes[{}]>", b.len()),
            Value::Reference(id) => write!(f, "ref({id})"),
            Value::WeakReference(id) => write!(f, "weakref({id})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from() {
        assert_eq!(Value::from("hello"), Value::String("hello".into()));
        assert_eq!(Value::from(42), Value::Long(42));
        assert_eq!(Value::from(3.5), Value::Double(3.5));
        assert_eq!(Value::from(true), Value::Boolean(true));
    }

    #[test]
    fn test_reference_target() {
        assert_eq!(Value::WeakReference("n1".into()).reference_target(), Some("n1"));
        assert_eq!(Value::from("n1").reference_target(), None);
        assert!(Value::Reference("n1".into()).property_type().is_reference());
    }
}
