//! RDF object ↔ repository value mapping.
//!
//! Literals whose datatype has a native counterpart become native values.
//! Everything else is stored as a string carrying its lexical form,
//! datatype and language tag in the typed-string encoding, so projecting
//! it back yields an equal literal.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, SecondsFormat};
use tracing::debug;

use crate::model::term::{parse_boolean, parse_double};
use crate::model::{Literal, PropertyType, Term, Value};
use crate::storage::NodeStore;
use crate::translate::ResourceTranslator;
use crate::vocab::{rdf, xsd};
use crate::{Error, Result};

/// Separator between the parts of a typed string.
pub const TYPED_STRING_DELIMITER: &str = "\u{18}^^\u{18}";

/// Encode a literal as a typed string: `lexical␘^^␘datatype[␘^^␘lang]`.
pub fn encode_typed_string(literal: &Literal) -> String {
    let mut out = format!("{}{TYPED_STRING_DELIMITER}{}", literal.lexical, literal.datatype);
    if let Some(lang) = &literal.language {
        out.push_str(TYPED_STRING_DELIMITER);
        out.push_str(lang);
    }
    out
}

/// Decode a typed string. `None` for an ordinary string.
pub fn decode_typed_string(s: &str) -> Option<Literal> {
    let mut parts = s.split(TYPED_STRING_DELIMITER);
    let lexical = parts.next()?;
    let datatype = parts.next()?;
    let language = parts.next().map(str::to_string);
    if parts.next().is_some() || datatype.is_empty() {
        return None;
    }
    Some(Literal { lexical: lexical.to_string(), datatype: datatype.to_string(), language })
}

/// Maps statement objects to property values and back.
///
/// IRIs inside the repository domain can become node references; that
/// needs the translator, which this converter borrows.
pub struct ValueConverter<'t, 'a, S: NodeStore> {
    translator: &'t ResourceTranslator<'a, S>,
}

impl<'t, 'a, S: NodeStore> ValueConverter<'t, 'a, S> {
    pub fn new(translator: &'t ResourceTranslator<'a, S>) -> Self {
        Self { translator }
    }

    /// Value for `object` stored into a slot of type `slot`.
    ///
    /// Blank nodes must have been skolemized beforehand.
    pub fn to_value(&self, object: &Term, slot: PropertyType) -> Result<Value> {
        match object {
            Term::Iri(iri) if slot.is_reference() => self.reference(iri, slot),
            Term::Iri(iri) => Ok(Value::Uri(iri.clone())),
            Term::Blank(id) => Err(Error::Conversion(format!("blank node {id} was not skolemized"))),
            Term::Literal(_) if slot.is_reference() => Err(Error::TypeMismatch {
                expected: slot.name().to_string(),
                got: "literal".to_string(),
            }),
            Term::Literal(literal) => coerce(literal_value(literal), literal, slot),
        }
    }

    /// Term for a stored value.
    pub fn to_term(&self, value: &Value) -> Result<Term> {
        Ok(match value {
            Value::String(s) => Term::Literal(
                decode_typed_string(s).unwrap_or_else(|| Literal::string(s.clone())),
            ),
            Value::Long(v) => Literal::long(*v).into(),
            Value::Double(v) => Literal::double(*v).into(),
            Value::Decimal(d) => Literal::typed(d.to_plain_string(), xsd::DECIMAL).into(),
            Value::Boolean(b) => Literal::boolean(*b).into(),
            Value::Date(d) => {
                Literal::typed(d.to_rfc3339_opts(SecondsFormat::AutoSi, true), xsd::DATE_TIME).into()
            }
            Value::Uri(uri) => Term::Iri(uri.clone()),
            Value::Binary(bytes) => Literal::typed(hex::encode(bytes), xsd::HEX_BINARY).into(),
            Value::Reference(id) | Value::WeakReference(id) => {
                let node = self
                    .translator
                    .store()
                    .get_node_by_identifier(id)?
                    .ok_or_else(|| Error::NotFound(format!("reference target {id}")))?;
                Term::Iri(self.translator.subject_from_internal(&node)?)
            }
        })
    }

    fn reference(&self, iri: &str, slot: PropertyType) -> Result<Value> {
        let path = self
            .translator
            .path_from_external(iri)?
            .ok_or_else(|| Error::UnsupportedReferenceTarget(iri.to_string()))?;
        let node = self
            .translator
            .store()
            .get_node(&path)?
            .ok_or_else(|| Error::NotFound(format!("referenced node {iri}")))?;
        debug!(%iri, target = %node.identifier, "reference");
        Ok(match slot {
            PropertyType::Reference => Value::Reference(node.identifier),
            _ => Value::WeakReference(node.identifier),
        })
    }
}

/// Natural value of a literal, before slot coercion.
fn literal_value(literal: &Literal) -> Value {
    if literal.language.is_some() {
        return Value::String(encode_typed_string(literal));
    }
    let lexical = literal.lexical.as_str();
    let native = match literal.datatype.as_str() {
        xsd::STRING => Some(Value::String(lexical.to_string())),
        dt if xsd::is_native_integer(dt) => i64::from_str(lexical.trim()).ok().map(Value::Long),
        xsd::DECIMAL => BigDecimal::from_str(lexical.trim()).ok().map(Value::Decimal),
        xsd::DOUBLE | xsd::FLOAT => parse_double(lexical).map(Value::Double),
        xsd::BOOLEAN => parse_boolean(lexical).map(Value::Boolean),
        xsd::DATE_TIME => DateTime::parse_from_rfc3339(lexical.trim()).ok().map(Value::Date),
        _ => None,
    };
    native.unwrap_or_else(|| Value::String(encode_typed_string(literal)))
}

/// Fit a natural value into the declared slot.
fn coerce(value: Value, literal: &Literal, slot: PropertyType) -> Result<Value> {
    Ok(match (slot, value) {
        (PropertyType::Undefined, v) => v,
        (slot, v) if v.property_type() == slot => v,
        (PropertyType::String, _) => Value::String(encode_typed_string(literal)),
        (PropertyType::Double, Value::Long(v)) => Value::Double(v as f64),
        (PropertyType::Decimal, Value::Long(v)) => Value::Decimal(BigDecimal::from(v)),
        (PropertyType::Uri, Value::String(s)) => Value::Uri(s),
        (PropertyType::Binary, _) if literal.datatype == xsd::HEX_BINARY => {
            let bytes = hex::decode(literal.lexical.trim())
                .map_err(|e| Error::Conversion(format!("invalid hexBinary {}: {e}", literal.lexical)))?;
            Value::Binary(bytes)
        }
        (slot, v) => {
            return Err(Error::TypeMismatch {
                expected: slot.name().to_string(),
                got: match v {
                    Value::String(_) if literal.language.is_some() => rdf::LANG_STRING.to_string(),
                    _ => literal.datatype.clone(),
                },
            });
        }
    })
}
