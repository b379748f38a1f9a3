//! RDF terms and statements.
//!
//! A term is an IRI, a blank node or a literal. Literals keep their lexical
//! form and an explicit datatype; value equality across datatypes is
//! available through [`Literal::same_value_as`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::vocab::{rdf, xsd};

/// Blank node identifier, stable within one statement set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlankId(Arc<str>);

impl BlankId {
    /// The label should not include the `_:` prefix.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// A literal: lexical form, datatype IRI and optional language tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    pub datatype: String,
    pub language: Option<String>,
}

impl Literal {
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self { lexical: lexical.into(), datatype: datatype.into(), language: None }
    }

    /// Plain `xsd:string` literal.
    pub fn string(lexical: impl Into<String>) -> Self {
        Self::typed(lexical, xsd::STRING)
    }

    pub fn lang(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: rdf::LANG_STRING.to_string(),
            language: Some(language.into()),
        }
    }

    pub fn long(v: i64) -> Self {
        Self::typed(v.to_string(), xsd::LONG)
    }

    pub fn boolean(v: bool) -> Self {
        Self::typed(v.to_string(), xsd::BOOLEAN)
    }

    /// `xsd:double` literal, using `NaN`, `INF` and `-INF` for the special values.
    pub fn double(v: f64) -> Self {
        let lexical = if v.is_nan() {
            "NaN".to_string()
        } else if v.is_infinite() {
            if v.is_sign_positive() { "INF".to_string() } else { "-INF".to_string() }
        } else {
            format!("{v:?}")
        };
        Self::typed(lexical, xsd::DOUBLE)
    }

    /// Datatype-aware value equality.
    ///
    /// Integer-family types compare as integers, integers and decimals as
    /// decimals, floats as floats, booleans by truth value and dateTimes by
    /// instant. Anything else falls back to lexical plus datatype equality.
    pub fn same_value_as(&self, other: &Literal) -> bool {
        match (&self.language, &other.language) {
            (Some(a), Some(b)) => return a.eq_ignore_ascii_case(b) && self.lexical == other.lexical,
            (None, None) => {}
            _ => return false,
        }
        if self.datatype == other.datatype && self.lexical == other.lexical {
            return true;
        }

        let (a, b) = (self.datatype.as_str(), other.datatype.as_str());
        let numeric = |dt: &str| xsd::is_integer_family(dt) || dt == xsd::DECIMAL;

        if xsd::is_integer_family(a) && xsd::is_integer_family(b) {
            return match (i128::from_str(self.lexical.trim()), i128::from_str(other.lexical.trim())) {
                (Ok(x), Ok(y)) => x == y,
                _ => false,
            };
        }
        if numeric(a) && numeric(b) {
            return match (BigDecimal::from_str(self.lexical.trim()), BigDecimal::from_str(other.lexical.trim())) {
                (Ok(x), Ok(y)) => x == y,
                _ => false,
            };
        }
        if xsd::is_floating(a) && xsd::is_floating(b) {
            return match (parse_double(&self.lexical), parse_double(&other.lexical)) {
                (Some(x), Some(y)) => x == y || (x.is_nan() && y.is_nan()),
                _ => false,
            };
        }
        if a == xsd::BOOLEAN && b == xsd::BOOLEAN {
            return parse_boolean(&self.lexical).is_some()
                && parse_boolean(&self.lexical) == parse_boolean(&other.lexical);
        }
        if a == xsd::DATE_TIME && b == xsd::DATE_TIME {
            return match (
                DateTime::parse_from_rfc3339(self.lexical.trim()),
                DateTime::parse_from_rfc3339(other.lexical.trim()),
            ) {
                (Ok(x), Ok(y)) => x == y,
                _ => false,
            };
        }
        false
    }
}

/// Parse an `xsd:double` lexical form.
pub fn parse_double(lexical: &str) -> Option<f64> {
    match lexical.trim() {
        "NaN" => Some(f64::NAN),
        "INF" | "+INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        other => f64::from_str(other).ok().filter(|v| v.is_finite()),
    }
}

/// Parse an `xsd:boolean` lexical form.
pub fn parse_boolean(lexical: &str) -> Option<bool> {
    match lexical.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.lexical.replace('\\', "\\\\").replace('"', "\\\""))?;
        match &self.language {
            Some(lang) => write!(f, "@{lang}"),
            None if self.datatype == xsd::STRING => Ok(()),
            None => write!(f, "^^<{}>", self.datatype),
        }
    }
}

/// An RDF term.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Iri(String),
    Blank(BlankId),
    Literal(Literal),
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn blank(label: impl AsRef<str>) -> Self {
        Term::Blank(BlankId::new(label))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::Blank(id) => write!(f, "{id}"),
            Term::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

/// One subject/predicate/object statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

impl Statement {
    pub fn new(subject: Term, predicate: impl Into<String>, object: impl Into<Term>) -> Self {
        Self { subject, predicate: predicate.into(), object: object.into() }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}
