//! # RDF Bridge
//!
//! Statements in, properties out, and back again.
//!
//! | Type | Direction |
//! |------|-----------|
//! | [`PropertyConverter`] | predicate IRI ↔ prefixed property name |
//! | [`ValueConverter`] | object term ↔ property value |
//! | [`Skolemizer`] | blank node → minted resource URI |
//! | [`StatementWriter`] | statement → node edits |
//! | [`node_triples`] | node → statements |

pub mod projection;
pub mod property;
pub mod skolem;
pub mod value;
pub mod writer;

pub use projection::node_triples;
pub use property::PropertyConverter;
pub use skolem::Skolemizer;
pub use value::ValueConverter;
pub use writer::StatementWriter;
