//! # Resource Model
//!
//! Clean DTOs shared by every layer: converters, translators, the RDF
//! bridge and the node store.
//!
//! Design rule: this module is pure data. No I/O, no store access, no
//! configuration.

pub mod node;
pub mod path;
pub mod value;
pub mod property_map;
pub mod term;
pub mod resource;

pub use node::Node;
pub use value::{Value, PropertyType};
pub use property_map::PropertyMap;
pub use term::{BlankId, Literal, Statement, Term};
pub use resource::ResourceVariant;
