//! Multi-valued property storage on nodes.

use std::collections::HashMap;
use super::Value;

/// A map of property names to their (ordered) values.
pub type PropertyMap = HashMap<String, Vec<Value>>;
