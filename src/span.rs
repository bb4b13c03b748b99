//! Spans and spansets, the inputs to filter evaluation.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Name of a value slot on a span. Keys are flat text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute(pub String);

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Attribute(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One recorded unit of work: an opaque identity plus a bag of named
/// attributes. Read-only to the evaluator; a span missing an attribute is
/// the norm, not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub id: Vec<u8>,
    #[serde(default)]
    pub attributes: HashMap<Attribute, Value>,
}

impl Span {
    pub fn new(id: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(Attribute::new(name), value);
        self
    }

    /// Look up an attribute by name. Absence yields `None`.
    pub fn attribute(&self, name: &Attribute) -> Option<&Value> {
        self.attributes.get(name)
    }
}

/// An ordered group of spans treated as one candidate match unit, e.g. the
/// spans of one trace. Order is significant and preserved by every
/// transform.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Spanset {
    pub spans: Vec<Span>,
}

impl Spanset {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }
}
