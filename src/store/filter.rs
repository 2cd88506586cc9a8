//! # Document Filters
//!
//! Equality filters over JSON documents. A filter matches a document when
//! every filter field equals the corresponding document field.

use serde_json::{Map, Value};

use super::object_id::ObjectId;

/// Equality filter over document fields
#[derive(Debug, Clone, Default)]
pub struct Filter {
    fields: Map<String, Value>,
}

impl Filter {
    /// Matches every document
    pub fn empty() -> Self {
        Self::default()
    }

    /// Match on the `_id` field
    pub fn by_id(id: ObjectId) -> Self {
        Self::default().with_field("_id", Value::String(id.to_hex()))
    }

    /// Add an equality condition
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// True when the filter has no conditions
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when every filter field equals the document's field
    pub fn matches(&self, doc: &Value) -> bool {
        self.fields.iter().all(|(key, value)| doc.get(key) == Some(value))
    }
}
