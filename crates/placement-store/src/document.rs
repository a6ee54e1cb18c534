//! Schemaless documents and the query / precondition types used to address
//! them.

use serde::Serialize;
use serde_json::{Map, Value};

use placement_shared::Record;

use crate::error::{Result, StoreError};

/// Body of a document: a JSON object keyed by field name.
pub type Fields = Map<String, Value>;

/// A document as returned by the store: its id plus its body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// String field, or `None` when absent, null or not a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Decode into a typed record, attaching the document id.
    pub fn decode<R: Record>(self) -> Result<R> {
        let mut record: R = serde_json::from_value(Value::Object(self.fields))?;
        record.set_id(self.id);
        Ok(record)
    }
}

/// Serialize a record (or any struct) into a document body.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::Malformed(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Apply a partial update on top of an existing body.
pub(crate) fn merge(body: &mut Fields, patch: Fields) {
    for (field, value) in patch {
        body.insert(field, value);
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Equality filter on one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    pub fn matches(&self, fields: &Fields) -> bool {
        fields.get(&self.field) == Some(&self.value)
    }
}

/// All documents of one collection whose fields match every filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: String,
    pub filters: Vec<Filter>,
}

impl Query {
    pub fn collection(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
        }
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn matches(&self, fields: &Fields) -> bool {
        self.filters.iter().all(|f| f.matches(fields))
    }
}

/// Guard for a conditional write: the stored `field` must still equal `equals`.
#[derive(Debug, Clone, PartialEq)]
pub struct Precondition {
    pub field: String,
    pub equals: Value,
}

impl Precondition {
    pub fn field_equals(field: impl Into<String>, equals: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            equals: equals.into(),
        }
    }

    pub(crate) fn check(&self, collection: &str, id: &str, fields: &Fields) -> Result<()> {
        if fields.get(&self.field) == Some(&self.equals) {
            Ok(())
        } else {
            Err(StoreError::PreconditionFailed {
                collection: collection.to_string(),
                id: id.to_string(),
                field: self.field.clone(),
            })
        }
    }
}
