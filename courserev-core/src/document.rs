//! Raw documents as returned by a store, and the collections they live in.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ReportError;

/// Field map of a stored document (everything except its id)
pub type Fields = serde_json::Map<String, Value>;

/// The four collections a course report reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Courses,
    Lecturers,
    Sections,
    Reviews,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Courses,
        Collection::Lecturers,
        Collection::Sections,
        Collection::Reviews,
    ];

    /// Collection name as stored
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Courses => "courses",
            Self::Lecturers => "lecturers",
            Self::Sections => "sections",
            Self::Reviews => "reviews",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored document: opaque id plus its field data
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

    /// Decode the field data into a typed record.
    ///
    /// Missing fields, wrong types and out-of-range ratings all surface as
    /// `ReportError::InvalidDocument` carrying the collection and id.
    pub fn decode<T: DeserializeOwned>(&self, collection: Collection) -> Result<T, ReportError> {
        serde_json::from_value(Value::Object(self.fields.clone()))
            .map_err(|e| ReportError::invalid_document(collection, &self.id, e.to_string()))
    }

    /// Equality test used by equality-filter queries.
    ///
    /// String fields compare directly; numbers and booleans compare by their
    /// JSON text, so `rating == "5"` matches a stored `5`.
    pub fn field_equals(&self, field: &str, value: &str) -> bool {
        match self.fields.get(field) {
            Some(Value::String(s)) => s == value,
            Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string() == value,
            _ => false,
        }
    }
}
