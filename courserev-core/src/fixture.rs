//! Fixture files: course data in YAML or JSON, loaded into a `MemoryStore`.
//!
//! ```yaml
//! courses:
//!   - id: kiei-451
//!     courseNumber: KIEI-451
//!     name: Intro to Software Development
//! lecturers:
//!   - id: brian
//!     name: Brian Eng
//! sections:
//!   - id: kiei-451-brian
//!     courseId: kiei-451
//!     lecturerId: brian
//! reviews:
//!   - id: r1
//!     sectionId: kiei-451-brian
//!     body: Loved it
//!     rating: 5
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::document::{Collection, Document, Fields};
use crate::memory::MemoryStore;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("failed to read fixture {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid YAML fixture: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON fixture: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{collection} entry #{index} has no string 'id'")]
    MissingId { collection: Collection, index: usize },

    #[error("duplicate id '{id}' in {collection}")]
    DuplicateId { collection: Collection, id: String },
}

/// Raw fixture contents, one list of documents per collection
#[derive(Debug, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub courses: Vec<Fields>,
    #[serde(default)]
    pub lecturers: Vec<Fields>,
    #[serde(default)]
    pub sections: Vec<Fields>,
    #[serde(default)]
    pub reviews: Vec<Fields>,
}

impl Fixture {
    /// Load a fixture file; `.json` files parse as JSON, everything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, FixtureError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Split each entry's `id` from its fields, keeping file order.
    ///
    /// Ids must be strings and unique within their collection.
    pub fn into_documents(self) -> Result<Vec<(Collection, Document)>, FixtureError> {
        let collections = [
            (Collection::Courses, self.courses),
            (Collection::Lecturers, self.lecturers),
            (Collection::Sections, self.sections),
            (Collection::Reviews, self.reviews),
        ];

        let mut seen = HashSet::new();
        let mut documents = Vec::new();
        for (collection, entries) in collections {
            for (index, mut fields) in entries.into_iter().enumerate() {
                let id = match fields.remove("id") {
                    Some(Value::String(id)) => id,
                    _ => return Err(FixtureError::MissingId { collection, index }),
                };

                if !seen.insert((collection, id.clone())) {
                    return Err(FixtureError::DuplicateId { collection, id });
                }

                documents.push((collection, Document::new(id, fields)));
            }
        }

        Ok(documents)
    }

    /// Build a store from the fixture's documents
    pub fn into_store(self) -> Result<MemoryStore, FixtureError> {
        let mut store = MemoryStore::new();
        for (collection, document) in self.into_documents()? {
            store.insert(collection, document);
        }

        tracing::debug!(
            courses = store.len(Collection::Courses),
            lecturers = store.len(Collection::Lecturers),
            sections = store.len(Collection::Sections),
            reviews = store.len(Collection::Reviews),
            "Fixture loaded"
        );

        Ok(store)
    }
}

/// Read a fixture file straight into a store
pub fn load_store(path: impl AsRef<Path>) -> Result<MemoryStore, FixtureError> {
    Fixture::from_path(path)?.into_store()
}
