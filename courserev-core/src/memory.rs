//! In-memory document store.
//!
//! Collections keep insertion order, which stands in for "store order" in
//! queries. Backs the test suites and the CLI `--fixture` mode.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::document::{Collection, Document};
use crate::error::StoreError;
use crate::store::DocumentStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: HashMap<Collection, Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document to a collection
    pub fn insert(&mut self, collection: Collection, document: Document) {
        self.collections.entry(collection).or_default().push(document);
    }

    /// Builder form of `insert` taking a JSON object literal.
    ///
    /// Non-object values are stored with no fields.
    #[must_use]
    pub fn with(mut self, collection: Collection, id: &str, fields: Value) -> Self {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Default::default(),
        };
        self.insert(collection, Document::new(id, fields));
        self
    }

    /// Number of documents held in a collection
    pub fn len(&self, collection: Collection) -> usize {
        self.collections.get(&collection).map_or(0, Vec::len)
    }

    fn documents(&self, collection: Collection) -> &[Document] {
        self.collections
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .documents(collection)
            .iter()
            .filter(|d| d.field_equals(field, value))
            .cloned()
            .collect())
    }

    async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self
            .documents(collection)
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }
}
