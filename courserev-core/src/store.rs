//! Document store contract and the timed client the report stages use.
//!
//! Provides:
//! - `DocumentStore`: the two read capabilities a report needs
//! - `StoreClient`: wraps a store with a per-call timeout and error mapping

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::document::{Collection, Document};
use crate::error::{ReportError, StoreError};

/// Read-only access to a document store (testable)
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Equality filter: every document in `collection` whose `field` equals
    /// `value`, in the store's natural order.
    async fn find_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError>;

    /// Direct lookup by document id.
    async fn get_by_id(&self, collection: Collection, id: &str)
        -> Result<Option<Document>, StoreError>;
}

/// Store handle with per-call timeout enforcement
#[derive(Clone)]
pub struct StoreClient {
    store: Arc<dyn DocumentStore>,
    call_timeout: Duration,
}

impl StoreClient {
    pub fn new(store: Arc<dyn DocumentStore>, call_timeout: Duration) -> Self {
        Self {
            store,
            call_timeout,
        }
    }

    pub async fn find_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, ReportError> {
        let operation = format!("{collection}.{field} query");
        self.timed(operation, self.store.find_by_field(collection, field, value))
            .await
    }

    pub async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, ReportError> {
        let operation = format!("{collection} lookup of '{id}'");
        self.timed(operation, self.store.get_by_id(collection, id))
            .await
    }

    async fn timed<T>(
        &self,
        operation: String,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, ReportError> {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(ReportError::Timeout {
                operation,
                millis: self.call_timeout.as_millis() as u64,
            }),
        }
    }
}
