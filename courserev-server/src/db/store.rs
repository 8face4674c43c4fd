//! Postgres-backed document store
//!
//! Documents live in a single `documents` table keyed by (collection, id),
//! with field data in JSONB. Equality filters read `data ->> field`.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use courserev_core::{Collection, Document, DocumentStore, StoreError};

/// Document row from database
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    data: Value,
}

impl DocumentRow {
    fn into_document(self, collection: Collection) -> Result<Document, StoreError> {
        match self.data {
            Value::Object(fields) => Ok(Document::new(self.id, fields)),
            other => Err(StoreError::Malformed {
                collection,
                reason: format!("holds {} instead of an object", json_kind(&other)),
                id: self.id,
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Field names are inlined into SQL (so the expression indexes apply),
/// which limits them to plain identifiers.
fn is_plain_identifier(field: &str) -> bool {
    !field.is_empty() && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn map_sqlx(collection: Collection, e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(e.to_string()),
        other => StoreError::Query {
            collection,
            reason: other.to_string(),
        },
    }
}

/// Document store over a Postgres pool
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert documents in a single transaction.
    ///
    /// `created_at` comes from `clock_timestamp()` so rows written in one
    /// transaction still sort in the order given. Existing rows keep their
    /// position and take the new data.
    pub async fn seed(&self, documents: &[(Collection, Document)]) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for (collection, document) in documents {
            let result = sqlx::query(
                r#"
                INSERT INTO documents (collection, id, data, created_at)
                VALUES ($1, $2, $3, clock_timestamp())
                ON CONFLICT (collection, id) DO UPDATE SET data = EXCLUDED.data
                "#,
            )
            .bind(collection.as_str())
            .bind(&document.id)
            .bind(Json(&document.fields))
            .execute(&mut *tx)
            .await?;
            written += result.rows_affected();
        }

        tx.commit().await?;
        tracing::info!(documents = written, "Seeded document store");
        Ok(written)
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    /// Rows come back oldest first, standing in for the store's natural order.
    async fn find_by_field(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        if !is_plain_identifier(field) {
            return Err(StoreError::Query {
                collection,
                reason: format!("field name '{field}' is not a plain identifier"),
            });
        }

        let sql = format!(
            "SELECT id, data FROM documents \
             WHERE collection = $1 AND data ->> '{field}' = $2 \
             ORDER BY created_at, id"
        );

        let rows: Vec<DocumentRow> = sqlx::query_as(&sql)
            .bind(collection.as_str())
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx(collection, e))?;

        rows.into_iter()
            .map(|row| row.into_document(collection))
            .collect()
    }

    async fn get_by_id(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let row: Option<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, data FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx(collection, e))?;

        row.map(|row| row.into_document(collection)).transpose()
    }
}
