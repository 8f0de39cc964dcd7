use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::db::Database;
use crate::errors::PersistenceError;
use crate::models::{Lead, LeadDocument};

/// Collection every lead submission is written to.
pub const LEAD_COLLECTION: &str = "lead";

/// A document store addressed by named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Logical database name, reported by diagnostics.
    fn name(&self) -> &str;

    /// Appends `document` to `collection` and returns its new identifier.
    async fn insert(&self, collection: &str, document: Value) -> Result<String, PersistenceError>;

    /// Lists at most `limit` collection names.
    async fn list_collections(&self, limit: usize) -> Result<Vec<String>, PersistenceError>;
}

/// Postgres-backed store keeping every document as a JSONB row.
pub struct PgDocumentStore {
    pool: PgPool,
    schema: String,
    table_ready: OnceCell<()>,
}

impl PgDocumentStore {
    pub fn new(db: Database) -> Self {
        Self {
            pool: db.pool,
            schema: db.schema,
            table_ready: OnceCell::new(),
        }
    }

    fn table(&self) -> String {
        format!("\"{}\".documents", self.schema)
    }

    /// Creates the documents table on first write. Not a migration system:
    /// the layout is fixed.
    async fn ensure_table(&self) -> Result<(), PersistenceError> {
        self.table_ready
            .get_or_try_init(|| async {
                sqlx::query(&format!(
                    "CREATE TABLE IF NOT EXISTS {} (
                        id UUID PRIMARY KEY,
                        collection TEXT NOT NULL,
                        data JSONB NOT NULL,
                        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
                    )",
                    self.table()
                ))
                .execute(&self.pool)
                .await?;

                sqlx::query(&format!(
                    "CREATE INDEX IF NOT EXISTS documents_collection_idx ON {} (collection)",
                    self.table()
                ))
                .execute(&self.pool)
                .await?;

                tracing::debug!("Documents table ready in schema {}", self.schema);
                Ok::<(), PersistenceError>(())
            })
            .await
            .map(|_| ())
    }

    /// Fetches a stored document by id. Used by smoke tests and tooling.
    pub async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, PersistenceError> {
        let id = Uuid::parse_str(id)
            .map_err(|e| PersistenceError::Store(format!("Invalid document id: {}", e)))?;

        let row: Option<(Value,)> = sqlx::query_as(&format!(
            "SELECT data FROM {} WHERE id = $1 AND collection = $2",
            self.table()
        ))
        .bind(id)
        .bind(collection)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(data,)| data))
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn name(&self) -> &str {
        &self.schema
    }

    async fn insert(&self, collection: &str, document: Value) -> Result<String, PersistenceError> {
        self.ensure_table().await?;

        let id = Uuid::new_v4();
        sqlx::query(&format!(
            "INSERT INTO {} (id, collection, data) VALUES ($1, $2, $3)",
            self.table()
        ))
        .bind(id)
        .bind(collection)
        .bind(document)
        .execute(&self.pool)
        .await?;

        Ok(id.to_string())
    }

    async fn list_collections(&self, limit: usize) -> Result<Vec<String>, PersistenceError> {
        // A fresh database has no table yet; that is an empty store, not an error.
        let exists: Option<String> = sqlx::query_scalar("SELECT to_regclass($1)::text")
            .bind(self.table())
            .fetch_one(&self.pool)
            .await?;

        if exists.is_none() {
            return Ok(Vec::new());
        }

        let names: Vec<String> = sqlx::query_scalar(&format!(
            "SELECT DISTINCT collection FROM {} ORDER BY collection LIMIT $1",
            self.table()
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }
}

/// A document held by [`MemoryDocumentStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub collection: String,
    pub data: Value,
}

/// In-process store. Keeps documents in insertion order.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    name: String,
    documents: Mutex<Vec<StoredDocument>>,
}

impl MemoryDocumentStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the documents in `collection`.
    pub fn documents(&self, collection: &str) -> Vec<StoredDocument> {
        self.documents
            .lock()
            .map(|docs| {
                docs.iter()
                    .filter(|d| d.collection == collection)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn insert(&self, collection: &str, document: Value) -> Result<String, PersistenceError> {
        let id = Uuid::new_v4().to_string();
        let mut docs = self
            .documents
            .lock()
            .map_err(|_| PersistenceError::Store("Memory store poisoned".to_string()))?;
        docs.push(StoredDocument {
            id: id.clone(),
            collection: collection.to_string(),
            data: document,
        });
        Ok(id)
    }

    async fn list_collections(&self, limit: usize) -> Result<Vec<String>, PersistenceError> {
        let docs = self
            .documents
            .lock()
            .map_err(|_| PersistenceError::Store("Memory store poisoned".to_string()))?;
        let mut names: Vec<String> = docs.iter().map(|d| d.collection.clone()).collect();
        names.sort();
        names.dedup();
        names.truncate(limit);
        Ok(names)
    }
}

/// Writes leads to a document store, bounding every call by a deadline.
#[derive(Clone)]
pub struct LeadStorage {
    store: Arc<dyn DocumentStore>,
    timeout: Duration,
}

impl LeadStorage {
    pub fn new(store: Arc<dyn DocumentStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Stamps `lead` with creation timestamps and inserts it into `collection`.
    ///
    /// Each call creates a new document; nothing is deduplicated or retried.
    pub async fn insert(&self, collection: &str, lead: Lead) -> Result<String, PersistenceError> {
        let document = serde_json::to_value(LeadDocument::stamped(lead, chrono::Utc::now()))?;

        let id = tokio::time::timeout(self.timeout, self.store.insert(collection, document))
            .await
            .map_err(|_| PersistenceError::Timeout(self.timeout))??;

        tracing::debug!("Inserted document {} into '{}'", id, collection);
        Ok(id)
    }

    /// Lists collection names under the same deadline as writes.
    pub async fn list_collections(&self, limit: usize) -> Result<Vec<String>, PersistenceError> {
        tokio::time::timeout(self.timeout, self.store.list_collections(limit))
            .await
            .map_err(|_| PersistenceError::Timeout(self.timeout))?
    }
}
