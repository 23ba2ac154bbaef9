//! # Document Store
//!
//! Thin contract every backend implements: create, read, update, delete and filtered queries over
//! named collections of JSON documents.
//!
//! ## Backends
//!
//! - `memory`: in-process map, used for development and tests
//! - `redis://...`: one redis hash per document plus an id set per collection
//!
//! ## Requirements
//!
//! - Store assigns ids on create
//! - Partial updates only touch the fields given, so writes to different fields never clobber
//!   each other
//! - Equality predicates on any field, ordering on a single field
//! - Small dataset, predicates may be evaluated in process
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

pub mod memory;
pub mod query;
pub mod redis_store;

pub use memory::MemoryStore;
pub use query::{Direction, Query};
pub use redis_store::RedisStore;

pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    /// Folds the id into the fields so the document decodes as a single record.
    pub fn into_value(self) -> Value {
        let mut fields = self.fields;
        fields.insert("id".to_string(), Value::String(self.id));
        Value::Object(fields)
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Document {id} not found in {collection}")]
    NotFound { collection: String, id: String },

    #[error("Unsupported store url: {0}")]
    UnsupportedUrl(String),
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn create(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Fails with [`StoreError::NotFound`] when the document does not exist.
    async fn update(&self, collection: &str, id: &str, patch: Fields) -> Result<(), StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError> {
        Ok(query.apply(self.list(collection).await?))
    }
}

pub async fn connect(store_url: &str) -> Result<Arc<dyn Store>, StoreError> {
    if store_url == "memory" {
        info!("Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    if store_url.starts_with("redis://") || store_url.starts_with("rediss://") {
        info!("Connecting to redis store");
        return Ok(Arc::new(RedisStore::connect(store_url).await?));
    }

    Err(StoreError::UnsupportedUrl(store_url.to_string()))
}

static SHARED_STORE: OnceCell<Arc<dyn Store>> = OnceCell::const_new();

/// Process-wide store handle. Only the first call connects; later calls reuse it.
pub async fn shared_store(store_url: &str) -> Result<Arc<dyn Store>, StoreError> {
    SHARED_STORE
        .get_or_try_init(|| connect(store_url))
        .await
        .cloned()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_into_value_adds_id() {
        let mut fields = Fields::new();
        fields.insert("name".to_string(), json!("Gitea"));

        let document = Document {
            id: "abc".to_string(),
            fields,
        };

        assert_eq!(document.into_value(), json!({ "id": "abc", "name": "Gitea" }));
    }

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        let result = connect("postgres://localhost").await;
        assert!(matches!(result, Err(StoreError::UnsupportedUrl(_))));
    }

    #[tokio::test]
    async fn test_shared_store_created_once() {
        let first = shared_store("memory").await.unwrap();
        let second = shared_store("memory").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }
}
