//! Store Client
//!
//! Owns the connection to the document store and the unique index on the
//! soldier business key. The connection is established once at startup; if
//! that fails the client stays disconnected and every repository call fails
//! fast instead of reconnecting.

mod mongo;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use mongo::MongoCollection;

/// Field carrying the application-assigned business key
pub const SOLDIER_ID_FIELD: &str = "ID";

/// Store-level failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database connection is not available")]
    NotConnected,

    /// A write hit the unique index
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("{0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Operations the service needs from a single document collection
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    async fn ensure_unique_index(&self, field: &str) -> StoreResult<()>;

    async fn find(&self, filter: Document) -> StoreResult<Vec<Document>>;

    async fn find_one(&self, filter: Document) -> StoreResult<Option<Document>>;

    /// Inserts a document and returns the id the store generated for it
    async fn insert_one(&self, document: Document) -> StoreResult<Bson>;

    /// Applies `$set` with the given fields to the first match and returns
    /// the document as it is after the update
    async fn find_one_and_update(
        &self,
        filter: Document,
        set: Document,
    ) -> StoreResult<Option<Document>>;

    /// Deletes the first match and returns how many documents were removed
    async fn delete_one(&self, filter: Document) -> StoreResult<u64>;

    async fn shutdown(&self);
}

/// Connection settings for the document store
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub server_selection_timeout: Duration,
}

/// Shared handle to the soldier collection
///
/// One instance is created at startup and shared by every request handler.
pub struct StoreClient {
    settings: Option<StoreSettings>,
    collection: RwLock<Option<Arc<dyn DocumentCollection>>>,
}

impl StoreClient {
    /// Creates a disconnected client; call `connect` to reach the store
    pub fn new(settings: StoreSettings) -> Self {
        Self {
            settings: Some(settings),
            collection: RwLock::new(None),
        }
    }

    /// Creates a client that is already connected to the given collection
    pub fn attached(collection: Arc<dyn DocumentCollection>) -> Self {
        Self {
            settings: None,
            collection: RwLock::new(Some(collection)),
        }
    }

    /// Connects to the store, pings it and ensures the unique index.
    ///
    /// Failures are logged, not returned. The return value says whether the
    /// client ended up connected.
    pub async fn connect(&self) -> bool {
        if self.is_connected() {
            return true;
        }

        let Some(settings) = &self.settings else {
            tracing::error!("DATABASE CONNECTION FAILED: no store settings configured");
            return false;
        };

        match MongoCollection::connect(settings).await {
            Ok(collection) => {
                tracing::info!("Successfully connected to MongoDB");
                self.attach_indexed(Arc::new(collection)).await
            }
            Err(err) => {
                tracing::error!("DATABASE CONNECTION FAILED: {}", err);
                *self.collection.write() = None;
                false
            }
        }
    }

    /// Ensures the unique index on a freshly opened collection and adopts it.
    ///
    /// A collection that cannot carry the index is shut down and the client
    /// stays disconnected.
    pub async fn attach_indexed(&self, collection: Arc<dyn DocumentCollection>) -> bool {
        if let Err(err) = collection.ensure_unique_index(SOLDIER_ID_FIELD).await {
            tracing::error!("Failed to create index: {}", err);
            tracing::error!("DATABASE CONNECTION FAILED: {}", err);
            collection.shutdown().await;
            *self.collection.write() = None;
            return false;
        }
        tracing::info!("Unique index on '{}' field ensured", SOLDIER_ID_FIELD);

        *self.collection.write() = Some(collection);
        true
    }

    /// Releases the connection if one is held
    pub async fn disconnect(&self) {
        let collection = self.collection.write().take();

        if let Some(collection) = collection {
            collection.shutdown().await;
            tracing::info!("Disconnected from MongoDB");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.collection.read().is_some()
    }

    /// The collection handle, or `NotConnected` when the store is unavailable
    pub fn collection(&self) -> StoreResult<Arc<dyn DocumentCollection>> {
        self.collection
            .read()
            .clone()
            .ok_or(StoreError::NotConnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryCollection;
    use mongodb::bson::doc;

    fn unreachable_settings() -> StoreSettings {
        StoreSettings {
            uri: "not a mongodb uri".to_string(),
            database: "test".to_string(),
            collection: "data".to_string(),
            server_selection_timeout: Duration::from_millis(100),
        }
    }

    #[tokio::test]
    async fn test_new_client_is_disconnected() {
        let client = StoreClient::new(unreachable_settings());

        assert!(!client.is_connected());
        assert!(matches!(client.collection(), Err(StoreError::NotConnected)));
    }

    #[tokio::test]
    async fn test_failed_connect_leaves_client_disconnected() {
        let client = StoreClient::new(unreachable_settings());

        assert!(!client.connect().await);
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let client = StoreClient::attached(Arc::new(MemoryCollection::new()));
        assert!(client.is_connected());

        client.disconnect().await;
        assert!(!client.is_connected());

        client.disconnect().await;
        assert!(!client.is_connected());

        let never_connected = StoreClient::new(unreachable_settings());
        never_connected.disconnect().await;
    }

    #[tokio::test]
    async fn test_attach_indexed_creates_unique_index() {
        let collection = Arc::new(MemoryCollection::default());
        let client = StoreClient::new(unreachable_settings());

        assert!(client.attach_indexed(collection.clone()).await);
        assert!(client.is_connected());

        let store = client.collection().unwrap();
        store.insert_one(doc! { SOLDIER_ID_FIELD: 7_i64 }).await.unwrap();
        assert!(matches!(
            store.insert_one(doc! { SOLDIER_ID_FIELD: 7_i64 }).await,
            Err(StoreError::DuplicateKey(_))
        ));
        assert_eq!(collection.document_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_index_leaves_client_disconnected() {
        let collection = Arc::new(MemoryCollection::new());
        collection.fail_operations();
        let client = StoreClient::new(unreachable_settings());

        assert!(!client.attach_indexed(collection).await);
        assert!(!client.is_connected());
        assert!(matches!(client.collection(), Err(StoreError::NotConnected)));
    }

    #[tokio::test]
    async fn test_connect_keeps_existing_connection() {
        let client = StoreClient::attached(Arc::new(MemoryCollection::new()));
        assert!(client.connect().await);
        assert!(client.collection().is_ok());
    }
}
