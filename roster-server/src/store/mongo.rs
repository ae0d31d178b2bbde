//! MongoDB collection backend

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, IndexModel};

use super::{DocumentCollection, StoreError, StoreResult, StoreSettings};

/// Server error code for a unique index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

pub struct MongoCollection {
    client: Client,
    collection: Collection<Document>,
}

impl MongoCollection {
    /// Builds a client with a bounded server selection timeout and pings the
    /// server once. The driver connects lazily, so without the ping an
    /// unreachable server would only surface on the first query.
    pub async fn connect(settings: &StoreSettings) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&settings.uri).await?;
        options.server_selection_timeout = Some(settings.server_selection_timeout);

        let client = Client::with_options(options)?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        let collection = client
            .database(&settings.database)
            .collection::<Document>(&settings.collection);

        Ok(Self { client, collection })
    }
}

#[async_trait]
impl DocumentCollection for MongoCollection {
    async fn ensure_unique_index(&self, field: &str) -> StoreResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { field: 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection.create_index(index).await?;
        Ok(())
    }

    async fn find(&self, filter: Document) -> StoreResult<Vec<Document>> {
        let cursor = self.collection.find(filter).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_one(&self, filter: Document) -> StoreResult<Option<Document>> {
        Ok(self.collection.find_one(filter).await?)
    }

    async fn insert_one(&self, document: Document) -> StoreResult<Bson> {
        let result = self.collection.insert_one(document).await?;
        Ok(result.inserted_id)
    }

    async fn find_one_and_update(
        &self,
        filter: Document,
        set: Document,
    ) -> StoreResult<Option<Document>> {
        let updated = self
            .collection
            .find_one_and_update(filter, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }

    async fn delete_one(&self, filter: Document) -> StoreResult<u64> {
        let result = self.collection.delete_one(filter).await?;
        Ok(result.deleted_count)
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        let duplicate = match &*err.kind {
            ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
                write_error.code == DUPLICATE_KEY_CODE
            }
            ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
            _ => false,
        };

        if duplicate {
            StoreError::DuplicateKey(err.to_string())
        } else {
            StoreError::Backend(err.to_string())
        }
    }
}
