//! Soldier Repository
//!
//! Handles all store operations related to soldiers.

use mongodb::bson::{self, Bson, Document, doc};
use roster_core::domain::soldier::Soldier;
use roster_core::dto::soldier::{CreateSoldier, SoldierField, UpdateSoldier};
use thiserror::Error;

use crate::store::{SOLDIER_ID_FIELD, StoreClient, StoreError};

/// Repository error type
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store is unreachable or failed the operation
    #[error("{0}")]
    Unavailable(String),

    /// A soldier with this business key already exists
    #[error("Item with ID {0} already exists")]
    Conflict(i64),

    /// A stored document could not be read as a soldier
    #[error("Malformed soldier document: {0}")]
    Malformed(String),
}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotConnected => RepositoryError::Unavailable(err.to_string()),
            StoreError::DuplicateKey(_) | StoreError::Backend(_) => {
                RepositoryError::Unavailable(format!("Database operation failed: {}", err))
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// List every soldier in the collection
pub async fn list_all(store: &StoreClient) -> Result<Vec<Soldier>> {
    let collection = store.collection()?;

    let documents = collection.find(Document::new()).await.inspect_err(|err| {
        tracing::error!("Error retrieving all soldiers: {}", err);
    })?;

    let soldiers = documents
        .into_iter()
        .map(into_soldier)
        .collect::<Result<Vec<_>>>()?;

    tracing::info!("Retrieved {} soldiers from database", soldiers.len());
    Ok(soldiers)
}

/// Find a soldier by business key
pub async fn find_by_id(store: &StoreClient, id: i64) -> Result<Option<Soldier>> {
    let collection = store.collection()?;

    let document = collection
        .find_one(by_soldier_id(id))
        .await
        .inspect_err(|err| {
            tracing::error!("Error retrieving soldier with ID {}: {}", id, err);
        })?;

    match document {
        Some(document) => {
            tracing::info!("Retrieved soldier with ID {}", id);
            into_soldier(document).map(Some)
        }
        None => {
            tracing::info!("No soldier found with ID {}", id);
            Ok(None)
        }
    }
}

/// Create a new soldier and return it as stored
pub async fn create(store: &StoreClient, req: CreateSoldier) -> Result<Soldier> {
    let collection = store.collection()?;

    let document =
        bson::to_document(&req).map_err(|e| RepositoryError::Malformed(e.to_string()))?;

    let store_id = collection
        .insert_one(document)
        .await
        .map_err(|err| match err {
            StoreError::DuplicateKey(_) => {
                tracing::warn!(
                    "Attempt to create duplicate soldier with ID {}",
                    req.soldier_id
                );
                RepositoryError::Conflict(req.soldier_id)
            }
            other => {
                tracing::error!("Error creating soldier: {}", other);
                other.into()
            }
        })?;

    // Read back so the response reflects exactly what the store holds
    let created = collection
        .find_one(doc! { "_id": store_id })
        .await
        .inspect_err(|err| {
            tracing::error!(
                "Error reading back created soldier with ID {}: {}",
                req.soldier_id,
                err
            );
        })?
        .ok_or_else(|| {
            RepositoryError::Unavailable(format!(
                "Soldier with ID {} vanished after insert",
                req.soldier_id
            ))
        })?;

    tracing::info!("Successfully created soldier with ID {}", req.soldier_id);
    into_soldier(created)
}

/// Apply a partial update
///
/// Only the fields present in `req` are written. With no fields present the
/// current record is returned untouched.
pub async fn update(store: &StoreClient, id: i64, req: &UpdateSoldier) -> Result<Option<Soldier>> {
    let collection = store.collection()?;

    let changes = req.changes();
    if changes.is_empty() {
        tracing::info!("No fields to update for soldier ID {}", id);
        return find_by_id(store, id).await;
    }

    let set = changes
        .into_iter()
        .map(|field| (field.name().to_string(), field_value(field)))
        .collect::<Document>();

    let updated = collection
        .find_one_and_update(by_soldier_id(id), set)
        .await
        .inspect_err(|err| {
            tracing::error!("Error updating soldier with ID {}: {}", id, err);
        })?;

    match updated {
        Some(document) => {
            tracing::info!("Successfully updated soldier with ID {}", id);
            into_soldier(document).map(Some)
        }
        None => {
            tracing::info!("No soldier found to update with ID {}", id);
            Ok(None)
        }
    }
}

/// Delete a soldier by business key
///
/// Returns whether a soldier was actually removed.
pub async fn delete(store: &StoreClient, id: i64) -> Result<bool> {
    let collection = store.collection()?;

    let deleted_count = collection
        .delete_one(by_soldier_id(id))
        .await
        .inspect_err(|err| {
            tracing::error!("Error deleting soldier with ID {}: {}", id, err);
        })?;

    let deleted = deleted_count > 0;
    if deleted {
        tracing::info!("Successfully deleted soldier with ID {}", id);
    } else {
        tracing::info!("No soldier found to delete with ID {}", id);
    }

    Ok(deleted)
}

// =============================================================================
// Document Conversion
// =============================================================================

fn by_soldier_id(id: i64) -> Document {
    doc! { SOLDIER_ID_FIELD: id }
}

fn field_value(field: SoldierField) -> Bson {
    match field {
        SoldierField::FirstName(value)
        | SoldierField::LastName(value)
        | SoldierField::Rank(value) => Bson::String(value),
        SoldierField::PhoneNumber(value) => Bson::Int64(value),
    }
}

/// Converts a stored document, rendering the store id as a string
fn into_soldier(mut document: Document) -> Result<Soldier> {
    let store_id = match document.remove("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(id)) => id,
        Some(other) => other.to_string(),
        None => {
            return Err(RepositoryError::Malformed(
                "document has no _id".to_string(),
            ));
        }
    };
    document.insert("_id", store_id);

    bson::from_document(document).map_err(|e| RepositoryError::Malformed(e.to_string()))
}
