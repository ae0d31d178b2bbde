//! In-memory collection used by tests
//!
//! Filters are matched by field equality, which is all the repository issues.
//! Unique indexes are enforced on insert and update like the real store.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{DocumentCollection, StoreError, StoreResult};

#[derive(Default)]
pub struct MemoryCollection {
    documents: Mutex<Vec<Document>>,
    unique_fields: Mutex<Vec<String>>,
    failing: AtomicBool,
    failing_reads: AtomicBool,
}

impl MemoryCollection {
    /// A collection with the same unique index the service sets up
    pub fn new() -> Self {
        let collection = Self::default();
        collection
            .unique_fields
            .lock()
            .push(super::SOLDIER_ID_FIELD.to_string());
        collection
    }

    /// Makes every following operation fail with a backend error
    pub fn fail_operations(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Makes every following find fail while writes keep succeeding
    pub fn fail_reads(&self) {
        self.failing_reads.store(true, Ordering::SeqCst);
    }

    pub fn document_count(&self) -> usize {
        self.documents.lock().len()
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("connection reset by peer".to_string()));
        }
        Ok(())
    }

    fn check_readable(&self) -> StoreResult<()> {
        self.check_available()?;
        if self.failing_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("read timed out".to_string()));
        }
        Ok(())
    }

    fn check_unique(
        &self,
        documents: &[Document],
        candidate: &Document,
        skip: Option<usize>,
    ) -> StoreResult<()> {
        for field in self.unique_fields.lock().iter() {
            let Some(value) = candidate.get(field) else {
                continue;
            };

            let taken = documents
                .iter()
                .enumerate()
                .any(|(index, existing)| Some(index) != skip && existing.get(field) == Some(value));

            if taken {
                return Err(StoreError::DuplicateKey(format!(
                    "E11000 duplicate key error dup key: {{ {}: {} }}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    async fn ensure_unique_index(&self, field: &str) -> StoreResult<()> {
        self.check_available()?;

        let mut unique_fields = self.unique_fields.lock();
        if !unique_fields.iter().any(|existing| existing == field) {
            unique_fields.push(field.to_string());
        }
        Ok(())
    }

    async fn find(&self, filter: Document) -> StoreResult<Vec<Document>> {
        self.check_readable()?;

        Ok(self
            .documents
            .lock()
            .iter()
            .filter(|document| matches(document, &filter))
            .cloned()
            .collect())
    }

    async fn find_one(&self, filter: Document) -> StoreResult<Option<Document>> {
        self.check_readable()?;

        Ok(self
            .documents
            .lock()
            .iter()
            .find(|document| matches(document, &filter))
            .cloned())
    }

    async fn insert_one(&self, document: Document) -> StoreResult<Bson> {
        self.check_available()?;

        let mut documents = self.documents.lock();
        self.check_unique(&documents, &document, None)?;

        let id = Bson::ObjectId(ObjectId::new());
        let mut stored = Document::new();
        stored.insert("_id", id.clone());
        for (key, value) in document {
            stored.insert(key, value);
        }
        documents.push(stored);

        Ok(id)
    }

    async fn find_one_and_update(
        &self,
        filter: Document,
        set: Document,
    ) -> StoreResult<Option<Document>> {
        self.check_available()?;

        let mut documents = self.documents.lock();
        let Some(index) = documents
            .iter()
            .position(|document| matches(document, &filter))
        else {
            return Ok(None);
        };

        let mut updated = documents[index].clone();
        for (key, value) in set {
            updated.insert(key, value);
        }
        self.check_unique(&documents, &updated, Some(index))?;
        documents[index] = updated.clone();

        Ok(Some(updated))
    }

    async fn delete_one(&self, filter: Document) -> StoreResult<u64> {
        self.check_available()?;

        let mut documents = self.documents.lock();
        match documents
            .iter()
            .position(|document| matches(document, &filter))
        {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn shutdown(&self) {}
}
