use crate::domain::id::DocId;
use crate::domain::model::Document;
use crate::domain::ports::DocumentStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory document store for tests and local development. Documents keep
/// their insertion order; the lock is synchronous and never held across an
/// await point.
#[derive(Default, Clone)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, collection: &str, document: Document) {
        let mut collections = self.collections.write().expect("collections lock poisoned");
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>> {
        let collections = self.collections.read().expect("collections lock poisoned");
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find_by_id(&self, collection: &str, id: &DocId) -> Result<Option<Document>> {
        let collections = self.collections.read().expect("collections lock poisoned");
        let Some(documents) = collections.get(collection) else {
            return Ok(None);
        };
        Ok(documents
            .iter()
            .find(|document| document_id(document).as_ref() == Some(id))
            .cloned())
    }

    async fn count(&self, collection: &str) -> Result<u64> {
        let collections = self.collections.read().expect("collections lock poisoned");
        Ok(collections.get(collection).map_or(0, |docs| docs.len() as u64))
    }
}

/// Identifier of a document, when it carries one in either wire form.
fn document_id(document: &Document) -> Option<DocId> {
    document
        .get("_id")
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}
