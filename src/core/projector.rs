use crate::domain::model::{UploadRecord, ValidationResult};
use crate::domain::ports::{DocumentStore, UPLOADS, VALIDATION_RESULTS};
use crate::utils::error::Result;
use std::sync::Arc;

/// Read-model projection over the two store collections.
///
/// Every identifier-bearing field comes back in external string form; all
/// other fields pass through unchanged. Ordering is whatever the store
/// iterates naturally.
pub struct Projector {
    store: Arc<dyn DocumentStore>,
}

impl Projector {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list_uploads(&self) -> Result<Vec<UploadRecord>> {
        let documents = self.store.find_all(UPLOADS).await?;
        tracing::debug!("Fetched {} upload documents", documents.len());
        documents.into_iter().map(UploadRecord::from_document).collect()
    }

    pub async fn list_validations(&self) -> Result<Vec<ValidationResult>> {
        let documents = self.store.find_all(VALIDATION_RESULTS).await?;
        tracing::debug!("Fetched {} validation documents", documents.len());
        documents
            .into_iter()
            .map(ValidationResult::from_document)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::utils::error::ServiceError;
    use serde_json::{json, Value};

    fn as_document(value: Value) -> crate::domain::model::Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected JSON object, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_uploads_normalizes_native_identifiers() {
        let store = MemoryStore::new();
        store.insert(
            UPLOADS,
            as_document(json!({
                "_id": {"$oid": "665f1f77bcf86cd799439011"},
                "filename": "a.csv",
                "size_bytes": 512
            })),
        );
        store.insert(
            UPLOADS,
            as_document(json!({
                "_id": "665f1f77bcf86cd799439012",
                "filename": "b.csv"
            })),
        );

        let projector = Projector::new(Arc::new(store));
        let uploads = projector.list_uploads().await.unwrap();
        assert_eq!(uploads.len(), 2);

        // store iteration order is preserved
        let rendered = serde_json::to_value(&uploads).unwrap();
        assert_eq!(rendered[0]["_id"], json!("665f1f77bcf86cd799439011"));
        assert_eq!(rendered[0]["size_bytes"], json!(512));
        assert_eq!(rendered[1]["_id"], json!("665f1f77bcf86cd799439012"));
    }

    #[tokio::test]
    async fn test_list_validations_normalizes_back_references() {
        let store = MemoryStore::new();
        store.insert(
            VALIDATION_RESULTS,
            as_document(json!({
                "_id": {"$oid": "665f1f77bcf86cd799439021"},
                "upload_id": {"$oid": "665f1f77bcf86cd799439011"},
                "status": "Rejected",
                "issues": [{"row": 3}]
            })),
        );

        let projector = Projector::new(Arc::new(store));
        let validations = projector.list_validations().await.unwrap();

        let rendered = serde_json::to_value(&validations).unwrap();
        assert_eq!(rendered[0]["_id"], json!("665f1f77bcf86cd799439021"));
        assert_eq!(rendered[0]["upload_id"], json!("665f1f77bcf86cd799439011"));
        assert_eq!(rendered[0]["status"], json!("Rejected"));
    }

    #[tokio::test]
    async fn test_document_outside_schema_is_reported() {
        let store = MemoryStore::new();
        store.insert(UPLOADS, as_document(json!({ "filename": "no-id.csv" })));

        let projector = Projector::new(Arc::new(store));
        let err = projector.list_uploads().await.unwrap_err();
        assert!(matches!(err, ServiceError::MalformedDocument { .. }));
    }
}
