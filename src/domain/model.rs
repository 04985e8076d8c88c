use super::id::DocId;
use super::ports::{UPLOADS, VALIDATION_RESULTS};
use crate::utils::error::{Result, ServiceError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw store document: field names to JSON values.
pub type Document = Map<String, Value>;

/// One ingested file, owned by the external ingestion pipeline.
///
/// Only the primary identifier is schema-known; everything else the pipeline
/// wrote passes through the extras bag untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRecord {
    #[serde(rename = "_id")]
    pub id: DocId,
    #[serde(flatten)]
    pub extra: Document,
}

impl UploadRecord {
    pub fn from_document(document: Document) -> Result<Self> {
        parse_document(UPLOADS, document)
    }
}

/// Outcome of validating one upload, owned by the external validation
/// pipeline. `status` is an open set; `status` and `issues` may be absent
/// and stay absent through re-serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(rename = "_id")]
    pub id: DocId,
    pub upload_id: DocId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Document,
}

impl ValidationResult {
    pub fn from_document(document: Document) -> Result<Self> {
        parse_document(VALIDATION_RESULTS, document)
    }

    pub fn is_successful(&self) -> bool {
        matches!(self.status.as_deref(), Some("Valid") | Some("Approved"))
    }

    pub fn issue_count(&self) -> usize {
        self.issues.as_ref().map_or(0, Vec::len)
    }
}

pub(crate) fn parse_document<T: DeserializeOwned>(collection: &str, document: Document) -> Result<T> {
    serde_json::from_value(Value::Object(document)).map_err(|source| {
        ServiceError::MalformedDocument {
            collection: collection.to_string(),
            source,
        }
    })
}

/// Dashboard summary over both collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_uploads: u64,
    pub total_validations: u64,
    pub success_rate: u32,
    pub total_issues: u64,
}

/// Stable reference to a materialized report artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRef {
    pub report_link: String,
}

/// A fetched artifact plus the metadata a download response needs.
#[derive(Debug, Clone)]
pub struct ArtifactDownload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_document(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected JSON object, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_result_round_trips_extras() {
        let doc = as_document(json!({
            "_id": {"$oid": "665f1f77bcf86cd799439011"},
            "upload_id": "665f1f77bcf86cd799439022",
            "status": "Valid",
            "issues": [{"field": "email", "message": "missing"}],
            "filename": "batch-07.csv",
            "row_count": 1204
        }));

        let result = ValidationResult::from_document(doc).unwrap();
        assert!(result.is_successful());
        assert_eq!(result.issue_count(), 1);
        assert_eq!(result.extra["filename"], json!("batch-07.csv"));
        assert_eq!(result.extra["row_count"], json!(1204));

        let rendered = serde_json::to_value(&result).unwrap();
        assert_eq!(rendered["_id"], json!("665f1f77bcf86cd799439011"));
        assert_eq!(rendered["upload_id"], json!("665f1f77bcf86cd799439022"));
        assert_eq!(rendered["row_count"], json!(1204));
    }

    #[test]
    fn test_absent_status_and_issues_stay_absent() {
        let doc = as_document(json!({
            "_id": "665f1f77bcf86cd799439011",
            "upload_id": "665f1f77bcf86cd799439022"
        }));

        let result = ValidationResult::from_document(doc).unwrap();
        assert!(!result.is_successful());
        assert_eq!(result.issue_count(), 0);

        let rendered = serde_json::to_value(&result).unwrap();
        assert!(rendered.get("status").is_none());
        assert!(rendered.get("issues").is_none());
    }

    #[test]
    fn test_malformed_document_is_reported_with_collection() {
        let doc = as_document(json!({ "_id": "not-an-identifier" }));
        let err = UploadRecord::from_document(doc).unwrap_err();
        match err {
            ServiceError::MalformedDocument { collection, .. } => {
                assert_eq!(collection, UPLOADS);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_stats_summary_serializes_camel_case() {
        let summary = StatsSummary {
            total_uploads: 4,
            total_validations: 3,
            success_rate: 67,
            total_issues: 2,
        };
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({"totalUploads": 4, "totalValidations": 3, "successRate": 67, "totalIssues": 2})
        );
    }
}
