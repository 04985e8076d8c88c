use crate::domain::id::DocId;
use crate::domain::model::{ArtifactDownload, ReportRef, ValidationResult};
use crate::domain::ports::{ArtifactStore, DocumentStore, VALIDATION_RESULTS};
use crate::utils::error::{Result, ServiceError};
use std::sync::Arc;

/// Materializes validation results into durable JSON artifacts and serves
/// them back.
///
/// Generation is idempotent for an unchanged source document: the artifact is
/// rebuilt from scratch on every call and replaces the previous file wholesale.
pub struct ReportService {
    store: Arc<dyn DocumentStore>,
    artifacts: Arc<dyn ArtifactStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn DocumentStore>, artifacts: Arc<dyn ArtifactStore>) -> Self {
        Self { store, artifacts }
    }

    pub async fn generate_report(&self, validation_id: &str) -> Result<ReportRef> {
        tracing::info!("Generating report for validation_id: {}", validation_id);

        // Reject malformed identifiers before touching the store.
        let id = DocId::decode(validation_id)?;

        let document = self
            .store
            .find_by_id(VALIDATION_RESULTS, &id)
            .await
            .map_err(|e| ServiceError::generation(validation_id, format!("store lookup failed: {}", e)))?;

        let Some(document) = document else {
            tracing::warn!("Validation not found for ID: {}", validation_id);
            self.log_known_validations().await;
            return Err(ServiceError::not_found("Validation", validation_id));
        };

        let report = ValidationResult::from_document(document)
            .map_err(|e| ServiceError::generation(validation_id, e))?;
        let body = serde_json::to_vec_pretty(&report)
            .map_err(|e| ServiceError::generation(validation_id, e))?;

        self.artifacts
            .write_file(&artifact_name(validation_id), &body)
            .await
            .map_err(|e| ServiceError::generation(validation_id, e))?;

        tracing::info!("Report generated successfully for validation_id: {}", validation_id);
        Ok(ReportRef {
            report_link: format!("/reports/{}.json", validation_id),
        })
    }

    pub async fn fetch_artifact(&self, validation_id: &str) -> Result<ArtifactDownload> {
        if !is_path_safe(validation_id) {
            return Err(report_not_found(validation_id));
        }

        match self.artifacts.read_file(&artifact_name(validation_id)).await? {
            Some(bytes) => Ok(ArtifactDownload {
                bytes,
                filename: format!("validation_report_{}.json", validation_id),
                content_type: "application/json",
            }),
            None => Err(report_not_found(validation_id)),
        }
    }

    /// Operational aid on a lookup miss: show a sample of what the store
    /// actually holds.
    async fn log_known_validations(&self) {
        match self.store.find_all(VALIDATION_RESULTS).await {
            Ok(documents) => {
                tracing::debug!("Store contains {} validation results", documents.len());
                for document in documents.iter().take(5) {
                    if let Some(id) = document.get("_id") {
                        tracing::debug!("  - ID: {}", id);
                    }
                }
            }
            Err(e) => tracing::debug!("Could not enumerate validation results: {}", e),
        }
    }
}

fn artifact_name(validation_id: &str) -> String {
    format!("{}.json", validation_id)
}

/// Artifact names are flat; anything that could escape the reports directory
/// is treated as nonexistent.
fn is_path_safe(validation_id: &str) -> bool {
    !validation_id.is_empty()
        && !validation_id.contains(['/', '\\'])
        && !validation_id.contains("..")
}

fn report_not_found(validation_id: &str) -> ServiceError {
    ServiceError::not_found(
        "Report",
        &format!("{} (generate the report first)", validation_id),
    )
}
