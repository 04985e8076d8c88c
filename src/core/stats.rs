use crate::domain::model::{StatsSummary, ValidationResult};
use crate::domain::ports::{DocumentStore, UPLOADS, VALIDATION_RESULTS};
use crate::utils::error::Result;
use std::sync::Arc;

/// Dashboard statistics over both collections. Every call re-scans; the
/// collections are dashboard-scale and nothing here is cached.
pub struct StatsService {
    store: Arc<dyn DocumentStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn compute_stats(&self) -> Result<StatsSummary> {
        let total_uploads = self.store.count(UPLOADS).await?;
        let total_validations = self.store.count(VALIDATION_RESULTS).await?;

        let validations: Vec<ValidationResult> = self
            .store
            .find_all(VALIDATION_RESULTS)
            .await?
            .into_iter()
            .map(ValidationResult::from_document)
            .collect::<Result<_>>()?;

        let successful = validations.iter().filter(|v| v.is_successful()).count();
        // Half away from zero, so 12.5% reports as 13.
        let success_rate = if total_validations > 0 {
            ((successful as f64 / total_validations as f64) * 100.0).round() as u32
        } else {
            0
        };
        let total_issues = validations.iter().map(|v| v.issue_count() as u64).sum();

        tracing::debug!(
            "Stats: {} uploads, {} validations, {} successful, {} issues",
            total_uploads,
            total_validations,
            successful,
            total_issues
        );

        Ok(StatsSummary {
            total_uploads,
            total_validations,
            success_rate,
            total_issues,
        })
    }
}
