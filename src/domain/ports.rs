use super::id::DocId;
use super::model::Document;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Collection of ingested files.
pub const UPLOADS: &str = "uploads";
/// Collection of validation outcomes, one per validated upload.
pub const VALIDATION_RESULTS: &str = "validation_results";

/// Read-only access to the document store. Implementations must preserve the
/// store's natural iteration order in `find_all`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>>;
    async fn find_by_id(&self, collection: &str, id: &DocId) -> Result<Option<Document>>;
    async fn count(&self, collection: &str) -> Result<u64>;
}

/// Flat-namespace artifact storage. Writes replace the whole file.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn write_file(&self, name: &str, data: &[u8]) -> Result<()>;
    /// `None` when no artifact exists under `name`.
    async fn read_file(&self, name: &str) -> Result<Option<Vec<u8>>>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_addr(&self) -> &str;
    fn store_url(&self) -> &str;
    fn reports_dir(&self) -> &str;
    fn store_timeout(&self) -> Duration;
}
