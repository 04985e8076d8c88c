pub mod projector;
pub mod report;
pub mod stats;

pub use crate::domain::id::DocId;
pub use crate::domain::model::{
    ArtifactDownload, Document, ReportRef, StatsSummary, UploadRecord, ValidationResult,
};
pub use crate::domain::ports::{ArtifactStore, ConfigProvider, DocumentStore};
pub use crate::utils::error::Result;
