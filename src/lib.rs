pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{HttpStore, LocalArtifacts, MemoryStore};
pub use api::{router, AppState};
pub use config::{file::FileConfig, CliConfig};
pub use crate::core::{projector::Projector, report::ReportService, stats::StatsService};
pub use domain::id::DocId;
pub use utils::error::{Result, ServiceError};
