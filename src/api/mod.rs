// HTTP boundary: pure dispatch onto the core services plus the
// error-to-status mapping. No aggregation or materialization logic here.

use crate::core::projector::Projector;
use crate::core::report::ReportService;
use crate::core::stats::StatsService;
use crate::domain::model::{StatsSummary, UploadRecord, ValidationResult};
use crate::domain::ports::{ArtifactStore, DocumentStore};
use crate::utils::error::ServiceError;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state: the three services over their injected ports.
pub struct AppState {
    pub projector: Projector,
    pub stats: StatsService,
    pub reports: ReportService,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, artifacts: Arc<dyn ArtifactStore>) -> Self {
        Self {
            projector: Projector::new(store.clone()),
            stats: StatsService::new(store.clone()),
            reports: ReportService::new(store, artifacts),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/uploads", get(list_uploads))
        .route("/api/validations", get(list_validations))
        .route("/api/stats", get(get_stats))
        .route("/api/export/{validation_id}", get(export_report))
        .route("/api/download/{validation_id}", get(download_report))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn list_uploads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UploadRecord>>, ApiError> {
    Ok(Json(state.projector.list_uploads().await?))
}

async fn list_validations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ValidationResult>>, ApiError> {
    Ok(Json(state.projector.list_validations().await?))
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsSummary>, ApiError> {
    Ok(Json(state.stats.compute_stats().await?))
}

#[derive(Serialize)]
struct ExportResponse {
    message: &'static str,
    report_link: String,
}

async fn export_report(
    State(state): State<Arc<AppState>>,
    Path(validation_id): Path<String>,
) -> Result<Json<ExportResponse>, ApiError> {
    let reference = state.reports.generate_report(&validation_id).await?;
    Ok(Json(ExportResponse {
        message: "Report generated successfully",
        report_link: reference.report_link,
    }))
}

async fn download_report(
    State(state): State<Arc<AppState>>,
    Path(validation_id): Path<String>,
) -> Result<Response, ApiError> {
    let artifact = state.reports.fetch_artifact(&validation_id).await?;
    let headers = [
        (header::CONTENT_TYPE, artifact.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.filename),
        ),
    ];
    Ok((headers, artifact.bytes).into_response())
}

/// Wrapper so the crate error can cross into axum's `IntoResponse` (orphan
/// rule).
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        Self(error)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::InvalidIdentifier { .. } => StatusCode::BAD_REQUEST,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::warn!("Request rejected: {}", self.0);
        }

        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
