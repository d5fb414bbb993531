//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! report service layer for business logic.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{HealthResponse, ReportRunningResponse, TriggerReportResponse};
use super::error::AppError;
use super::state::AppState;
use crate::services::report;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Health check endpoint to verify the service is running and storage is
/// accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

/// POST /trigger_report
///
/// Start a report run asynchronously. Returns the report identifier
/// immediately; the run computes rows in the background.
pub async fn trigger_report(
    State(state): State<AppState>,
) -> HandlerResult<TriggerReportResponse> {
    let report_id = report::trigger_report(state.repository.clone(), state.clock).await?;
    Ok(Json(TriggerReportResponse { report_id }))
}

/// GET /get_report/{report_id}
///
/// Poll a report run. While the run is in progress the response is a
/// JSON status document; once complete it is the rendered CSV, served as
/// an attachment.
pub async fn get_report(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> Result<Response, AppError> {
    let record = state
        .repository
        .get_report(&report_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))?;

    if !record.is_complete() {
        return Ok(Json(ReportRunningResponse::running()).into_response());
    }

    let csv = report::render_report_csv(&record.data)
        .map_err(|e| AppError::Internal(format!("Failed to render report CSV: {}", e)))?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"report_{}.csv\"", report_id),
        ),
    ];
    Ok((headers, csv).into_response())
}
