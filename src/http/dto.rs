//! Data Transfer Objects for the HTTP API.
//!
//! The field names on the report endpoints are part of the wire contract
//! consumed by existing clients (`"Report ID"`, `"Status"`); keep the
//! serde renames intact.

use serde::{Deserialize, Serialize};

/// Response for a triggered report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerReportResponse {
    /// Identifier to poll the run with (8-digit numeric string)
    #[serde(rename = "Report ID")]
    pub report_id: String,
}

/// Response for polling a run that is still in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRunningResponse {
    #[serde(rename = "Status")]
    pub status: String,
}

impl ReportRunningResponse {
    pub fn running() -> Self {
        Self {
            status: "Running".to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Storage backend status
    pub database: String,
}
