//! Domain models for store monitoring.
//!
//! These are the core data types shared across the repository layer, the
//! report services, and the HTTP API: polling observations, business-hour
//! windows, store timezones, and report records.

pub mod time;

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Up/down status reported by a single poll of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationStatus {
    Active,
    Inactive,
}

impl ObservationStatus {
    /// True if the store was reachable at poll time.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A single timestamped up/down reading for a store.
///
/// Immutable once recorded. Observations arrive unordered from storage;
/// consumers that need temporal order sort by `timestamp_utc` themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub store_id: String,
    /// Poll instant as UTC wall-clock.
    pub timestamp_utc: NaiveDateTime,
    pub status: ObservationStatus,
}

/// One business-hour window for a store on one weekday.
///
/// A store may have zero, one, or multiple windows per weekday. A store
/// with no windows at all is treated as always open (24/7).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHourWindow {
    pub store_id: String,
    /// Weekday index, Monday = 0 through Sunday = 6.
    pub day_of_week: u8,
    pub start_time_local: NaiveTime,
    pub end_time_local: NaiveTime,
}

/// Timezone assignment for a store.
///
/// Stores without an assignment fall back to [`time::DEFAULT_TIMEZONE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreTimezone {
    pub store_id: String,
    /// IANA zone name, e.g. `America/Denver`.
    pub timezone_name: String,
}

/// Computed uptime/downtime figures for one store over the three
/// trailing windows. Hour figures are minutes; day and week figures are
/// hours. All values are rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub store_id: String,
    pub uptime_last_hour: f64,
    pub uptime_last_day: f64,
    pub uptime_last_week: f64,
    pub downtime_last_hour: f64,
    pub downtime_last_day: f64,
    pub downtime_last_week: f64,
}

/// Lifecycle state of a report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Progress,
    Complete,
}

/// One report run: identifier, lifecycle state, and the rows computed so
/// far. Created in `Progress`; rows are appended one store at a time; the
/// status flips to `Complete` exactly once and never reverses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub report_id: String,
    pub status: ReportStatus,
    pub data: Vec<ReportRow>,
}

impl ReportRecord {
    /// Create a fresh record in the `Progress` state.
    pub fn new(report_id: impl Into<String>) -> Self {
        Self {
            report_id: report_id.into(),
            status: ReportStatus::Progress,
            data: Vec::new(),
        }
    }

    /// True once the background run has finished.
    pub fn is_complete(&self) -> bool {
        self.status == ReportStatus::Complete
    }
}
