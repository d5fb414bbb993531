//! In-memory local repository implementation.
//!
//! Implements all storage traits over plain `HashMap` and `Vec` state
//! guarded by a read/write lock. Suitable for unit tests, local
//! development, and single-process deployments where the seed CSVs are
//! the only data source.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use parking_lot::RwLock;

use crate::db::repository::{
    ErrorContext, HoursRepository, ObservationRepository, ReportRepository, RepositoryError,
    RepositoryResult, TimezoneRepository,
};
use crate::models::{
    BusinessHourWindow, Observation, ReportRecord, ReportRow, ReportStatus, StoreTimezone,
};

/// In-memory local repository.
///
/// Cloning is cheap and shares the underlying state, so one instance can
/// be handed to the HTTP state and to background report runs.
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    observations: Vec<Observation>,
    hours: Vec<BusinessHourWindow>,
    timezones: HashMap<String, String>,
    reports: HashMap<String, ReportRecord>,
    unhealthy: bool,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().unhealthy = !healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        let unhealthy = data.unhealthy;
        *data = LocalData {
            unhealthy,
            ..Default::default()
        };
    }

    fn check_health(&self) -> RepositoryResult<()> {
        if self.data.read().unhealthy {
            return Err(RepositoryError::connection("repository is not healthy"));
        }
        Ok(())
    }
}

#[async_trait]
impl ObservationRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(!self.data.read().unhealthy)
    }

    async fn distinct_store_ids(&self) -> RepositoryResult<Vec<String>> {
        self.check_health()?;
        let data = self.data.read();
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for obs in &data.observations {
            if seen.insert(obs.store_id.clone()) {
                ids.push(obs.store_id.clone());
            }
        }
        Ok(ids)
    }

    async fn fetch_observations_since(
        &self,
        store_id: &str,
        since: NaiveDateTime,
    ) -> RepositoryResult<Vec<Observation>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data
            .observations
            .iter()
            .filter(|obs| obs.store_id == store_id && obs.timestamp_utc >= since)
            .cloned()
            .collect())
    }

    async fn observation_count(&self) -> RepositoryResult<usize> {
        Ok(self.data.read().observations.len())
    }

    async fn insert_observations(&self, observations: Vec<Observation>) -> RepositoryResult<()> {
        self.check_health()?;
        self.data.write().observations.extend(observations);
        Ok(())
    }
}

#[async_trait]
impl HoursRepository for LocalRepository {
    async fn windows_for_day(
        &self,
        store_id: &str,
        day_of_week: u8,
    ) -> RepositoryResult<Vec<BusinessHourWindow>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data
            .hours
            .iter()
            .filter(|w| w.store_id == store_id && w.day_of_week == day_of_week)
            .cloned()
            .collect())
    }

    async fn windows_for_store(
        &self,
        store_id: &str,
    ) -> RepositoryResult<Vec<BusinessHourWindow>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data
            .hours
            .iter()
            .filter(|w| w.store_id == store_id)
            .cloned()
            .collect())
    }

    async fn window_count(&self) -> RepositoryResult<usize> {
        Ok(self.data.read().hours.len())
    }

    async fn insert_windows(&self, windows: Vec<BusinessHourWindow>) -> RepositoryResult<()> {
        self.check_health()?;
        self.data.write().hours.extend(windows);
        Ok(())
    }
}

#[async_trait]
impl TimezoneRepository for LocalRepository {
    async fn timezone_for_store(&self, store_id: &str) -> RepositoryResult<Option<String>> {
        self.check_health()?;
        Ok(self.data.read().timezones.get(store_id).cloned())
    }

    async fn timezone_count(&self) -> RepositoryResult<usize> {
        Ok(self.data.read().timezones.len())
    }

    async fn insert_timezones(&self, timezones: Vec<StoreTimezone>) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write();
        for tz in timezones {
            data.timezones.insert(tz.store_id, tz.timezone_name);
        }
        Ok(())
    }
}

#[async_trait]
impl ReportRepository for LocalRepository {
    async fn create_report(&self, report_id: &str) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write();
        if data.reports.contains_key(report_id) {
            return Err(RepositoryError::validation(format!(
                "report {} already exists",
                report_id
            )));
        }
        data.reports
            .insert(report_id.to_string(), ReportRecord::new(report_id));
        Ok(())
    }

    async fn append_report_row(&self, report_id: &str, row: ReportRow) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write();
        let record = data.reports.get_mut(report_id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("report {} not found", report_id),
                ErrorContext::new("append_report_row")
                    .with_entity("report")
                    .with_entity_id(report_id),
            )
        })?;
        record.data.push(row);
        Ok(())
    }

    async fn complete_report(&self, report_id: &str) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write();
        let record = data.reports.get_mut(report_id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("report {} not found", report_id),
                ErrorContext::new("complete_report")
                    .with_entity("report")
                    .with_entity_id(report_id),
            )
        })?;
        // Forward-only transition; completing twice is a no-op.
        record.status = ReportStatus::Complete;
        Ok(())
    }

    async fn get_report(&self, report_id: &str) -> RepositoryResult<Option<ReportRecord>> {
        self.check_health()?;
        Ok(self.data.read().reports.get(report_id).cloned())
    }
}
