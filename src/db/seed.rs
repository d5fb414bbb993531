//! CSV seed-data loading.
//!
//! On startup the three seed CSVs (observations, timezones, business
//! hours) are migrated into the repository. A collection that already
//! holds data is left untouched, so restarting against a persistent
//! backend does not duplicate rows.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::db::config::SeedConfig;
use crate::db::repository::FullRepository;
use crate::models::time;
use crate::models::{BusinessHourWindow, Observation, ObservationStatus, StoreTimezone};

/// Raw observation row as it appears in the status CSV.
#[derive(Debug, Deserialize)]
struct StatusRecord {
    store_id: String,
    status: ObservationStatus,
    timestamp_utc: String,
}

/// Raw timezone row (`timezone_str` is the column name in the seed data).
#[derive(Debug, Deserialize)]
struct TimezoneRecord {
    store_id: String,
    timezone_str: String,
}

/// Raw business-hours row.
#[derive(Debug, Deserialize)]
struct HoursRecord {
    store_id: String,
    day: u8,
    start_time_local: String,
    end_time_local: String,
}

/// Counts of rows loaded by one migration pass. A collection that was
/// already populated reports zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub observations: usize,
    pub timezones: usize,
    pub windows: usize,
}

/// Loads the seed CSVs into a repository.
pub struct SeedLoader {
    config: SeedConfig,
}

impl SeedLoader {
    pub fn new(config: SeedConfig) -> Self {
        Self { config }
    }

    /// Migrate all three collections, skipping any that already hold data.
    pub async fn migrate<R: FullRepository>(&self, repo: &R) -> Result<SeedSummary> {
        let mut summary = SeedSummary::default();

        if repo.observation_count().await? == 0 {
            let observations = load_observations(Path::new(&self.config.status_path))?;
            summary.observations = observations.len();
            repo.insert_observations(observations).await?;
        } else {
            tracing::info!("observation collection already populated, skipping seed");
        }

        if repo.timezone_count().await? == 0 {
            let timezones = load_timezones(Path::new(&self.config.timezone_path))?;
            summary.timezones = timezones.len();
            repo.insert_timezones(timezones).await?;
        } else {
            tracing::info!("timezone collection already populated, skipping seed");
        }

        if repo.window_count().await? == 0 {
            let windows = load_hours(Path::new(&self.config.hours_path))?;
            summary.windows = windows.len();
            repo.insert_windows(windows).await?;
        } else {
            tracing::info!("hours collection already populated, skipping seed");
        }

        Ok(summary)
    }
}

/// Parse the observations CSV.
pub fn load_observations(path: &Path) -> Result<Vec<Observation>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open status CSV at {}", path.display()))?;

    let mut observations = Vec::new();
    for record in reader.deserialize() {
        let record: StatusRecord = record.context("Malformed status CSV row")?;
        let timestamp_utc = time::parse_timestamp(&record.timestamp_utc).with_context(|| {
            format!("Bad timestamp for store {}", record.store_id)
        })?;
        observations.push(Observation {
            store_id: record.store_id,
            timestamp_utc,
            status: record.status,
        });
    }
    Ok(observations)
}

/// Parse the timezone CSV.
pub fn load_timezones(path: &Path) -> Result<Vec<StoreTimezone>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open timezone CSV at {}", path.display()))?;

    let mut timezones = Vec::new();
    for record in reader.deserialize() {
        let record: TimezoneRecord = record.context("Malformed timezone CSV row")?;
        timezones.push(StoreTimezone {
            store_id: record.store_id,
            timezone_name: record.timezone_str,
        });
    }
    Ok(timezones)
}

/// Parse the business-hours CSV.
pub fn load_hours(path: &Path) -> Result<Vec<BusinessHourWindow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open hours CSV at {}", path.display()))?;

    let mut windows = Vec::new();
    for record in reader.deserialize() {
        let record: HoursRecord = record.context("Malformed hours CSV row")?;
        if record.day > 6 {
            anyhow::bail!(
                "weekday {} out of range for store {}",
                record.day,
                record.store_id
            );
        }
        let start_time_local = time::parse_time_of_day(&record.start_time_local)
            .with_context(|| format!("Bad start time for store {}", record.store_id))?;
        let end_time_local = time::parse_time_of_day(&record.end_time_local)
            .with_context(|| format!("Bad end time for store {}", record.store_id))?;
        windows.push(BusinessHourWindow {
            store_id: record.store_id,
            day_of_week: record.day,
            start_time_local,
            end_time_local,
        });
    }
    Ok(windows)
}

#[cfg(test)]
#[path = "seed_tests.rs"]
mod seed_tests;
