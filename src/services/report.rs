//! Report aggregation and the background report run.
//!
//! A report run walks every known store and computes one [`ReportRow`]
//! from three trailing windows. The hour figure comes from
//! point-sampling (each qualifying observation votes, and 60 minutes are
//! prorated by the active:inactive ratio); the day and week figures come
//! from interval interpolation. The two algorithms are intentionally
//! distinct and must stay that way.

use std::sync::Arc;

use chrono::Duration;
use chrono_tz::Tz;
use rand::Rng;
use tracing::{info, warn};

use crate::db::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::models::time::{self, ReportClock};
use crate::models::{BusinessHourWindow, ReportRow};
use crate::services::interpolation::{
    interpolate_business_uptime, weekday_index, StatusSample, WeeklyHours,
};

/// Column header of the rendered report CSV.
pub const CSV_HEADER: [&str; 7] = [
    "store_id",
    "uptime_last_hour (minutes)",
    "uptime_last_day (hours)",
    "uptime_last_week (hours)",
    "downtime_last_hour (minutes)",
    "downtime_last_day (hours)",
    "downtime_last_week (hours)",
];

const REPORT_ID_ATTEMPTS: usize = 16;

/// Computes per-store uptime/downtime figures against a reference clock.
pub struct ReportAggregator {
    repo: Arc<dyn FullRepository>,
    clock: ReportClock,
}

impl ReportAggregator {
    pub fn new(repo: Arc<dyn FullRepository>, clock: ReportClock) -> Self {
        Self { repo, clock }
    }

    /// Uptime/downtime minutes over the trailing hour.
    ///
    /// Each observation inside business hours counts as one vote; the
    /// hour is prorated by the vote ratio. A store with no qualifying
    /// observation reports (0, 0).
    pub async fn last_hour_report(&self, store_id: &str) -> RepositoryResult<(f64, f64)> {
        let samples = self.localized_samples(store_id, 1).await?;
        let weekly = self.configured_weekly_hours(store_id).await?;

        let mut active = 0u32;
        let mut inactive = 0u32;
        for sample in &samples {
            if !within_business_hours(&weekly, sample) {
                continue;
            }
            if sample.status.is_active() {
                active += 1;
            } else {
                inactive += 1;
            }
        }

        let total = active + inactive;
        if total == 0 {
            return Ok((0.0, 0.0));
        }
        let total = f64::from(total);
        Ok((
            60.0 * f64::from(active) / total,
            60.0 * f64::from(inactive) / total,
        ))
    }

    /// Uptime/downtime hours over the trailing day, interpolated against
    /// the current weekday's business hours only.
    pub async fn last_day_report(&self, store_id: &str) -> RepositoryResult<(f64, f64)> {
        let day = weekday_index(self.clock.now());
        let windows = self.day_windows_or_open(store_id, day).await?;
        let samples = self.localized_samples(store_id, 24).await?;

        let mut weekly = WeeklyHours::new();
        weekly.insert(day, windows);

        let totals = interpolate_business_uptime(&samples, &weekly);
        Ok((totals.uptime_minutes / 60.0, totals.downtime_minutes / 60.0))
    }

    /// Uptime/downtime hours over the trailing week, interpolated against
    /// the full weekly business-hours mapping.
    pub async fn last_week_report(&self, store_id: &str) -> RepositoryResult<(f64, f64)> {
        let samples = self.localized_samples(store_id, 168).await?;

        let mut weekly = WeeklyHours::new();
        for day in 0..7u8 {
            let windows = self.day_windows_or_open(store_id, day).await?;
            weekly.insert(day, windows);
        }

        let totals = interpolate_business_uptime(&samples, &weekly);
        Ok((totals.uptime_minutes / 60.0, totals.downtime_minutes / 60.0))
    }

    /// Assemble the full row for one store, rounded to 2 decimal places.
    pub async fn build_report_row(&self, store_id: &str) -> RepositoryResult<ReportRow> {
        let (uptime_last_hour, downtime_last_hour) = self.last_hour_report(store_id).await?;
        let (uptime_last_day, downtime_last_day) = self.last_day_report(store_id).await?;
        let (uptime_last_week, downtime_last_week) = self.last_week_report(store_id).await?;

        Ok(ReportRow {
            store_id: store_id.to_string(),
            uptime_last_hour: round2(uptime_last_hour),
            uptime_last_day: round2(uptime_last_day),
            uptime_last_week: round2(uptime_last_week),
            downtime_last_hour: round2(downtime_last_hour),
            downtime_last_day: round2(downtime_last_day),
            downtime_last_week: round2(downtime_last_week),
        })
    }

    /// Trailing observations for a store, localized to its zone.
    async fn localized_samples(
        &self,
        store_id: &str,
        trailing_hours: i64,
    ) -> RepositoryResult<Vec<StatusSample>> {
        let since = self.clock.now() - Duration::hours(trailing_hours);
        let observations = self.repo.fetch_observations_since(store_id, since).await?;
        let tz = self.store_timezone(store_id).await?;

        Ok(observations
            .into_iter()
            .map(|obs| {
                StatusSample::new(time::localize_datetime(obs.timestamp_utc, tz), obs.status)
            })
            .collect())
    }

    /// A store's zone, falling back to the default when the store has no
    /// assignment or the assigned name is unknown. A bad name never
    /// aborts report generation.
    async fn store_timezone(&self, store_id: &str) -> RepositoryResult<Tz> {
        let assigned = self.repo.timezone_for_store(store_id).await?;
        let name = match assigned {
            Some(name) => name,
            None => return Ok(time::DEFAULT_TIMEZONE),
        };
        match time::parse_timezone(&name) {
            Ok(tz) => Ok(tz),
            Err(err) => {
                warn!(%store_id, %err, "falling back to default timezone");
                Ok(time::DEFAULT_TIMEZONE)
            }
        }
    }

    /// Configured windows grouped by weekday, with no always-open
    /// substitution. Used by the hourly point-sampling path, where an
    /// unconfigured day already counts as open.
    async fn configured_weekly_hours(&self, store_id: &str) -> RepositoryResult<WeeklyHours> {
        let mut weekly = WeeklyHours::new();
        for window in self.repo.windows_for_store(store_id).await? {
            weekly.entry(window.day_of_week).or_default().push(window);
        }
        Ok(weekly)
    }

    /// Windows for one weekday, substituting a full-day window when the
    /// store has none configured (always open).
    async fn day_windows_or_open(
        &self,
        store_id: &str,
        day_of_week: u8,
    ) -> RepositoryResult<Vec<BusinessHourWindow>> {
        let windows = self.repo.windows_for_day(store_id, day_of_week).await?;
        if !windows.is_empty() {
            return Ok(windows);
        }
        Ok(vec![BusinessHourWindow {
            store_id: store_id.to_string(),
            day_of_week,
            start_time_local: time::start_of_day(),
            end_time_local: time::end_of_day(),
        }])
    }
}

/// Inclusive business-hours membership for one localized sample. A day
/// with no configured windows counts as open.
fn within_business_hours(weekly: &WeeklyHours, sample: &StatusSample) -> bool {
    let day = weekday_index(sample.timestamp);
    let windows = match weekly.get(&day) {
        Some(windows) if !windows.is_empty() => windows,
        _ => return true,
    };
    let tod = sample.timestamp.time();
    windows
        .iter()
        .any(|w| w.start_time_local <= tod && tod <= w.end_time_local)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Random 8-digit numeric report identifier.
pub fn generate_report_id() -> String {
    rand::thread_rng().gen_range(10_000_000..=99_999_999).to_string()
}

/// Create a report record and spawn its background run.
///
/// Returns the identifier immediately; the run appends rows as stores
/// are processed and flips the record to complete when done.
pub async fn trigger_report(
    repo: Arc<dyn FullRepository>,
    clock: ReportClock,
) -> RepositoryResult<String> {
    for _ in 0..REPORT_ID_ATTEMPTS {
        let report_id = generate_report_id();
        match repo.create_report(&report_id).await {
            Ok(()) => {
                let runner_repo = Arc::clone(&repo);
                let spawned_id = report_id.clone();
                tokio::spawn(async move {
                    run_report(spawned_id, runner_repo, clock).await;
                });
                return Ok(report_id);
            }
            // Identifier collision; draw again.
            Err(RepositoryError::ValidationError { .. }) => continue,
            Err(err) => return Err(err),
        }
    }
    Err(RepositoryError::internal(
        "could not allocate a unique report id",
    ))
}

/// Compute and append one row per known store, then mark the record
/// complete.
///
/// Stores are processed strictly sequentially. A failure for one store
/// is logged and skipped so the run always reaches completion; the
/// failed store simply has no row in this report.
pub async fn run_report(report_id: String, repo: Arc<dyn FullRepository>, clock: ReportClock) {
    let aggregator = ReportAggregator::new(Arc::clone(&repo), clock);

    let stores = match repo.distinct_store_ids().await {
        Ok(stores) => stores,
        Err(err) => {
            warn!(%report_id, %err, "could not list stores for report run");
            Vec::new()
        }
    };

    info!(%report_id, stores = stores.len(), "report run started");

    for store_id in &stores {
        let row = match aggregator.build_report_row(store_id).await {
            Ok(row) => row,
            Err(err) => {
                warn!(%report_id, %store_id, %err, "skipping store in report run");
                continue;
            }
        };
        if let Err(err) = repo.append_report_row(&report_id, row).await {
            warn!(%report_id, %store_id, %err, "could not append report row");
        }
    }

    if let Err(err) = repo.complete_report(&report_id).await {
        warn!(%report_id, %err, "could not mark report complete");
        return;
    }
    info!(%report_id, "report run complete");
}

/// Render a completed report's rows as a CSV document.
pub fn render_report_csv(rows: &[ReportRow]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record(&[
            row.store_id.clone(),
            format!("{:.2}", row.uptime_last_hour),
            format!("{:.2}", row.uptime_last_day),
            format!("{:.2}", row.uptime_last_week),
            format!("{:.2}", row.downtime_last_hour),
            format!("{:.2}", row.downtime_last_day),
            format!("{:.2}", row.downtime_last_week),
        ])?;
    }
    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
