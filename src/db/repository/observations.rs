//! Repository trait for polling observations.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::error::RepositoryResult;
use crate::models::Observation;

/// Repository trait for the store up/down observation collection.
///
/// Observations are append-only poll results. Report computation only
/// ever reads them through trailing time windows.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ObservationRepository: Send + Sync {
    /// Check if the storage backend is healthy.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// All store IDs that have at least one observation.
    ///
    /// The returned order is stable across calls so report rows come out
    /// in a deterministic store order.
    async fn distinct_store_ids(&self) -> RepositoryResult<Vec<String>>;

    /// Observations for one store with `timestamp_utc >= since`,
    /// in storage order (not necessarily sorted).
    async fn fetch_observations_since(
        &self,
        store_id: &str,
        since: NaiveDateTime,
    ) -> RepositoryResult<Vec<Observation>>;

    /// Number of stored observations across all stores.
    async fn observation_count(&self) -> RepositoryResult<usize>;

    /// Append a batch of observations (seed loading).
    async fn insert_observations(&self, observations: Vec<Observation>) -> RepositoryResult<()>;
}
