//! Repository trait for business-hour windows.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::BusinessHourWindow;

/// Repository trait for the per-store weekly business-hours collection.
///
/// A store may have any number of windows per weekday, including none.
/// "No windows configured anywhere for a store" is meaningful data (the
/// store is open 24/7), so lookups return empty lists rather than errors.
#[async_trait]
pub trait HoursRepository: Send + Sync {
    /// Windows for one store on one weekday (Monday = 0).
    async fn windows_for_day(
        &self,
        store_id: &str,
        day_of_week: u8,
    ) -> RepositoryResult<Vec<BusinessHourWindow>>;

    /// All windows for one store, in storage order.
    async fn windows_for_store(&self, store_id: &str)
        -> RepositoryResult<Vec<BusinessHourWindow>>;

    /// Number of stored windows across all stores.
    async fn window_count(&self) -> RepositoryResult<usize>;

    /// Append a batch of windows (seed loading).
    async fn insert_windows(&self, windows: Vec<BusinessHourWindow>) -> RepositoryResult<()>;
}
