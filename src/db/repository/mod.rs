//! Repository trait definitions for storage operations.
//!
//! Storage is abstracted behind a collection of focused traits, one per
//! collection the service reads or writes. By splitting responsibilities
//! across multiple traits, implementations can be more focused and
//! testable.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`observations`]: Store up/down polling observations
//! - [`hours`]: Per-store weekly business-hour windows
//! - [`timezones`]: Per-store timezone assignments
//! - [`reports`]: Report job records
//!
//! # Convenience Trait Bound
//!
//! For functions that need all repository capabilities, use the
//! [`FullRepository`] trait bound:
//!
//! ```ignore
//! async fn my_service<R: FullRepository>(repo: &R) -> RepositoryResult<()> {
//!     let stores = repo.distinct_store_ids().await?;
//!     repo.create_report("12345678").await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod hours;
pub mod observations;
pub mod reports;
pub mod timezones;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

// Re-export all traits
pub use hours::HoursRepository;
pub use observations::ObservationRepository;
pub use reports::ReportRepository;
pub use timezones::TimezoneRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements all four
/// collection traits. Use this as a convenient bound when a caller needs
/// the whole storage surface (the report runner does).
pub trait FullRepository:
    ObservationRepository + HoursRepository + TimezoneRepository + ReportRepository
{
}

// Blanket implementation: any type implementing all four traits
// automatically implements FullRepository.
impl<T> FullRepository for T where
    T: ObservationRepository + HoursRepository + TimezoneRepository + ReportRepository
{
}
