//! Storage module for monitoring data.
//!
//! This module provides abstractions for storage operations via the
//! Repository pattern, allowing different backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, server binary)            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services/) - Business Logic             │
//! │  - Report aggregation and interpolation                 │
//! │  - Report run orchestration                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! │  - ObservationRepository / HoursRepository              │
//! │  - TimezoneRepository / ReportRepository                │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! The repository handle is constructed once at process start and passed
//! explicitly to everything that needs storage (HTTP state, report runs,
//! seed loading). There is no process-global connection.

pub mod config;
pub mod repositories;
pub mod repository;
pub mod seed;

pub use config::{report_clock_from_env, SeedConfig};
pub use repositories::LocalRepository;
pub use repository::{
    ErrorContext, FullRepository, HoursRepository, ObservationRepository, ReportRepository,
    RepositoryError, RepositoryResult, TimezoneRepository,
};
pub use seed::{SeedLoader, SeedSummary};
