//! # Store Monitor
//!
//! Uptime/downtime reporting service for store polling data.
//!
//! Restaurant partners are polled roughly once an hour; each poll records
//! whether a store was reachable. This crate turns those sparse
//! observations, together with per-store business hours and timezones,
//! into estimated uptime/downtime over the trailing hour, day, and week —
//! restricted to business hours — through an asynchronously triggered,
//! pollable report job exposed over a REST API.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain types and timezone-aware timestamp handling
//! - [`db`]: Repository pattern storage abstraction, seed loading, and
//!   configuration
//! - [`services`]: Interval interpolation, report aggregation, and the
//!   background report run
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Report semantics
//!
//! The trailing-hour figure point-samples observations inside business
//! hours and prorates sixty minutes by the active:inactive ratio. The
//! trailing-day and trailing-week figures interpolate between
//! observations with the midpoint rule, clipped to business-hour
//! windows. The two algorithms are deliberately distinct.

pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
