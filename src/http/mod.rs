//! Axum-based HTTP server for the report API.
//!
//! This module is only compiled with the `http-server` feature. It wires
//! the report service and the repository into the three public
//! endpoints: trigger, poll, and health.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
