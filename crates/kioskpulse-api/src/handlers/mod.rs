//! HTTP request handlers for the kioskpulse API.
//!
//! Handlers follow a consistent pattern:
//! - Input validation with typed errors
//! - Tracing for observability
//! - Standardized `{ "error": ... }` failure responses
//!
//! # Handler Organization
//!
//! - `status` - The status-update webhook endpoint
//! - `health` - Health check and readiness probes

pub mod health;
pub mod status;

pub use health::{health_check, liveness_check, readiness_check};
pub use status::{method_not_allowed, update_status};
