//! Test support for the kioskpulse service.
//!
//! Provides hermetic stand-ins for the production store plus a helper to
//! spawn the real router on an ephemeral port, so integration tests drive
//! the service over HTTP without a live database.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod server;
pub mod store;

pub use kioskpulse_core::ManualClock;
pub use server::spawn_server;
pub use store::{FailingStore, InMemoryStore};
