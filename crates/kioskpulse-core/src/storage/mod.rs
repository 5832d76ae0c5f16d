//! Persistence layer for kiosk status records.
//!
//! All database access goes through the [`StatusStore`] trait. The
//! production implementation is the PostgreSQL [`Repository`]; tests inject
//! in-memory or failing stores so handler behavior is exercised without a
//! live database.

use async_trait::async_trait;

use crate::{error::Result, models::KioskStatusRecord};

pub mod kiosk_status;

pub use kiosk_status::Repository;

/// Store of one status record per kiosk location.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Inserts or fully replaces the record for its location.
    async fn upsert(&self, record: &KioskStatusRecord) -> Result<()>;

    /// Fetches the live record for a location, if any.
    async fn find_by_location(&self, location: &str) -> Result<Option<KioskStatusRecord>>;

    /// Verifies the store is reachable.
    async fn health_check(&self) -> Result<()>;
}
