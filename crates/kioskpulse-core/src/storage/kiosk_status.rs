//! PostgreSQL repository for kiosk status rows.
//!
//! The `kiosk_status` table carries a uniqueness constraint on `location`;
//! every write is an `ON CONFLICT` upsert against it, so concurrent
//! deliveries for the same site resolve to last-write-wins inside the
//! database.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    error::Result,
    models::{KioskStatus, KioskStatusRecord, Location, NotificationId},
    storage::StatusStore,
};

/// Repository for kiosk status database operations.
pub struct Repository {
    pool: Arc<PgPool>,
}

impl Repository {
    /// Creates a new repository over a shared connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Returns a reference to the database pool.
    pub fn pool(&self) -> Arc<PgPool> {
        self.pool.clone()
    }
}

#[async_trait]
impl StatusStore for Repository {
    async fn upsert(&self, record: &KioskStatusRecord) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO kiosk_status (id, location, status, timestamp)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (location) DO UPDATE
            SET id = EXCLUDED.id,
                status = EXCLUDED.status,
                timestamp = EXCLUDED.timestamp
            ",
        )
        .bind(record.id.as_str())
        .bind(record.location.as_str())
        .bind(record.status.as_str())
        .bind(record.timestamp)
        .execute(&*self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_location(&self, location: &str) -> Result<Option<KioskStatusRecord>> {
        let row: Option<(String, String, String, DateTime<Utc>)> = sqlx::query_as(
            r"
            SELECT id, location, status, timestamp
            FROM kiosk_status
            WHERE location = $1
            ",
        )
        .bind(location)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.map(|(id, location, status, timestamp)| KioskStatusRecord {
            id: NotificationId::from(id),
            location: Location::new(location),
            status: KioskStatus::from_raw(&status),
            timestamp,
        }))
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&*self.pool).await?;
        Ok(())
    }
}
