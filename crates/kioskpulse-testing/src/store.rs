//! In-memory store implementations for tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use kioskpulse_core::{storage::StatusStore, CoreError, KioskStatusRecord, Result};

/// Location-keyed in-memory store honoring upsert semantics.
///
/// Mirrors the production table's invariant: at most one record per
/// location, each write fully replacing the previous row. Clones share the
/// same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Arc<Mutex<HashMap<String, KioskStatusRecord>>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored record for a location, if any.
    pub fn get(&self, location: &str) -> Option<KioskStatusRecord> {
        self.lock().get(location).cloned()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, KioskStatusRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl StatusStore for InMemoryStore {
    async fn upsert(&self, record: &KioskStatusRecord) -> Result<()> {
        self.lock().insert(record.location.as_str().to_string(), record.clone());
        Ok(())
    }

    async fn find_by_location(&self, location: &str) -> Result<Option<KioskStatusRecord>> {
        Ok(self.get(location))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// Store whose every operation fails, for exercising 500 paths.
#[derive(Debug, Clone, Default)]
pub struct FailingStore;

impl FailingStore {
    /// Creates a failing store.
    pub fn new() -> Self {
        Self
    }

    fn failure() -> CoreError {
        CoreError::Database("simulated store failure".to_string())
    }
}

#[async_trait]
impl StatusStore for FailingStore {
    async fn upsert(&self, _record: &KioskStatusRecord) -> Result<()> {
        Err(Self::failure())
    }

    async fn find_by_location(&self, _location: &str) -> Result<Option<KioskStatusRecord>> {
        Err(Self::failure())
    }

    async fn health_check(&self) -> Result<()> {
        Err(Self::failure())
    }
}
