//! Status-update webhook handler.
//!
//! Receives notifications from the email-parsing relay, derives
//! `(id, location, status, timestamp)` from the tolerated field aliases, and
//! upserts one record per kiosk location. Parsing never rejects a write:
//! malformed fragments degrade to sentinels, only absent required fields and
//! store failures produce error responses.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::SecondsFormat;
use kioskpulse_core::{
    parse::{classify_status, location_from_subject, parse_timestamp},
    payload::StatusNotification,
    CoreError, KioskStatusRecord, NotificationId,
};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::{error::ApiError, server::AppState};

/// Response from a successful status update.
///
/// Echoes the derived values so the notifier's logs show what was actually
/// recorded, not what was sent.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// Always `true` on the success path.
    pub success: bool,
    /// Canonical location the record was keyed under.
    pub location: String,
    /// Final status after classification.
    pub status: String,
    /// Recorded timestamp, ISO-8601 UTC.
    pub timestamp: String,
}

/// Handles `POST /update-status`.
///
/// # Errors
///
/// Returns appropriate HTTP status codes:
/// - 400: malformed JSON or missing required fields
/// - 500: store failure or unexpected errors
#[instrument(name = "update_status", skip(state, body), fields(content_length = body.len()))]
pub async fn update_status(State(state): State<AppState>, body: Bytes) -> Response {
    match process_update(&state, &body).await {
        Ok(update) => {
            info!(
                location = %update.location,
                status = %update.status,
                "Kiosk status recorded"
            );
            (StatusCode::OK, Json(update)).into_response()
        },
        Err(err) => {
            warn!(error = %err, "Status update rejected");
            err.into_response()
        },
    }
}

/// Fallback for non-POST methods on the update route.
pub async fn method_not_allowed() -> Response {
    ApiError::MethodNotAllowed.into_response()
}

/// Validates, derives, and persists a single status update.
async fn process_update(state: &AppState, body: &[u8]) -> Result<UpdateResponse, ApiError> {
    let payload: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let notification = StatusNotification::resolve(&payload)
        .map_err(|missing| ApiError::MissingFields(missing.join(", ")))?;

    let now = state.clock.now_utc();

    let location = location_from_subject(notification.subject);
    let status = classify_status(notification.subject, notification.status);
    let timestamp = parse_timestamp(notification.timestamp).unwrap_or(now);
    let id = match notification.id {
        Some(raw) => NotificationId::from(raw),
        None => NotificationId::synthesize(notification.subject, now),
    };

    let record = KioskStatusRecord { id, location, status, timestamp };

    state.store.upsert(&record).await.map_err(|e| match e {
        CoreError::Database(message) => ApiError::Persistence(message),
        other => {
            error!(error = %other, "Unexpected store failure");
            ApiError::Unexpected
        },
    })?;

    Ok(UpdateResponse {
        success: true,
        location: record.location.as_str().to_string(),
        status: record.status.as_str().to_string(),
        timestamp: record.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use kioskpulse_core::{storage::StatusStore, Location, ManualClock, Result as CoreResult};
    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<HashMap<String, KioskStatusRecord>>,
    }

    impl MemoryStore {
        fn get(&self, location: &str) -> Option<KioskStatusRecord> {
            self.records.lock().unwrap().get(location).cloned()
        }
    }

    #[async_trait]
    impl StatusStore for MemoryStore {
        async fn upsert(&self, record: &KioskStatusRecord) -> CoreResult<()> {
            self.records
                .lock()
                .unwrap()
                .insert(record.location.as_str().to_string(), record.clone());
            Ok(())
        }

        async fn find_by_location(&self, location: &str) -> CoreResult<Option<KioskStatusRecord>> {
            Ok(self.get(location))
        }

        async fn health_check(&self) -> CoreResult<()> {
            Ok(())
        }
    }

    struct FailStore;

    #[async_trait]
    impl StatusStore for FailStore {
        async fn upsert(&self, _record: &KioskStatusRecord) -> CoreResult<()> {
            Err(CoreError::Database("connection reset".to_string()))
        }

        async fn find_by_location(&self, _location: &str) -> CoreResult<Option<KioskStatusRecord>> {
            Err(CoreError::Database("connection reset".to_string()))
        }

        async fn health_check(&self) -> CoreResult<()> {
            Err(CoreError::Database("connection reset".to_string()))
        }
    }

    fn state_with(store: Arc<dyn StatusStore>) -> AppState {
        let clock = ManualClock::at(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        AppState::new(store, Arc::new(clock))
    }

    #[tokio::test]
    async fn derives_and_persists_record() {
        let store = Arc::new(MemoryStore::default());
        let state = state_with(store.clone());
        let body = json!({
            "raw_subject": "Connect Alert - Smitty's : EXCHANGE - transaction",
            "status": "error",
            "id": "m1",
            "processed_at_iso8601": "2024-01-01T00:00:00Z",
        });

        let update = process_update(&state, body.to_string().as_bytes())
            .await
            .expect("update should succeed");

        assert!(update.success);
        assert_eq!(update.location, Location::SMITTYS);
        assert_eq!(update.status, "ok");
        assert_eq!(update.timestamp, "2024-01-01T00:00:00Z");

        let stored = store.get(Location::SMITTYS).expect("record should be stored");
        assert_eq!(stored.id.as_str(), "m1");
    }

    #[tokio::test]
    async fn missing_fields_are_named() {
        let state = state_with(Arc::new(MemoryStore::default()));
        let body = json!({ "id": "m1" });

        let err = process_update(&state, body.to_string().as_bytes())
            .await
            .expect_err("update should be rejected");

        assert!(matches!(err, ApiError::MissingFields(_)));
        assert!(err.to_string().contains("subject"));
        assert!(err.to_string().contains("status"));
        assert!(err.to_string().contains("timestamp"));
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let state = state_with(Arc::new(MemoryStore::default()));

        let err = process_update(&state, b"{not json").await.expect_err("should be rejected");

        assert!(matches!(err, ApiError::InvalidBody(_)));
    }

    #[tokio::test]
    async fn unparseable_timestamp_falls_back_to_clock() {
        let store = Arc::new(MemoryStore::default());
        let state = state_with(store.clone());
        let body = json!({
            "raw_subject": "Connect Alert - Rubis : ALERT - error",
            "status": "error",
            "id": "m9",
            "processed_at": "sometime yesterday",
        });

        let update =
            process_update(&state, body.to_string().as_bytes()).await.expect("should succeed");

        assert_eq!(update.timestamp, "2024-06-01T12:00:00Z");
    }

    #[tokio::test]
    async fn missing_id_is_synthesized_deterministically() {
        let store = Arc::new(MemoryStore::default());
        let state = state_with(store.clone());
        let body = json!({
            "raw_subject": "Connect Alert - Rubis : ALERT - error",
            "status": "error",
            "processed_at_iso8601": "2024-01-01T00:00:00Z",
        });

        process_update(&state, body.to_string().as_bytes()).await.expect("should succeed");
        let first = store.get(Location::RUBIS).expect("stored").id;

        process_update(&state, body.to_string().as_bytes()).await.expect("should succeed");
        let second = store.get(Location::RUBIS).expect("stored").id;

        assert!(!first.as_str().is_empty());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn store_failure_maps_to_persistence_error() {
        let state = state_with(Arc::new(FailStore));
        let body = json!({
            "raw_subject": "Connect Alert - Rubis : ALERT - error",
            "status": "error",
            "id": "m1",
            "processed_at_iso8601": "2024-01-01T00:00:00Z",
        });

        let err = process_update(&state, body.to_string().as_bytes())
            .await
            .expect_err("should surface store failure");

        assert!(matches!(err, ApiError::Persistence(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
