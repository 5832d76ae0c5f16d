//! Domain models for kiosk status records.
//!
//! Defines the status record persisted per kiosk site along with newtype
//! wrappers for notification identifiers and site names. The wrappers keep
//! free-text webhook fields from leaking raw strings through the codebase.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for the originating notification.
///
/// Upstream notifiers supply a message id in one of several field spellings;
/// when none is present an id is synthesized so the write still proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    /// Creates an id from a raw notification field value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Synthesizes a deterministic id from the subject text and an instant.
    ///
    /// Uses UUIDv5 over `subject|instant` so repeated deliveries of the same
    /// notification at the same instant produce the same identifier.
    pub fn synthesize(subject: &str, at: DateTime<Utc>) -> Self {
        let seed = format!("{}|{}", subject, at.to_rfc3339());
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()).to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NotificationId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for NotificationId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Canonical name of a kiosk site.
///
/// Normalization maps free-text fragments onto a small closed set of site
/// names; fragments matching no keyword pass through trimmed, and empty
/// input falls back to the [`Location::UNKNOWN`] sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    /// Smitty's kiosk site.
    pub const SMITTYS: &'static str = "Smitty's";
    /// Rubis kiosk site.
    pub const RUBIS: &'static str = "Rubis";
    /// Quality Home Center, Prince Charles branch.
    pub const QUALITY_HOME_CENTER: &'static str = "Quality Home Center";
    /// Quality Home Center, Carmichael branch.
    pub const QHC_CARMICHAEL: &'static str = "QHC Carmichael";
    /// Sentinel used when no location can be extracted.
    pub const UNKNOWN: &'static str = "Unknown Location";

    /// Creates a location from an already-normalized name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the fallback sentinel location.
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    /// Returns the site name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the fallback sentinel.
    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operational status of a kiosk.
///
/// Canonically `ok` or `error`; any other raw value from the notifier is
/// carried through verbatim rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KioskStatus {
    /// Kiosk is operating normally.
    Ok,
    /// Kiosk reported an error condition.
    Error,
    /// Unrecognized raw status, passed through as received.
    Other(String),
}

impl KioskStatus {
    /// Maps a raw status string onto the canonical set.
    ///
    /// Empty input defaults to `Ok`; unrecognized values are preserved
    /// trimmed.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Ok;
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "ok" => Self::Ok,
            "error" => Self::Error,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// Returns the wire representation of this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
            Self::Other(raw) => raw,
        }
    }

    /// Whether this is the healthy status.
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for KioskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for KioskStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for KioskStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_raw(&raw))
    }
}

/// One status row per kiosk site.
///
/// The persistence layer keeps at most one live record per `location`; each
/// webhook delivery creates or fully replaces the row for its site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KioskStatusRecord {
    /// Identifier of the originating notification.
    pub id: NotificationId,

    /// Canonical site name, the natural key for conflict resolution.
    pub location: Location,

    /// Normalized operational status.
    pub status: KioskStatus,

    /// Instant the source event was processed, UTC.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn synthesized_id_is_deterministic() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let first = NotificationId::synthesize("Connect Alert - Rubis : ALERT", at);
        let second = NotificationId::synthesize("Connect Alert - Rubis : ALERT", at);

        assert_eq!(first, second);
        assert!(!first.as_str().is_empty());
    }

    #[test]
    fn synthesized_id_varies_with_subject_and_instant() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).unwrap();

        let base = NotificationId::synthesize("subject a", at);

        assert_ne!(base, NotificationId::synthesize("subject b", at));
        assert_ne!(base, NotificationId::synthesize("subject a", later));
    }

    #[test]
    fn status_maps_canonical_values_case_insensitively() {
        assert_eq!(KioskStatus::from_raw("OK"), KioskStatus::Ok);
        assert_eq!(KioskStatus::from_raw("Error"), KioskStatus::Error);
        assert_eq!(KioskStatus::from_raw(" error "), KioskStatus::Error);
    }

    #[test]
    fn status_defaults_to_ok_when_empty() {
        assert_eq!(KioskStatus::from_raw(""), KioskStatus::Ok);
        assert_eq!(KioskStatus::from_raw("   "), KioskStatus::Ok);
    }

    #[test]
    fn status_passes_unrecognized_values_through() {
        let status = KioskStatus::from_raw("Offline");
        assert_eq!(status, KioskStatus::Other("Offline".to_string()));
        assert_eq!(status.as_str(), "Offline");
    }

    #[test]
    fn location_sentinel_round_trips() {
        let unknown = Location::unknown();
        assert!(unknown.is_unknown());
        assert_eq!(unknown.as_str(), Location::UNKNOWN);
    }
}
