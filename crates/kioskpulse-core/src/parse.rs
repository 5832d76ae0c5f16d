//! Subject-line parsing, location normalization, and status classification.
//!
//! Status emails carry everything of interest in the subject line, shaped
//! like `Connect Alert - <LOCATION> : <detail>`. Parsing never fails: every
//! path degrades to a sentinel value so a malformed subject still produces a
//! best-effort record.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

use crate::models::{KioskStatus, Location};

/// Primary subject pattern, capturing the location between the alert prefix
/// and the first colon.
static CONNECT_ALERT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)connect\s+alert\s*-\s*([^:]+):").expect("static regex is valid")
});

/// Keywords that force the final status to `ok` regardless of the raw
/// status value. Alert feeds use them for recovery and heartbeat messages.
const OK_KEYWORDS: &[&str] = &["cleared", "transaction"];

/// Date-time layouts accepted besides RFC 3339 / RFC 2822. Naive matches
/// are taken as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y, %I:%M:%S %p",
];

/// Extracts and normalizes the kiosk location from a subject line.
///
/// Falls back to [`Location::UNKNOWN`] when nothing recognizable is found.
pub fn location_from_subject(subject: &str) -> Location {
    match extract_raw_location(subject) {
        Some(raw) => normalize_location(&raw),
        None => Location::unknown(),
    }
}

/// Pulls the raw location fragment out of a subject line.
///
/// Tries the `Connect Alert - <LOCATION> : ...` pattern first, then falls
/// back to splitting on `" - "` and taking the second segment up to the
/// first colon.
fn extract_raw_location(subject: &str) -> Option<String> {
    if let Some(caps) = CONNECT_ALERT_RE.captures(subject) {
        let raw = caps[1].trim();
        if !raw.is_empty() {
            return Some(raw.to_string());
        }
    }

    let segment = subject.split(" - ").nth(1)?;
    let raw = segment.split(':').next()?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(raw.to_string())
}

/// Maps a free-text location fragment onto the canonical site set.
///
/// Keyword matching is case-insensitive and ordered; fragments matching no
/// keyword pass through trimmed. Idempotent on canonical names.
pub fn normalize_location(raw: &str) -> Location {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Location::unknown();
    }

    let lowered = trimmed.to_lowercase();
    if lowered.contains("smitty") {
        return Location::new(Location::SMITTYS);
    }
    if lowered.contains("carmichael") {
        return Location::new(Location::QHC_CARMICHAEL);
    }
    if lowered.contains("quality home center") || lowered.contains("prince charles") {
        return Location::new(Location::QUALITY_HOME_CENTER);
    }
    if lowered.contains("rubis") {
        return Location::new(Location::RUBIS);
    }

    Location::new(trimmed)
}

/// Derives the final status from the subject line and raw status field.
///
/// A recovery keyword in either input forces `ok`; otherwise the raw status
/// is carried through, defaulting to `ok` when empty.
pub fn classify_status(subject: &str, raw_status: &str) -> KioskStatus {
    let subject = subject.to_lowercase();
    let status = raw_status.to_lowercase();

    let forced_ok = OK_KEYWORDS.iter().any(|kw| subject.contains(kw) || status.contains(kw));
    if forced_ok {
        return KioskStatus::Ok;
    }

    KioskStatus::from_raw(raw_status)
}

/// Parses a timestamp field leniently.
///
/// Accepts RFC 3339, RFC 2822, and a handful of locale-formatted layouts.
/// Returns `None` on failure; the caller substitutes the current instant so
/// an unparseable timestamp never blocks the write.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
}
