//! Webhook payload field resolution.
//!
//! The upstream email-parsing relay has shipped several field-naming
//! conventions over time. Each logical field carries an explicit ordered
//! alias list; resolution takes the first present, non-empty value. This is
//! the single place new aliases get added.

use serde_json::Value;

/// Accepted spellings for the subject text, in precedence order.
pub const SUBJECT_ALIASES: &[&str] = &["raw_subject", "rawSubject", "subject", "mail_subject"];

/// Accepted spellings for the raw status, in precedence order.
pub const STATUS_ALIASES: &[&str] = &["status", "full_status", "fullStatus"];

/// Accepted spellings for the notification identifier, in precedence order.
pub const ID_ALIASES: &[&str] = &["id", "message_id", "messageId", "Message ID"];

/// Accepted spellings for the processing timestamp, in precedence order.
pub const TIMESTAMP_ALIASES: &[&str] =
    &["processed_at_iso8601", "processed_at", "processedAt", "Processed at"];

/// Resolves one logical field against its alias list.
///
/// Returns the first alias whose value is a non-empty string, trimmed.
/// Non-string values are skipped.
pub fn resolve_field<'a>(body: &'a Value, aliases: &[&str]) -> Option<&'a str> {
    aliases.iter().find_map(|key| {
        body.get(key).and_then(Value::as_str).map(str::trim).filter(|value| !value.is_empty())
    })
}

/// A webhook payload after alias resolution.
///
/// Subject, status, and timestamp are required; the identifier is optional
/// and synthesized downstream when absent.
#[derive(Debug, Clone, Copy)]
pub struct StatusNotification<'a> {
    /// Free-text subject line of the status email.
    pub subject: &'a str,
    /// Raw status value prior to classification.
    pub status: &'a str,
    /// Notification identifier, if the notifier supplied one.
    pub id: Option<&'a str>,
    /// Raw processing timestamp prior to normalization.
    pub timestamp: &'a str,
}

impl<'a> StatusNotification<'a> {
    /// Resolves a JSON body into a notification.
    ///
    /// # Errors
    ///
    /// Returns the logical names of every required field that resolved to
    /// nothing, for a 400 response naming them all at once.
    pub fn resolve(body: &'a Value) -> Result<Self, Vec<&'static str>> {
        let subject = resolve_field(body, SUBJECT_ALIASES);
        let status = resolve_field(body, STATUS_ALIASES);
        let timestamp = resolve_field(body, TIMESTAMP_ALIASES);
        let id = resolve_field(body, ID_ALIASES);

        match (subject, status, timestamp) {
            (Some(subject), Some(status), Some(timestamp)) => {
                Ok(Self { subject, status, id, timestamp })
            },
            _ => {
                let mut missing = Vec::new();
                if subject.is_none() {
                    missing.push("subject");
                }
                if status.is_none() {
                    missing.push("status");
                }
                if timestamp.is_none() {
                    missing.push("timestamp");
                }
                Err(missing)
            },
        }
    }
}
