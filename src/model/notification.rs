//! Notification payload returned by the remote notification API.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// A single customer notification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    /// Whether the customer has already seen it.
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub category: Option<String>,
}

/// A notification payload that is not a JSON array of notifications.
#[derive(Debug, Error)]
#[error("invalid notification payload: {0}")]
pub struct NotificationDecodeError(#[from] serde_json::Error);

/// Parse a JSON array of notifications.
///
/// # Errors
///
/// Returns [`NotificationDecodeError`] when the document is not an array of notifications.
pub fn parse_notifications(json: &str) -> Result<Vec<Notification>, NotificationDecodeError> {
    Ok(serde_json::from_str(json)?)
}

/// Count notifications not yet read.
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}
