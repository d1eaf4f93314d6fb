//! Reminder records as persisted in the reminders file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled textual note with a delivery deadline.
///
/// `delivered` is one-way: the due-scan flips it to true and nothing ever
/// resets it. Records are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub user_id: String,
    pub title: String,
    /// Scheduled delivery time (ISO-8601 in the stored file).
    pub datetime: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub delivered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
}

impl Reminder {
    /// Build a fresh undelivered reminder with an "R-{epoch millis}" id.
    pub fn new(user_id: &str, title: &str, datetime: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("R-{}", now.timestamp_millis()),
            user_id: user_id.to_string(),
            title: title.to_string(),
            datetime,
            created_at: now,
            delivered: false,
            delivered_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.delivered
    }
}

/// Action id attached to `/act` replies: "A-{epoch millis}".
pub fn action_id() -> String {
    format!("A-{}", Utc::now().timestamp_millis())
}
