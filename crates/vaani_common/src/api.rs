//! Request and response envelopes for the HTTP surface.

use crate::reminder::Reminder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /act`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Attached image payload; only its presence matters to the engine.
    #[serde(default)]
    pub image: Option<serde_json::Value>,
    #[serde(default)]
    pub stt_confidence: Option<f64>,
}

/// Reply envelope for `POST /act`. Always delivered with HTTP 200; failure is
/// reported through `success: false` plus `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminders: Option<Vec<Reminder>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActResponse {
    pub fn ok(action_id: String, reply: String) -> Self {
        Self {
            success: true,
            action_id: Some(action_id),
            reply: Some(reply),
            reminders: None,
            error: None,
        }
    }

    /// Success reply that also carries the pending reminder list.
    pub fn with_reminders(action_id: String, reply: String, reminders: Vec<Reminder>) -> Self {
        Self {
            success: true,
            action_id: Some(action_id),
            reply: Some(reply),
            reminders: Some(reminders),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            action_id: None,
            reply: None,
            reminders: None,
            error: Some(error),
        }
    }
}

/// Reply envelope for `GET /reminders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersResponse {
    pub success: bool,
    pub reminders: Vec<Reminder>,
}

/// Reply envelope for `GET /check_due`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueResponse {
    pub success: bool,
    pub due: Vec<Reminder>,
}

/// Reply envelope for `GET /_health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub time: DateTime<Utc>,
}
