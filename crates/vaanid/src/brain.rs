//! Remote-brain adapter.
//!
//! The brain is a capability interface with two implementations: a hosted
//! chat-completion backend and a deterministic offline heuristic. The
//! fallback decorator picks between them by credential presence, so callers
//! always receive text.

use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;
use vaani_common::VaaniConfig;

/// Fixed system persona sent with every remote completion.
pub const PERSONA: &str = "You are Vaani — a Hindi-first, concise assistant.";

pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 220;

/// Offline replies, selected by substring checks on the prompt.
pub const OFFLINE_WEATHER: &str =
    "Abhi main live mausam nahi dekh sakti. Thodi der mein phir koshish kijiye.";
pub const OFFLINE_IDENTITY: &str = "Main Vaani hoon — aapki Hindi-first voice assistant.";
pub const OFFLINE_ELABORATE: &str = "Kripya apna sawaal thoda aur detail mein puchiye.";

/// Worst-case reply; also used by the handler when a completion comes back
/// blank.
pub const APOLOGY: &str = "Maaf kijiye, abhi jawab dene mein dikkat ho rahi hai.";

#[derive(Debug, Clone)]
pub struct BrainOptions {
    pub max_output_tokens: u32,
}

impl Default for BrainOptions {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BrainError {
    #[error("no API credential configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("request timeout after {0} seconds")]
    Timeout(u64),

    #[error("completion had no text")]
    EmptyCompletion,
}

/// A completion capability. One user turn in, free text out.
#[async_trait]
pub trait Brain: Send + Sync {
    async fn complete(&self, prompt: &str, options: &BrainOptions) -> Result<String, BrainError>;
}

/// Hosted chat-completion backend (OpenAI-compatible). Single attempt, no
/// retry; the client carries a bounded timeout.
pub struct RemoteBrain {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    timeout_secs: u64,
}

impl RemoteBrain {
    pub fn new(
        base_url: String,
        model: String,
        api_key: String,
        timeout_secs: u64,
    ) -> Result<Self, BrainError> {
        if api_key.is_empty() {
            return Err(BrainError::MissingCredential);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| BrainError::Http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            model,
            api_key,
            timeout_secs,
        })
    }
}

#[async_trait]
impl Brain for RemoteBrain {
    async fn complete(&self, prompt: &str, options: &BrainOptions) -> Result<String, BrainError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": PERSONA },
                { "role": "user", "content": prompt },
            ],
            "max_tokens": options.max_output_tokens,
            "temperature": 0.2,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BrainError::Timeout(self.timeout_secs)
                } else {
                    BrainError::Http(format!("request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(BrainError::Http(format!(
                "HTTP {} from completion API",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BrainError::Http(format!("invalid response body: {}", e)))?;

        let text = json
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|t| t.as_str())
            .unwrap_or("")
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(BrainError::EmptyCompletion);
        }

        Ok(text)
    }
}

/// Deterministic offline heuristic. Pure, no I/O.
pub struct LocalBrain;

impl LocalBrain {
    pub fn reply(&self, prompt: &str) -> String {
        let lower = prompt.to_lowercase();

        if lower.contains("weather") || lower.contains("mausam") || lower.contains("baarish") {
            return OFFLINE_WEATHER.to_string();
        }

        if lower.contains("who are you")
            || lower.contains("kaun ho")
            || lower.contains("tum kaun")
            || lower.contains("aap kaun")
        {
            return OFFLINE_IDENTITY.to_string();
        }

        if prompt.trim().chars().count() < 12 {
            return OFFLINE_ELABORATE.to_string();
        }

        APOLOGY.to_string()
    }
}

#[async_trait]
impl Brain for LocalBrain {
    async fn complete(&self, prompt: &str, _options: &BrainOptions) -> Result<String, BrainError> {
        Ok(self.reply(prompt))
    }
}

/// Remote brain when a credential is configured, offline heuristic otherwise
/// or whenever the remote call fails. Never errors.
pub struct FallbackBrain {
    remote: Option<RemoteBrain>,
    local: LocalBrain,
}

impl FallbackBrain {
    pub fn from_config(config: &VaaniConfig) -> Self {
        let remote = config.api_key.as_ref().and_then(|key| {
            match RemoteBrain::new(
                config.base_url.clone(),
                config.model.clone(),
                key.clone(),
                config.brain_timeout_secs,
            ) {
                Ok(remote) => Some(remote),
                Err(e) => {
                    warn!("remote brain unavailable, using offline replies: {}", e);
                    None
                }
            }
        });

        Self {
            remote,
            local: LocalBrain,
        }
    }
}

#[async_trait]
impl Brain for FallbackBrain {
    async fn complete(&self, prompt: &str, options: &BrainOptions) -> Result<String, BrainError> {
        if let Some(remote) = &self.remote {
            match remote.complete(prompt, options).await {
                Ok(text) => return Ok(text),
                Err(e) => warn!("remote brain failed, using offline reply: {}", e),
            }
        }

        self.local.complete(prompt, options).await
    }
}
