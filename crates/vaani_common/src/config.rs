//! Environment-driven configuration for vaanid.
//!
//! Every setting has a default; a missing API credential is logged at
//! startup, never fatal.

use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default chat-completion endpoint base (OpenAI-compatible, Groq-hosted).
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model name when GROQ_MODEL is not set.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default bound on a single remote-brain call.
pub const DEFAULT_BRAIN_TIMEOUT_SECS: u64 = 20;

/// Runtime configuration, read once at boot.
#[derive(Debug, Clone)]
pub struct VaaniConfig {
    /// Listening port (PORT).
    pub port: u16,
    /// Provider credential (GROQ_API_KEY); absence selects the offline brain.
    pub api_key: Option<String>,
    /// Model name (GROQ_MODEL).
    pub model: String,
    /// Chat-completion endpoint base (GROQ_BASE_URL).
    pub base_url: String,
    /// Bound on a single remote-brain call (VAANI_BRAIN_TIMEOUT_SECS).
    pub brain_timeout_secs: u64,
    /// Reminders store file (VAANI_REMINDERS_FILE).
    pub reminders_path: PathBuf,
    /// Append-only due-scan audit log (VAANI_DELIVERED_LOG).
    pub delivered_log_path: PathBuf,
    /// Sample screenshot served by GET /sample_image (VAANI_SAMPLE_IMAGE).
    pub sample_image_path: PathBuf,
    /// Directory holding the static landing page (VAANI_WEB_ROOT).
    pub web_root: PathBuf,
}

impl Default for VaaniConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            brain_timeout_secs: DEFAULT_BRAIN_TIMEOUT_SECS,
            reminders_path: PathBuf::from("reminders.json"),
            delivered_log_path: PathBuf::from("delivered.log"),
            sample_image_path: PathBuf::from("sample_image.png"),
            web_root: PathBuf::from("static"),
        }
    }
}

impl VaaniConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            warn!("GROQ_API_KEY not set; brain calls will use the offline fallback");
        }

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let brain_timeout_secs = env::var("VAANI_BRAIN_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.brain_timeout_secs);

        Self {
            port,
            api_key,
            model: env::var("GROQ_MODEL").unwrap_or(defaults.model),
            base_url: env::var("GROQ_BASE_URL").unwrap_or(defaults.base_url),
            brain_timeout_secs,
            reminders_path: env::var("VAANI_REMINDERS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.reminders_path),
            delivered_log_path: env::var("VAANI_DELIVERED_LOG")
                .map(PathBuf::from)
                .unwrap_or(defaults.delivered_log_path),
            sample_image_path: env::var("VAANI_SAMPLE_IMAGE")
                .map(PathBuf::from)
                .unwrap_or(defaults.sample_image_path),
            web_root: env::var("VAANI_WEB_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.web_root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = VaaniConfig::default();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.reminders_path, PathBuf::from("reminders.json"));
        assert_eq!(cfg.delivered_log_path, PathBuf::from("delivered.log"));
    }
}
