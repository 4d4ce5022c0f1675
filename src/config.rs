use std::time::Duration;

pub const DEMO_API_KEY: &str = "DEMO_KEY";
const DEV_SESSION_SECRET: &str = "dev_key";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TEXT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 5000;

/// Process configuration, read once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Signing secret for framework sessions. Not used by request handling.
    pub session_secret: String,
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub gemini_model: String,
    pub generation_timeout: Duration,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let session_secret = get("SESSION_SECRET").unwrap_or_else(|| {
            tracing::warn!("⚠️ SESSION_SECRET not set, using development default");
            DEV_SESSION_SECRET.to_string()
        });
        let timeout_secs = get("GENERATION_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            session_secret,
            gemini_api_key: get("GEMINI_API_KEY").unwrap_or_else(|| DEMO_API_KEY.into()),
            gemini_api_base: get("GEMINI_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.into()),
            gemini_model: get("GEMINI_TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.into()),
            generation_timeout: Duration::from_secs(timeout_secs),
            port: get("PORT").and_then(|v| v.trim().parse().ok()).unwrap_or(DEFAULT_PORT),
        }
    }

    pub fn is_demo(&self) -> bool {
        self.gemini_api_key == DEMO_API_KEY
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
