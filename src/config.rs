use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(5000);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime settings for the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root the `/activities` routes hang off.
    pub base_url: Url,
    /// How long a feedback message stays visible.
    pub feedback_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Reads `SIGNUP_API_URL`, `SIGNUP_FEEDBACK_MS` and `SIGNUP_TIMEOUT_SECS`,
    /// loading a `.env` file first when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("SIGNUP_API_URL") {
            config = config.with_base_url(&raw)?;
        }
        if let Some(raw) = lookup("SIGNUP_FEEDBACK_MS") {
            config.feedback_delay = Duration::from_millis(parse_number("SIGNUP_FEEDBACK_MS", &raw)?);
        }
        if let Some(raw) = lookup("SIGNUP_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse_number("SIGNUP_TIMEOUT_SECS", &raw)?);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw.trim()).map_err(|e| ConfigError::BaseUrl {
            value: raw.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::BaseUrl {
                value: raw.to_string(),
                reason: "not a hierarchical url".to_string(),
            });
        }
        self.base_url = url;
        Ok(self)
    }
}

fn parse_number(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Number {
        key,
        value: raw.to_string(),
    })
}
