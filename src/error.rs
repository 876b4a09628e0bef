use thiserror::Error;

/// Failure talking to the activities service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, timeout).
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// A response arrived but its body was not the JSON we expected.
    #[error("unreadable response from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("server rejected request with status {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },
}

impl ApiError {
    /// True for failures where the server's own verdict is unknown.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Transport { .. } | ApiError::Decode { .. })
    }

    /// Server-supplied detail, only present for application errors.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Invalid client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    #[error("{key} must be a whole number, got '{value}'")]
    Number { key: &'static str, value: String },

    #[error("failed to build http client: {0}")]
    Client(String),
}
