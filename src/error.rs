use thiserror::Error;

/// Main error type for the betbrain service
#[derive(Error, Debug)]
pub enum BetBrainError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream {provider} returned {status}: {body}")]
    UpstreamStatus {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Upstream {provider} timed out")]
    Timeout { provider: String },

    #[error("Rate limited: {0}")]
    RateLimited(String),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Data errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl BetBrainError {
    /// Errors caused by an unreachable or misbehaving upstream provider
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            BetBrainError::Http(_)
                | BetBrainError::UpstreamStatus { .. }
                | BetBrainError::Timeout { .. }
                | BetBrainError::RateLimited(_)
        )
    }
}

/// Result type alias for BetBrainError
pub type Result<T> = std::result::Result<T, BetBrainError>;
