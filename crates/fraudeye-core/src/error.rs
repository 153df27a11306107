use thiserror::Error;

/// Result type alias for FraudEye operations
pub type Result<T> = std::result::Result<T, FraudEyeError>;

/// Errors that can occur around a fraud check.
///
/// The scoring function itself never fails; these cover the provider lookups,
/// request validation, configuration and the transaction store.
#[derive(Error, Debug)]
pub enum FraudEyeError {
    /// Authentication failed - invalid or missing provider API key
    #[error("authentication failed: invalid API key")]
    Unauthorized,

    /// Provider rate limit exceeded
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after: Option<u64>,
    },

    /// Provider returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the provider
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transaction amount is negative or not a finite number
    #[error("invalid transaction amount: {0}")]
    InvalidAmount(f64),

    /// Invalid IP address format
    #[error("invalid IP address: {0}")]
    InvalidIp(String),

    /// Invalid phone number
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Transaction store failure
    #[error("store error: {0}")]
    Store(String),

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl FraudEyeError {
    /// Returns true if the error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout(_) | Self::Connection(_)
        )
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns the HTTP status code if this is a provider error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
