//! Client configuration types.

use std::num::NonZeroU32;
use std::time::Duration;

use fraudeye_core::FraudEyeError;
use serde::{Deserialize, Serialize};

/// Retry configuration for failed requests
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,

    /// Initial backoff duration
    pub initial_backoff: Duration,

    /// Maximum backoff duration
    pub max_backoff: Duration,

    /// Whether to retry on rate limit errors
    pub retry_on_rate_limit: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryConfig {
    /// Create a new retry configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(5),
            retry_on_rate_limit: true,
        }
    }

    /// No retries at all
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new().max_retries(0)
    }

    /// Set maximum retries
    #[must_use]
    pub const fn max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    /// Set initial backoff duration
    #[must_use]
    pub const fn initial_backoff(mut self, duration: Duration) -> Self {
        self.initial_backoff = duration;
        self
    }

    /// Set maximum backoff duration
    #[must_use]
    pub const fn max_backoff(mut self, duration: Duration) -> Self {
        self.max_backoff = duration;
        self
    }

    /// Calculate backoff for a given attempt
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        let backoff = (self.initial_backoff.as_millis() as u64).saturating_mul(factor);
        let max = self.max_backoff.as_millis() as u64;
        Duration::from_millis(backoff.min(max))
    }

    /// Whether a failed attempt (0-based) should be retried
    #[must_use]
    pub const fn should_retry(&self, error: &FraudEyeError, attempt: u32) -> bool {
        if attempt >= self.max_retries || !error.is_retryable() {
            return false;
        }
        !matches!(error, FraudEyeError::RateLimited { .. }) || self.retry_on_rate_limit
    }
}

/// Client-side request rate limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Sustained requests per second
    pub requests_per_second: NonZeroU32,

    /// Requests allowed in a burst
    pub burst_size: NonZeroU32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: NonZeroU32::new(10).unwrap_or(NonZeroU32::MIN),
            burst_size: NonZeroU32::new(20).unwrap_or(NonZeroU32::MIN),
        }
    }
}

impl RateLimitConfig {
    /// Limit to `rps` requests per second with an equal burst
    #[must_use]
    pub fn per_second(rps: u32) -> Self {
        let rps = NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN);
        Self {
            requests_per_second: rps,
            burst_size: rps,
        }
    }
}

/// Query options sent with every IP-reputation lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpLookupOptions {
    /// Provider strictness level (0-3); higher catches more but false-positives more
    #[serde(default = "default_strictness")]
    pub strictness: u8,

    /// Treat public access points (hotels, cafes, libraries) as lower risk
    #[serde(default = "default_true")]
    pub allow_public_access_points: bool,

    /// Skip slower forensic checks
    #[serde(default = "default_true")]
    pub fast: bool,

    /// Score the address as a mobile device
    #[serde(default = "default_true")]
    pub mobile: bool,
}

impl Default for IpLookupOptions {
    fn default() -> Self {
        Self {
            strictness: default_strictness(),
            allow_public_access_points: true,
            fast: true,
            mobile: true,
        }
    }
}

impl IpLookupOptions {
    /// Query parameters for these options
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("strictness", self.strictness.to_string()),
            (
                "allow_public_access_points",
                self.allow_public_access_points.to_string(),
            ),
            ("fast", self.fast.to_string()),
            ("mobile", self.mobile.to_string()),
        ]
    }
}

const fn default_strictness() -> u8 {
    1
}

const fn default_true() -> bool {
    true
}
