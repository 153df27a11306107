//! Service configuration for FraudEye.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use fraudeye_client::{IpLookupOptions, IpqsClient, RateLimitConfig, DEFAULT_BASE_URL};
use fraudeye_core::{FraudEyeError, Result};
use serde::{Deserialize, Serialize};

use crate::headers::DEFAULT_FALLBACK_IP;
use crate::service::ServiceSettings;

/// Environment variable that overrides `ipqs_api_key`
pub const API_KEY_ENV: &str = "IPQS_API_KEY";

/// Configuration for the fraud-check service and its HTTP server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudEyeConfig {
    /// IPQualityScore API key. Checks fail safe when it is missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipqs_api_key: Option<String>,

    /// Provider base URL (default: the public JSON API).
    #[serde(default = "default_base_url")]
    pub ipqs_base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// HTTP listen address (default: 0.0.0.0:8080).
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Client IP used when no proxy header is present.
    #[serde(default = "default_fallback_ip")]
    pub fallback_ip: String,

    /// Provider strictness for IP lookups (0-3).
    #[serde(default = "default_strictness")]
    pub strictness: u8,

    /// Client-side provider rate limit; 0 disables it.
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Store checked transactions and raise alerts.
    #[serde(default = "default_true")]
    pub record_transactions: bool,
}

impl Default for FraudEyeConfig {
    fn default() -> Self {
        Self {
            ipqs_api_key: None,
            ipqs_base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            listen: default_listen(),
            fallback_ip: default_fallback_ip(),
            strictness: default_strictness(),
            requests_per_second: default_requests_per_second(),
            record_transactions: true,
        }
    }
}

impl FraudEyeConfig {
    /// Load config from a TOML file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| {
                FraudEyeError::Config(format!("failed to read {}: {e}", path.display()))
            })?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FraudEyeError::Config(e.to_string()))
    }

    /// Apply `IPQS_API_KEY` from the environment, if set
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_api_key(std::env::var(API_KEY_ENV).ok())
    }

    /// Override the API key when `key` is non-blank
    #[must_use]
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.ipqs_api_key = Some(key);
        }
        self
    }

    /// Whether a non-blank API key is present
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.ipqs_api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Build the provider client described by this config.
    ///
    /// A missing key still yields a client; it reports itself unconfigured
    /// and every check through it fails safe.
    pub fn build_client(&self) -> Result<IpqsClient> {
        let rate_limit = (self.requests_per_second > 0)
            .then(|| RateLimitConfig::per_second(self.requests_per_second));

        IpqsClient::builder(self.ipqs_api_key.clone().unwrap_or_default())
            .base_url(&self.ipqs_base_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .rate_limit(rate_limit)
            .ip_options(IpLookupOptions {
                strictness: self.strictness.min(3),
                ..IpLookupOptions::default()
            })
            .build()
    }

    /// Settings for [`crate::FraudCheckService`]
    #[must_use]
    pub fn settings(&self) -> ServiceSettings {
        ServiceSettings {
            fallback_ip: self.fallback_ip.clone(),
            record_transactions: self.record_transactions,
        }
    }
}

// Default value functions for serde.
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_listen() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
}

fn default_fallback_ip() -> String {
    DEFAULT_FALLBACK_IP.to_string()
}

const fn default_strictness() -> u8 {
    1
}

const fn default_requests_per_second() -> u32 {
    10
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FraudEyeConfig::default();
        assert_eq!(config.listen.port(), 8080);
        assert_eq!(config.fallback_ip, "192.168.1.1");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.record_transactions);
        assert!(!config.has_api_key());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config = FraudEyeConfig::from_toml_str(
            r#"
            ipqs_api_key = "abc123"
            listen = "127.0.0.1:3000"
            record_transactions = false
            "#,
        )
        .unwrap();

        assert!(config.has_api_key());
        assert_eq!(config.listen.port(), 3000);
        assert!(!config.record_transactions);
        assert_eq!(config.strictness, 1);
        assert_eq!(config.ipqs_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = FraudEyeConfig::from_toml_str("listen = 42").unwrap_err();
        assert!(matches!(err, FraudEyeError::Config(_)));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = FraudEyeConfig::load(Path::new("/nonexistent/fraudeye.toml")).unwrap();
        assert_eq!(config, FraudEyeConfig::default());
    }

    #[test]
    fn api_key_override_ignores_blank() {
        let config = FraudEyeConfig {
            ipqs_api_key: Some("from-file".into()),
            ..FraudEyeConfig::default()
        };

        let kept = config.clone().with_api_key(Some("   ".into()));
        assert_eq!(kept.ipqs_api_key.as_deref(), Some("from-file"));

        let replaced = config.with_api_key(Some("from-env".into()));
        assert_eq!(replaced.ipqs_api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fraudeye.toml");
        std::fs::write(&path, "strictness = 2\nrequests_per_second = 0\n").unwrap();

        let config = FraudEyeConfig::load(&path).unwrap();
        assert_eq!(config.strictness, 2);
        assert_eq!(config.requests_per_second, 0);
        assert_eq!(config.listen, default_listen());
    }

    #[test]
    fn client_without_key_is_unconfigured() {
        let client = FraudEyeConfig::default().build_client().unwrap();
        assert!(!client.is_configured());
    }
}
