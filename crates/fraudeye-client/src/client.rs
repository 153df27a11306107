//! Main IPQualityScore client implementation.

use crate::api::{IpApi, PhoneApi};
use crate::config::{IpLookupOptions, RateLimitConfig, RetryConfig};
use fraudeye_core::{FraudEyeError, Result};
use governor::{Quota, RateLimiter};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// The IPQualityScore JSON API base URL
pub const DEFAULT_BASE_URL: &str = "https://ipqualityscore.com/api/json";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

type DirectRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// IPQualityScore API client
#[derive(Clone)]
pub struct IpqsClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    api_key: String,
    base_url: String,
    timeout: Duration,
    retry_config: RetryConfig,
    rate_limiter: Option<DirectRateLimiter>,
    ip_options: IpLookupOptions,
}

impl std::fmt::Debug for IpqsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpqsClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl IpqsClient {
    /// Create a new client with the given API key using default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        IpqsClientBuilder::new(api_key).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> IpqsClientBuilder {
        IpqsClientBuilder::new(api_key)
    }

    /// Access IP-reputation endpoints
    #[must_use]
    pub fn ip(&self) -> IpApi<'_> {
        IpApi::new(self)
    }

    /// Access phone-validation endpoints
    #[must_use]
    pub fn phone(&self) -> PhoneApi<'_> {
        PhoneApi::new(self)
    }

    /// Returns true if an API key is set
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.inner.api_key.trim().is_empty()
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Default options for IP lookups
    pub(crate) fn ip_options(&self) -> &IpLookupOptions {
        &self.inner.ip_options
    }

    /// Perform a keyed GET request (`{base}/{endpoint}/{key}/{target}`), retrying
    /// transient failures.
    pub(crate) async fn get_keyed<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        target: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.build_url(endpoint, target, params)?;
        let mut attempt = 0;

        loop {
            match self.send_get(&url).await {
                Err(e) if self.inner.retry_config.should_retry(&e, attempt) => {
                    let delay = self.inner.retry_config.backoff_for(attempt);
                    warn!(
                        endpoint,
                        attempt = attempt + 1,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "retrying provider request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    #[instrument(skip(self, url), fields(provider = "ipqs"))]
    async fn send_get<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        if let Some(limiter) = &self.inner.rate_limiter {
            limiter.until_ready().await;
        }

        debug!(url = %self.redact(url), "GET request");

        let response = self
            .inner
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        self.handle_response(response).await
    }

    /// Build a URL with the API key in the path and the given query parameters
    fn build_url(&self, endpoint: &str, target: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&self.inner.base_url)
            .map_err(|e| FraudEyeError::Config(format!("invalid base URL: {e}")))?;

        url.path_segments_mut()
            .map_err(|()| FraudEyeError::Config(format!("base URL cannot have a path: {}", self.inner.base_url)))?
            .pop_if_empty()
            .push(endpoint)
            .push(&self.inner.api_key)
            .push(target);

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter().copied());
        }

        Ok(url)
    }

    /// URL with the API key masked, for logging.
    ///
    /// The key is the second-to-last path segment (see `build_url`); it is
    /// replaced by position so the percent-encoded form is masked too.
    fn redact(&self, url: &Url) -> String {
        if self.inner.api_key.is_empty() {
            return url.to_string();
        }

        let mut segments: Vec<&str> = url.path().split('/').collect();
        let key_at = segments.len().saturating_sub(2);
        if let Some(segment) = segments.get_mut(key_at) {
            *segment = "REDACTED";
        }

        let mut masked = url.clone();
        masked.set_path(&segments.join("/"));
        masked.to_string()
    }

    fn map_transport_error(&self, e: &reqwest::Error) -> FraudEyeError {
        if e.is_timeout() {
            FraudEyeError::Timeout(self.inner.timeout.as_secs())
        } else if e.is_connect() {
            FraudEyeError::Connection(e.to_string())
        } else {
            FraudEyeError::Http(e.to_string())
        }
    }

    /// Handle an API response that returns JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| self.map_transport_error(&e))?;
            serde_json::from_str(&body).map_err(FraudEyeError::Json)
        } else {
            Self::handle_error(status.as_u16(), response).await
        }
    }

    /// Convert an error response to a `FraudEyeError`
    async fn handle_error<T>(status: u16, response: reqwest::Response) -> Result<T> {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let body = response.text().await.unwrap_or_default();

        // Provider errors usually carry a JSON "message"
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or(body);

        match status {
            401 | 403 => Err(FraudEyeError::Unauthorized),
            429 => {
                warn!(retry_after = ?retry_after, "rate limited by provider");
                Err(FraudEyeError::RateLimited { retry_after })
            }
            _ => Err(FraudEyeError::Api {
                code: status,
                message,
            }),
        }
    }
}

/// Builder for configuring an [`IpqsClient`]
pub struct IpqsClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    retry_config: RetryConfig,
    rate_limit: Option<RateLimitConfig>,
    ip_options: IpLookupOptions,
}

impl IpqsClientBuilder {
    /// Create a new builder with the given API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("fraudeye/{}", env!("CARGO_PKG_VERSION")),
            retry_config: RetryConfig::default(),
            rate_limit: Some(RateLimitConfig::default()),
            ip_options: IpLookupOptions::default(),
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set retry configuration
    #[must_use]
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Set the client-side rate limit, or `None` to disable it
    #[must_use]
    pub const fn rate_limit(mut self, config: Option<RateLimitConfig>) -> Self {
        self.rate_limit = config;
        self
    }

    /// Set default IP lookup options
    #[must_use]
    pub fn ip_options(mut self, options: IpLookupOptions) -> Self {
        self.ip_options = options;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<IpqsClient> {
        Url::parse(&self.base_url)
            .map_err(|e| FraudEyeError::Config(format!("invalid base URL {}: {e}", self.base_url)))?;

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| FraudEyeError::Config(format!("failed to build HTTP client: {e}")))?;

        let rate_limiter = self.rate_limit.map(|rl| {
            RateLimiter::direct(Quota::per_second(rl.requests_per_second).allow_burst(rl.burst_size))
        });

        Ok(IpqsClient {
            inner: Arc::new(ClientInner {
                http,
                api_key: self.api_key,
                base_url: self.base_url.trim_end_matches('/').to_string(),
                timeout: self.timeout,
                retry_config: self.retry_config,
                rate_limiter,
                ip_options: self.ip_options,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_puts_key_in_path() {
        let client = IpqsClient::builder("secret-key")
            .base_url("https://example.test/api/json/")
            .build()
            .unwrap();

        let url = client
            .build_url("ip", "203.0.113.5", &[("strictness", "1")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/api/json/ip/secret-key/203.0.113.5?strictness=1"
        );
        assert_eq!(
            client.redact(&url),
            "https://example.test/api/json/ip/REDACTED/203.0.113.5?strictness=1"
        );
    }

    #[test]
    fn redact_masks_encoded_key() {
        let client = IpqsClient::builder("ab/c d%ef")
            .base_url("https://example.test/api/json")
            .build()
            .unwrap();

        let url = client.build_url("phone", "+15555550100", &[]).unwrap();
        assert!(url.as_str().contains("ab%2Fc%20d%25ef"));

        let redacted = client.redact(&url);
        assert!(!redacted.contains("ab%2Fc"));
        assert!(!redacted.contains("d%25ef"));
        assert!(redacted.ends_with("/phone/REDACTED/+15555550100"));
    }

    #[test]
    fn invalid_base_url_rejected() {
        let err = IpqsClient::builder("k").base_url("not a url").build().unwrap_err();
        assert!(matches!(err, FraudEyeError::Config(_)));
    }

    #[test]
    fn empty_key_is_unconfigured() {
        assert!(!IpqsClient::new("  ").unwrap().is_configured());
        assert!(IpqsClient::new("abc").unwrap().is_configured());
    }
}
