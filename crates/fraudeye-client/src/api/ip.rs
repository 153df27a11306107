//! IP-reputation endpoint.

use std::net::IpAddr;

use crate::config::IpLookupOptions;
use crate::IpqsClient;
use fraudeye_core::{FraudEyeError, IpSignal, Result};
use tracing::debug;

/// IP-reputation API endpoints
pub struct IpApi<'a> {
    client: &'a IpqsClient,
}

impl<'a> IpApi<'a> {
    pub(crate) fn new(client: &'a IpqsClient) -> Self {
        Self { client }
    }

    /// Look up an IP address with the client's default options
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let signal = client.ip().lookup("203.0.113.7").await?;
    /// println!("score: {}", signal.fraud_score);
    /// ```
    pub async fn lookup(&self, ip: &str) -> Result<IpSignal> {
        self.lookup_with_options(ip).send().await
    }

    /// Look up an IP address with custom options
    #[must_use]
    pub fn lookup_with_options(&self, ip: impl Into<String>) -> IpLookupBuilder<'a> {
        IpLookupBuilder::new(self.client, ip.into())
    }
}

/// Builder for IP lookup requests
pub struct IpLookupBuilder<'a> {
    client: &'a IpqsClient,
    ip: String,
    options: IpLookupOptions,
    user_agent: Option<String>,
    user_language: Option<String>,
}

impl<'a> IpLookupBuilder<'a> {
    fn new(client: &'a IpqsClient, ip: String) -> Self {
        Self {
            client,
            ip,
            options: client.ip_options().clone(),
            user_agent: None,
            user_language: None,
        }
    }

    /// Provider strictness level (0-3)
    #[must_use]
    pub fn strictness(mut self, level: u8) -> Self {
        self.options.strictness = level.min(3);
        self
    }

    /// Allow public access points (hotels, cafes) without penalty
    #[must_use]
    pub const fn allow_public_access_points(mut self, allow: bool) -> Self {
        self.options.allow_public_access_points = allow;
        self
    }

    /// Skip slower forensic checks
    #[must_use]
    pub const fn fast(mut self, fast: bool) -> Self {
        self.options.fast = fast;
        self
    }

    /// Score the address as a mobile device
    #[must_use]
    pub const fn mobile(mut self, mobile: bool) -> Self {
        self.options.mobile = mobile;
        self
    }

    /// Browser user agent of the customer, improves bot detection
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Browser language of the customer
    #[must_use]
    pub fn user_language(mut self, language: impl Into<String>) -> Self {
        self.user_language = Some(language.into());
        self
    }

    /// Execute the request
    pub async fn send(self) -> Result<IpSignal> {
        let ip: IpAddr = self
            .ip
            .trim()
            .parse()
            .map_err(|_| FraudEyeError::InvalidIp(self.ip.clone()))?;
        let ip = ip.to_string();

        let mut params = self.options.to_params();
        if let Some(agent) = self.user_agent {
            params.push(("user_agent", agent));
        }
        if let Some(language) = self.user_language {
            params.push(("user_language", language));
        }

        let params_ref: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();

        let signal: IpSignal = self.client.get_keyed("ip", &ip, &params_ref).await?;
        debug!(
            ip = %ip,
            success = signal.success,
            fraud_score = signal.fraud_score,
            "IP lookup complete"
        );

        Ok(signal)
    }
}
