//! Signal provider abstraction over the reputation lookups.

use async_trait::async_trait;
use fraudeye_client::IpqsClient;
use fraudeye_core::{IpSignal, PhoneSignal, Result};
use tracing::instrument;

/// Source of IP-reputation and phone-validation signals.
///
/// Implementations return `Err` only for transport or configuration problems;
/// a provider that answered but could not score the input returns a signal
/// with `success: false`.
#[async_trait]
pub trait SignalProvider: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &'static str;

    /// Whether credentials are present
    fn is_configured(&self) -> bool {
        true
    }

    /// Look up an IP address
    async fn ip_signal(&self, ip: &str) -> Result<IpSignal>;

    /// Validate a phone number
    async fn phone_signal(&self, number: &str) -> Result<PhoneSignal>;
}

#[async_trait]
impl SignalProvider for IpqsClient {
    fn name(&self) -> &'static str {
        "ipqs"
    }

    fn is_configured(&self) -> bool {
        Self::is_configured(self)
    }

    #[instrument(skip(self), fields(provider = "ipqs"))]
    async fn ip_signal(&self, ip: &str) -> Result<IpSignal> {
        self.ip().lookup(ip).await
    }

    #[instrument(skip(self, number), fields(provider = "ipqs"))]
    async fn phone_signal(&self, number: &str) -> Result<PhoneSignal> {
        self.phone().validate(number).await
    }
}
