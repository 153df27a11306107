//! Command implementations.

pub mod check;
pub mod config;
pub mod ip;
pub mod phone;
pub mod rules;
pub mod score;
pub mod serve;

use std::path::PathBuf;

use fraudeye::{FraudEyeConfig, IpqsClient};

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Service settings with the API key already resolved
    pub service: FraudEyeConfig,

    /// Config file in use
    pub config_path: PathBuf,

    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,
}

impl Context {
    /// Fail unless an API key is available.
    pub fn require_api_key(&self) -> anyhow::Result<()> {
        if self.service.has_api_key() {
            return Ok(());
        }
        anyhow::bail!(
            "API key required.\n\n\
             Set it with one of:\n  \
             1. --api-key <KEY>\n  \
             2. IPQS_API_KEY environment variable\n  \
             3. fraudeye config set api_key <KEY>\n\n\
             Get your key at: https://www.ipqualityscore.com"
        )
    }

    /// Create a provider client with the configured API key.
    pub fn client(&self) -> anyhow::Result<IpqsClient> {
        self.require_api_key()?;
        Ok(self.service.build_client()?)
    }
}
