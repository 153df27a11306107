//! Transaction fraud checks for merchants.
//!
//! A check resolves the caller's IP from forwarded-for headers, looks the IP
//! up (and the phone number, when given) with the reputation provider, and
//! runs the deterministic aggregator from [`fraudeye_core::scoring`]. Provider
//! failures are scored conservatively; any other failure produces a fail-safe
//! response with a zero score instead of an error.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fraudeye::{FraudCheckRequest, FraudCheckService, IpqsClient, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> fraudeye::Result<()> {
//!     let client = IpqsClient::new("your-api-key")?;
//!     let service = FraudCheckService::new(Arc::new(client), Arc::new(MemoryStore::new()));
//!
//!     let request = FraudCheckRequest::new(1250.0).phone("+15555550100");
//!     let response = service.check(&request, &Default::default()).await;
//!
//!     println!("{} ({})", response.fraud_score, response.risk_level);
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/fraudeye/0.1.0")]

pub mod config;
pub mod headers;
pub mod provider;
pub mod server;
pub mod service;
pub mod store;

// Re-export core types
pub use fraudeye_core::*;

// Re-export client
pub use fraudeye_client::{
    IpLookupOptions, IpqsClient, IpqsClientBuilder, RateLimitConfig, RetryConfig,
};

pub use config::FraudEyeConfig;
pub use headers::resolve_client_ip;
pub use provider::SignalProvider;
pub use service::{FraudCheckService, ServiceSettings};
pub use store::{MemoryStore, TransactionStore};

// Re-export runtime for convenience
pub use serde_json;
pub use tokio;
