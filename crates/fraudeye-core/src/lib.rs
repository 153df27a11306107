//! Core types, errors and scoring for FraudEye.
//!
//! This crate provides the foundational pieces used across the FraudEye workspace:
//!
//! - **Types**: Provider signals ([`IpSignal`], [`PhoneSignal`]), the
//!   [`TransactionContext`] being checked, the [`FraudAssessment`] result and
//!   the records exchanged with the transaction store
//! - **Scoring**: The deterministic fraud-score aggregator, [`scoring::assess`]
//! - **Errors**: Error handling with [`FraudEyeError`]
//!
//! # Example
//!
//! ```rust
//! use fraudeye_core::{scoring, IpSignal, RiskLevel, TransactionContext};
//!
//! let ctx = TransactionContext::new(200.0, "203.0.113.7");
//! let ip = IpSignal { success: true, fraud_score: 85, ..IpSignal::default() };
//!
//! let assessment = scoring::assess(&ctx, &ip, None);
//! assert_eq!(assessment.risk_level, RiskLevel::High);
//! assert!(assessment.risk_factors.is_empty());
//! ```

#![doc(html_root_url = "https://docs.rs/fraudeye-core/0.1.0")]

mod error;
pub mod scoring;
pub mod types;

pub use error::{FraudEyeError, Result};
pub use types::*;
