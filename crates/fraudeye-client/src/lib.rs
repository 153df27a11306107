//! HTTP client for the IPQualityScore APIs used by FraudEye.
//!
//! This crate provides [`IpqsClient`], which performs the two lookups a fraud
//! check depends on:
//!
//! - **IP reputation**: `client.ip().lookup("203.0.113.7")` → [`IpSignal`](fraudeye_core::IpSignal)
//! - **Phone validation**: `client.phone().validate("+15555550100")` → [`PhoneSignal`](fraudeye_core::PhoneSignal)
//!
//! A provider answer with `success: false` is returned as a signal, not an
//! error; only transport and HTTP-level failures become [`FraudEyeError`]s.

#![doc(html_root_url = "https://docs.rs/fraudeye-client/0.1.0")]

mod client;
mod config;
pub mod api;

pub use client::{IpqsClient, IpqsClientBuilder, DEFAULT_BASE_URL};
pub use config::*;
pub use fraudeye_core::{FraudEyeError, Result};
