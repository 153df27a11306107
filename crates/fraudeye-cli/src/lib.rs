//! # fraudeye-cli
//!
//! Command-line interface for FraudEye.
//!
//! ## Features
//!
//! - **Manual checks**: score a transaction against the live provider
//! - **Raw lookups**: IP reputation and phone validation
//! - **Offline scoring**: run the aggregator on saved signals, no network
//! - **Server**: the `/fraud-check` HTTP endpoint with an in-memory store
//! - **Multiple output formats**: Pretty tables, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
