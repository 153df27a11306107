//! Command-line argument definitions using clap.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use crate::output::OutputFormat;

/// Transaction fraud checks from the command line
///
/// Combines IP reputation, phone validation and the transaction amount into
/// a fraud score between 0 and 1.
///
/// Get an API key at: https://www.ipqualityscore.com
#[derive(Parser, Debug)]
#[command(name = "fraudeye")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// IPQualityScore API key (or set IPQS_API_KEY env var)
    #[arg(short = 'k', long, env = "IPQS_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Config file (default: platform config directory)
    #[arg(long, env = "FRAUDEYE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a transaction against the live provider
    Check(CheckArgs),

    /// Look up the reputation of an IP address
    Ip(IpArgs),

    /// Validate a phone number
    Phone(PhoneArgs),

    /// Score saved signals offline, without network access
    Score(ScoreArgs),

    /// Show the scoring rules and thresholds
    Rules,

    /// Run the fraud-check HTTP server
    Serve(ServeArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Check command
// ============================================================================

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Transaction amount
    pub amount: f64,

    /// Client IP address (default: the configured fallback IP)
    #[arg(long)]
    pub ip: Option<String>,

    /// Customer phone number
    #[arg(short, long)]
    pub phone: Option<String>,

    /// Customer email
    #[arg(short, long)]
    pub email: Option<String>,

    /// Merchant-side user id
    #[arg(short, long)]
    pub user_id: Option<String>,

    /// Payment method (card, bank_transfer, ...)
    #[arg(long)]
    pub payment_method: Option<String>,

    /// Billing street
    #[arg(long)]
    pub street: Option<String>,

    /// Billing city
    #[arg(long)]
    pub city: Option<String>,

    /// Billing state
    #[arg(long)]
    pub state: Option<String>,

    /// Billing zip code
    #[arg(long)]
    pub zip: Option<String>,

    /// Billing country
    #[arg(long)]
    pub country: Option<String>,
}

// ============================================================================
// IP command
// ============================================================================

#[derive(Args, Debug)]
pub struct IpArgs {
    /// IP address to look up
    pub ip: String,

    /// Provider strictness (0-3)
    #[arg(short, long)]
    pub strictness: Option<u8>,

    /// Run the slower forensic checks
    #[arg(long)]
    pub thorough: bool,
}

// ============================================================================
// Phone command
// ============================================================================

#[derive(Args, Debug)]
pub struct PhoneArgs {
    /// Phone number, preferably in international format
    pub number: String,

    /// Expected country code(s) of the number (e.g. US, GB)
    #[arg(short, long)]
    pub country: Vec<String>,

    /// Provider strictness (0-2)
    #[arg(short, long)]
    pub strictness: Option<u8>,
}

// ============================================================================
// Score command
// ============================================================================

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// JSON file with `context`, `ip` and optional `phone` ("-" for stdin)
    #[arg(short, long)]
    pub input: PathBuf,
}

// ============================================================================
// Serve command
// ============================================================================

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Listen address (overrides config)
    #[arg(short, long)]
    pub listen: Option<SocketAddr>,

    /// Do not store checked transactions
    #[arg(long)]
    pub no_record: bool,

    /// Service config file (TOML) used instead of the CLI config's `[service]` table
    #[arg(long, value_name = "PATH")]
    pub service_config: Option<PathBuf>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., api_key, output_format, listen)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
