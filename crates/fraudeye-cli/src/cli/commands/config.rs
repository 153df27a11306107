//! `fraudeye config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Set { key, value } => set_config(ctx, &key, &value),
        ConfigCommands::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
    }
}

/// Keep only the first and last four characters of a key
fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let mut config = Config::load(&ctx.config_path)?;
    config.api_key = config.api_key.as_deref().map(mask);
    config.service.ipqs_api_key = config.service.ipqs_api_key.as_deref().map(mask);

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&config)?);
        }
        _ => {
            println!("{}", "Current Configuration:".bold());
            println!();

            let api_display = config
                .api_key
                .or(config.service.ipqs_api_key.clone())
                .unwrap_or_else(|| "(not set)".dimmed().to_string());
            println!("  {} {}", "api_key:".bold(), api_display);
            println!(
                "  {} {}",
                "output_format:".bold(),
                config.output_format.unwrap_or_default()
            );

            let s = &config.service;
            println!("  {} {}", "ipqs_base_url:".bold(), s.ipqs_base_url);
            println!("  {} {}", "timeout_secs:".bold(), s.timeout_secs);
            println!("  {} {}", "listen:".bold(), s.listen);
            println!("  {} {}", "fallback_ip:".bold(), s.fallback_ip);
            println!("  {} {}", "strictness:".bold(), s.strictness);
            println!("  {} {}", "requests_per_second:".bold(), s.requests_per_second);
            println!("  {} {}", "record_transactions:".bold(), s.record_transactions);
        }
    }

    Ok(())
}

fn set_config(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load(&ctx.config_path)?;

    apply(&mut config, key, value)?;
    config.save(&ctx.config_path)?;

    println!("{} {} set.", "Success:".green().bold(), key.cyan());
    Ok(())
}

/// Set one key on `config`
pub fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let s = &mut config.service;
    match key {
        "api_key" | "ipqs_api_key" => config.api_key = Some(value.to_string()),
        "output_format" | "output" => config.output_format = Some(value.parse()?),
        "ipqs_base_url" | "base_url" => s.ipqs_base_url = value.to_string(),
        "timeout_secs" | "timeout" => s.timeout_secs = value.parse()?,
        "listen" => s.listen = value.parse()?,
        "fallback_ip" => s.fallback_ip = value.to_string(),
        "strictness" => s.strictness = value.parse()?,
        "requests_per_second" | "rps" => s.requests_per_second = value.parse()?,
        "record_transactions" => s.record_transactions = value.parse()?,
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 api_key             - Your IPQualityScore API key\n  \
                 output_format       - Default output format (pretty/json/csv/yaml)\n  \
                 ipqs_base_url       - Provider base URL\n  \
                 timeout_secs        - Provider request timeout\n  \
                 listen              - Server listen address (e.g. 0.0.0.0:8080)\n  \
                 fallback_ip         - Client IP used when no proxy header is present\n  \
                 strictness          - Provider strictness (0-3)\n  \
                 requests_per_second - Client-side rate limit, 0 disables\n  \
                 record_transactions - Store checked transactions (true/false)",
                key
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_long_keys_only() {
        assert_eq!(mask("abcd1234wxyz"), "abcd...wxyz");
        assert_eq!(mask("short"), "****");
    }

    #[test]
    fn apply_known_and_unknown_keys() {
        let mut config = Config::default();
        apply(&mut config, "listen", "127.0.0.1:9000").unwrap();
        apply(&mut config, "record_transactions", "false").unwrap();
        apply(&mut config, "output", "yaml").unwrap();

        assert_eq!(config.service.listen.port(), 9000);
        assert!(!config.service.record_transactions);
        assert_eq!(config.output_format, Some(OutputFormat::Yaml));

        assert!(apply(&mut config, "listen", "not-an-addr").is_err());
        assert!(apply(&mut config, "colour", "red").is_err());
    }
}
