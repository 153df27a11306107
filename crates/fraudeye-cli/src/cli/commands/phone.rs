//! `fraudeye phone` - Validate a phone number.

use anyhow::Result;
use colored::Colorize;
use fraudeye::PhoneSignal;

use super::Context;
use crate::cli::args::PhoneArgs;
use crate::output::{emit, flag};

pub async fn execute(ctx: Context, args: PhoneArgs) -> Result<()> {
    let client = ctx.client()?;

    let mut validation = client.phone().validate_with_options(&args.number);
    for country in &args.country {
        validation = validation.country(country);
    }
    if let Some(level) = args.strictness {
        validation = validation.strictness(level);
    }
    let signal = validation.send().await?;

    if !emit(ctx.output_format, &signal)? {
        print_signal_pretty(&args.number, &signal);
    }

    Ok(())
}

fn print_signal_pretty(number: &str, signal: &PhoneSignal) {
    println!("{} {}", "Phone:".bold(), number.cyan().bold());
    println!();

    if !signal.success {
        println!(
            "  {} {}",
            "Validation failed:".red().bold(),
            signal.message.as_deref().unwrap_or("no reason given")
        );
        return;
    }

    println!(
        "  {} {}",
        "Valid:".bold(),
        if signal.valid { "yes".green() } else { "no".red() }
    );
    println!("  {} {}/100", "Fraud score:".bold(), signal.fraud_score);
    if let Some(carrier) = &signal.carrier {
        println!("  {} {}", "Carrier:".bold(), carrier);
    }
    if let Some(line_type) = &signal.line_type {
        println!("  {} {}", "Line type:".bold(), line_type);
    }
    if let Some(country) = &signal.country {
        println!("  {} {}", "Country:".bold(), country);
    }

    println!();
    println!("  {} {}", "VOIP:".bold(), flag(signal.voip));
    println!("  {} {}", "Prepaid:".bold(), flag(signal.prepaid));
    println!("  {} {}", "Risky:".bold(), flag(signal.risky));
    println!("  {} {}", "Recent abuse:".bold(), flag(signal.recent_abuse));
}
