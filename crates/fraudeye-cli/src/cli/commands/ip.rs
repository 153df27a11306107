//! `fraudeye ip` - Look up the reputation of an IP address.

use anyhow::Result;
use colored::Colorize;
use fraudeye::IpSignal;

use super::Context;
use crate::cli::args::IpArgs;
use crate::output::{emit, flag};

pub async fn execute(ctx: Context, args: IpArgs) -> Result<()> {
    let client = ctx.client()?;

    let mut lookup = client.ip().lookup_with_options(&args.ip);
    if let Some(level) = args.strictness {
        lookup = lookup.strictness(level);
    }
    if args.thorough {
        lookup = lookup.fast(false);
    }
    let signal = lookup.send().await?;

    if !emit(ctx.output_format, &signal)? {
        print_signal_pretty(&args.ip, &signal);
    }

    Ok(())
}

fn print_signal_pretty(ip: &str, signal: &IpSignal) {
    println!("{} {}", "IP:".bold(), ip.cyan().bold());
    println!();

    if !signal.success {
        println!(
            "  {} {}",
            "Lookup failed:".red().bold(),
            signal.message.as_deref().unwrap_or("no reason given")
        );
        return;
    }

    let score = format!("{}/100", signal.fraud_score);
    let score = match signal.fraud_score {
        0..=40 => score.green(),
        41..=70 => score.yellow(),
        _ => score.red(),
    };
    println!("  {} {}", "Fraud score:".bold(), score);
    println!("  {} {}", "Location:".bold(), signal.location().display());
    if let Some(isp) = &signal.isp {
        println!("  {} {}", "ISP:".bold(), isp);
    }
    if let Some(kind) = &signal.connection_type {
        println!("  {} {}", "Connection:".bold(), kind);
    }

    println!();
    println!("  {} {}", "Proxy:".bold(), flag(signal.proxy));
    println!("  {} {}", "VPN:".bold(), flag(signal.vpn));
    println!("  {} {}", "TOR:".bold(), flag(signal.tor));
    println!("  {} {}", "Bot:".bold(), flag(signal.bot_status));
    println!("  {} {}", "Recent abuse:".bold(), flag(signal.recent_abuse));
}
