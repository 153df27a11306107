//! `fraudeye check` - Manual transaction check against the live provider.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use fraudeye::{BillingAddress, FraudCheckRequest, FraudCheckResponse, FraudCheckService, MemoryStore};
use serde::Serialize;
use tracing::debug;

use super::Context;
use crate::cli::args::CheckArgs;
use crate::output::{emit, flag, risk_label, OutputFormat};

/// Flat CSV row
#[derive(Serialize)]
struct CheckRow<'a> {
    ip_address: &'a str,
    fraud_score: f64,
    risk_level: &'static str,
    country: &'a str,
    city: &'a str,
    isp: &'a str,
    risk_factors: String,
}

pub async fn execute(ctx: Context, args: CheckArgs) -> Result<()> {
    let client = ctx.client()?;

    let mut settings = ctx.service.settings();
    settings.record_transactions = false;
    if let Some(ip) = &args.ip {
        settings.fallback_ip.clone_from(ip);
    }

    debug!(
        amount = args.amount,
        ip = %settings.fallback_ip,
        has_phone = args.phone.is_some(),
        "running manual check"
    );
    let service = FraudCheckService::new(Arc::new(client), Arc::new(MemoryStore::new()))
        .with_settings(settings);

    let request = build_request(args);
    let response = service.check(&request, &Default::default()).await;

    if ctx.output_format == OutputFormat::Csv {
        emit(
            ctx.output_format,
            &CheckRow {
                ip_address: &response.ip_address,
                fraud_score: response.fraud_score,
                risk_level: response.risk_level.as_str(),
                country: &response.country,
                city: &response.city,
                isp: &response.isp,
                risk_factors: response.risk_factors.join(";"),
            },
        )?;
    } else if !emit(ctx.output_format, &response)? {
        print_response_pretty(&response);
    }

    if let Some(error) = response.error.as_deref().filter(|_| !response.success) {
        anyhow::bail!("fraud check failed: {error}");
    }

    Ok(())
}

fn build_request(args: CheckArgs) -> FraudCheckRequest {
    let has_billing = [&args.street, &args.city, &args.state, &args.zip, &args.country]
        .iter()
        .any(|f| f.is_some());

    let billing_address = has_billing.then(|| BillingAddress {
        street: args.street.unwrap_or_default(),
        city: args.city.unwrap_or_default(),
        state: args.state.unwrap_or_default(),
        zip: args.zip.unwrap_or_default(),
        country: args.country.unwrap_or_default(),
    });

    FraudCheckRequest {
        amount: args.amount,
        user_email: args.email,
        billing_address,
        phone: args.phone,
        payment_method: args.payment_method,
        user_id: args.user_id,
    }
}

fn print_response_pretty(resp: &FraudCheckResponse) {
    println!(
        "{} {:.1}% {}",
        "Fraud score:".bold(),
        resp.fraud_score * 100.0,
        risk_label(resp.risk_level)
    );
    println!();

    println!("  {} {}", "IP:".bold(), resp.ip_address.cyan());
    println!(
        "  {} {}, {}, {}",
        "Location:".bold(),
        resp.city,
        resp.region,
        resp.country
    );
    println!("  {} {} ({})", "ISP:".bold(), resp.isp, resp.connection_type);
    println!(
        "  {} proxy {} | vpn {} | tor {} | bot {} | abuse {}",
        "Flags:".bold(),
        flag(resp.proxy),
        flag(resp.vpn),
        flag(resp.tor),
        flag(resp.bot_status),
        flag(resp.recent_abuse)
    );

    if let Some(valid) = resp.phone_valid {
        println!(
            "  {} {} {} {}",
            "Phone:".bold(),
            if valid { "valid".green() } else { "invalid".red() },
            resp.phone_carrier.as_deref().unwrap_or(""),
            resp.phone_line_type.as_deref().unwrap_or("").dimmed()
        );
    }
    if let Some(email) = &resp.email {
        println!("  {} {}", "Email:".bold(), email);
    }

    println!();
    if resp.risk_factors.is_empty() {
        println!("{} {}", "Risk factors:".bold(), "none".green());
    } else {
        println!("{}", "Risk factors:".bold().underline());
        for factor in &resp.risk_factors {
            println!("  {} {}", "-".red(), factor);
        }
    }

    if let Some(error) = &resp.error {
        println!();
        println!("{} {}", "Error:".red().bold(), error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(amount: f64) -> CheckArgs {
        CheckArgs {
            amount,
            ip: None,
            phone: None,
            email: None,
            user_id: None,
            payment_method: None,
            street: None,
            city: None,
            state: None,
            zip: None,
            country: None,
        }
    }

    #[test]
    fn billing_only_when_given() {
        assert!(build_request(args(10.0)).billing_address.is_none());

        let with_city = CheckArgs {
            city: Some("Austin".into()),
            ..args(10.0)
        };
        let billing = build_request(with_city).billing_address.unwrap();
        assert_eq!(billing.city, "Austin");
        assert!(billing.street.is_empty());
    }
}
