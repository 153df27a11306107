//! `fraudeye score` - Run the aggregator on saved signals.

use std::io::Read;
use std::path::Path;

use anyhow::{Context as _, Result};
use colored::Colorize;
use fraudeye::scoring;
use tracing::debug;
use fraudeye::{FraudAssessment, IpSignal, PhoneSignal, TransactionContext};
use serde::{Deserialize, Serialize};

use super::Context;
use crate::cli::args::ScoreArgs;
use crate::output::{emit, risk_label, OutputFormat};

/// Input document. A missing `ip` counts as a failed lookup.
#[derive(Debug, Deserialize)]
pub struct ScoreInput {
    pub context: TransactionContext,
    #[serde(default)]
    pub ip: IpSignal,
    #[serde(default)]
    pub phone: Option<PhoneSignal>,
}

/// Flat CSV row
#[derive(Serialize)]
struct ScoreRow<'a> {
    fraud_score: f64,
    raw_score: f64,
    risk_level: &'static str,
    risk_factors: String,
    location: String,
    isp: &'a str,
}

pub fn execute(ctx: &Context, args: &ScoreArgs) -> Result<()> {
    let input = read_input(&args.input)?;
    input.context.validate()?;

    debug!(
        amount = input.context.amount,
        has_phone = input.phone.is_some(),
        "scoring saved signals"
    );
    let assessment = score(&input);

    if ctx.output_format == OutputFormat::Csv {
        emit(
            ctx.output_format,
            &ScoreRow {
                fraud_score: assessment.fraud_score,
                raw_score: assessment.raw_score,
                risk_level: assessment.risk_level.as_str(),
                risk_factors: assessment.risk_factors.join(";"),
                location: assessment.location.display(),
                isp: assessment.isp.as_deref().unwrap_or(""),
            },
        )?;
    } else if !emit(ctx.output_format, &assessment)? {
        print_assessment_pretty(&assessment);
    }

    Ok(())
}

/// Score a parsed input document
#[must_use]
pub fn score(input: &ScoreInput) -> FraudAssessment {
    scoring::assess(&input.context, &input.ip, input.phone.as_ref())
}

fn read_input(path: &Path) -> Result<ScoreInput> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };

    serde_json::from_str(&content).context("input must be {\"context\": ..., \"ip\": ..., \"phone\": ...}")
}

fn print_assessment_pretty(a: &FraudAssessment) {
    println!(
        "{} {:.2} {}",
        "Fraud score:".bold(),
        a.fraud_score,
        risk_label(a.risk_level)
    );
    if a.raw_score > a.fraud_score {
        println!("{}", format!("  (raw total {:.2}, capped at 1.0)", a.raw_score).dimmed());
    }
    println!("  {} {}", "Location:".bold(), a.location.display());

    println!();
    if a.risk_factors.is_empty() {
        println!("{} {}", "Risk factors:".bold(), "none".green());
    } else {
        println!("{}", "Risk factors:".bold().underline());
        for factor in &a.risk_factors {
            println!("  {} {}", "-".red(), factor);
        }
    }
}
