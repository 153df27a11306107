//! `fraudeye rules` - Show the scoring rules and thresholds.

use anyhow::Result;
use colored::Colorize;
use fraudeye::scoring::rules::{
    points_to_score, Rule, AMOUNT_RULES, IP_FAILED_POINTS, IP_RULES, IP_VERIFICATION_FAILED,
    PHONE_FAILED_POINTS, PHONE_POINTS_PER_SCORE, PHONE_RULES, PHONE_VALIDATION_FAILED,
};
use fraudeye::scoring::thresholds::{
    ALERT_ABOVE, BLOCKED_ABOVE, FLAGGED_ABOVE, HIGH_RISK_ABOVE, HIGH_RISK_PHONE_SCORE,
    MEDIUM_RISK_ABOVE,
};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use super::Context;
use crate::output::OutputFormat;

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct RuleRow {
    #[tabled(rename = "Signal")]
    pub signal: &'static str,
    #[tabled(rename = "Factor")]
    pub factor: String,
    #[tabled(rename = "Weight")]
    pub weight: String,
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ThresholdRow {
    #[tabled(rename = "Threshold")]
    pub name: &'static str,
    #[tabled(rename = "Above")]
    pub above: f64,
}

#[derive(Serialize)]
struct RuleSheet {
    rules: Vec<RuleRow>,
    thresholds: Vec<ThresholdRow>,
}

pub fn execute(ctx: &Context) -> Result<()> {
    let rules = rule_rows();
    let thresholds = threshold_rows();

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&RuleSheet { rules, thresholds })?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&RuleSheet { rules, thresholds })?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for row in &rules {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Pretty => {
            println!("{}", "Scoring rules:".bold().underline());
            println!("{}", Table::new(&rules).with(Style::rounded()));
            println!();
            println!("{}", "Thresholds:".bold().underline());
            println!("{}", Table::new(&thresholds).with(Style::rounded()));
            println!();
            println!("{}", "Scores are summed, then capped at 1.0.".dimmed());
        }
    }

    Ok(())
}

fn table_rows<'a, T: ?Sized>(
    signal: &'static str,
    rules: &'a [Rule<T>],
) -> impl Iterator<Item = RuleRow> + 'a {
    rules.iter().map(move |r| RuleRow {
        signal,
        factor: r.label.to_string(),
        weight: format!("+{:.2}", r.weight()),
    })
}

/// Every rule in evaluation order
#[must_use]
pub fn rule_rows() -> Vec<RuleRow> {
    let mut rows = vec![RuleRow {
        signal: "ip",
        factor: "Provider fraud score".to_string(),
        weight: "score / 100".to_string(),
    }];
    rows.extend(table_rows("ip", IP_RULES));
    rows.push(RuleRow {
        signal: "ip",
        factor: IP_VERIFICATION_FAILED.to_string(),
        weight: format!("+{:.2}", points_to_score(IP_FAILED_POINTS)),
    });

    rows.push(RuleRow {
        signal: "phone",
        factor: format!("Phone fraud score (factor above {HIGH_RISK_PHONE_SCORE})"),
        weight: format!("score x {:.4}", points_to_score(PHONE_POINTS_PER_SCORE)),
    });
    rows.extend(table_rows("phone", PHONE_RULES));
    rows.push(RuleRow {
        signal: "phone",
        factor: PHONE_VALIDATION_FAILED.to_string(),
        weight: format!("+{:.2}", points_to_score(PHONE_FAILED_POINTS)),
    });

    rows.extend(table_rows("amount", AMOUNT_RULES));
    rows
}

/// Classification, status and alert thresholds
#[must_use]
pub fn threshold_rows() -> Vec<ThresholdRow> {
    vec![
        ThresholdRow { name: "risk: medium", above: MEDIUM_RISK_ABOVE },
        ThresholdRow { name: "risk: high", above: HIGH_RISK_ABOVE },
        ThresholdRow { name: "status: flagged", above: FLAGGED_ABOVE },
        ThresholdRow { name: "status: blocked", above: BLOCKED_ABOVE },
        ThresholdRow { name: "alert", above: ALERT_ABOVE },
    ]
}
