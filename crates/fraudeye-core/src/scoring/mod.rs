//! Fraud-score aggregation.
//!
//! [`assess`] combines an IP-reputation signal, an optional phone-validation
//! signal and the transaction amount into one [`FraudAssessment`]. It is a pure
//! function: no I/O, no shared state, and it never fails. Upstream failures
//! arrive as `success: false` signals and are scored conservatively.

pub mod rules;
pub mod thresholds;

use crate::types::{FraudAssessment, IpSignal, PhoneSignal, RiskLevel, TransactionContext};

use rules::{
    phone_score_points, points_to_score, provider_score_points, Rule, AMOUNT_RULES,
    IP_FAILED_POINTS, IP_RULES, IP_VERIFICATION_FAILED, PHONE_FAILED_POINTS, PHONE_RULES,
    PHONE_VALIDATION_FAILED, SCALE,
};
use thresholds::HIGH_RISK_PHONE_SCORE;

/// Running total and the factors that produced it.
#[derive(Debug, Default)]
struct Accumulator {
    points: u32,
    factors: Vec<String>,
}

impl Accumulator {
    fn add_points(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
    }

    fn note(&mut self, factor: impl Into<String>) {
        self.factors.push(factor.into());
    }

    fn apply<T: ?Sized>(&mut self, rules: &[Rule<T>], subject: &T) {
        for rule in rules.iter().filter(|r| (r.applies)(subject)) {
            self.add_points(rule.points);
            self.note(rule.label);
        }
    }
}

/// Score one transaction.
///
/// `phone` is only looked at when `ctx` carries a phone number. A supplied
/// number with a missing or unsuccessful phone signal adds a fixed penalty.
#[must_use]
pub fn assess(
    ctx: &TransactionContext,
    ip: &IpSignal,
    phone: Option<&PhoneSignal>,
) -> FraudAssessment {
    let mut acc = Accumulator::default();

    if ip.success {
        acc.add_points(provider_score_points(ip.fraud_score));
        acc.apply(IP_RULES, ip);
    } else {
        acc.add_points(IP_FAILED_POINTS);
        acc.note(IP_VERIFICATION_FAILED);
    }

    let phone_used = if ctx.has_phone() {
        score_phone(&mut acc, phone)
    } else {
        None
    };

    acc.apply(AMOUNT_RULES, &ctx.amount);

    let raw_score = points_to_score(acc.points);
    let fraud_score = points_to_score(acc.points.min(SCALE));

    FraudAssessment {
        fraud_score,
        raw_score,
        risk_level: RiskLevel::from_score(fraud_score),
        risk_factors: acc.factors,
        location: ip.location(),
        isp: ip.isp.clone(),
        connection_type: ip.connection_type.clone(),
        phone_carrier: phone_used.and_then(|p| p.carrier.clone()),
        phone_line_type: phone_used.and_then(|p| p.line_type.clone()),
    }
}

/// Phone step. Returns the signal when it was usable.
fn score_phone<'a>(acc: &mut Accumulator, phone: Option<&'a PhoneSignal>) -> Option<&'a PhoneSignal> {
    match phone.filter(|p| p.success) {
        Some(p) => {
            acc.add_points(phone_score_points(p.fraud_score));
            if p.fraud_score > HIGH_RISK_PHONE_SCORE {
                acc.note(format!("High-risk phone number ({}%)", p.fraud_score));
            }
            acc.apply(PHONE_RULES, p);
            Some(p)
        }
        None => {
            acc.add_points(PHONE_FAILED_POINTS);
            acc.note(PHONE_VALIDATION_FAILED);
            None
        }
    }
}
