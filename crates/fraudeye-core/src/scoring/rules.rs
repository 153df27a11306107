//! Rule tables for the score aggregator.
//!
//! Weights are kept in basis points (1/10000 of a score unit) so that sums are
//! exact and boundary scores such as 0.7 classify the same way no matter in
//! which order contributions were added.

use crate::types::{IpSignal, PhoneSignal};

use super::thresholds::{HIGH_VALUE_AMOUNT, VERY_HIGH_VALUE_AMOUNT};

/// Basis points in one full score unit.
pub const SCALE: u32 = 10_000;

/// Contribution when the IP lookup failed.
pub const IP_FAILED_POINTS: u32 = 3_000;

/// Contribution when a phone was supplied but could not be validated.
pub const PHONE_FAILED_POINTS: u32 = 1_000;

/// Contribution per phone provider score point (0.3 weight on a 0-100 score).
pub const PHONE_POINTS_PER_SCORE: u32 = 30;

/// Factor recorded when the IP lookup failed.
pub const IP_VERIFICATION_FAILED: &str = "IP verification failed";

/// Factor recorded when the phone lookup failed or was missing.
pub const PHONE_VALIDATION_FAILED: &str = "Phone validation failed";

/// One independent scoring rule: when `applies` holds, `points` are added and
/// `label` is recorded as a risk factor.
pub struct Rule<T: ?Sized> {
    /// Risk factor text
    pub label: &'static str,
    /// Contribution in basis points
    pub points: u32,
    /// Trigger condition
    pub applies: fn(&T) -> bool,
}

impl<T: ?Sized> Rule<T> {
    /// Contribution as a fraction of the full score
    #[must_use]
    pub fn weight(&self) -> f64 {
        points_to_score(self.points)
    }
}

impl<T: ?Sized> std::fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("label", &self.label)
            .field("points", &self.points)
            .finish_non_exhaustive()
    }
}

/// IP indicators, evaluated only when the IP lookup succeeded.
pub const IP_RULES: &[Rule<IpSignal>] = &[
    Rule { label: "Proxy detected", points: 2_000, applies: |ip| ip.proxy },
    Rule { label: "VPN detected", points: 1_500, applies: |ip| ip.vpn },
    Rule { label: "TOR network detected", points: 3_000, applies: |ip| ip.tor },
    Rule { label: "Bot activity detected", points: 2_500, applies: |ip| ip.bot_status },
    Rule { label: "Recent abuse detected", points: 2_000, applies: |ip| ip.recent_abuse },
];

/// Phone indicators, evaluated only for a supplied phone with a successful lookup.
pub const PHONE_RULES: &[Rule<PhoneSignal>] = &[
    Rule { label: "VOIP phone number", points: 1_000, applies: |p| p.voip },
    Rule { label: "Phone number recent abuse", points: 1_500, applies: |p| p.recent_abuse },
    Rule { label: "Invalid phone number", points: 2_000, applies: |p| !p.valid },
    Rule { label: "Risky phone number", points: 1_500, applies: |p| p.risky },
    Rule { label: "Prepaid phone number", points: 500, applies: |p| p.prepaid },
];

/// Amount escalations, always evaluated. Both fire above the higher threshold.
pub const AMOUNT_RULES: &[Rule<f64>] = &[
    Rule {
        label: "High value transaction",
        points: 1_000,
        applies: |amount| *amount > HIGH_VALUE_AMOUNT,
    },
    Rule {
        label: "Very high value transaction",
        points: 1_000,
        applies: |amount| *amount > VERY_HIGH_VALUE_AMOUNT,
    },
];

/// Base contribution of a provider score (0-100): `score / 100`.
#[must_use]
pub fn provider_score_points(score: u8) -> u32 {
    u32::from(score) * (SCALE / 100)
}

/// Weighted phone contribution: `(score / 100) * 0.3`.
#[must_use]
pub fn phone_score_points(score: u8) -> u32 {
    u32::from(score) * PHONE_POINTS_PER_SCORE
}

/// Convert basis points to a score fraction.
#[must_use]
pub fn points_to_score(points: u32) -> f64 {
    f64::from(points) / f64::from(SCALE)
}
