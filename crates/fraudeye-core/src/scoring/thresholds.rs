//! Fixed classification and escalation thresholds.
//!
//! All comparisons against these values are strict `>`: a score sitting
//! exactly on a boundary stays in the lower tier.

/// Scores above this are [`RiskLevel::Medium`](crate::RiskLevel::Medium) or higher.
pub const MEDIUM_RISK_ABOVE: f64 = 0.4;

/// Scores above this are [`RiskLevel::High`](crate::RiskLevel::High).
pub const HIGH_RISK_ABOVE: f64 = 0.7;

/// Stored transactions above this score are flagged for review.
pub const FLAGGED_ABOVE: f64 = 0.5;

/// Stored transactions above this score are blocked.
pub const BLOCKED_ABOVE: f64 = 0.8;

/// Manual checks above this score raise a fraud alert.
pub const ALERT_ABOVE: f64 = 0.7;

/// Amounts above this add the high-value escalation.
pub const HIGH_VALUE_AMOUNT: f64 = 1000.0;

/// Amounts above this add a second, very-high-value escalation.
pub const VERY_HIGH_VALUE_AMOUNT: f64 = 5000.0;

/// Phone provider scores above this (out of 100) are reported as high-risk.
///
/// Only the factor label depends on this; the weighted phone contribution
/// is always added.
pub const HIGH_RISK_PHONE_SCORE: u8 = 50;
