use serde::{Deserialize, Serialize};

use super::common::Location;
use crate::scoring::thresholds::{HIGH_RISK_ABOVE, MEDIUM_RISK_ABOVE};

/// Coarse three-tier risk classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Score at or below 0.4
    #[default]
    Low,
    /// Score above 0.4, at or below 0.7
    Medium,
    /// Score above 0.7
    High,
}

impl RiskLevel {
    /// Classify a fraud score. Boundaries fall into the lower tier.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > HIGH_RISK_ABOVE {
            Self::High
        } else if score > MEDIUM_RISK_ABOVE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Lowercase name as used on the wire
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = crate::FraudEyeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(crate::FraudEyeError::Internal(format!(
                "unknown risk level: {other}"
            ))),
        }
    }
}

/// Result of one aggregation call.
///
/// Built once per transaction check and never mutated afterwards. The
/// descriptive fields are copied from the signals for display and play no
/// part in the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudAssessment {
    /// Normalized fraud score in `[0, 1]`
    pub fraud_score: f64,

    /// Sum of all contributions before clamping (never negative)
    pub raw_score: f64,

    /// Classification of `fraud_score`
    pub risk_level: RiskLevel,

    /// Triggered rules, in evaluation order
    #[serde(default)]
    pub risk_factors: Vec<String>,

    /// Location reported by the IP lookup
    #[serde(default)]
    pub location: Location,

    /// Internet service provider
    #[serde(default)]
    pub isp: Option<String>,

    /// Connection type reported by the IP lookup
    #[serde(default)]
    pub connection_type: Option<String>,

    /// Phone carrier, when a phone lookup contributed
    #[serde(default)]
    pub phone_carrier: Option<String>,

    /// Phone line type, when a phone lookup contributed
    #[serde(default)]
    pub phone_line_type: Option<String>,
}

impl FraudAssessment {
    /// Fraud score as a whole percentage
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u8 {
        (self.fraud_score * 100.0).round() as u8
    }

    /// Returns true if the given factor was triggered
    #[must_use]
    pub fn has_factor(&self, factor: &str) -> bool {
        self.risk_factors.iter().any(|f| f == factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_boundaries_fall_to_lower_tier() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.4), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.41), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.7), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.71), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(1.0), RiskLevel::High);
    }

    #[test]
    fn risk_level_wire_names() {
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"medium\"");
        assert_eq!("HIGH".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert!("severe".parse::<RiskLevel>().is_err());
    }
}
