use serde::{Deserialize, Serialize};

use super::assessment::{FraudAssessment, RiskLevel};
use super::common::UNKNOWN;
use super::signal::{IpSignal, PhoneSignal};

/// Factor reported when the check could not be completed at all
pub const SERVICE_UNAVAILABLE: &str = "Service unavailable";

/// JSON response of a transaction check.
///
/// On failure `success` is false, `fraud_score` is 0 and `error` explains why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudCheckResponse {
    pub success: bool,
    pub fraud_score: f64,
    pub risk_level: RiskLevel,
    pub ip_address: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub proxy: bool,
    pub vpn: bool,
    pub tor: bool,
    pub bot_status: bool,
    pub recent_abuse: bool,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    pub connection_type: String,
    pub isp: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_valid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_carrier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_line_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn or_unknown(value: Option<&String>) -> String {
    value.cloned().unwrap_or_else(|| UNKNOWN.to_string())
}

impl FraudCheckResponse {
    /// Successful response built from an assessment and the signals it was computed from
    #[must_use]
    pub fn from_assessment(
        ip_address: impl Into<String>,
        ip: &IpSignal,
        phone: Option<&PhoneSignal>,
        assessment: &FraudAssessment,
    ) -> Self {
        let phone = phone.filter(|p| p.success);

        Self {
            success: true,
            fraud_score: assessment.fraud_score,
            risk_level: assessment.risk_level,
            ip_address: ip_address.into(),
            country: or_unknown(assessment.location.country_code.as_ref()),
            region: or_unknown(assessment.location.region.as_ref()),
            city: or_unknown(assessment.location.city.as_ref()),
            proxy: ip.proxy,
            vpn: ip.vpn,
            tor: ip.tor,
            bot_status: ip.bot_status,
            recent_abuse: ip.recent_abuse,
            risk_factors: assessment.risk_factors.clone(),
            connection_type: or_unknown(assessment.connection_type.as_ref()),
            isp: or_unknown(assessment.isp.as_ref()),
            phone_valid: phone.map(|p| p.valid),
            phone_carrier: assessment.phone_carrier.clone(),
            phone_line_type: assessment.phone_line_type.clone(),
            email: None,
            error: None,
        }
    }

    /// Fail-safe response: zero score, low risk and the error message
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            fraud_score: 0.0,
            risk_level: RiskLevel::Low,
            ip_address: UNKNOWN.to_string(),
            country: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
            proxy: false,
            vpn: false,
            tor: false,
            bot_status: false,
            recent_abuse: false,
            risk_factors: vec![SERVICE_UNAVAILABLE.to_string()],
            connection_type: UNKNOWN.to_string(),
            isp: UNKNOWN.to_string(),
            phone_valid: None,
            phone_carrier: None,
            phone_line_type: None,
            email: None,
            error: Some(error.into()),
        }
    }

    /// Attach the resolved customer email
    #[must_use]
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    /// Fraud score as a whole percentage
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u8 {
        (self.fraud_score.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}
