use serde::{Deserialize, Serialize};

use super::common::{lenient_score, null_as_default, Location};

/// Result of an IP-reputation lookup.
///
/// Field names follow the provider's JSON so a response body deserializes
/// straight into this type. Absent or `null` flags read as `false` and an
/// absent score reads as `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpSignal {
    /// Whether the lookup succeeded
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,

    /// Provider message, usually only set when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Provider fraud score, 0-100
    #[serde(default, deserialize_with = "lenient_score")]
    pub fraud_score: u8,

    /// Connection goes through a proxy
    #[serde(default, deserialize_with = "null_as_default")]
    pub proxy: bool,

    /// Connection goes through a VPN
    #[serde(default, deserialize_with = "null_as_default")]
    pub vpn: bool,

    /// Connection goes through the TOR network
    #[serde(default, deserialize_with = "null_as_default")]
    pub tor: bool,

    /// Automated bot activity seen from this address
    #[serde(default, deserialize_with = "null_as_default")]
    pub bot_status: bool,

    /// Address was recently reported for abuse
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent_abuse: bool,

    /// Two-letter country code
    #[serde(default)]
    pub country_code: Option<String>,

    /// Region/state name
    #[serde(default)]
    pub region: Option<String>,

    /// City name
    #[serde(default)]
    pub city: Option<String>,

    /// Connection type (Residential, Corporate, Mobile, ...)
    #[serde(default)]
    pub connection_type: Option<String>,

    /// Internet service provider
    #[serde(default, rename = "ISP")]
    pub isp: Option<String>,
}

impl IpSignal {
    /// A signal standing in for a lookup that errored or timed out
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Location fields reported with this signal
    #[must_use]
    pub fn location(&self) -> Location {
        Location {
            country_code: self.country_code.clone(),
            region: self.region.clone(),
            city: self.city.clone(),
        }
    }

    /// Returns true if any anonymizing indicator (proxy, VPN, TOR) is set
    #[must_use]
    pub const fn is_anonymized(&self) -> bool {
        self.proxy || self.vpn || self.tor
    }
}

/// Result of a phone-validation lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneSignal {
    /// Whether the lookup succeeded
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,

    /// Provider message, usually only set when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Number is a valid, dialable phone number
    #[serde(default, deserialize_with = "null_as_default")]
    pub valid: bool,

    /// Provider fraud score, 0-100
    #[serde(default, deserialize_with = "lenient_score")]
    pub fraud_score: u8,

    /// Voice-over-IP number
    #[serde(default, rename = "VOIP", deserialize_with = "null_as_default")]
    pub voip: bool,

    /// Prepaid line
    #[serde(default, deserialize_with = "null_as_default")]
    pub prepaid: bool,

    /// Provider flags the number as risky
    #[serde(default, deserialize_with = "null_as_default")]
    pub risky: bool,

    /// Number was recently reported for abuse
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent_abuse: bool,

    /// Carrier name
    #[serde(default)]
    pub carrier: Option<String>,

    /// Line type (Wireless, Landline, VOIP, ...)
    #[serde(default)]
    pub line_type: Option<String>,

    /// Two-letter country code of the number
    #[serde(default)]
    pub country: Option<String>,
}

impl PhoneSignal {
    /// Returns true if the lookup succeeded
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_signal_from_provider_json() {
        let json = r#"{
            "success": true,
            "message": "Success",
            "fraud_score": 88,
            "country_code": "NL",
            "region": "North Holland",
            "city": "Amsterdam",
            "ISP": "Example Hosting",
            "connection_type": "Data Center",
            "proxy": true,
            "vpn": true,
            "tor": false,
            "bot_status": null,
            "recent_abuse": true,
            "request_id": "abc123"
        }"#;

        let ip: IpSignal = serde_json::from_str(json).unwrap();
        assert!(ip.success);
        assert_eq!(ip.fraud_score, 88);
        assert!(ip.proxy && ip.vpn && ip.recent_abuse);
        assert!(!ip.tor);
        assert!(!ip.bot_status);
        assert_eq!(ip.isp.as_deref(), Some("Example Hosting"));
        assert_eq!(ip.location().display(), "Amsterdam, North Holland, NL");
    }

    #[test]
    fn ip_signal_defaults_absent_fields() {
        let ip: IpSignal = serde_json::from_str(r#"{"success": false, "message": "Invalid key"}"#).unwrap();
        assert!(!ip.success);
        assert_eq!(ip.fraud_score, 0);
        assert!(!ip.is_anonymized());
        assert_eq!(ip.message.as_deref(), Some("Invalid key"));
    }

    #[test]
    fn phone_signal_from_provider_json() {
        let json = r#"{
            "success": true,
            "valid": true,
            "fraud_score": 75,
            "VOIP": true,
            "prepaid": null,
            "risky": false,
            "recent_abuse": false,
            "carrier": "Example Voice",
            "line_type": "VOIP",
            "country": "US"
        }"#;

        let phone: PhoneSignal = serde_json::from_str(json).unwrap();
        assert!(phone.is_usable());
        assert!(phone.voip);
        assert!(!phone.prepaid);
        assert_eq!(phone.fraud_score, 75);
        assert_eq!(phone.line_type.as_deref(), Some("VOIP"));
    }

    #[test]
    fn scores_are_rounded_and_clamped() {
        let ip: IpSignal =
            serde_json::from_str(r#"{"success": true, "fraud_score": 85.0, "tor": true}"#).unwrap();
        assert_eq!(ip.fraud_score, 85);
        assert!(ip.tor);

        let ip: IpSignal = serde_json::from_str(r#"{"success": true, "fraud_score": 300}"#).unwrap();
        assert_eq!(ip.fraud_score, 100);

        let ip: IpSignal = serde_json::from_str(r#"{"success": true, "fraud_score": -4}"#).unwrap();
        assert_eq!(ip.fraud_score, 0);

        let phone: PhoneSignal =
            serde_json::from_str(r#"{"success": true, "fraud_score": 62.6, "valid": true}"#).unwrap();
        assert_eq!(phone.fraud_score, 63);
    }

    #[test]
    fn non_numeric_score_reads_as_zero() {
        for raw in [r#""high""#, "null", "true", "[]"] {
            let json = format!(r#"{{"success": true, "proxy": true, "fraud_score": {raw}}}"#);
            let ip: IpSignal = serde_json::from_str(&json).unwrap();
            assert_eq!(ip.fraud_score, 0, "input {raw}");
            assert!(ip.proxy);
        }
    }

    #[test]
    fn failed_ip_signal() {
        let ip = IpSignal::failed("timed out");
        assert!(!ip.success);
        assert_eq!(ip.message.as_deref(), Some("timed out"));
    }
}
