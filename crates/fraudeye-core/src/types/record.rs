use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::thresholds::{BLOCKED_ABOVE, FLAGGED_ABOVE};

/// Storage status of a checked transaction.
///
/// Uses its own, coarser thresholds than [`RiskLevel`](super::RiskLevel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Score at or below 0.5
    Approved,
    /// Score above 0.5, at or below 0.8
    Flagged,
    /// Score above 0.8
    Blocked,
}

impl TransactionStatus {
    /// Derive the storage status from a fraud score
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > BLOCKED_ABOVE {
            Self::Blocked
        } else if score > FLAGGED_ABOVE {
            Self::Flagged
        } else {
            Self::Approved
        }
    }

    /// Lowercase name as stored
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Flagged => "flagged",
            Self::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing address captured by the manual check form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
}

/// Incoming transaction-check request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FraudCheckRequest {
    /// Transaction amount
    pub amount: f64,

    /// Customer email
    #[serde(default, rename = "userEmail", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,

    /// Billing address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<BillingAddress>,

    /// Contact phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Payment method label (card, bank transfer, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    /// Merchant-side user identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl FraudCheckRequest {
    /// Create a request for the given amount
    #[must_use]
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    /// Set the phone number
    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the customer email
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    /// Set the user id
    #[must_use]
    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }
}

/// Transaction row to insert into the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub user_id: String,
    pub amount: f64,
    pub fraud_score: f64,
    pub status: TransactionStatus,
}

impl NewTransaction {
    /// Build a row, deriving the status from the score
    #[must_use]
    pub fn scored(user_id: impl Into<String>, amount: f64, fraud_score: f64) -> Self {
        Self {
            user_id: user_id.into(),
            amount,
            fraud_score,
            status: TransactionStatus::from_score(fraud_score),
        }
    }
}

/// Stored transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub fraud_score: Option<f64>,
    pub status: TransactionStatus,
}

/// Alert row to insert into the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFraudAlert {
    pub transaction_id: String,
    pub alert_type: String,
}

impl NewFraudAlert {
    /// Alert raised by a manual check, e.g. `High Fraud Risk (Manual Check: 85%)`
    #[must_use]
    pub fn manual_check(transaction_id: impl Into<String>, percent: u8) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            alert_type: format!("High Fraud Risk (Manual Check: {percent}%)"),
        }
    }
}

/// Stored alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudAlert {
    pub id: String,
    pub transaction_id: String,
    pub alert_type: String,
    pub timestamp: DateTime<Utc>,
}

impl FraudAlert {
    /// Severity derived from the alert text
    #[must_use]
    pub fn severity(&self) -> AlertSeverity {
        AlertSeverity::from_alert_type(&self.alert_type)
    }
}

/// Display severity of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
    Low,
}

impl AlertSeverity {
    /// `High` anywhere in the text wins over `Medium`; anything else is low
    #[must_use]
    pub fn from_alert_type(alert_type: &str) -> Self {
        if alert_type.contains("High") {
            Self::High
        } else if alert_type.contains("Medium") {
            Self::Medium
        } else {
            Self::Low
        }
    }
}
