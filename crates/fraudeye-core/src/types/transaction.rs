use serde::{Deserialize, Serialize};

use super::common::non_blank;
use crate::{FraudEyeError, Result};

/// Reject amounts that must never reach the aggregator: negative, NaN or infinite.
pub fn validate_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(FraudEyeError::InvalidAmount(amount))
    }
}

/// The transaction being checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionContext {
    /// Transaction amount, expected to be finite and non-negative
    pub amount: f64,

    /// Client IP address the transaction came from
    pub client_ip: String,

    /// Contact phone number, if the customer supplied one
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl TransactionContext {
    /// Create a context without a phone number
    #[must_use]
    pub fn new(amount: f64, client_ip: impl Into<String>) -> Self {
        Self {
            amount,
            client_ip: client_ip.into(),
            phone_number: None,
        }
    }

    /// Attach a phone number
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    /// The phone number, if one was supplied and is not blank
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        non_blank(self.phone_number.as_deref())
    }

    /// Check the amount before scoring
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)
    }

    /// Returns true if a phone number was supplied
    #[must_use]
    pub fn has_phone(&self) -> bool {
        self.phone().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_validation() {
        assert!(validate_amount(0.0).is_ok());
        assert!(validate_amount(1500.25).is_ok());
        assert!(validate_amount(-0.01).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
        assert!(TransactionContext::new(-6000.0, "10.0.0.1").validate().is_err());
    }

    #[test]
    fn blank_phone_counts_as_absent() {
        let ctx = TransactionContext::new(10.0, "10.0.0.1").with_phone("   ");
        assert!(!ctx.has_phone());

        let ctx = TransactionContext::new(10.0, "10.0.0.1").with_phone("+15551234567");
        assert_eq!(ctx.phone(), Some("+15551234567"));
    }
}
