//! Phone-validation endpoint.

use crate::IpqsClient;
use fraudeye_core::{FraudEyeError, PhoneSignal, Result};
use tracing::debug;

/// Phone-validation API endpoints
pub struct PhoneApi<'a> {
    client: &'a IpqsClient,
}

impl<'a> PhoneApi<'a> {
    pub(crate) fn new(client: &'a IpqsClient) -> Self {
        Self { client }
    }

    /// Validate a phone number
    pub async fn validate(&self, number: &str) -> Result<PhoneSignal> {
        self.validate_with_options(number).send().await
    }

    /// Validate a phone number with country hints or a strictness level
    #[must_use]
    pub fn validate_with_options(&self, number: impl Into<String>) -> PhoneValidationBuilder<'a> {
        PhoneValidationBuilder::new(self.client, number.into())
    }
}

/// Builder for phone validation requests
pub struct PhoneValidationBuilder<'a> {
    client: &'a IpqsClient,
    number: String,
    countries: Vec<String>,
    strictness: Option<u8>,
}

impl<'a> PhoneValidationBuilder<'a> {
    fn new(client: &'a IpqsClient, number: String) -> Self {
        Self {
            client,
            number,
            countries: Vec::new(),
            strictness: None,
        }
    }

    /// Expected country of the number (two-letter code); may be repeated
    #[must_use]
    pub fn country(mut self, code: impl Into<String>) -> Self {
        self.countries.push(code.into());
        self
    }

    /// Provider strictness level (0-2)
    #[must_use]
    pub fn strictness(mut self, level: u8) -> Self {
        self.strictness = Some(level.min(2));
        self
    }

    /// Execute the request
    pub async fn send(self) -> Result<PhoneSignal> {
        let number = normalize_number(&self.number)?;

        let mut params: Vec<(&str, String)> = self
            .countries
            .into_iter()
            .map(|c| ("country[]", c))
            .collect();
        if let Some(level) = self.strictness {
            params.push(("strictness", level.to_string()));
        }

        let params_ref: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();

        let signal: PhoneSignal = self.client.get_keyed("phone", &number, &params_ref).await?;
        debug!(
            success = signal.success,
            valid = signal.valid,
            fraud_score = signal.fraud_score,
            "phone validation complete"
        );

        Ok(signal)
    }
}

/// Strip formatting characters, keeping a leading `+` and digits.
///
/// Anything other than digits, spaces, dashes, dots and parentheses is rejected.
fn normalize_number(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let (plus, rest) = trimmed
        .strip_prefix('+')
        .map_or(("", trimmed), |rest| ("+", rest));

    let mut digits = String::with_capacity(rest.len());
    for c in rest.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return Err(FraudEyeError::InvalidPhone(raw.to_string())),
        }
    }

    if digits.is_empty() {
        return Err(FraudEyeError::InvalidPhone(raw.to_string()));
    }

    Ok(format!("{plus}{digits}"))
}
