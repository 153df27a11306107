//! Shared stub provider for integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use fraudeye::{FraudEyeError, IpSignal, PhoneSignal, Result, SignalProvider};

/// Provider answering from canned signals. `None` makes the lookup fail.
#[derive(Debug, Default)]
pub struct StubProvider {
    pub configured: bool,
    pub ip: Option<IpSignal>,
    pub phone: Option<PhoneSignal>,
    pub ip_queries: Mutex<Vec<String>>,
    pub phone_queries: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn new(ip: Option<IpSignal>, phone: Option<PhoneSignal>) -> Self {
        Self {
            configured: true,
            ip,
            phone,
            ..Self::default()
        }
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn ip_queries(&self) -> Vec<String> {
        self.ip_queries.lock().unwrap().clone()
    }

    pub fn phone_queries(&self) -> Vec<String> {
        self.phone_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SignalProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn ip_signal(&self, ip: &str) -> Result<IpSignal> {
        self.ip_queries.lock().unwrap().push(ip.to_string());
        self.ip
            .clone()
            .ok_or_else(|| FraudEyeError::Connection("stub unreachable".into()))
    }

    async fn phone_signal(&self, number: &str) -> Result<PhoneSignal> {
        self.phone_queries.lock().unwrap().push(number.to_string());
        self.phone.clone().ok_or(FraudEyeError::Timeout(10))
    }
}

pub fn ip(score: u8) -> IpSignal {
    IpSignal {
        success: true,
        fraud_score: score,
        country_code: Some("US".into()),
        region: Some("Texas".into()),
        city: Some("Austin".into()),
        isp: Some("Example Broadband".into()),
        connection_type: Some("Residential".into()),
        ..IpSignal::default()
    }
}

pub fn phone(score: u8) -> PhoneSignal {
    PhoneSignal {
        success: true,
        valid: true,
        fraud_score: score,
        carrier: Some("Example Mobile".into()),
        line_type: Some("Wireless".into()),
        ..PhoneSignal::default()
    }
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
