//! Fraud-check orchestration.
//!
//! [`FraudCheckService::check`] is the request-level entry point. It never
//! returns an error: provider failures are folded into the score by the
//! aggregator, and anything else becomes a fail-safe response.

use std::sync::Arc;

use axum::http::HeaderMap;
use fraudeye_core::scoring::{self, thresholds::ALERT_ABOVE};
use fraudeye_core::{
    validate_amount, FraudCheckRequest, FraudCheckResponse, FraudEyeError, IpSignal,
    NewFraudAlert, NewTransaction, PhoneSignal, Result, TransactionContext, TransactionRecord,
};
use futures_util::future::join_all;
use tracing::{debug, error, info, instrument, warn};

use crate::headers::{resolve_client_ip, DEFAULT_FALLBACK_IP};
use crate::provider::SignalProvider;
use crate::store::TransactionStore;

/// Domain used for placeholder customer emails
const PLACEHOLDER_EMAIL_DOMAIN: &str = "fraudeye.com";

/// Behavior knobs for the check service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// IP used when no proxy header names the client
    pub fallback_ip: String,

    /// Persist checked transactions (and alerts) to the store
    pub record_transactions: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            fallback_ip: DEFAULT_FALLBACK_IP.to_string(),
            record_transactions: true,
        }
    }
}

/// Runs transaction checks against a signal provider and a transaction store.
#[derive(Clone)]
pub struct FraudCheckService {
    provider: Arc<dyn SignalProvider>,
    store: Arc<dyn TransactionStore>,
    settings: ServiceSettings,
}

impl std::fmt::Debug for FraudCheckService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FraudCheckService")
            .field("provider", &self.provider.name())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl FraudCheckService {
    /// Create a service with default settings
    #[must_use]
    pub fn new(provider: Arc<dyn SignalProvider>, store: Arc<dyn TransactionStore>) -> Self {
        Self {
            provider,
            store,
            settings: ServiceSettings::default(),
        }
    }

    /// Replace the settings
    #[must_use]
    pub fn with_settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Current settings
    #[must_use]
    pub const fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Whether the signal provider has credentials
    #[must_use]
    pub fn provider_configured(&self) -> bool {
        self.provider.is_configured()
    }

    /// The backing transaction store
    #[must_use]
    pub fn store(&self) -> &dyn TransactionStore {
        self.store.as_ref()
    }

    /// Check one transaction.
    ///
    /// Always returns a response; on failure it has `success: false`, a zero
    /// score and the error message.
    #[instrument(skip_all, fields(amount = request.amount))]
    pub async fn check(&self, request: &FraudCheckRequest, headers: &HeaderMap) -> FraudCheckResponse {
        match self.try_check(request, headers).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "fraud check failed");
                FraudCheckResponse::failure(e.to_string())
            }
        }
    }

    /// Check one transaction and, when enabled and a user id is present,
    /// persist the result. Storage errors are logged and do not change the
    /// returned response.
    pub async fn check_and_record(
        &self,
        request: &FraudCheckRequest,
        headers: &HeaderMap,
    ) -> FraudCheckResponse {
        let response = self.check(request, headers).await;

        if !self.settings.record_transactions {
            return response;
        }

        match request.user_id.as_deref() {
            Some(user_id) => {
                if let Err(e) = self.record(user_id, request.amount, &response).await {
                    error!(error = %e, user_id, "failed to store transaction result");
                }
            }
            None => debug!("no user id on request, result not stored"),
        }

        response
    }

    /// Check several independent transactions concurrently.
    pub async fn check_many(&self, checks: &[(FraudCheckRequest, HeaderMap)]) -> Vec<FraudCheckResponse> {
        let futures: Vec<_> = checks
            .iter()
            .map(|(request, headers)| self.check(request, headers))
            .collect();
        join_all(futures).await
    }

    /// Persist a successful check: the transaction with its derived status,
    /// plus an alert when the score is above the alert threshold.
    ///
    /// Failed checks are not stored; `Ok(None)` is returned for them.
    pub async fn record(
        &self,
        user_id: &str,
        amount: f64,
        response: &FraudCheckResponse,
    ) -> Result<Option<TransactionRecord>> {
        if !response.success {
            debug!("check failed, nothing to store");
            return Ok(None);
        }

        let record = self
            .store
            .insert_transaction(NewTransaction::scored(user_id, amount, response.fraud_score))
            .await?;

        if response.fraud_score > ALERT_ABOVE {
            let alert = self
                .store
                .insert_alert(NewFraudAlert::manual_check(&record.id, response.percent()))
                .await?;
            warn!(
                transaction_id = %record.id,
                alert = %alert.alert_type,
                "fraud alert raised"
            );
        }

        Ok(Some(record))
    }

    async fn try_check(&self, request: &FraudCheckRequest, headers: &HeaderMap) -> Result<FraudCheckResponse> {
        validate_amount(request.amount)?;

        if !self.provider.is_configured() {
            return Err(FraudEyeError::Config("IPQS API key not configured".to_string()));
        }

        let client_ip = resolve_client_ip(headers, &self.settings.fallback_ip);
        info!(ip = %client_ip, amount = request.amount, "processing fraud check");

        let ctx = TransactionContext {
            amount: request.amount,
            client_ip,
            phone_number: request.phone.clone(),
        };

        let (email, ip_signal, phone_signal) = tokio::join!(
            self.resolve_email(request),
            self.lookup_ip(&ctx.client_ip),
            self.lookup_phone(ctx.phone()),
        );

        let assessment = scoring::assess(&ctx, &ip_signal, phone_signal.as_ref());

        info!(
            fraud_score = assessment.fraud_score,
            risk_level = %assessment.risk_level,
            risk_factors = ?assessment.risk_factors,
            "final fraud score"
        );

        Ok(FraudCheckResponse::from_assessment(
            ctx.client_ip.clone(),
            &ip_signal,
            phone_signal.as_ref(),
            &assessment,
        )
        .with_email(email))
    }

    /// IP lookup; errors become an unsuccessful signal.
    async fn lookup_ip(&self, ip: &str) -> IpSignal {
        match self.provider.ip_signal(ip).await {
            Ok(signal) => {
                if !signal.success {
                    warn!(
                        provider = self.provider.name(),
                        message = signal.message.as_deref().unwrap_or(""),
                        "IP lookup unsuccessful"
                    );
                }
                signal
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "IP lookup failed");
                IpSignal::failed(e.to_string())
            }
        }
    }

    /// Phone lookup; any failure is swallowed and the signal treated as absent.
    async fn lookup_phone(&self, phone: Option<&str>) -> Option<PhoneSignal> {
        let number = phone?;

        match self.provider.phone_signal(number).await {
            Ok(signal) if signal.success => Some(signal),
            Ok(signal) => {
                warn!(
                    provider = self.provider.name(),
                    message = signal.message.as_deref().unwrap_or(""),
                    "phone validation unsuccessful"
                );
                None
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "phone validation failed");
                None
            }
        }
    }

    /// Customer email: the request's, else the profile on file, else a
    /// placeholder derived from the user id.
    async fn resolve_email(&self, request: &FraudCheckRequest) -> Option<String> {
        if let Some(email) = request
            .user_email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
        {
            return Some(email.to_string());
        }

        let user_id = request.user_id.as_deref()?;

        let on_file = match self.store.profile_email(user_id).await {
            Ok(email) => email,
            Err(e) => {
                error!(error = %e, user_id, "failed to fetch user email");
                None
            }
        };

        Some(on_file.unwrap_or_else(|| format!("user-{user_id}@{PLACEHOLDER_EMAIL_DOMAIN}")))
    }
}
