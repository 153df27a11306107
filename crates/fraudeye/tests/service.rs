//! Fraud-check orchestration against a stub provider.

mod common;

use std::sync::Arc;

use axum::http::{HeaderMap, HeaderValue};
use fraudeye::{
    FraudCheckRequest, FraudCheckService, MemoryStore, PhoneSignal, RiskLevel, ServiceSettings,
    TransactionStatus, TransactionStore,
};

use common::{close, ip, phone, StubProvider};

fn forwarded(addr: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-forwarded-for", HeaderValue::from_static(addr));
    headers
}

fn service(provider: StubProvider) -> (FraudCheckService, Arc<StubProvider>, Arc<MemoryStore>) {
    let provider = Arc::new(provider);
    let store = Arc::new(MemoryStore::new());
    let service = FraudCheckService::new(provider.clone(), store.clone());
    (service, provider, store)
}

#[tokio::test]
async fn ip_and_phone_signals_are_combined() {
    let voip = PhoneSignal {
        voip: true,
        ..phone(80)
    };
    let (service, provider, _) = service(StubProvider::new(Some(ip(20)), Some(voip)));

    let request = FraudCheckRequest::new(100.0).phone("+15555550100");
    let resp = service.check(&request, &forwarded("203.0.113.5, 10.0.0.1")).await;

    assert!(resp.success);
    assert!(close(resp.fraud_score, 0.54));
    assert_eq!(resp.risk_level, RiskLevel::Medium);
    assert!(resp.risk_factors.contains(&"High-risk phone number (80%)".to_string()));
    assert!(resp.risk_factors.contains(&"VOIP phone number".to_string()));
    assert_eq!(resp.ip_address, "203.0.113.5");
    assert_eq!(resp.city, "Austin");
    assert_eq!(resp.phone_valid, Some(true));
    assert_eq!(resp.phone_carrier.as_deref(), Some("Example Mobile"));

    assert_eq!(provider.ip_queries(), vec!["203.0.113.5"]);
    assert_eq!(provider.phone_queries(), vec!["+15555550100"]);
}

#[tokio::test]
async fn ip_lookup_error_is_scored_not_raised() {
    let (service, _, _) = service(StubProvider::new(None, None));

    let resp = service.check(&FraudCheckRequest::new(100.0), &HeaderMap::new()).await;

    assert!(resp.success);
    assert!(close(resp.fraud_score, 0.3));
    assert_eq!(resp.risk_level, RiskLevel::Low);
    assert_eq!(resp.risk_factors, vec!["IP verification failed"]);
    assert_eq!(resp.ip_address, "192.168.1.1");
    assert_eq!(resp.country, "Unknown");
}

#[tokio::test]
async fn phone_lookup_error_adds_penalty() {
    let (service, _, _) = service(StubProvider::new(Some(ip(10)), None));

    let request = FraudCheckRequest::new(50.0).phone("+15555550100");
    let resp = service.check(&request, &HeaderMap::new()).await;

    assert!(resp.success);
    assert!(close(resp.fraud_score, 0.2));
    assert_eq!(resp.risk_factors, vec!["Phone validation failed"]);
    assert!(resp.phone_valid.is_none());
}

#[tokio::test]
async fn unsuccessful_phone_answer_counts_as_absent() {
    let failed = PhoneSignal {
        success: false,
        message: Some("Invalid number".into()),
        ..PhoneSignal::default()
    };
    let (service, _, _) = service(StubProvider::new(Some(ip(10)), Some(failed)));

    let request = FraudCheckRequest::new(50.0).phone("+15555550100");
    let resp = service.check(&request, &HeaderMap::new()).await;

    assert_eq!(resp.risk_factors, vec!["Phone validation failed"]);
}

#[tokio::test]
async fn blank_phone_is_not_looked_up() {
    let (service, provider, _) = service(StubProvider::new(Some(ip(10)), Some(phone(90))));

    let request = FraudCheckRequest::new(50.0).phone("   ");
    let resp = service.check(&request, &HeaderMap::new()).await;

    assert!(close(resp.fraud_score, 0.1));
    assert!(resp.risk_factors.is_empty());
    assert!(provider.phone_queries().is_empty());
}

#[tokio::test]
async fn missing_key_fails_safe_without_lookups() {
    let (service, provider, _) = service(StubProvider::unconfigured());

    let resp = service.check(&FraudCheckRequest::new(100.0), &HeaderMap::new()).await;

    assert!(!resp.success);
    assert!(close(resp.fraud_score, 0.0));
    assert_eq!(resp.risk_level, RiskLevel::Low);
    assert_eq!(resp.risk_factors, vec!["Service unavailable"]);
    assert!(resp.error.unwrap().contains("not configured"));
    assert!(provider.ip_queries().is_empty());
}

#[tokio::test]
async fn invalid_amounts_fail_safe() {
    let (service, provider, _) = service(StubProvider::new(Some(ip(10)), None));

    for amount in [-1.0, f64::NAN, f64::INFINITY] {
        let resp = service.check(&FraudCheckRequest::new(amount), &HeaderMap::new()).await;
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("invalid transaction amount"));
    }
    assert!(provider.ip_queries().is_empty());
}

#[tokio::test]
async fn email_resolution_order() {
    let (service, _, store) = service(StubProvider::new(Some(ip(10)), None));
    store.add_profile("u1", "owner@shop.test").await;
    let headers = HeaderMap::new();

    let explicit = FraudCheckRequest::new(10.0).email("buyer@shop.test").user_id("u1");
    let resp = service.check(&explicit, &headers).await;
    assert_eq!(resp.email.as_deref(), Some("buyer@shop.test"));

    let on_file = FraudCheckRequest::new(10.0).user_id("u1");
    let resp = service.check(&on_file, &headers).await;
    assert_eq!(resp.email.as_deref(), Some("owner@shop.test"));

    let unknown = FraudCheckRequest::new(10.0).user_id("u9");
    let resp = service.check(&unknown, &headers).await;
    assert_eq!(resp.email.as_deref(), Some("user-u9@fraudeye.com"));

    let anonymous = FraudCheckRequest::new(10.0);
    let resp = service.check(&anonymous, &headers).await;
    assert!(resp.email.is_none());
}

#[tokio::test]
async fn high_score_is_blocked_and_alerted() {
    let (service, _, store) = service(StubProvider::new(Some(ip(85)), None));

    let request = FraudCheckRequest::new(200.0).user_id("u1");
    let resp = service.check_and_record(&request, &HeaderMap::new()).await;
    assert!(resp.success);

    let txs = store.transactions().await.unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].user_id, "u1");
    assert_eq!(txs[0].status, TransactionStatus::Blocked);

    let alerts = store.alerts().await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].transaction_id, txs[0].id);
    assert_eq!(alerts[0].alert_type, "High Fraud Risk (Manual Check: 85%)");
}

#[tokio::test]
async fn score_at_alert_threshold_raises_no_alert() {
    let tor = fraudeye::IpSignal {
        tor: true,
        ..ip(40)
    };
    let (service, _, store) = service(StubProvider::new(Some(tor), None));

    let request = FraudCheckRequest::new(100.0).user_id("u1");
    let resp = service.check_and_record(&request, &HeaderMap::new()).await;

    assert!(close(resp.fraud_score, 0.7));
    assert_eq!(resp.risk_level, RiskLevel::Medium);

    let txs = store.transactions().await.unwrap();
    assert_eq!(txs[0].status, TransactionStatus::Flagged);
    assert!(store.alerts().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_checks_are_not_recorded() {
    let (service, _, store) = service(StubProvider::unconfigured());

    let request = FraudCheckRequest::new(100.0).user_id("u1");
    let resp = service.check_and_record(&request, &HeaderMap::new()).await;

    assert!(!resp.success);
    assert!(store.transactions().await.unwrap().is_empty());
}

#[tokio::test]
async fn recording_can_be_disabled() {
    let (service, _, store) = service(StubProvider::new(Some(ip(95)), None));
    let service = service.with_settings(ServiceSettings {
        record_transactions: false,
        ..ServiceSettings::default()
    });

    let request = FraudCheckRequest::new(100.0).user_id("u1");
    service.check_and_record(&request, &HeaderMap::new()).await;

    assert!(store.transactions().await.unwrap().is_empty());
    assert!(store.alerts().await.unwrap().is_empty());
}

#[tokio::test]
async fn custom_fallback_ip() {
    let (service, provider, _) = service(StubProvider::new(Some(ip(5)), None));
    let service = service.with_settings(ServiceSettings {
        fallback_ip: "127.0.0.1".into(),
        ..ServiceSettings::default()
    });

    service.check(&FraudCheckRequest::new(1.0), &HeaderMap::new()).await;
    assert_eq!(provider.ip_queries(), vec!["127.0.0.1"]);
}

#[tokio::test]
async fn check_many_keeps_order() {
    let (service, _, _) = service(StubProvider::new(Some(ip(10)), None));

    let checks = vec![
        (FraudCheckRequest::new(100.0), HeaderMap::new()),
        (FraudCheckRequest::new(-5.0), HeaderMap::new()),
        (FraudCheckRequest::new(6000.0), HeaderMap::new()),
    ];
    let results = service.check_many(&checks).await;

    assert_eq!(results.len(), 3);
    assert!(close(results[0].fraud_score, 0.1));
    assert!(!results[1].success);
    assert!(close(results[2].fraud_score, 0.3));
}
