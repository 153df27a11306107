//! Client tests against a mock provider.

use std::time::Duration;

use fraudeye_client::{FraudEyeError, IpqsClient, RetryConfig};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "test-key";

fn client(server: &MockServer) -> IpqsClient {
    IpqsClient::builder(KEY)
        .base_url(server.uri())
        .retry(
            RetryConfig::new()
                .max_retries(2)
                .initial_backoff(Duration::from_millis(1))
                .max_backoff(Duration::from_millis(5)),
        )
        .rate_limit(None)
        .build()
        .unwrap()
}

#[tokio::test]
async fn ip_lookup_sends_default_options() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ip/test-key/203.0.113.7"))
        .and(query_param("strictness", "1"))
        .and(query_param("allow_public_access_points", "true"))
        .and(query_param("fast", "true"))
        .and(query_param("mobile", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Success",
            "fraud_score": 85,
            "country_code": "US",
            "region": "Texas",
            "city": "Austin",
            "ISP": "Example Broadband",
            "connection_type": "Residential",
            "proxy": true,
            "vpn": false,
            "tor": false,
            "bot_status": false,
            "recent_abuse": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let signal = client(&server).ip().lookup("203.0.113.7").await.unwrap();

    assert!(signal.success);
    assert_eq!(signal.fraud_score, 85);
    assert!(signal.proxy);
    assert!(signal.recent_abuse);
    assert_eq!(signal.isp.as_deref(), Some("Example Broadband"));
    assert_eq!(signal.city.as_deref(), Some("Austin"));
}

#[tokio::test]
async fn ip_lookup_custom_strictness() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ip/test-key/198.51.100.20"))
        .and(query_param("strictness", "3"))
        .and(query_param("fast", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "fraud_score": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let signal = client(&server)
        .ip()
        .lookup_with_options("198.51.100.20")
        .strictness(7)
        .fast(false)
        .send()
        .await
        .unwrap();

    assert_eq!(signal.fraud_score, 12);
    assert!(!signal.tor);
}

#[tokio::test]
async fn unsuccessful_provider_answer_is_a_signal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ip/test-key/203.0.113.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "You have exceeded your request quota."
        })))
        .mount(&server)
        .await;

    let signal = client(&server).ip().lookup("203.0.113.8").await.unwrap();

    assert!(!signal.success);
    assert_eq!(
        signal.message.as_deref(),
        Some("You have exceeded your request quota.")
    );
}

#[tokio::test]
async fn invalid_ip_is_rejected_before_request() {
    let server = MockServer::start().await;

    let err = client(&server).ip().lookup("not-an-ip").await.unwrap_err();

    assert!(matches!(err, FraudEyeError::InvalidIp(ref ip) if ip == "not-an-ip"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "message": "Invalid or unauthorized key."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).ip().lookup("203.0.113.9").await.unwrap_err();
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn server_error_keeps_provider_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Internal failure"
        })))
        .mount(&server)
        .await;

    let err = client(&server).ip().lookup("203.0.113.9").await.unwrap_err();
    match err {
        FraudEyeError::Api { code, message } => {
            assert_eq!(code, 500);
            assert_eq!(message, "Internal failure");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ip/test-key/203.0.113.10"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ip/test-key/203.0.113.10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "fraud_score": 40
        })))
        .expect(1)
        .mount(&server)
        .await;

    let signal = client(&server).ip().lookup("203.0.113.10").await.unwrap();
    assert_eq!(signal.fraud_score, 40);
}

#[tokio::test]
async fn rate_limit_gives_up_after_max_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .expect(3)
        .mount(&server)
        .await;

    let err = client(&server).ip().lookup("203.0.113.11").await.unwrap_err();
    assert!(matches!(
        err,
        FraudEyeError::RateLimited {
            retry_after: Some(30)
        }
    ));
}

#[tokio::test]
async fn phone_validation_normalizes_number() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/phone/test-key/+15550100199"))
        .and(query_param("country[]", "US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "valid": true,
            "fraud_score": 65,
            "VOIP": true,
            "prepaid": false,
            "risky": false,
            "recent_abuse": false,
            "carrier": "Example Voice",
            "line_type": "VOIP",
            "country": "US"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let signal = client(&server)
        .phone()
        .validate_with_options("+1 (555) 010-0199")
        .country("US")
        .send()
        .await
        .unwrap();

    assert!(signal.success);
    assert!(signal.voip);
    assert_eq!(signal.carrier.as_deref(), Some("Example Voice"));
}

#[tokio::test]
async fn malformed_phone_is_rejected() {
    let server = MockServer::start().await;

    let err = client(&server).phone().validate("call me maybe").await.unwrap_err();
    assert!(matches!(err, FraudEyeError::InvalidPhone(_)));
}

#[tokio::test]
async fn malformed_json_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client(&server).ip().lookup("203.0.113.12").await.unwrap_err();
    assert!(matches!(err, FraudEyeError::Json(_)));
}
