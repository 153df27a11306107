//! HTTP front end: the fraud-check endpoint plus dashboard listings.

use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use fraudeye_core::{
    AlertSeverity, FraudAlert, FraudCheckRequest, FraudCheckResponse, FraudEyeError, Result,
    TransactionRecord, TransactionStatus,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::service::FraudCheckService;

/// Transaction row as shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    /// Fraud score as a whole percentage
    pub risk_score: u8,
    pub status: TransactionStatus,
}

impl From<TransactionRecord> for TransactionSummary {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from(tx: TransactionRecord) -> Self {
        let risk_score = tx
            .fraud_score
            .map_or(0, |s| (s.clamp(0.0, 1.0) * 100.0).round() as u8);

        Self {
            id: format!("tx_{}", tx.id),
            user_id: tx.user_id,
            amount: tx.amount,
            timestamp: tx.timestamp,
            risk_score,
            status: tx.status,
        }
    }
}

/// Alert row as shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub id: String,
    pub transaction_id: String,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub timestamp: DateTime<Utc>,
}

impl From<FraudAlert> for AlertSummary {
    fn from(alert: FraudAlert) -> Self {
        Self {
            id: format!("alert_{}", alert.id),
            severity: alert.severity(),
            transaction_id: alert.transaction_id,
            alert_type: alert.alert_type,
            timestamp: alert.timestamp,
        }
    }
}

/// `GET /health` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub provider_configured: bool,
    pub version: String,
}

/// Build the router for a service.
pub fn router(service: FraudCheckService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    Router::new()
        .route("/fraud-check", post(fraud_check))
        .route("/transactions", get(list_transactions))
        .route("/alerts", get(list_alerts))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Bind `listen` and serve until Ctrl-C.
pub async fn serve(service: FraudCheckService, listen: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(listen)
        .await
        .map_err(|e| FraudEyeError::Internal(format!("bind {listen}: {e}")))?;

    if !service.provider_configured() {
        warn!("IPQS API key not configured; every check will fail safe");
    }
    info!(addr = %listen, "fraud-check server listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FraudEyeError::Internal(format!("server error: {e}")))?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("received shutdown signal");
}

async fn fraud_check(
    State(service): State<FraudCheckService>,
    headers: HeaderMap,
    body: std::result::Result<Json<FraudCheckRequest>, JsonRejection>,
) -> (StatusCode, Json<FraudCheckResponse>) {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "rejected fraud-check body");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FraudCheckResponse::failure(rejection.body_text())),
            );
        }
    };

    let response = service.check_and_record(&request, &headers).await;
    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(response))
}

async fn list_transactions(State(service): State<FraudCheckService>) -> Response {
    match service.store().transactions().await {
        Ok(txs) => {
            let rows: Vec<TransactionSummary> = txs.into_iter().map(Into::into).collect();
            Json(rows).into_response()
        }
        Err(e) => store_error(&e),
    }
}

async fn list_alerts(State(service): State<FraudCheckService>) -> Response {
    match service.store().alerts().await {
        Ok(alerts) => {
            let rows: Vec<AlertSummary> = alerts.into_iter().map(Into::into).collect();
            Json(rows).into_response()
        }
        Err(e) => store_error(&e),
    }
}

async fn health(State(service): State<FraudCheckService>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        provider_configured: service.provider_configured(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn store_error(e: &FraudEyeError) -> Response {
    error!(error = %e, "store query failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "success": false, "error": e.to_string() })),
    )
        .into_response()
}
