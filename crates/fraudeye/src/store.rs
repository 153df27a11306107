//! Transaction store abstraction.
//!
//! The production store is an external relational database; this module only
//! fixes the interface the fraud check needs and ships an in-memory
//! implementation for the local server and tests.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use chrono::Utc;
use fraudeye_core::{FraudAlert, NewFraudAlert, NewTransaction, Result, TransactionRecord};
use tokio::sync::RwLock;
use tracing::debug;

/// Persistence for checked transactions and fraud alerts.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Email on file for a user, if any
    async fn profile_email(&self, user_id: &str) -> Result<Option<String>>;

    /// Insert a checked transaction
    async fn insert_transaction(&self, tx: NewTransaction) -> Result<TransactionRecord>;

    /// Insert a fraud alert
    async fn insert_alert(&self, alert: NewFraudAlert) -> Result<FraudAlert>;

    /// All transactions, newest first
    async fn transactions(&self) -> Result<Vec<TransactionRecord>>;

    /// All alerts, newest first
    async fn alerts(&self) -> Result<Vec<FraudAlert>>;
}

/// Rows kept per table by [`MemoryStore::new`]
pub const DEFAULT_MAX_ROWS: usize = 10_000;

#[derive(Debug, Default)]
struct MemoryState {
    profiles: HashMap<String, String>,
    transactions: VecDeque<TransactionRecord>,
    alerts: VecDeque<FraudAlert>,
    next_id: u64,
}

impl MemoryState {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }
}

/// Append `row`, dropping the oldest rows beyond `max_rows`
fn push_capped<T>(rows: &mut VecDeque<T>, row: T, max_rows: usize) {
    rows.push_back(row);
    while rows.len() > max_rows {
        rows.pop_front();
    }
}

/// In-memory [`TransactionStore`] for development and tests.
///
/// Nothing survives a restart. Each table keeps at most `max_rows` rows and
/// evicts the oldest first, so a long-running server stays bounded.
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    max_rows: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_ROWS)
    }
}

impl MemoryStore {
    /// Create an empty store holding up to [`DEFAULT_MAX_ROWS`] rows per table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store holding up to `max_rows` rows per table (at least one)
    #[must_use]
    pub fn with_capacity(max_rows: usize) -> Self {
        Self {
            state: RwLock::default(),
            max_rows: max_rows.max(1),
        }
    }

    /// Register a user profile email
    pub async fn add_profile(&self, user_id: impl Into<String>, email: impl Into<String>) {
        self.state
            .write()
            .await
            .profiles
            .insert(user_id.into(), email.into());
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn profile_email(&self, user_id: &str) -> Result<Option<String>> {
        Ok(self.state.read().await.profiles.get(user_id).cloned())
    }

    async fn insert_transaction(&self, tx: NewTransaction) -> Result<TransactionRecord> {
        let mut state = self.state.write().await;
        let record = TransactionRecord {
            id: state.next_id(),
            user_id: tx.user_id,
            amount: tx.amount,
            timestamp: Utc::now(),
            fraud_score: Some(tx.fraud_score),
            status: tx.status,
        };
        debug!(id = %record.id, status = %record.status, "stored transaction");
        push_capped(&mut state.transactions, record.clone(), self.max_rows);
        Ok(record)
    }

    async fn insert_alert(&self, alert: NewFraudAlert) -> Result<FraudAlert> {
        let mut state = self.state.write().await;
        let stored = FraudAlert {
            id: state.next_id(),
            transaction_id: alert.transaction_id,
            alert_type: alert.alert_type,
            timestamp: Utc::now(),
        };
        debug!(id = %stored.id, alert_type = %stored.alert_type, "stored alert");
        push_capped(&mut state.alerts, stored.clone(), self.max_rows);
        Ok(stored)
    }

    async fn transactions(&self) -> Result<Vec<TransactionRecord>> {
        Ok(self.state.read().await.transactions.iter().rev().cloned().collect())
    }

    async fn alerts(&self) -> Result<Vec<FraudAlert>> {
        Ok(self.state.read().await.alerts.iter().rev().cloned().collect())
    }
}
