//! Collaborator contracts consumed by the client core
//!
//! Abstract interfaces for the external services the ordering flow
//! depends on. The core never talks to a transport directly; it holds
//! trait objects so tests can substitute the [`crate::mock`]
//! implementations.

use crate::table::TableCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::AppResult;
use shared::models::{BoundTable, OrderDraft, PersistedOrder};

/// Synchronous key-value persistence
///
/// Writes are atomic from the caller's perspective: `set` either
/// stores the whole value or nothing, and a `get` after `set` returns
/// the stored value.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// Order creation and status-transition service
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Create an order from an immutable draft
    async fn create_order(&self, draft: &OrderDraft) -> AppResult<PersistedOrder>;

    /// Fetch an order by id
    async fn get_order(&self, order_id: &str) -> AppResult<PersistedOrder>;

    /// Request a transition to `CANCELLED`
    async fn cancel_order(&self, order_id: &str) -> AppResult<PersistedOrder>;

    /// Request a transition to `COMPLETED`
    async fn complete_order(&self, order_id: &str) -> AppResult<PersistedOrder>;
}

/// Payment request handed to the gateway
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub order_id: String,
    /// Amount in minor currency units
    pub amount: i64,
    pub description: String,
}

/// Gateway-level payment result
///
/// `Cancelled` and `Failed` are business outcomes, not transport
/// errors; the gateway returns `Err` only when the call itself could
/// not be made.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Paid,
    Cancelled,
    Failed { message: String },
}

/// Payment gateway
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn pay(&self, request: &PaymentRequest) -> AppResult<PaymentOutcome>;
}

/// Table binding service
#[async_trait]
pub trait TableService: Send + Sync {
    /// Resolve a parsed table code to a table identity
    async fn bind_table(&self, code: &TableCode) -> AppResult<BoundTable>;
}
