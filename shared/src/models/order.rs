//! Order models

use serde::{Deserialize, Serialize};

/// Order status
///
/// Status transitions happen only through explicit collaborator calls
/// (cancel, complete); the client never rewrites a status locally.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
}

/// One item of an order draft
///
/// Copied, not referenced, from the selected cart line at assembly
/// time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DraftItem {
    pub dish_id: i64,
    pub name: String,
    /// Unit price in minor currency units
    pub unit_price: i64,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl DraftItem {
    /// Line subtotal in minor units
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

/// Immutable pre-submission order snapshot
///
/// Built by the assembler from the selected cart lines plus the table
/// context. Once constructed it does not change; a new draft is built
/// whenever inputs change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub table_id: String,
    pub table_number: String,
    pub items: Vec<DraftItem>,
    /// Exact integer sum of `unit_price * quantity` in minor units
    pub total_amount: i64,
    /// Order-level remark
    #[serde(default)]
    pub remark: String,
    pub status: OrderStatus,
}

/// Server-assigned order record returned by order creation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedOrder {
    pub order_id: String,
    pub order_number: String,
    pub table_id: String,
    pub table_number: String,
    pub items: Vec<DraftItem>,
    pub total_amount: i64,
    #[serde(default)]
    pub remark: String,
    /// Creation timestamp in epoch milliseconds
    pub create_time: i64,
    pub status: OrderStatus,
}
