//! Dining table models

use serde::{Deserialize, Serialize};

/// Table availability status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
}

/// Binding collaborator response for a resolved table code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoundTable {
    pub table_id: String,
    pub table_number: String,
    pub status: TableStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

/// Active table context for the session
///
/// Created or overwritten by table binding, cleared on unbind,
/// read-only to every other component. At most one per session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableContext {
    pub table_id: String,
    pub table_number: String,
    pub status: TableStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    /// Bind timestamp in epoch milliseconds
    pub bind_time: i64,
}

impl TableContext {
    /// Build a context from a binding response, stamping the bind time
    pub fn from_bound(bound: BoundTable) -> Self {
        Self {
            table_id: bound.table_id,
            table_number: bound.table_number,
            status: bound.status,
            store_id: bound.store_id,
            bind_time: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bound() {
        let bound = BoundTable {
            table_id: "t_12".to_string(),
            table_number: "A12".to_string(),
            status: TableStatus::Available,
            store_id: Some("s_1".to_string()),
        };
        let ctx = TableContext::from_bound(bound);
        assert_eq!(ctx.table_id, "t_12");
        assert_eq!(ctx.table_number, "A12");
        assert!(ctx.bind_time > 0);
    }

    #[test]
    fn test_status_serialize() {
        let json = serde_json::to_string(&TableStatus::Occupied).unwrap();
        assert_eq!(json, "\"OCCUPIED\"");
    }
}
