//! Table binding
//!
//! Resolves a scanned QR payload or a manually entered table number to
//! a table identity via the binding collaborator, and owns the
//! persisted [`TableContext`]. A bind either fully replaces the old
//! context or leaves it untouched; no partial state is observable.

use crate::collaborators::{KvStore, TableService};
use crate::session::Session;
use shared::models::TableContext;
use shared::{AppError, AppResult, ErrorCode};
use std::sync::Arc;
use tracing::info;

/// Persistence slot for the bound table context
pub const TABLE_KEY: &str = "table_info";

/// Parsed table code handed to the binding collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCode {
    /// Table identity from a QR payload
    Id(String),
    /// Manually entered table number
    Number(String),
}

impl TableCode {
    /// Parse a scan payload
    ///
    /// Accepts a `tableId=...` query fragment, a URL carrying a
    /// `tableId` parameter, or a bare code. Empty input and URLs
    /// without a table parameter are rejected.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::InvalidTableCode,
                "empty scan payload",
            ));
        }

        if raw.contains("tableId=") {
            let query = raw.split_once('?').map_or(raw, |(_, q)| q);
            if let Some(id) = query_param(query, "tableId") {
                return Ok(TableCode::Id(id.to_string()));
            }
            return Err(AppError::with_message(
                ErrorCode::InvalidTableCode,
                "tableId parameter is empty",
            ));
        }

        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Err(AppError::with_message(
                ErrorCode::InvalidTableCode,
                "URL carries no tableId parameter",
            ));
        }

        // A bare payload is treated as the table id itself
        Ok(TableCode::Id(raw.to_string()))
    }
}

fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name && !value.is_empty()).then_some(value)
    })
}

/// Table binding component
pub struct TableBinding {
    service: Arc<dyn TableService>,
    store: Arc<dyn KvStore>,
}

impl TableBinding {
    pub fn new(service: Arc<dyn TableService>, store: Arc<dyn KvStore>) -> Self {
        Self { service, store }
    }

    /// Bind from a scan payload
    pub async fn bind(&self, session: &Session, raw: &str) -> AppResult<TableContext> {
        let code = TableCode::parse(raw)?;
        self.bind_code(session, &code).await
    }

    /// Bind from a manually entered table number
    pub async fn bind_by_number(&self, session: &Session, number: &str) -> AppResult<TableContext> {
        let number = number.trim();
        if number.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::InvalidTableCode,
                "empty table number",
            ));
        }
        self.bind_code(session, &TableCode::Number(number.to_string()))
            .await
    }

    async fn bind_code(&self, session: &Session, code: &TableCode) -> AppResult<TableContext> {
        let bound = self.service.bind_table(code).await?;
        let ctx = TableContext::from_bound(bound);

        // Persist first, then publish; any previous context is
        // overwritten wholesale.
        let raw = serde_json::to_string(&ctx)
            .map_err(|err| AppError::storage(format!("table context serialization: {err}")))?;
        self.store.set(TABLE_KEY, raw);
        session.set_table(ctx.clone());

        info!(table_number = %ctx.table_number, "table bound");
        Ok(ctx)
    }

    /// Clear the bound table unconditionally
    pub fn unbind(&self, session: &Session) {
        self.store.remove(TABLE_KEY);
        session.clear_table();
        info!("table unbound");
    }
}
