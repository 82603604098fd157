//! In-memory collaborators
//!
//! Deterministic doubles for the persistence, order, payment, and
//! table contracts. Used by the test suite and handy for development
//! builds without a backend.

use crate::collaborators::{
    KvStore, OrderService, PaymentGateway, PaymentOutcome, PaymentRequest, TableService,
};
use crate::session::lock;
use crate::table::TableCode;
use async_trait::async_trait;
use shared::models::{BoundTable, OrderDraft, OrderStatus, PersistedOrder, TableStatus};
use shared::{AppError, AppResult, ErrorCode};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.data).get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        lock(&self.data).insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        lock(&self.data).remove(key);
    }
}

/// In-memory order book with sequential order numbers
#[derive(Default)]
pub struct MockOrderService {
    orders: Mutex<HashMap<String, PersistedOrder>>,
    seq: AtomicU64,
    create_calls: AtomicU64,
    fail_next: Mutex<Option<AppError>>,
}

impl MockOrderService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next `create_order` call to fail with the given error
    pub fn fail_next_create(&self, err: AppError) {
        *lock(&self.fail_next) = Some(err);
    }

    /// Number of `create_order` invocations so far
    pub fn create_calls(&self) -> u64 {
        self.create_calls.load(Ordering::SeqCst)
    }

    fn transition(
        &self,
        order_id: &str,
        target: OrderStatus,
        allowed: &[OrderStatus],
    ) -> AppResult<PersistedOrder> {
        let mut orders = lock(&self.orders);
        let order = orders
            .get_mut(order_id)
            .ok_or_else(|| AppError::order_not_found(order_id))?;
        if !allowed.contains(&order.status) {
            return Err(AppError::invalid_request(format!(
                "cannot move order from {:?} to {:?}",
                order.status, target
            )));
        }
        order.status = target;
        Ok(order.clone())
    }
}

#[async_trait]
impl OrderService for MockOrderService {
    async fn create_order(&self, draft: &OrderDraft) -> AppResult<PersistedOrder> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = lock(&self.fail_next).take() {
            return Err(err);
        }

        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let now = chrono::Utc::now().timestamp_millis();
        let order = PersistedOrder {
            order_id: uuid::Uuid::new_v4().to_string(),
            order_number: format!("ORD{now}{seq:03}"),
            table_id: draft.table_id.clone(),
            table_number: draft.table_number.clone(),
            items: draft.items.clone(),
            total_amount: draft.total_amount,
            remark: draft.remark.clone(),
            create_time: now,
            status: OrderStatus::Pending,
        };
        lock(&self.orders).insert(order.order_id.clone(), order.clone());
        Ok(order)
    }

    async fn get_order(&self, order_id: &str) -> AppResult<PersistedOrder> {
        lock(&self.orders)
            .get(order_id)
            .cloned()
            .ok_or_else(|| AppError::order_not_found(order_id))
    }

    async fn cancel_order(&self, order_id: &str) -> AppResult<PersistedOrder> {
        self.transition(order_id, OrderStatus::Cancelled, &[OrderStatus::Pending])
    }

    async fn complete_order(&self, order_id: &str) -> AppResult<PersistedOrder> {
        self.transition(
            order_id,
            OrderStatus::Completed,
            &[OrderStatus::Pending, OrderStatus::Processing],
        )
    }
}

/// Payment gateway with a scripted outcome queue
///
/// Unscripted calls succeed; every received request is recorded.
#[derive(Default)]
pub struct MockPaymentGateway {
    script: Mutex<VecDeque<PaymentOutcome>>,
    requests: Mutex<Vec<PaymentRequest>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome for a future `pay` call
    pub fn enqueue(&self, outcome: PaymentOutcome) {
        lock(&self.script).push_back(outcome);
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<PaymentRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn pay(&self, request: &PaymentRequest) -> AppResult<PaymentOutcome> {
        lock(&self.requests).push(request.clone());
        Ok(lock(&self.script)
            .pop_front()
            .unwrap_or(PaymentOutcome::Paid))
    }
}

/// Table service over a fixed table list
#[derive(Default)]
pub struct MockTableService {
    tables: Vec<BoundTable>,
}

impl MockTableService {
    pub fn new(tables: Vec<BoundTable>) -> Self {
        Self { tables }
    }

    /// Three available tables: (t_1, A1), (t_2, A2), (t_3, A3)
    pub fn with_default_tables() -> Self {
        let tables = (1..=3)
            .map(|n| BoundTable {
                table_id: format!("t_{n}"),
                table_number: format!("A{n}"),
                status: TableStatus::Available,
                store_id: Some("s_1".to_string()),
            })
            .collect();
        Self::new(tables)
    }
}

#[async_trait]
impl TableService for MockTableService {
    async fn bind_table(&self, code: &TableCode) -> AppResult<BoundTable> {
        let found = match code {
            TableCode::Id(id) => self.tables.iter().find(|t| &t.table_id == id),
            TableCode::Number(number) => self.tables.iter().find(|t| &t.table_number == number),
        };
        found
            .cloned()
            .ok_or_else(|| AppError::new(ErrorCode::TableNotFound))
    }
}
