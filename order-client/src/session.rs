//! Session context
//!
//! Explicitly owned session state replacing the original client's
//! ambient globals: the cart store, checkout selection, bound table,
//! and auth state live behind one [`Session`] that is injected into
//! the components that need it. The session is the single writer;
//! readers obtain cloned snapshots. No lock is held across an await
//! point.

use crate::assembler;
use crate::cart::CartStore;
use crate::collaborators::KvStore;
use crate::selection::SelectionModel;
use crate::table::TABLE_KEY;
use shared::AppResult;
use shared::models::{Dish, LineItem, OrderDraft, TableContext};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

/// Authentication state of the session user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Guest,
    Authenticated {
        user_id: String,
    },
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }
}

/// Recover the guard even if a panicking holder poisoned the lock;
/// session state is plain data and stays structurally valid.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Per-user session context
pub struct Session {
    store: Arc<dyn KvStore>,
    cart: Mutex<CartStore>,
    selection: Mutex<SelectionModel>,
    table: Mutex<Option<TableContext>>,
    auth: Mutex<AuthState>,
}

impl Session {
    /// Create a session, restoring cart and table context from storage
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        let cart = CartStore::load(store.clone());
        let table = match store.get(TABLE_KEY) {
            Some(raw) => match serde_json::from_str::<TableContext>(&raw) {
                Ok(ctx) => Some(ctx),
                Err(err) => {
                    warn!(error = %err, "discarding corrupt table context");
                    None
                }
            },
            None => None,
        };

        // Start with everything selected, as the cart page does
        let mut selection = SelectionModel::new();
        selection.select_all(&cart);

        Self {
            store,
            cart: Mutex::new(cart),
            selection: Mutex::new(selection),
            table: Mutex::new(table),
            auth: Mutex::new(AuthState::Guest),
        }
    }

    /// Backing persistence store
    pub fn store(&self) -> Arc<dyn KvStore> {
        self.store.clone()
    }

    // ==================== Cart ====================

    /// Run a closure against the cart and selection under one lock scope
    ///
    /// Cart mutation and selection reconciliation happen inside the
    /// same scope, so no reader can observe a dangling selection.
    pub fn with_cart<R>(&self, f: impl FnOnce(&mut CartStore, &mut SelectionModel) -> R) -> R {
        let mut cart = lock(&self.cart);
        let mut selection = lock(&self.selection);
        f(&mut cart, &mut selection)
    }

    /// Add one unit of a dish and select its line for checkout
    pub fn add_dish(&self, dish: &Dish) -> AppResult<()> {
        self.with_cart(|cart, selection| {
            cart.add_dish(dish)?;
            selection.select(dish.id);
            Ok(())
        })
    }

    /// Snapshot of the cart lines in display order
    pub fn cart_items(&self) -> Vec<LineItem> {
        lock(&self.cart).items().to_vec()
    }

    pub fn cart_is_empty(&self) -> bool {
        lock(&self.cart).is_empty()
    }

    /// Minor-unit total over the selected lines
    pub fn selected_total(&self) -> i64 {
        self.with_cart(|cart, selection| cart.selected_total(selection))
    }

    /// Empty the cart and selection (post-checkout)
    pub(crate) fn clear_cart(&self) -> AppResult<()> {
        self.with_cart(|cart, selection| cart.clear(selection))
    }

    // ==================== Table ====================

    /// Currently bound table, if any
    pub fn table(&self) -> Option<TableContext> {
        lock(&self.table).clone()
    }

    pub(crate) fn set_table(&self, ctx: TableContext) {
        *lock(&self.table) = Some(ctx);
    }

    pub(crate) fn clear_table(&self) {
        *lock(&self.table) = None;
    }

    // ==================== Auth ====================

    pub fn auth(&self) -> AuthState {
        lock(&self.auth).clone()
    }

    pub fn login(&self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        info!(user_id = %user_id, "session authenticated");
        *lock(&self.auth) = AuthState::Authenticated { user_id };
    }

    pub fn logout(&self) {
        *lock(&self.auth) = AuthState::Guest;
    }

    // ==================== Checkout ====================

    /// Assemble an order draft from the current session state
    pub fn build_draft(&self, remark: impl Into<String>) -> AppResult<OrderDraft> {
        let table = self.table();
        let auth = self.auth();
        self.with_cart(|cart, selection| {
            assembler::build_draft(cart, selection, table.as_ref(), &auth, remark)
        })
    }
}
