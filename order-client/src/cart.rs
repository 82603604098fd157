//! Cart store with a persisted mirror
//!
//! Owns the canonical cart: an insertion-ordered sequence of
//! [`LineItem`] with unique dish ids. Every mutating operation writes
//! the full cart back to the [`KvStore`] mirror before returning, so
//! the in-memory cart and the persisted copy never diverge across a
//! call boundary.

use crate::collaborators::KvStore;
use crate::selection::SelectionModel;
use shared::models::{Dish, LineItem};
use shared::{AppError, AppResult, ErrorCode};
use std::sync::Arc;
use tracing::{debug, warn};

/// Persistence slot for the cart mirror
pub const CART_KEY: &str = "cart";

/// Result of a decrement on a quantity-1 line
///
/// Dropping below 1 is never silent: the store reports
/// `ConfirmRemoval` without mutating, and the caller must confirm and
/// call [`CartStore::remove`] explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// Quantity reduced; carries the new quantity
    Decremented(u32),
    /// Line is at quantity 1; removal requires confirmation
    ConfirmRemoval,
}

/// Canonical cart, single writer for cart state
pub struct CartStore {
    items: Vec<LineItem>,
    store: Arc<dyn KvStore>,
}

impl CartStore {
    /// Create an empty cart backed by the given store
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            items: Vec::new(),
            store,
        }
    }

    /// Restore the cart from the persisted mirror
    ///
    /// A corrupt mirror is discarded rather than propagated: the cart
    /// starts empty and the slot is rewritten on the next mutation.
    pub fn load(store: Arc<dyn KvStore>) -> Self {
        let items = match store.get(CART_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<LineItem>>(&raw) {
                Ok(items) => items,
                Err(err) => {
                    warn!(error = %err, "discarding corrupt cart mirror");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        Self { items, store }
    }

    // ==================== Mutations ====================

    /// Add one unit of a catalog dish
    ///
    /// Merges into an existing line when the dish is already in the
    /// cart, otherwise appends a new line with quantity 1 and
    /// price/stock snapshots taken from the dish.
    pub fn add_dish(&mut self, dish: &Dish) -> AppResult<()> {
        if !dish.in_stock() {
            return Err(AppError::with_message(
                ErrorCode::DishOutOfStock,
                format!("{} is out of stock", dish.name),
            ));
        }

        match self.items.iter_mut().find(|item| item.dish_id == dish.id) {
            Some(line) => {
                if !line.can_increment() {
                    return Err(AppError::new(ErrorCode::StockLimitReached)
                        .with_detail("dish_id", dish.id));
                }
                line.quantity += 1;
            }
            None => self.items.push(LineItem::from_dish(dish)),
        }

        debug!(dish_id = dish.id, "added dish to cart");
        self.persist()
    }

    /// Increment the quantity of an existing line
    pub fn increment(&mut self, dish_id: i64) -> AppResult<()> {
        let line = self.line_mut(dish_id)?;
        if !line.can_increment() {
            return Err(AppError::new(ErrorCode::StockLimitReached).with_detail("dish_id", dish_id));
        }
        line.quantity += 1;
        self.persist()
    }

    /// Decrement the quantity of an existing line
    ///
    /// At quantity 1 the cart is left untouched and `ConfirmRemoval`
    /// is returned instead.
    pub fn decrement(&mut self, dish_id: i64) -> AppResult<DecrementOutcome> {
        let line = self.line_mut(dish_id)?;
        if line.quantity <= 1 {
            return Ok(DecrementOutcome::ConfirmRemoval);
        }
        line.quantity -= 1;
        let quantity = line.quantity;
        self.persist()?;
        Ok(DecrementOutcome::Decremented(quantity))
    }

    /// Replace the remark on an existing line
    pub fn set_remark(&mut self, dish_id: i64, remark: impl Into<String>) -> AppResult<()> {
        let line = self.line_mut(dish_id)?;
        let remark = remark.into();
        line.remark = if remark.is_empty() { None } else { Some(remark) };
        self.persist()
    }

    /// Remove a line and drop its selection in the same step
    ///
    /// Removing an absent id is a no-op, so a double tap cannot fail.
    pub fn remove(&mut self, dish_id: i64, selection: &mut SelectionModel) -> AppResult<()> {
        let before = self.items.len();
        self.items.retain(|item| item.dish_id != dish_id);
        selection.deselect(dish_id);
        if self.items.len() == before {
            return Ok(());
        }
        debug!(dish_id, "removed cart line");
        self.persist()
    }

    /// Empty the cart and the selection
    pub fn clear(&mut self, selection: &mut SelectionModel) -> AppResult<()> {
        self.items.clear();
        selection.clear();
        self.persist()
    }

    // ==================== Reads ====================

    /// Cart lines in insertion (display) order
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line by dish id
    pub fn get(&self, dish_id: i64) -> Option<&LineItem> {
        self.items.iter().find(|item| item.dish_id == dish_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total unit count across all lines
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Exact minor-unit total over the selected lines
    pub fn selected_total(&self, selection: &SelectionModel) -> i64 {
        self.items
            .iter()
            .filter(|item| selection.is_selected(item.dish_id))
            .map(|item| item.line_total())
            .sum()
    }

    // ==================== Internal ====================

    fn line_mut(&mut self, dish_id: i64) -> AppResult<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|item| item.dish_id == dish_id)
            .ok_or_else(|| AppError::cart_item_not_found(dish_id))
    }

    /// Write the full cart to the mirror slot
    fn persist(&self) -> AppResult<()> {
        let raw = serde_json::to_string(&self.items)
            .map_err(|err| AppError::storage(format!("cart serialization failed: {err}")))?;
        self.store.set(CART_KEY, raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MemoryStore;

    fn dish(id: i64, price: i64, stock: u32) -> Dish {
        Dish {
            id,
            name: format!("dish-{id}"),
            price,
            stock,
            image: String::new(),
        }
    }

    fn cart() -> (CartStore, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (CartStore::new(store.clone()), store)
    }

    fn mirror(store: &MemoryStore) -> Vec<LineItem> {
        serde_json::from_str(&store.get(CART_KEY).expect("mirror missing")).unwrap()
    }

    #[test]
    fn test_add_dish_appends_then_merges() {
        let (mut cart, _) = cart();
        cart.add_dish(&dish(1, 2800, 3)).unwrap();
        cart.add_dish(&dish(1, 2800, 3)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(1).unwrap().quantity, 2);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_add_out_of_stock_rejected() {
        let (mut cart, _) = cart();
        let err = cart.add_dish(&dish(1, 2800, 0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::DishOutOfStock);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_never_exceeds_stock_limit() {
        let (mut cart, _) = cart();
        let d = dish(1, 1000, 2);
        cart.add_dish(&d).unwrap();
        cart.add_dish(&d).unwrap();

        let err = cart.add_dish(&d).unwrap_err();
        assert_eq!(err.code, ErrorCode::StockLimitReached);
        let err = cart.increment(1).unwrap_err();
        assert_eq!(err.code, ErrorCode::StockLimitReached);

        assert_eq!(cart.get(1).unwrap().quantity, 2);
    }

    #[test]
    fn test_increment_missing_line() {
        let (mut cart, _) = cart();
        let err = cart.increment(99).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartItemNotFound);
    }

    #[test]
    fn test_decrement_above_one() {
        let (mut cart, _) = cart();
        let d = dish(1, 1000, 5);
        cart.add_dish(&d).unwrap();
        cart.add_dish(&d).unwrap();

        let outcome = cart.decrement(1).unwrap();
        assert_eq!(outcome, DecrementOutcome::Decremented(1));
    }

    #[test]
    fn test_decrement_at_one_requires_confirmation() {
        let (mut cart, _) = cart();
        cart.add_dish(&dish(1, 1000, 5)).unwrap();

        let outcome = cart.decrement(1).unwrap();
        assert_eq!(outcome, DecrementOutcome::ConfirmRemoval);
        // Cart untouched until the caller confirms
        assert_eq!(cart.get(1).unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_is_idempotent_and_reconciles_selection() {
        let (mut cart, _) = cart();
        let mut selection = SelectionModel::new();
        cart.add_dish(&dish(1, 1000, 5)).unwrap();
        selection.toggle(1);
        assert!(selection.is_selected(1));

        cart.remove(1, &mut selection).unwrap();
        assert!(cart.is_empty());
        assert!(!selection.is_selected(1));

        // Second removal is a no-op, not an error
        cart.remove(1, &mut selection).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_remark() {
        let (mut cart, _) = cart();
        cart.add_dish(&dish(1, 1000, 5)).unwrap();

        cart.set_remark(1, "no cilantro").unwrap();
        assert_eq!(cart.get(1).unwrap().remark.as_deref(), Some("no cilantro"));

        cart.set_remark(1, "").unwrap();
        assert!(cart.get(1).unwrap().remark.is_none());

        let err = cart.set_remark(2, "x").unwrap_err();
        assert_eq!(err.code, ErrorCode::CartItemNotFound);
    }

    #[test]
    fn test_mirror_tracks_every_mutation() {
        let (mut cart, store) = cart();
        let d = dish(1, 2800, 5);

        cart.add_dish(&d).unwrap();
        assert_eq!(mirror(&store), cart.items());

        cart.increment(1).unwrap();
        assert_eq!(mirror(&store), cart.items());

        cart.set_remark(1, "spicy").unwrap();
        assert_eq!(mirror(&store), cart.items());

        let mut selection = SelectionModel::new();
        cart.remove(1, &mut selection).unwrap();
        assert_eq!(mirror(&store), cart.items());
        assert!(mirror(&store).is_empty());
    }

    #[test]
    fn test_load_restores_from_mirror() {
        let store = Arc::new(MemoryStore::new());
        {
            let mut cart = CartStore::new(store.clone());
            cart.add_dish(&dish(1, 2800, 5)).unwrap();
            cart.add_dish(&dish(2, 1200, 5)).unwrap();
        }

        let restored = CartStore::load(store);
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.get(2).unwrap().unit_price, 1200);
    }

    #[test]
    fn test_load_discards_corrupt_mirror() {
        let store = Arc::new(MemoryStore::new());
        store.set(CART_KEY, "not json".to_string());

        let cart = CartStore::load(store);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_selected_total() {
        let (mut cart, _) = cart();
        let mut selection = SelectionModel::new();
        cart.add_dish(&dish(1, 2800, 5)).unwrap();
        cart.add_dish(&dish(2, 1200, 5)).unwrap();
        cart.increment(2).unwrap();

        selection.toggle(1);
        selection.toggle(2);
        assert_eq!(cart.selected_total(&selection), 5200);

        selection.toggle(1);
        assert_eq!(cart.selected_total(&selection), 2400);
    }
}
