//! Checkout selection model
//!
//! Tracks which cart lines are chosen for the next checkout,
//! independent of cart contents. The invariant is
//! selection ⊆ current cart dish ids; the cart store calls
//! [`SelectionModel::deselect`] / [`SelectionModel::retain_cart`] in
//! the same step as any line removal so a reader never observes a
//! dangling id.

use crate::cart::CartStore;
use std::collections::HashSet;

/// Set of dish ids selected for checkout
#[derive(Debug, Default, Clone)]
pub struct SelectionModel {
    selected: HashSet<i64>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a dish id in or out of the selection
    pub fn toggle(&mut self, dish_id: i64) {
        if !self.selected.remove(&dish_id) {
            self.selected.insert(dish_id);
        }
    }

    /// Mark a dish id selected
    pub fn select(&mut self, dish_id: i64) {
        self.selected.insert(dish_id);
    }

    /// Drop a dish id from the selection
    pub fn deselect(&mut self, dish_id: i64) {
        self.selected.remove(&dish_id);
    }

    /// Select every line currently in the cart
    pub fn select_all(&mut self, cart: &CartStore) {
        self.selected = cart.items().iter().map(|item| item.dish_id).collect();
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, dish_id: i64) -> bool {
        self.selected.contains(&dish_id)
    }

    /// True iff the cart is non-empty and every line is selected
    pub fn is_all_selected(&self, cart: &CartStore) -> bool {
        !cart.is_empty()
            && cart
                .items()
                .iter()
                .all(|item| self.selected.contains(&item.dish_id))
    }

    /// Reconcile against the cart, dropping ids no longer present
    pub fn retain_cart(&mut self, cart: &CartStore) {
        let live: HashSet<i64> = cart.items().iter().map(|item| item.dish_id).collect();
        self.selected.retain(|id| live.contains(id));
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MemoryStore;
    use shared::models::Dish;
    use std::sync::Arc;

    fn dish(id: i64) -> Dish {
        Dish {
            id,
            name: format!("dish-{id}"),
            price: 1000,
            stock: 9,
            image: String::new(),
        }
    }

    fn cart_with(ids: &[i64]) -> CartStore {
        let mut cart = CartStore::new(Arc::new(MemoryStore::new()));
        for id in ids {
            cart.add_dish(&dish(*id)).unwrap();
        }
        cart
    }

    #[test]
    fn test_toggle() {
        let mut selection = SelectionModel::new();
        selection.toggle(1);
        assert!(selection.is_selected(1));
        selection.toggle(1);
        assert!(!selection.is_selected(1));
    }

    #[test]
    fn test_select_all_and_is_all_selected() {
        let cart = cart_with(&[1, 2, 3]);
        let mut selection = SelectionModel::new();
        assert!(!selection.is_all_selected(&cart));

        selection.select_all(&cart);
        assert_eq!(selection.len(), 3);
        assert!(selection.is_all_selected(&cart));

        selection.toggle(2);
        assert!(!selection.is_all_selected(&cart));
    }

    #[test]
    fn test_is_all_selected_empty_cart_is_false() {
        let cart = cart_with(&[]);
        let selection = SelectionModel::new();
        assert!(!selection.is_all_selected(&cart));
    }

    #[test]
    fn test_retain_cart_drops_stale_ids() {
        let mut cart = cart_with(&[1, 2]);
        let mut selection = SelectionModel::new();
        selection.select_all(&cart);

        let mut other = SelectionModel::new();
        cart.remove(1, &mut other).unwrap();
        selection.retain_cart(&cart);

        assert!(!selection.is_selected(1));
        assert!(selection.is_selected(2));
    }
}
