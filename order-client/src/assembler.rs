//! Order draft assembly
//!
//! Turns the selected cart lines plus the table context into an
//! immutable [`OrderDraft`]. Preconditions are checked in a fixed
//! order so the caller always sees the same failure for the same
//! state: table bound, then items selected, then authenticated.

use crate::cart::CartStore;
use crate::selection::SelectionModel;
use crate::session::AuthState;
use shared::models::{DraftItem, OrderDraft, OrderStatus, TableContext};
use shared::{AppError, AppResult, ErrorCode};
use tracing::debug;

/// Build an order draft from the current session state
///
/// Copies each selected line (preserving cart order) and computes the
/// total as an exact integer sum of minor units. Deterministic: the
/// same inputs always produce the same draft.
pub fn build_draft(
    cart: &CartStore,
    selection: &SelectionModel,
    table: Option<&TableContext>,
    auth: &AuthState,
    remark: impl Into<String>,
) -> AppResult<OrderDraft> {
    let table = table.ok_or_else(|| AppError::new(ErrorCode::TableNotBound))?;

    if selection.is_empty() {
        return Err(AppError::new(ErrorCode::NoItemsSelected));
    }

    if !auth.is_authenticated() {
        return Err(AppError::not_authenticated());
    }

    let items: Vec<DraftItem> = cart
        .items()
        .iter()
        .filter(|line| selection.is_selected(line.dish_id))
        .map(|line| DraftItem {
            dish_id: line.dish_id,
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            remark: line.remark.clone(),
        })
        .collect();

    // The selection may only reference live lines, so an empty item
    // list here would mean the reconciliation invariant was broken.
    debug_assert!(!items.is_empty());

    let total_amount: i64 = items.iter().map(DraftItem::line_total).sum();
    debug!(items = items.len(), total_amount, "assembled order draft");

    Ok(OrderDraft {
        table_id: table.table_id.clone(),
        table_number: table.table_number.clone(),
        items,
        total_amount,
        remark: remark.into(),
        status: OrderStatus::Pending,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MemoryStore;
    use shared::models::{Dish, TableStatus};
    use std::sync::Arc;

    fn dish(id: i64, price: i64) -> Dish {
        Dish {
            id,
            name: format!("dish-{id}"),
            price,
            stock: 9,
            image: String::new(),
        }
    }

    fn table() -> TableContext {
        TableContext {
            table_id: "t_8".to_string(),
            table_number: "A8".to_string(),
            status: TableStatus::Occupied,
            store_id: None,
            bind_time: 1,
        }
    }

    fn authed() -> AuthState {
        AuthState::Authenticated {
            user_id: "u_1".to_string(),
        }
    }

    fn populated_cart() -> (CartStore, SelectionModel) {
        let mut cart = CartStore::new(Arc::new(MemoryStore::new()));
        cart.add_dish(&dish(1, 2800)).unwrap();
        cart.add_dish(&dish(2, 1200)).unwrap();
        cart.increment(2).unwrap();
        let mut selection = SelectionModel::new();
        selection.select_all(&cart);
        (cart, selection)
    }

    #[test]
    fn test_build_draft_exact_total_and_order() {
        let (cart, selection) = populated_cart();
        let table = table();
        let draft = build_draft(&cart, &selection, Some(&table), &authed(), "").unwrap();

        assert_eq!(draft.total_amount, 5200);
        assert_eq!(draft.items.len(), 2);
        // Cart insertion order is preserved
        assert_eq!(draft.items[0].dish_id, 1);
        assert_eq!(draft.items[1].dish_id, 2);
        assert_eq!(draft.items[1].quantity, 2);
        assert_eq!(draft.status, OrderStatus::Pending);
        assert_eq!(draft.table_number, "A8");
    }

    #[test]
    fn test_build_draft_deterministic() {
        let (cart, selection) = populated_cart();
        let table = table();
        let a = build_draft(&cart, &selection, Some(&table), &authed(), "rush").unwrap();
        let b = build_draft(&cart, &selection, Some(&table), &authed(), "rush").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_draft_filters_unselected() {
        let (cart, mut selection) = populated_cart();
        selection.toggle(1);
        let table = table();
        let draft = build_draft(&cart, &selection, Some(&table), &authed(), "").unwrap();

        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].dish_id, 2);
        assert_eq!(draft.total_amount, 2400);
    }

    #[test]
    fn test_table_not_bound_checked_first() {
        // No table, nothing selected, not logged in: table wins
        let cart = CartStore::new(Arc::new(MemoryStore::new()));
        let selection = SelectionModel::new();
        let err = build_draft(&cart, &selection, None, &AuthState::Guest, "").unwrap_err();
        assert_eq!(err.code, ErrorCode::TableNotBound);
    }

    #[test]
    fn test_no_items_selected_checked_before_auth() {
        let (cart, _) = populated_cart();
        let selection = SelectionModel::new();
        let table = table();
        let err = build_draft(&cart, &selection, Some(&table), &AuthState::Guest, "").unwrap_err();
        assert_eq!(err.code, ErrorCode::NoItemsSelected);
    }

    #[test]
    fn test_auth_required() {
        let (cart, selection) = populated_cart();
        let table = table();
        let err = build_draft(&cart, &selection, Some(&table), &AuthState::Guest, "").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }
}
