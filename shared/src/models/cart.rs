//! Cart line model

use super::dish::Dish;
use serde::{Deserialize, Serialize};

/// One dish instance in the cart
///
/// `unit_price` and `stock_limit` are snapshots of the catalog values
/// at add time; later catalog changes do not rewrite existing lines.
/// Invariant: `1 <= quantity <= stock_limit`, enforced by the cart
/// store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Stable identity, unique within a cart
    pub dish_id: i64,
    pub name: String,
    /// Unit price in minor currency units, snapshot at add time
    pub unit_price: i64,
    pub quantity: u32,
    /// Stock ceiling snapshot at add time
    pub stock_limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub image: String,
}

impl LineItem {
    /// Create a new line from a catalog dish with quantity 1
    pub fn from_dish(dish: &Dish) -> Self {
        Self {
            dish_id: dish.id,
            name: dish.name.clone(),
            unit_price: dish.price,
            quantity: 1,
            stock_limit: dish.stock,
            remark: None,
            image: dish.image.clone(),
        }
    }

    /// Line subtotal in minor units
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }

    /// Whether another unit can be added within the stock ceiling
    pub fn can_increment(&self) -> bool {
        self.quantity < self.stock_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish() -> Dish {
        Dish {
            id: 3,
            name: "Kung Pao Chicken".to_string(),
            price: 3200,
            stock: 4,
            image: "/images/kungpao.png".to_string(),
        }
    }

    #[test]
    fn test_from_dish_snapshots() {
        let line = LineItem::from_dish(&dish());
        assert_eq!(line.dish_id, 3);
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_price, 3200);
        assert_eq!(line.stock_limit, 4);
        assert!(line.remark.is_none());
    }

    #[test]
    fn test_line_total() {
        let mut line = LineItem::from_dish(&dish());
        line.quantity = 3;
        assert_eq!(line.line_total(), 9600);
    }

    #[test]
    fn test_can_increment() {
        let mut line = LineItem::from_dish(&dish());
        assert!(line.can_increment());
        line.quantity = 4;
        assert!(!line.can_increment());
    }
}
