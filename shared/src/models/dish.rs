//! Dish Model

use serde::{Deserialize, Serialize};

/// Catalog dish (read model, owned by the menu service)
///
/// Consumed only to validate add-to-cart; `price` and `stock` are
/// snapshotted into the cart line at add time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: i64,
    pub name: String,
    /// Price in minor currency units (cents)
    pub price: i64,
    pub stock: u32,
    pub image: String,
}

impl Dish {
    /// Whether the dish can currently be added to a cart
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_stock() {
        let mut dish = Dish {
            id: 1,
            name: "Mapo Tofu".to_string(),
            price: 2800,
            stock: 5,
            image: "/images/mapo.png".to_string(),
        };
        assert!(dish.in_stock());

        dish.stock = 0;
        assert!(!dish.in_stock());
    }

    #[test]
    fn test_serialize_camel_case() {
        let dish = Dish {
            id: 7,
            name: "Tea".to_string(),
            price: 600,
            stock: 99,
            image: String::new(),
        };
        let json = serde_json::to_string(&dish).unwrap();
        assert!(json.contains("\"id\":7"));
        assert!(json.contains("\"price\":600"));
    }
}
