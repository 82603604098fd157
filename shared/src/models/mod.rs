//! Domain models
//!
//! Data carried between the client core and its collaborators. Field
//! names serialize in camelCase to match the server envelope.

pub mod cart;
pub mod dish;
pub mod order;
pub mod table;

pub use cart::LineItem;
pub use dish::Dish;
pub use order::{DraftItem, OrderDraft, OrderStatus, PersistedOrder};
pub use table::{BoundTable, TableContext, TableStatus};
