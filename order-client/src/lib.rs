//! Table-ordering client core
//!
//! The cart/order lifecycle for a scan-to-order restaurant client:
//! table binding, a persisted cart with stock invariants, checkout
//! selection, draft assembly, and the order-creation/payment protocol.
//!
//! External collaborators (key-value persistence, order service,
//! payment gateway, table binding service) are abstract contracts in
//! [`collaborators`]; HTTP-backed and in-memory implementations live in
//! [`http`] and [`mock`].

pub mod assembler;
pub mod cart;
pub mod checkout;
pub mod collaborators;
pub mod config;
pub mod http;
pub mod mock;
pub mod selection;
pub mod session;
pub mod table;

pub use cart::{CartStore, DecrementOutcome};
pub use checkout::{CheckoutOutcome, CheckoutProtocol, CheckoutState};
pub use collaborators::{KvStore, OrderService, PaymentGateway, PaymentOutcome, PaymentRequest, TableService};
pub use config::ClientConfig;
pub use http::HttpBackend;
pub use selection::SelectionModel;
pub use session::{AuthState, Session};
pub use table::{TableBinding, TableCode};

// Re-export shared types for convenience
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
