//! Unified error system for the ordering client
//!
//! - [`ErrorCode`]: standardized error codes for all failure types
//! - [`AppError`]: error type carrying a code, message, and details
//! - [`ApiResponse`]: the `{code, message, data}` envelope used by the
//!   HTTP collaborators
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Dish / cart errors
//! - 7xxx: Table errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::StockLimitReached);
//! assert_eq!(err.code.code(), 6002);
//!
//! let err = AppError::with_message(ErrorCode::InvalidTableCode, "empty scan payload");
//! assert_eq!(err.message, "empty scan payload");
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
