//! Unified error codes for the ordering client
//!
//! Error codes are shared between the client core and its HTTP
//! collaborators, organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Dish / cart errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes are represented as u16 values for efficient serialization and
/// cross-language compatibility with the server envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,

    // ==================== 4xxx: Order ====================
    /// Order creation failed
    OrderCreateFailed = 4001,
    /// Order not found
    OrderNotFound = 4002,
    /// No cart lines selected for checkout
    NoItemsSelected = 4003,
    /// A submit attempt is already in flight
    AlreadySubmitting = 4004,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Payment cancelled by the user
    PaymentCancelled = 5002,

    // ==================== 6xxx: Dish / Cart ====================
    /// Dish is out of stock
    DishOutOfStock = 6001,
    /// Quantity already at the stock ceiling
    StockLimitReached = 6002,
    /// Cart line not found
    CartItemNotFound = 6003,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// No table bound to the session
    TableNotBound = 7002,
    /// Table code could not be parsed
    InvalidTableCode = 7003,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Storage error
    StorageError = 9002,
    /// Network error
    NetworkError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",

            // Order
            ErrorCode::OrderCreateFailed => "Order creation failed",
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::NoItemsSelected => "No items selected for checkout",
            ErrorCode::AlreadySubmitting => "A submit attempt is already in flight",

            // Payment
            ErrorCode::PaymentFailed => "Payment processing failed",
            ErrorCode::PaymentCancelled => "Payment cancelled by user",

            // Dish / Cart
            ErrorCode::DishOutOfStock => "Dish is out of stock",
            ErrorCode::StockLimitReached => "Stock limit reached",
            ErrorCode::CartItemNotFound => "Cart item not found",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableNotBound => "No table bound",
            ErrorCode::InvalidTableCode => "Invalid table code",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::NetworkError => "Network error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),

            // Order
            4001 => Ok(ErrorCode::OrderCreateFailed),
            4002 => Ok(ErrorCode::OrderNotFound),
            4003 => Ok(ErrorCode::NoItemsSelected),
            4004 => Ok(ErrorCode::AlreadySubmitting),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::PaymentCancelled),

            // Dish / Cart
            6001 => Ok(ErrorCode::DishOutOfStock),
            6002 => Ok(ErrorCode::StockLimitReached),
            6003 => Ok(ErrorCode::CartItemNotFound),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableNotBound),
            7003 => Ok(ErrorCode::InvalidTableCode),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::NetworkError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
