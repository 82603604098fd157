//! Shared types for the table-ordering client
//!
//! Common types used across the workspace: domain models (cart lines,
//! tables, orders), the unified error system, and minor-unit money
//! helpers.

pub mod error;
pub mod models;
pub mod money;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
