//! Shared types for the POS session core
//!
//! Plain data model used by the session core and its consumers
//! (floor plan, kitchen line, bill, payment screens): orders, line items,
//! catalog reference data, tables, courses, receipts, and the unified
//! error codes.

pub mod error;
pub mod models;
pub mod order;
pub mod types;
pub mod util;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use types::{LayoutId, LineItemId, MenuItemId, OrderId, TableId, Timestamp};
