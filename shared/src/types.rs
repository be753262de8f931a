//! Common types for the shared crate
//!
//! Identifier aliases used across the session core

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Order identifier (UUID v4 string)
pub type OrderId = String;

/// Cart line item identifier (UUID v4 string)
pub type LineItemId = String;

/// Physical table identifier, e.g. "T5"
pub type TableId = String;

/// Floor plan layout identifier
pub type LayoutId = String;

/// Menu catalog item identifier
pub type MenuItemId = String;
