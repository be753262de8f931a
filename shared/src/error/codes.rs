//! Unified error codes for the POS session core
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Product / pricing errors
//! - 7xxx: Table errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource already exists
    AlreadyExists = 4,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order is closed and can no longer be mutated
    OrderClosed = 4002,
    /// Order status change not permitted from the current state
    InvalidStatusTransition = 4003,
    /// Order has no items
    OrderEmpty = 4004,
    /// Order line item not found
    OrderItemNotFound = 4006,
    /// A walk-up order is already being built
    WalkupOrderExists = 4008,
    /// No active order selected for this session
    NoActiveOrder = 4009,

    // ==================== 5xxx: Payment ====================
    /// Order has already been paid
    OrderAlreadyPaid = 5006,

    // ==================== 6xxx: Product ====================
    /// Catalog item not found
    ProductNotFound = 6001,
    /// Price is invalid (non-positive open item, negative unit price)
    ProductInvalidPrice = 6002,
    /// Size / add-on / modifier option not found
    SpecNotFound = 6201,
    /// Discount value is invalid
    InvalidDiscount = 6501,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table is bound to an active order
    TableOccupied = 7002,
    /// Table status does not allow this operation
    TableNotAvailable = 7004,
    /// Table status change not permitted
    InvalidTableTransition = 7005,
    /// Table merge group conflict
    TableMergeConflict = 7006,
    /// Floor plan layout not found
    LayoutNotFound = 7101,
    /// Table name already used in layout
    TableNameExists = 7102,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderClosed => "Order is closed",
            ErrorCode::InvalidStatusTransition => "Order status transition not permitted",
            ErrorCode::OrderEmpty => "Order is empty",
            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::WalkupOrderExists => "A walk-up order is already open",
            ErrorCode::NoActiveOrder => "No active order selected",

            // Payment
            ErrorCode::OrderAlreadyPaid => "Order has already been paid",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::SpecNotFound => "Product option not found",
            ErrorCode::InvalidDiscount => "Discount value is invalid",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableOccupied => "Table is occupied",
            ErrorCode::TableNotAvailable => "Table is not available",
            ErrorCode::InvalidTableTransition => "Table status transition not permitted",
            ErrorCode::TableMergeConflict => "Table merge conflict",
            ErrorCode::LayoutNotFound => "Floor plan layout not found",
            ErrorCode::TableNameExists => "Table name already exists in layout",
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
            2 => Ok(ErrorCode::ValidationFailed),
            4 => Ok(ErrorCode::AlreadyExists),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderClosed),
            4003 => Ok(ErrorCode::InvalidStatusTransition),
            4004 => Ok(ErrorCode::OrderEmpty),
            4006 => Ok(ErrorCode::OrderItemNotFound),
            4008 => Ok(ErrorCode::WalkupOrderExists),
            4009 => Ok(ErrorCode::NoActiveOrder),

            // Payment
            5006 => Ok(ErrorCode::OrderAlreadyPaid),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6201 => Ok(ErrorCode::SpecNotFound),
            6501 => Ok(ErrorCode::InvalidDiscount),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableOccupied),
            7004 => Ok(ErrorCode::TableNotAvailable),
            7005 => Ok(ErrorCode::InvalidTableTransition),
            7006 => Ok(ErrorCode::TableMergeConflict),
            7101 => Ok(ErrorCode::LayoutNotFound),
            7102 => Ok(ErrorCode::TableNameExists),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
