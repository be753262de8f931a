//! Order Session Module
//!
//! - **ledger**: [`OrderLedger`], the order aggregate plus the floor plan and
//!   coursing state it drives
//! - **projection**: receipt and kitchen ticket views
//! - **error**: [`OrderError`] and its mapping onto shared error codes
//!
//! # Data Flow
//!
//! ```text
//! UI action → OrderLedger → validate → commit
//!                                        ↓
//!                            LedgerEvent broadcast
//!                                        ↓
//!                     printer / kitchen display / analytics
//! ```

pub mod error;
pub mod ledger;
pub mod projection;

// Re-exports
pub use error::{OrderError, OrderResult};
pub use ledger::{OPEN_ITEM_MENU_ID, OrderLedger};

// Re-export shared types for convenience
pub use shared::order::{
    CartLineItem, LedgerEvent, LedgerEventPayload, LineItemRequest, Order, OrderDetailsPatch,
    OrderStatus, OrderType, PaidStatus,
};
