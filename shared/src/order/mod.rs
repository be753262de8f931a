//! Order Session Model
//!
//! This module provides types for the order/table session core:
//! - Line items and their customizations
//! - The order aggregate and its status axes
//! - Course assignments
//! - Receipt and kitchen ticket projections
//! - Ledger events

pub mod course;
pub mod event;
pub mod receipt;
pub mod snapshot;
pub mod types;

// Re-exports
pub use course::CourseAssignment;
pub use event::{LedgerEvent, LedgerEventPayload};
pub use receipt::{KitchenCourse, KitchenTicket, KitchenTicketItem, ReceiptLine, ReceiptView};
pub use snapshot::{Order, OrderDetailsPatch, OrderStatus, PaidStatus};
pub use types::*;
