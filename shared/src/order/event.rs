//! Ledger events
//!
//! Broadcast after a mutation has committed, so side-effect collaborators
//! (printer, kitchen display, analytics) never act on uncommitted state.

use super::snapshot::{OrderStatus, PaidStatus};
use crate::models::TableStatus;
use crate::types::{LineItemId, OrderId, TableId, Timestamp};
use serde::{Deserialize, Serialize};

/// Event envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEvent {
    /// Monotonic per-session sequence
    pub sequence: u64,
    pub timestamp: Timestamp,
    pub payload: LedgerEventPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerEventPayload {
    OrderOpened {
        order_id: OrderId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table_id: Option<TableId>,
    },
    ItemAdded {
        order_id: OrderId,
        item_id: LineItemId,
    },
    ItemUpdated {
        order_id: OrderId,
        item_id: LineItemId,
    },
    ItemRemoved {
        order_id: OrderId,
        item_id: LineItemId,
    },
    /// Courses the sent lines landed in, ascending
    SentToKitchen {
        order_id: OrderId,
        courses: Vec<u32>,
    },
    StatusChanged {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },
    PaymentStatusChanged {
        order_id: OrderId,
        from: PaidStatus,
        to: PaidStatus,
    },
    DetailsUpdated {
        order_id: OrderId,
    },
    TableStatusChanged {
        table_ids: Vec<TableId>,
        status: TableStatus,
    },
    OrderArchived {
        order_id: OrderId,
    },
}
