//! Order aggregate state

use super::types::{CartLineItem, OrderType};
use crate::types::{OrderId, TableId, Timestamp};
use serde::{Deserialize, Serialize};

/// Kitchen-facing order lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Building,
    Preparing,
    Ready,
    Closed,
}

impl OrderStatus {
    /// The only forward step allowed from this status
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Building => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Closed),
            OrderStatus::Closed => None,
        }
    }

    pub fn is_closed(self) -> bool {
        matches!(self, OrderStatus::Closed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Building => "BUILDING",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Closed => "CLOSED",
        };
        f.write_str(s)
    }
}

/// Payment axis, independent of [`OrderStatus`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaidStatus {
    #[default]
    Unpaid,
    Pending,
    Paid,
}

impl std::fmt::Display for PaidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaidStatus::Unpaid => "UNPAID",
            PaidStatus::Pending => "PENDING",
            PaidStatus::Paid => "PAID",
        };
        f.write_str(s)
    }
}

/// One customer transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub paid_status: PaidStatus,
    /// Primary table of the bound group (DineIn only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<TableId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<u32>,
    /// Insertion order reflects send order
    #[serde(default)]
    pub items: Vec<CartLineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    pub opened_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<Timestamp>,
}

impl Order {
    /// Create a new order in `Building` / `Unpaid`
    pub fn new(id: OrderId, order_type: OrderType, opened_at: Timestamp) -> Self {
        Self {
            id,
            order_type,
            status: OrderStatus::Building,
            paid_status: PaidStatus::Unpaid,
            table_id: None,
            guest_count: None,
            items: Vec::new(),
            customer_name: None,
            customer_phone: None,
            delivery_address: None,
            opened_at,
            closed_at: None,
        }
    }

    pub fn is_walkup(&self) -> bool {
        self.status == OrderStatus::Building && self.table_id.is_none()
    }

    pub fn item(&self, item_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.id == item_id)
    }
}

/// Partial update of customer / table fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderDetailsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_count: Option<u32>,
    /// Bind a table (DineIn only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<TableId>,
}

impl OrderDetailsPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
