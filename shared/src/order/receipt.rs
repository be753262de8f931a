//! Read-only projections handed to printers and the kitchen display

use super::types::OrderType;
use crate::types::{LineItemId, OrderId, TableId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flattened receipt for the printer. Money is rounded to 2 places.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptView {
    pub order_id: OrderId,
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<TableId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub lines: Vec<ReceiptLine>,
    pub order_total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Size, add-ons and modifiers as printable text
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    pub line_total: Decimal,
}

/// Kitchen ticket grouped by course
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KitchenTicket {
    pub order_id: OrderId,
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<TableId>,
    /// Ascending by course number
    pub courses: Vec<KitchenCourse>,
}

impl KitchenTicket {
    /// Courses not yet marked sent (the delta ticket)
    pub fn unsent(&self) -> impl Iterator<Item = &KitchenCourse> {
        self.courses.iter().filter(|c| !c.sent)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KitchenCourse {
    pub course: u32,
    pub sent: bool,
    pub items: Vec<KitchenTicketItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KitchenTicketItem {
    pub line_item_id: LineItemId,
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
