use crate::core::ErrorKind;
use crate::pricing::PricingError;
use crate::tables::FloorPlanError;
use shared::error::{AppError, ErrorCode};
use shared::models::TableStatus;
use shared::order::{OrderStatus, OrderType, PaidStatus};
use shared::types::{LineItemId, MenuItemId, OrderId, TableId};
use thiserror::Error;

/// Order ledger errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("No active order")]
    NoActiveOrder,

    #[error("Order is closed: {0}")]
    OrderClosed(OrderId),

    #[error("Item not found: {0}")]
    ItemNotFound(LineItemId),

    #[error("Menu item not found: {0}")]
    MenuItemNotFound(MenuItemId),

    #[error("Order {order_id} cannot go from {from} to {to}")]
    InvalidStatusTransition {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Order {order_id} payment cannot go from {from} to {to}")]
    InvalidPaymentTransition {
        order_id: OrderId,
        from: PaidStatus,
        to: PaidStatus,
    },

    #[error("Order has no items: {0}")]
    EmptyOrder(OrderId),

    #[error("Nothing new to send for order {0}")]
    NothingToSend(OrderId),

    #[error("Item {item_id} was already sent to the kitchen")]
    ItemAlreadySent { item_id: LineItemId },

    #[error("Order {0} is paid and cannot be reopened")]
    AlreadyPaid(OrderId),

    #[error("Table {table_id} is occupied by order {order_id}")]
    TableOccupied { table_id: TableId, order_id: OrderId },

    #[error("Order {order_id} is already bound to table {table_id}")]
    TableAlreadyBound { order_id: OrderId, table_id: TableId },

    #[error("Table {table_id} is not available (status: {status})")]
    TableNotAvailable { table_id: TableId, status: TableStatus },

    #[error("Table {0} can only become IN_USE through payment")]
    ManualInUse(TableId),

    #[error("A walk-up order is already in progress: {0}")]
    WalkupOrderExists(OrderId),

    #[error("Guest count {guests} exceeds capacity {capacity} of table {table_id}")]
    CapacityExceeded {
        table_id: TableId,
        guests: u32,
        capacity: u32,
    },

    #[error("Only dine-in orders can be bound to a table, got {0:?}")]
    TableRequiresDineIn(OrderType),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    FloorPlan(#[from] FloorPlanError),
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::OrderNotFound(_)
            | OrderError::NoActiveOrder
            | OrderError::ItemNotFound(_)
            | OrderError::MenuItemNotFound(_) => ErrorKind::NotFound,
            OrderError::OrderClosed(_) => ErrorKind::OrderClosed,
            OrderError::InvalidStatusTransition { .. }
            | OrderError::InvalidPaymentTransition { .. }
            | OrderError::EmptyOrder(_)
            | OrderError::NothingToSend(_)
            | OrderError::ItemAlreadySent { .. }
            | OrderError::AlreadyPaid(_)
            | OrderError::ManualInUse(_) => ErrorKind::InvalidTransition,
            OrderError::TableOccupied { .. }
            | OrderError::TableAlreadyBound { .. }
            | OrderError::TableNotAvailable { .. }
            | OrderError::WalkupOrderExists(_) => ErrorKind::Conflict,
            OrderError::CapacityExceeded { .. }
            | OrderError::TableRequiresDineIn(_)
            | OrderError::InvalidRequest(_) => ErrorKind::InvalidInput,
            OrderError::Pricing(e) => e.kind(),
            OrderError::FloorPlan(e) => e.kind(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::OrderNotFound(_) => ErrorCode::OrderNotFound,
            OrderError::NoActiveOrder => ErrorCode::NoActiveOrder,
            OrderError::OrderClosed(_) => ErrorCode::OrderClosed,
            OrderError::ItemNotFound(_) => ErrorCode::OrderItemNotFound,
            OrderError::MenuItemNotFound(_) => ErrorCode::ProductNotFound,
            OrderError::InvalidStatusTransition { .. }
            | OrderError::InvalidPaymentTransition { .. }
            | OrderError::NothingToSend(_)
            | OrderError::ItemAlreadySent { .. } => ErrorCode::InvalidStatusTransition,
            OrderError::EmptyOrder(_) => ErrorCode::OrderEmpty,
            OrderError::AlreadyPaid(_) => ErrorCode::OrderAlreadyPaid,
            OrderError::TableOccupied { .. } | OrderError::TableAlreadyBound { .. } => {
                ErrorCode::TableOccupied
            }
            OrderError::TableNotAvailable { .. } => ErrorCode::TableNotAvailable,
            OrderError::ManualInUse(_) => ErrorCode::InvalidTableTransition,
            OrderError::WalkupOrderExists(_) => ErrorCode::WalkupOrderExists,
            OrderError::CapacityExceeded { .. } => ErrorCode::ValueOutOfRange,
            OrderError::TableRequiresDineIn(_) | OrderError::InvalidRequest(_) => {
                ErrorCode::ValidationFailed
            }
            OrderError::Pricing(e) => e.code(),
            OrderError::FloorPlan(e) => e.code(),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let kind = err.kind();
        let code = err.code();
        AppError::with_message(code, err.to_string())
            .with_detail("kind", kind.to_string())
            .with_detail("category", code.category().name())
    }
}

pub type OrderResult<T> = Result<T, OrderError>;
