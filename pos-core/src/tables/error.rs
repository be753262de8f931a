use crate::core::ErrorKind;
use shared::error::ErrorCode;
use shared::models::TableStatus;
use shared::types::{LayoutId, TableId};
use thiserror::Error;

/// Floor plan errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FloorPlanError {
    #[error("Table not found: {0}")]
    TableNotFound(TableId),

    #[error("Layout not found: {0}")]
    LayoutNotFound(LayoutId),

    #[error("Layout already exists: {0}")]
    DuplicateLayout(LayoutId),

    #[error("Table id already exists: {0}")]
    DuplicateTableId(TableId),

    #[error("Table name '{name}' already used in layout {layout_id}")]
    DuplicateTableName { layout_id: LayoutId, name: String },

    #[error("Table {table_id} cannot go from {from} to {to}")]
    InvalidTransition {
        table_id: TableId,
        from: TableStatus,
        to: TableStatus,
    },

    #[error("Table {table_id} is a merge member; use primary {primary_id}")]
    NotPrimary { table_id: TableId, primary_id: TableId },

    #[error("Table {table_id} is not available (status: {status})")]
    NotAvailable { table_id: TableId, status: TableStatus },

    #[error("Table {0} is already merged")]
    AlreadyMerged(TableId),

    #[error("Table {0} is not merged")]
    NotMerged(TableId),

    #[error("Merging requires at least two distinct tables, got {0}")]
    NotEnoughTables(usize),

    #[error("Table capacity must be at least 1")]
    InvalidCapacity,
}

impl FloorPlanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FloorPlanError::TableNotFound(_) | FloorPlanError::LayoutNotFound(_) => {
                ErrorKind::NotFound
            }
            FloorPlanError::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            FloorPlanError::DuplicateLayout(_)
            | FloorPlanError::DuplicateTableId(_)
            | FloorPlanError::DuplicateTableName { .. }
            | FloorPlanError::NotPrimary { .. }
            | FloorPlanError::NotAvailable { .. }
            | FloorPlanError::AlreadyMerged(_) => ErrorKind::Conflict,
            FloorPlanError::NotMerged(_)
            | FloorPlanError::NotEnoughTables(_)
            | FloorPlanError::InvalidCapacity => ErrorKind::InvalidInput,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            FloorPlanError::TableNotFound(_) => ErrorCode::TableNotFound,
            FloorPlanError::LayoutNotFound(_) => ErrorCode::LayoutNotFound,
            FloorPlanError::DuplicateLayout(_) | FloorPlanError::DuplicateTableId(_) => {
                ErrorCode::AlreadyExists
            }
            FloorPlanError::DuplicateTableName { .. } => ErrorCode::TableNameExists,
            FloorPlanError::InvalidTransition { .. } => ErrorCode::InvalidTableTransition,
            FloorPlanError::NotAvailable { .. } => ErrorCode::TableNotAvailable,
            FloorPlanError::NotPrimary { .. }
            | FloorPlanError::AlreadyMerged(_)
            | FloorPlanError::NotMerged(_) => ErrorCode::TableMergeConflict,
            FloorPlanError::NotEnoughTables(_) | FloorPlanError::InvalidCapacity => {
                ErrorCode::ValidationFailed
            }
        }
    }
}

pub type FloorPlanResult<T> = Result<T, FloorPlanError>;
