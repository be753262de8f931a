//! Dining Table Model

use crate::types::{LayoutId, TableId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Table status
///
/// `Available → InUse → NeedsCleaning → Available`; `NotInService` is an
/// administrative state toggled by staff only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    #[default]
    Available,
    InUse,
    NeedsCleaning,
    NotInService,
}

impl TableStatus {
    /// Whether the floor plan state machine allows `self → next`.
    ///
    /// Same-status updates are not transitions and are handled by the caller.
    pub fn can_transition_to(self, next: TableStatus) -> bool {
        use TableStatus::*;
        matches!(
            (self, next),
            (Available, InUse)
                | (InUse, NeedsCleaning)
                | (NeedsCleaning, Available)
                | (Available, NotInService)
                | (NeedsCleaning, NotInService)
                | (NotInService, Available)
        )
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TableStatus::Available => "AVAILABLE",
            TableStatus::InUse => "IN_USE",
            TableStatus::NeedsCleaning => "NEEDS_CLEANING",
            TableStatus::NotInService => "NOT_IN_SERVICE",
        };
        f.write_str(s)
    }
}

/// A set of tables served as one unit.
///
/// The primary is stored explicitly so it never changes when the member
/// set is rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergeGroup {
    pub primary_id: TableId,
    /// Full member set, primary included
    pub members: BTreeSet<TableId>,
}

/// Dining table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Table {
    pub id: TableId,
    pub layout_id: LayoutId,
    /// Unique within its layout
    pub name: String,
    pub capacity: u32,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged_with: Option<MergeGroup>,
}

impl Table {
    pub fn is_merged(&self) -> bool {
        self.merged_with.is_some()
    }

    /// True for the primary of a merge group (unmerged tables are not primaries)
    pub fn is_primary(&self) -> bool {
        self.merged_with
            .as_ref()
            .is_some_and(|g| g.primary_id == self.id)
    }

    /// The table that carries the order binding for this table
    pub fn primary_id(&self) -> &str {
        self.merged_with
            .as_ref()
            .map(|g| g.primary_id.as_str())
            .unwrap_or(self.id.as_str())
    }
}

/// Create table payload (floor plan editor)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDraft {
    pub id: TableId,
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Floor plan layout (大厅、露台、包厢等)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FloorPlanLayout {
    pub id: LayoutId,
    pub name: String,
    /// Tables in display order
    #[serde(default)]
    pub table_ids: Vec<TableId>,
}
