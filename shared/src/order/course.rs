//! Per-order kitchen course tracking

use crate::types::LineItemId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Course assignment of one order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseAssignment {
    /// Course that newly finalized items fall into (>= 1)
    pub current_course: u32,
    pub item_course_map: BTreeMap<LineItemId, u32>,
    /// Items already handed to the kitchen by a finalize
    #[serde(default)]
    pub finalized_items: BTreeSet<LineItemId>,
    /// Only grows
    pub sent_courses: BTreeSet<u32>,
}

impl Default for CourseAssignment {
    fn default() -> Self {
        Self {
            current_course: 1,
            item_course_map: BTreeMap::new(),
            finalized_items: BTreeSet::new(),
            sent_courses: BTreeSet::new(),
        }
    }
}

impl CourseAssignment {
    /// Highest course any item is assigned to
    pub fn max_assigned_course(&self) -> Option<u32> {
        self.item_course_map.values().copied().max()
    }

    pub fn is_finalized(&self, item_id: &str) -> bool {
        self.finalized_items.contains(item_id)
    }

    /// Distinct courses that have at least one item, ascending
    pub fn courses(&self) -> BTreeSet<u32> {
        self.item_course_map.values().copied().collect()
    }
}
