//! Coursing Coordinator
//!
//! Tracks which kitchen course each line item belongs to and which courses
//! have been sent. Operations on an unknown order initialize it first.

use shared::order::CourseAssignment;
use shared::types::{LineItemId, OrderId};
use std::collections::{BTreeSet, HashMap};

/// Per-order course assignments
#[derive(Debug, Default)]
pub struct CoursingCoordinator {
    assignments: HashMap<OrderId, CourseAssignment>,
}

impl CoursingCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking an order at course 1. No-op if already tracked.
    pub fn initialize_for_order(&mut self, order_id: &str) {
        self.entry(order_id);
    }

    /// Manually put an item into a course (clamped to >= 1)
    pub fn set_item_course(&mut self, order_id: &str, item_id: &str, course: u32) {
        let course = course.max(1);
        self.entry(order_id)
            .item_course_map
            .insert(item_id.to_string(), course);
        tracing::debug!(order_id = %order_id, item_id = %item_id, course, "Item course set");
    }

    /// Manually set the course that newly finalized items fall into
    pub fn set_current_course(&mut self, order_id: &str, course: u32) {
        self.entry(order_id).current_course = course.max(1);
    }

    /// Finalize `item_ids` into the kitchen and advance the current course
    ///
    /// Items without a course entry fall into the current course; manual
    /// entries are kept. Returns the next course: one past the highest
    /// assigned course, or the unchanged current course when nothing is
    /// assigned.
    pub fn finalize_current_course<'a, I>(&mut self, order_id: &str, item_ids: I) -> u32
    where
        I: IntoIterator<Item = &'a LineItemId>,
    {
        let assignment = self.entry(order_id);
        let current = assignment.current_course;

        let mut finalized = 0usize;
        for item_id in item_ids {
            assignment
                .item_course_map
                .entry(item_id.clone())
                .or_insert(current);
            if assignment.finalized_items.insert(item_id.clone()) {
                finalized += 1;
            }
        }

        if let Some(max) = assignment.max_assigned_course() {
            assignment.current_course = max + 1;
        }

        tracing::debug!(
            order_id = %order_id,
            course = current,
            finalized,
            next_course = assignment.current_course,
            "Course finalized"
        );
        assignment.current_course
    }

    /// Ids in `item_ids` not yet finalized, input order kept
    pub fn pending_items<'a, I>(&self, order_id: &str, item_ids: I) -> Vec<LineItemId>
    where
        I: IntoIterator<Item = &'a LineItemId>,
    {
        let assignment = self.assignments.get(order_id);
        item_ids
            .into_iter()
            .filter(|id| !assignment.is_some_and(|a| a.is_finalized(id)))
            .cloned()
            .collect()
    }

    pub fn is_finalized(&self, order_id: &str, item_id: &str) -> bool {
        self.assignments
            .get(order_id)
            .is_some_and(|a| a.is_finalized(item_id))
    }

    /// Record a course as sent. Returns `true` if it was not sent before.
    pub fn mark_course_sent(&mut self, order_id: &str, course: u32) -> bool {
        let inserted = self.entry(order_id).sent_courses.insert(course);
        if inserted {
            tracing::info!(order_id = %order_id, course, "Course marked sent");
        }
        inserted
    }

    pub fn assignment(&self, order_id: &str) -> Option<&CourseAssignment> {
        self.assignments.get(order_id)
    }

    pub fn course_of(&self, order_id: &str, item_id: &str) -> Option<u32> {
        self.assignments
            .get(order_id)?
            .item_course_map
            .get(item_id)
            .copied()
    }

    /// Item ids assigned to `course`, sorted
    pub fn items_in_course(&self, order_id: &str, course: u32) -> Vec<LineItemId> {
        self.assignments
            .get(order_id)
            .map(|a| {
                a.item_course_map
                    .iter()
                    .filter(|(_, c)| **c == course)
                    .map(|(id, _)| id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_course_sent(&self, order_id: &str, course: u32) -> bool {
        self.assignments
            .get(order_id)
            .is_some_and(|a| a.sent_courses.contains(&course))
    }

    /// Courses holding items that have not been marked sent
    pub fn unsent_courses(&self, order_id: &str) -> BTreeSet<u32> {
        self.assignments
            .get(order_id)
            .map(|a| a.courses().difference(&a.sent_courses).copied().collect())
            .unwrap_or_default()
    }

    /// Drop a line's manual course entry; finalized lines are kept
    pub fn forget_item(&mut self, order_id: &str, item_id: &str) -> Option<u32> {
        let assignment = self.assignments.get_mut(order_id)?;
        if assignment.is_finalized(item_id) {
            return None;
        }
        assignment.item_course_map.remove(item_id)
    }

    /// Stop tracking an order (archive)
    pub fn remove_order(&mut self, order_id: &str) -> Option<CourseAssignment> {
        self.assignments.remove(order_id)
    }

    fn entry(&mut self, order_id: &str) -> &mut CourseAssignment {
        self.assignments.entry(order_id.to_string()).or_default()
    }
}
