//! Floor plan state: layouts, tables, merge groups, selection

use super::error::{FloorPlanError, FloorPlanResult};
use shared::models::{FloorPlanLayout, MergeGroup, Table, TableDraft, TableStatus};
use shared::types::{LayoutId, TableId};
use std::collections::{BTreeSet, HashMap};

/// All layouts and tables of one venue
#[derive(Debug, Default)]
pub struct TableFloorPlan {
    /// Layouts in creation order
    layouts: Vec<FloorPlanLayout>,
    tables: HashMap<TableId, Table>,
    /// Tables picked for a new or merged order, in pick order
    selection: Vec<TableId>,
}

impl TableFloorPlan {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Layout management ==========

    pub fn add_layout(
        &mut self,
        id: impl Into<LayoutId>,
        name: impl Into<String>,
    ) -> FloorPlanResult<&FloorPlanLayout> {
        let id = id.into();
        if self.layouts.iter().any(|l| l.id == id) {
            return Err(FloorPlanError::DuplicateLayout(id));
        }
        tracing::info!(layout_id = %id, "Layout added");
        self.layouts.push(FloorPlanLayout {
            id,
            name: name.into(),
            table_ids: Vec::new(),
        });
        Ok(&self.layouts[self.layouts.len() - 1])
    }

    pub fn add_table(&mut self, layout_id: &str, draft: TableDraft) -> FloorPlanResult<&Table> {
        if draft.capacity == 0 {
            return Err(FloorPlanError::InvalidCapacity);
        }
        if self.tables.contains_key(&draft.id) {
            return Err(FloorPlanError::DuplicateTableId(draft.id));
        }
        let layout_index = self.layout_index(layout_id)?;
        let name_taken = self.layouts[layout_index]
            .table_ids
            .iter()
            .filter_map(|id| self.tables.get(id))
            .any(|t| t.name == draft.name);
        if name_taken {
            return Err(FloorPlanError::DuplicateTableName {
                layout_id: layout_id.to_string(),
                name: draft.name,
            });
        }

        let table = Table {
            id: draft.id.clone(),
            layout_id: layout_id.to_string(),
            name: draft.name,
            capacity: draft.capacity,
            x: draft.x,
            y: draft.y,
            status: TableStatus::Available,
            merged_with: None,
        };
        tracing::info!(table_id = %table.id, layout_id = %layout_id, capacity = table.capacity, "Table added");

        self.layouts[layout_index].table_ids.push(draft.id.clone());
        Ok(self.tables.entry(draft.id).or_insert(table))
    }

    pub fn move_table(&mut self, table_id: &str, x: f64, y: f64) -> FloorPlanResult<()> {
        let table = self.table_mut(table_id)?;
        table.x = x;
        table.y = y;
        Ok(())
    }

    pub fn set_capacity(&mut self, table_id: &str, capacity: u32) -> FloorPlanResult<()> {
        if capacity == 0 {
            return Err(FloorPlanError::InvalidCapacity);
        }
        self.table_mut(table_id)?.capacity = capacity;
        Ok(())
    }

    /// Remove an Available, unmerged table
    pub(crate) fn remove_table(&mut self, table_id: &str) -> FloorPlanResult<Table> {
        let table = self.get(table_id)?;
        if table.status != TableStatus::Available {
            return Err(FloorPlanError::NotAvailable {
                table_id: table.id.clone(),
                status: table.status,
            });
        }
        if table.is_merged() {
            return Err(FloorPlanError::AlreadyMerged(table.id.clone()));
        }

        let removed = self
            .tables
            .remove(table_id)
            .ok_or_else(|| FloorPlanError::TableNotFound(table_id.to_string()))?;
        for layout in &mut self.layouts {
            layout.table_ids.retain(|id| id != table_id);
        }
        self.selection.retain(|id| id != table_id);
        tracing::info!(table_id = %table_id, "Table removed");
        Ok(removed)
    }

    // ========== Selection ==========

    /// Toggle a table in the selection; returns `true` when now selected
    pub fn toggle_table_selection(&mut self, table_id: &str) -> FloorPlanResult<bool> {
        if let Some(pos) = self.selection.iter().position(|id| id == table_id) {
            self.selection.remove(pos);
            return Ok(false);
        }

        let table = self.get(table_id)?;
        if table.status != TableStatus::Available {
            return Err(FloorPlanError::NotAvailable {
                table_id: table.id.clone(),
                status: table.status,
            });
        }
        if table.is_merged() {
            return Err(FloorPlanError::AlreadyMerged(table.id.clone()));
        }
        self.selection.push(table_id.to_string());
        Ok(true)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &[TableId] {
        &self.selection
    }

    // ========== Status ==========

    /// Change a table's status; a primary carries its whole group
    ///
    /// Returns the ids that changed (empty when already in `status`).
    pub(crate) fn update_table_status(
        &mut self,
        table_id: &str,
        status: TableStatus,
    ) -> FloorPlanResult<Vec<TableId>> {
        let table = self.get(table_id)?;
        if table.is_merged() && !table.is_primary() {
            return Err(FloorPlanError::NotPrimary {
                table_id: table.id.clone(),
                primary_id: table.primary_id().to_string(),
            });
        }

        let targets: Vec<TableId> = match &table.merged_with {
            Some(group) => group.members.iter().cloned().collect(),
            None => vec![table.id.clone()],
        };

        // Validate every member before writing any
        let mut changed = Vec::with_capacity(targets.len());
        for id in &targets {
            let member = self.get(id)?;
            if member.status == status {
                continue;
            }
            if !member.status.can_transition_to(status) {
                return Err(FloorPlanError::InvalidTransition {
                    table_id: member.id.clone(),
                    from: member.status,
                    to: status,
                });
            }
            changed.push(id.clone());
        }

        for id in &changed {
            if let Some(member) = self.tables.get_mut(id) {
                member.status = status;
            }
        }
        if status != TableStatus::Available {
            self.selection.retain(|id| !changed.contains(id));
        }
        if !changed.is_empty() {
            tracing::info!(table_id = %table_id, status = %status, tables = ?changed, "Table status updated");
        }
        Ok(changed)
    }

    /// On order close: every listed table and its group goes to
    /// `NeedsCleaning` (except `NotInService`) and merges are dissolved
    ///
    /// Returns the ids whose status changed. Unknown ids are skipped.
    pub(crate) fn release_tables(&mut self, table_ids: &[TableId]) -> Vec<TableId> {
        let mut affected: BTreeSet<TableId> = BTreeSet::new();
        for id in table_ids {
            match self.tables.get(id) {
                Some(table) => match &table.merged_with {
                    Some(group) => affected.extend(group.members.iter().cloned()),
                    None => {
                        affected.insert(id.clone());
                    }
                },
                None => tracing::warn!(table_id = %id, "Release of unknown table skipped"),
            }
        }

        let mut changed = Vec::new();
        for id in &affected {
            if let Some(table) = self.tables.get_mut(id) {
                table.merged_with = None;
                if table.status != TableStatus::NotInService
                    && table.status != TableStatus::NeedsCleaning
                {
                    table.status = TableStatus::NeedsCleaning;
                    changed.push(id.clone());
                }
            }
        }
        self.selection.retain(|id| !affected.contains(id));
        tracing::info!(tables = ?affected, "Tables released");
        changed
    }

    // ========== Merge ==========

    /// Merge tables into one group; the first id becomes the primary
    pub(crate) fn merge_selected(&mut self, table_ids: &[TableId]) -> FloorPlanResult<TableId> {
        let mut ordered: Vec<TableId> = Vec::with_capacity(table_ids.len());
        for id in table_ids {
            if !ordered.contains(id) {
                ordered.push(id.clone());
            }
        }
        if ordered.len() < 2 {
            return Err(FloorPlanError::NotEnoughTables(ordered.len()));
        }

        for id in &ordered {
            let table = self.get(id)?;
            if table.status != TableStatus::Available {
                return Err(FloorPlanError::NotAvailable {
                    table_id: table.id.clone(),
                    status: table.status,
                });
            }
            if table.is_merged() {
                return Err(FloorPlanError::AlreadyMerged(table.id.clone()));
            }
        }

        let primary_id = ordered[0].clone();
        let group = MergeGroup {
            primary_id: primary_id.clone(),
            members: ordered.iter().cloned().collect(),
        };
        for id in &ordered {
            if let Some(table) = self.tables.get_mut(id) {
                table.merged_with = Some(group.clone());
            }
        }
        self.selection.retain(|id| !group.members.contains(id));

        tracing::info!(primary_id = %primary_id, members = ?group.members, "Tables merged");
        Ok(primary_id)
    }

    /// Dissolve the group `table_id` belongs to; all members must be Available
    pub(crate) fn unmerge(&mut self, table_id: &str) -> FloorPlanResult<Vec<TableId>> {
        let table = self.get(table_id)?;
        let group = table
            .merged_with
            .clone()
            .ok_or_else(|| FloorPlanError::NotMerged(table_id.to_string()))?;

        for id in &group.members {
            let member = self.get(id)?;
            if member.status != TableStatus::Available {
                return Err(FloorPlanError::NotAvailable {
                    table_id: member.id.clone(),
                    status: member.status,
                });
            }
        }
        for id in &group.members {
            if let Some(member) = self.tables.get_mut(id) {
                member.merged_with = None;
            }
        }
        tracing::info!(primary_id = %group.primary_id, "Tables unmerged");
        Ok(group.members.into_iter().collect())
    }

    /// Seats of the table, or of its whole merge group
    pub fn group_capacity(&self, table_id: &str) -> FloorPlanResult<u32> {
        let table = self.get(table_id)?;
        match &table.merged_with {
            Some(group) => Ok(group
                .members
                .iter()
                .filter_map(|id| self.tables.get(id))
                .map(|t| t.capacity)
                .sum()),
            None => Ok(table.capacity),
        }
    }

    // ========== Lookups ==========

    pub fn table(&self, table_id: &str) -> Option<&Table> {
        self.tables.get(table_id)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Tables of a layout in display order
    pub fn tables_in_layout(&self, layout_id: &str) -> FloorPlanResult<Vec<&Table>> {
        let layout = &self.layouts[self.layout_index(layout_id)?];
        Ok(layout
            .table_ids
            .iter()
            .filter_map(|id| self.tables.get(id))
            .collect())
    }

    pub fn layouts(&self) -> &[FloorPlanLayout] {
        &self.layouts
    }

    /// The table that carries the order binding for `table_id`
    pub fn resolve_primary(&self, table_id: &str) -> FloorPlanResult<TableId> {
        Ok(self.get(table_id)?.primary_id().to_string())
    }

    /// All tables served together with `table_id` (itself when unmerged)
    pub fn group_members(&self, table_id: &str) -> FloorPlanResult<Vec<TableId>> {
        let table = self.get(table_id)?;
        Ok(match &table.merged_with {
            Some(group) => group.members.iter().cloned().collect(),
            None => vec![table.id.clone()],
        })
    }

    fn get(&self, table_id: &str) -> FloorPlanResult<&Table> {
        self.tables
            .get(table_id)
            .ok_or_else(|| FloorPlanError::TableNotFound(table_id.to_string()))
    }

    fn table_mut(&mut self, table_id: &str) -> FloorPlanResult<&mut Table> {
        self.tables
            .get_mut(table_id)
            .ok_or_else(|| FloorPlanError::TableNotFound(table_id.to_string()))
    }

    fn layout_index(&self, layout_id: &str) -> FloorPlanResult<usize> {
        self.layouts
            .iter()
            .position(|l| l.id == layout_id)
            .ok_or_else(|| FloorPlanError::LayoutNotFound(layout_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;

    fn draft(id: &str, capacity: u32) -> TableDraft {
        TableDraft {
            id: id.to_string(),
            name: format!("Table {}", id),
            capacity,
            x: 0.0,
            y: 0.0,
        }
    }

    fn ids(items: &[&str]) -> Vec<TableId> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn plan() -> TableFloorPlan {
        let mut plan = TableFloorPlan::new();
        plan.add_layout("main", "Main hall").unwrap();
        for (id, cap) in [("T1", 2), ("T2", 4), ("T3", 4), ("T4", 6)] {
            plan.add_table("main", draft(id, cap)).unwrap();
        }
        plan
    }

    #[test]
    fn test_layout_management() {
        let mut plan = plan();
        assert_eq!(plan.tables_in_layout("main").unwrap().len(), 4);

        let err = plan.add_table("main", draft("T1", 2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let mut dup_name = draft("T9", 2);
        dup_name.name = "Table T2".to_string();
        assert!(matches!(
            plan.add_table("main", dup_name),
            Err(FloorPlanError::DuplicateTableName { .. })
        ));

        // Same name is fine in another layout
        plan.add_layout("patio", "Patio").unwrap();
        let mut other = draft("P1", 2);
        other.name = "Table T2".to_string();
        plan.add_table("patio", other).unwrap();

        assert_eq!(
            plan.add_table("nowhere", draft("X", 2)).unwrap_err().kind(),
            ErrorKind::NotFound
        );

        plan.move_table("T1", 10.0, 20.0).unwrap();
        plan.set_capacity("T1", 3).unwrap();
        let t1 = plan.table("T1").unwrap();
        assert_eq!((t1.x, t1.y, t1.capacity), (10.0, 20.0, 3));
        assert_eq!(plan.set_capacity("T1", 0), Err(FloorPlanError::InvalidCapacity));
    }

    #[test]
    fn test_remove_table() {
        let mut plan = plan();
        plan.toggle_table_selection("T3").unwrap();
        plan.remove_table("T3").unwrap();
        assert!(plan.table("T3").is_none());
        assert!(plan.selection().is_empty());
        assert_eq!(plan.layouts()[0].table_ids, ids(&["T1", "T2", "T4"]));

        plan.update_table_status("T4", TableStatus::InUse).unwrap();
        assert_eq!(plan.remove_table("T4").unwrap_err().kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_status_machine_enforced() {
        let mut plan = plan();
        let err = plan
            .update_table_status("T1", TableStatus::NeedsCleaning)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);

        plan.update_table_status("T1", TableStatus::InUse).unwrap();
        plan.update_table_status("T1", TableStatus::NeedsCleaning).unwrap();
        plan.update_table_status("T1", TableStatus::NotInService).unwrap();
        assert!(plan.update_table_status("T1", TableStatus::InUse).is_err());
        plan.update_table_status("T1", TableStatus::Available).unwrap();
    }

    #[test]
    fn test_same_status_is_noop() {
        let mut plan = plan();
        let changed = plan
            .update_table_status("T1", TableStatus::Available)
            .unwrap();
        assert!(changed.is_empty());
    }

    #[test]
    fn test_selection_rules() {
        let mut plan = plan();
        assert!(plan.toggle_table_selection("T1").unwrap());
        assert!(plan.toggle_table_selection("T2").unwrap());
        assert_eq!(plan.selection(), ids(&["T1", "T2"]).as_slice());
        assert!(!plan.toggle_table_selection("T1").unwrap());
        assert_eq!(plan.selection(), ids(&["T2"]).as_slice());

        plan.update_table_status("T3", TableStatus::InUse).unwrap();
        assert_eq!(
            plan.toggle_table_selection("T3").unwrap_err().kind(),
            ErrorKind::Conflict
        );

        plan.update_table_status("T2", TableStatus::NotInService).unwrap();
        assert!(plan.selection().is_empty());

        plan.toggle_table_selection("T1").unwrap();
        plan.clear_selection();
        assert!(plan.selection().is_empty());
    }

    #[test]
    fn test_merge_selected() {
        let mut plan = plan();
        plan.toggle_table_selection("T1").unwrap();
        plan.toggle_table_selection("T2").unwrap();

        let primary = plan.merge_selected(&ids(&["T1", "T2"])).unwrap();
        assert_eq!(primary, "T1");
        assert!(plan.selection().is_empty());

        let t2 = plan.table("T2").unwrap();
        assert_eq!(t2.primary_id(), "T1");
        assert!(!t2.is_primary());
        assert!(plan.table("T1").unwrap().is_primary());
        assert_eq!(plan.resolve_primary("T2").unwrap(), "T1");
        assert_eq!(plan.group_capacity("T2").unwrap(), 6);
        assert_eq!(plan.group_members("T1").unwrap(), ids(&["T1", "T2"]));

        // A table never belongs to two groups
        let err = plan.merge_selected(&ids(&["T2", "T3"])).unwrap_err();
        assert_eq!(err, FloorPlanError::AlreadyMerged("T2".to_string()));
    }

    #[test]
    fn test_merge_validation() {
        let mut plan = plan();
        assert_eq!(
            plan.merge_selected(&ids(&["T1", "T1"])).unwrap_err(),
            FloorPlanError::NotEnoughTables(1)
        );
        assert_eq!(
            plan.merge_selected(&ids(&["T1", "T99"])).unwrap_err().kind(),
            ErrorKind::NotFound
        );

        plan.update_table_status("T2", TableStatus::InUse).unwrap();
        assert_eq!(
            plan.merge_selected(&ids(&["T1", "T2"])).unwrap_err().kind(),
            ErrorKind::Conflict
        );
        assert!(!plan.table("T1").unwrap().is_merged());
    }

    #[test]
    fn test_merge_selection_uses_pick_order() {
        let mut plan = plan();
        plan.toggle_table_selection("T4").unwrap();
        plan.toggle_table_selection("T3").unwrap();
        let picked = plan.selection().to_vec();
        assert_eq!(plan.merge_selected(&picked).unwrap(), "T4");
    }

    #[test]
    fn test_group_status_propagates_atomically() {
        let mut plan = plan();
        plan.merge_selected(&ids(&["T1", "T2", "T3"])).unwrap();

        let changed = plan.update_table_status("T1", TableStatus::InUse).unwrap();
        assert_eq!(changed.len(), 3);
        for id in ["T1", "T2", "T3"] {
            assert_eq!(plan.table(id).unwrap().status, TableStatus::InUse);
        }

        // Member cannot be targeted directly
        let err = plan
            .update_table_status("T2", TableStatus::NeedsCleaning)
            .unwrap_err();
        assert!(matches!(err, FloorPlanError::NotPrimary { .. }));

        // Invalid for the group -> nothing written
        assert!(plan.update_table_status("T1", TableStatus::Available).is_err());
        assert_eq!(plan.table("T3").unwrap().status, TableStatus::InUse);
    }

    #[test]
    fn test_release_tables() {
        let mut plan = plan();
        plan.merge_selected(&ids(&["T1", "T2"])).unwrap();
        plan.update_table_status("T1", TableStatus::InUse).unwrap();
        plan.update_table_status("T4", TableStatus::NotInService).unwrap();

        let changed = plan.release_tables(&ids(&["T1", "T4", "ghost"]));
        assert_eq!(changed, ids(&["T1", "T2"]));
        for id in ["T1", "T2"] {
            let t = plan.table(id).unwrap();
            assert_eq!(t.status, TableStatus::NeedsCleaning);
            assert!(!t.is_merged());
        }
        assert_eq!(plan.table("T4").unwrap().status, TableStatus::NotInService);
    }

    #[test]
    fn test_unmerge() {
        let mut plan = plan();
        plan.merge_selected(&ids(&["T3", "T4"])).unwrap();
        assert_eq!(plan.unmerge("T4").unwrap(), ids(&["T3", "T4"]));
        assert!(!plan.table("T3").unwrap().is_merged());
        assert!(matches!(plan.unmerge("T3"), Err(FloorPlanError::NotMerged(_))));

        plan.merge_selected(&ids(&["T3", "T4"])).unwrap();
        plan.update_table_status("T3", TableStatus::InUse).unwrap();
        assert_eq!(plan.unmerge("T3").unwrap_err().kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_table_json_roundtrip() {
        let mut plan = plan();
        plan.merge_selected(&ids(&["T1", "T2"])).unwrap();
        let table = plan.table("T2").unwrap().clone();
        let json = serde_json::to_string(&table).unwrap();
        let back: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);

        let layout = plan.layouts()[0].clone();
        let back: FloorPlanLayout = serde_json::from_str(&serde_json::to_string(&layout).unwrap()).unwrap();
        assert_eq!(back, layout);
    }
}
