//! Reference data models
//!
//! - `catalog`: menu items with sizes, add-ons and modifier groups
//! - `dining_table`: tables, merge groups and floor plan layouts

pub mod catalog;
pub mod dining_table;

pub use catalog::{AddOnOption, CatalogItem, ModifierGroup, ModifierOption, SizeOption};
pub use dining_table::{FloorPlanLayout, MergeGroup, Table, TableDraft, TableStatus};
