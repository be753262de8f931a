//! Menu Catalog Model
//!
//! Read-only reference data owned by menu management. The session core
//! looks items up by id and never mutates them.

use crate::types::MenuItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog item (菜品)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: MenuItemId,
    pub name: String,
    /// Base price in currency units
    pub base_price: Decimal,
    #[serde(default)]
    pub sizes: Vec<SizeOption>,
    #[serde(default)]
    pub add_ons: Vec<AddOnOption>,
    #[serde(default)]
    pub modifier_groups: Vec<ModifierGroup>,
}

impl CatalogItem {
    pub fn size(&self, id: &str) -> Option<&SizeOption> {
        self.sizes.iter().find(|s| s.id == id)
    }

    pub fn add_on(&self, id: &str) -> Option<&AddOnOption> {
        self.add_ons.iter().find(|a| a.id == id)
    }

    pub fn modifier_group(&self, id: &str) -> Option<&ModifierGroup> {
        self.modifier_groups.iter().find(|g| g.id == id)
    }
}

/// Size variant; `price_modifier` may be negative (e.g. small portion)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SizeOption {
    pub id: String,
    pub name: String,
    pub price_modifier: Decimal,
}

/// Add-on (extra cheese, extra shot)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddOnOption {
    pub id: String,
    pub name: String,
    pub price: Decimal,
}

/// Structured modifier category (sauce, doneness, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModifierGroup {
    /// Modifier category id
    pub id: String,
    pub name: String,
    /// Maximum number of options that may be picked; `None` = unlimited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<u32>,
    pub options: Vec<ModifierOption>,
}

impl ModifierGroup {
    pub fn option(&self, id: &str) -> Option<&ModifierOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModifierOption {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
}
