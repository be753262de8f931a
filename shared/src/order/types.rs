//! Shared types for cart line items

use crate::types::{LineItemId, MenuItemId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Type
// ============================================================================

/// 服务类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// 堂食
    #[default]
    DineIn,
    /// 外带
    TakeAway,
    /// 外送
    Delivery,
    /// 线上渠道
    OnlineChannel,
}

// ============================================================================
// Customization Choices
// ============================================================================

/// Chosen size, snapshotted from the catalog at add time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SizeChoice {
    pub id: String,
    pub name: String,
    pub price_modifier: Decimal,
}

/// Chosen add-on, snapshotted from the catalog at add time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddOnChoice {
    pub id: String,
    pub name: String,
    pub price: Decimal,
}

/// One picked option inside a modifier category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModifierOptionChoice {
    pub id: String,
    pub name: String,
    pub price: Decimal,
}

/// Options picked for one modifier category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModifierChoice {
    pub category_id: String,
    pub category_name: String,
    pub options: Vec<ModifierOptionChoice>,
}

/// Resolved customizations of a line item
///
/// Open items carry only `notes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Customizations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeChoice>,
    /// Unique by id
    #[serde(default)]
    pub add_ons: Vec<AddOnChoice>,
    /// Ordered by selection
    #[serde(default)]
    pub modifiers: Vec<ModifierChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Customizations {
    pub fn notes_only(notes: Option<String>) -> Self {
        Self {
            notes,
            ..Default::default()
        }
    }

    pub fn size_id(&self) -> Option<&str> {
        self.size.as_ref().map(|s| s.id.as_str())
    }

    pub fn add_on_ids(&self) -> impl Iterator<Item = &str> {
        self.add_ons.iter().map(|a| a.id.as_str())
    }
}

// ============================================================================
// Discounts
// ============================================================================

/// 折扣类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    /// Fraction of the line total (0.1 = 10%)
    Percent,
    /// Fixed currency amount off the line total
    Amount,
}

/// Discount applied to one line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedDiscount {
    pub kind: DiscountKind,
    pub value: Decimal,
}

impl AppliedDiscount {
    pub fn percent(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Percent,
            value,
        }
    }

    pub fn amount(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Amount,
            value,
        }
    }
}

// ============================================================================
// Cart Line Item
// ============================================================================

/// One priced entry in an order's cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    pub id: LineItemId,
    /// Catalog item id (synthetic for open items)
    pub menu_item_id: MenuItemId,
    /// Name snapshot for tickets and receipts
    pub name: String,
    pub quantity: u32,
    /// Catalog base price at time of add (operator-entered for open items)
    pub original_price: Decimal,
    /// Effective unit price after size / add-ons / modifiers
    pub price: Decimal,
    #[serde(default)]
    pub customizations: Customizations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_discount: Option<AppliedDiscount>,
    #[serde(default)]
    pub is_open_item: bool,
}

// ============================================================================
// Line Item Requests
// ============================================================================

/// Options picked in one modifier category, by id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ModifierSelection {
    pub category_id: String,
    pub option_ids: Vec<String>,
}

/// Request to add a line item, as built by the menu screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineItemRequest {
    /// Item priced from the catalog
    Catalog {
        menu_item_id: MenuItemId,
        quantity: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size_id: Option<String>,
        #[serde(default)]
        add_on_ids: Vec<String>,
        #[serde(default)]
        modifiers: Vec<ModifierSelection>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        discount: Option<AppliedDiscount>,
    },
    /// Item with an operator-entered price
    Open {
        name: String,
        price: Decimal,
        quantity: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        discount: Option<AppliedDiscount>,
    },
}

impl LineItemRequest {
    /// Plain catalog item without customizations
    pub fn catalog(menu_item_id: impl Into<MenuItemId>, quantity: u32) -> Self {
        Self::Catalog {
            menu_item_id: menu_item_id.into(),
            quantity,
            size_id: None,
            add_on_ids: vec![],
            modifiers: vec![],
            notes: None,
            discount: None,
        }
    }

    pub fn open(name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self::Open {
            name: name.into(),
            price,
            quantity,
            notes: None,
            discount: None,
        }
    }

    pub fn quantity(&self) -> u32 {
        match self {
            Self::Catalog { quantity, .. } | Self::Open { quantity, .. } => *quantity,
        }
    }

    pub fn discount(&self) -> Option<&AppliedDiscount> {
        match self {
            Self::Catalog { discount, .. } | Self::Open { discount, .. } => discount.as_ref(),
        }
    }
}
