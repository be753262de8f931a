use super::*;
use crate::core::ErrorKind;
use crate::services::CatalogService;
use shared::models::{AddOnOption, CatalogItem, ModifierGroup, ModifierOption, SizeOption, TableDraft};
use shared::order::{DiscountKind, ModifierSelection};
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn test_catalog() -> CatalogService {
    CatalogService::with_items([
        CatalogItem {
            id: "burger".to_string(),
            name: "Burger".to_string(),
            base_price: dec("10"),
            sizes: vec![
                SizeOption {
                    id: "L".to_string(),
                    name: "Large".to_string(),
                    price_modifier: dec("2"),
                },
                SizeOption {
                    id: "S".to_string(),
                    name: "Small".to_string(),
                    price_modifier: dec("-1"),
                },
            ],
            add_ons: vec![
                AddOnOption {
                    id: "cheese".to_string(),
                    name: "Cheese".to_string(),
                    price: dec("1.5"),
                },
                AddOnOption {
                    id: "bacon".to_string(),
                    name: "Bacon".to_string(),
                    price: dec("2"),
                },
            ],
            modifier_groups: vec![ModifierGroup {
                id: "sauce".to_string(),
                name: "Sauce".to_string(),
                max_selections: Some(1),
                options: vec![
                    ModifierOption {
                        id: "bbq".to_string(),
                        name: "BBQ".to_string(),
                        price: dec("0.5"),
                    },
                    ModifierOption {
                        id: "mayo".to_string(),
                        name: "Mayo".to_string(),
                        price: Decimal::ZERO,
                    },
                ],
            }],
        },
        CatalogItem {
            id: "fries".to_string(),
            name: "Fries".to_string(),
            base_price: dec("4"),
            sizes: vec![],
            add_ons: vec![],
            modifier_groups: vec![],
        },
        CatalogItem {
            id: "soup".to_string(),
            name: "Soup".to_string(),
            base_price: dec("6.5"),
            sizes: vec![],
            add_ons: vec![],
            modifier_groups: vec![],
        },
    ])
}

fn test_floor_plan() -> TableFloorPlan {
    let mut plan = TableFloorPlan::new();
    plan.add_layout("main", "Main hall").unwrap();
    for (id, capacity) in [("T1", 2), ("T2", 4), ("T3", 4), ("T4", 6), ("T5", 4)] {
        plan.add_table(
            "main",
            TableDraft {
                id: id.to_string(),
                name: id.to_string(),
                capacity,
                x: 0.0,
                y: 0.0,
            },
        )
        .unwrap();
    }
    plan
}

fn create_test_ledger_with(config: Config) -> OrderLedger {
    OrderLedger::with_floor_plan(config, Arc::new(test_catalog()), test_floor_plan())
}

fn create_test_ledger() -> OrderLedger {
    create_test_ledger_with(Config::default())
}

/// Burger, size L, extra cheese: unit 13.5
fn burger_request(quantity: u32) -> LineItemRequest {
    LineItemRequest::Catalog {
        menu_item_id: "burger".to_string(),
        quantity,
        size_id: Some("L".to_string()),
        add_on_ids: vec!["cheese".to_string()],
        modifiers: vec![],
        notes: None,
        discount: None,
    }
}

/// Open a dine-in order on `table_id` and add `items`
fn open_table_with_items(
    ledger: &mut OrderLedger,
    table_id: &str,
    items: Vec<LineItemRequest>,
) -> OrderId {
    let order = ledger.start_new_order(Some(table_id), Some(2)).unwrap();
    for item in items {
        ledger.add_item(&order.id, item).unwrap();
    }
    order.id
}

/// Drain every event currently queued on `rx`
fn drain(rx: &mut broadcast::Receiver<LedgerEvent>) -> Vec<LedgerEventPayload> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event.payload);
    }
    events
}

fn table_status(ledger: &OrderLedger, table_id: &str) -> TableStatus {
    ledger.floor_plan().table(table_id).unwrap().status
}

mod test_boundary;
