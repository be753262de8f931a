//! Demo session: a dine-in table and a takeaway order end to end

use anyhow::Context;
use pos_core::{CatalogService, Config, OrderLedger, TableFloorPlan, init_logger_with_file};
use shared::Decimal;
use shared::models::{CatalogItem, SizeOption, TableDraft, TableStatus};
use shared::order::{LineItemRequest, OrderStatus};
use std::sync::Arc;

fn demo_catalog() -> CatalogService {
    CatalogService::with_items([
        CatalogItem {
            id: "burger".to_string(),
            name: "Burger".to_string(),
            base_price: Decimal::new(1000, 2),
            sizes: vec![SizeOption {
                id: "L".to_string(),
                name: "Large".to_string(),
                price_modifier: Decimal::new(200, 2),
            }],
            add_ons: vec![],
            modifier_groups: vec![],
        },
        CatalogItem {
            id: "fries".to_string(),
            name: "Fries".to_string(),
            base_price: Decimal::new(400, 2),
            sizes: vec![],
            add_ons: vec![],
            modifier_groups: vec![],
        },
    ])
}

fn demo_floor_plan() -> anyhow::Result<TableFloorPlan> {
    let mut plan = TableFloorPlan::new();
    plan.add_layout("main", "Main hall")?;
    for (id, capacity) in [("T1", 2), ("T2", 4), ("T3", 6)] {
        plan.add_table(
            "main",
            TableDraft {
                id: id.to_string(),
                name: id.to_string(),
                capacity,
                x: 0.0,
                y: 0.0,
            },
        )?;
    }
    Ok(plan)
}

fn main() -> anyhow::Result<()> {
    // 1. 加载配置
    let config = Config::from_env();

    // 2. 初始化日志
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref())
        .map_err(|e| anyhow::anyhow!("failed to initialize logger: {e}"))?;

    tracing::info!(terminal_id = %config.terminal_id, environment = %config.environment, "POS core starting");

    // 3. 会话状态
    let mut ledger = OrderLedger::with_floor_plan(
        config,
        Arc::new(demo_catalog()),
        demo_floor_plan().context("failed to build floor plan")?,
    );

    // Dine-in on T2
    let order = ledger.start_new_order(Some("T2"), Some(3))?;
    ledger.add_item(
        &order.id,
        LineItemRequest::Catalog {
            menu_item_id: "burger".to_string(),
            quantity: 2,
            size_id: Some("L".to_string()),
            add_on_ids: vec![],
            modifiers: vec![],
            notes: Some("no onions".to_string()),
            discount: None,
        },
    )?;
    ledger.add_item(&order.id, LineItemRequest::catalog("fries", 1))?;
    ledger.send_to_kitchen(&order.id)?;
    println!("{}", serde_json::to_string_pretty(&ledger.kitchen_ticket(&order.id)?)?);

    ledger.bind_payment(&order.id, None)?;
    ledger.update_order_status(&order.id, OrderStatus::Ready)?;
    ledger.update_order_status(&order.id, OrderStatus::Closed)?;
    println!("{}", serde_json::to_string_pretty(&ledger.receipt_view(&order.id)?)?);
    ledger.archive_order(&order.id)?;
    ledger.update_table_status("T2", TableStatus::Available)?;

    // Walk-up takeaway
    let takeaway = ledger.start_new_order(None, None)?;
    ledger.add_item_to_active_order(LineItemRequest::catalog("fries", 2))?;
    ledger.bind_payment(&takeaway.id, None)?;
    ledger.send_to_kitchen(&takeaway.id)?;
    let status = ledger.update_order_status(&takeaway.id, OrderStatus::Ready)?;
    tracing::info!(order_id = %takeaway.id, status = %status, "Takeaway finished");
    println!("{}", serde_json::to_string_pretty(&ledger.receipt_view(&takeaway.id)?)?);

    Ok(())
}
