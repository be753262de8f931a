use super::*;

fn closed_order(ledger: &mut OrderLedger, table_id: &str) -> OrderId {
    let order_id = open_table_with_items(ledger, table_id, vec![LineItemRequest::catalog("fries", 1)]);
    ledger.send_to_kitchen(&order_id).unwrap();
    ledger.update_order_status(&order_id, OrderStatus::Ready).unwrap();
    ledger.update_order_status(&order_id, OrderStatus::Closed).unwrap();
    order_id
}

// ========================================================================
// Closed orders
// ========================================================================

#[test]
fn test_add_item_to_closed_order_rejected() {
    let mut ledger = create_test_ledger();
    let order_id = closed_order(&mut ledger, "T1");
    let before = ledger.order(&order_id).unwrap().items.clone();

    let err = ledger
        .add_item_to_active_order(LineItemRequest::catalog("soup", 1))
        .unwrap_err();
    assert_eq!(err, OrderError::OrderClosed(order_id.clone()));
    assert_eq!(err.kind(), ErrorKind::OrderClosed);
    assert_eq!(ledger.order(&order_id).unwrap().items, before);
}

#[test]
fn test_cart_edits_on_closed_order_rejected() {
    let mut ledger = create_test_ledger();
    let order_id = closed_order(&mut ledger, "T1");
    let item_id = ledger.order(&order_id).unwrap().items[0].id.clone();

    for err in [
        ledger.update_item_quantity(&order_id, &item_id, 2).unwrap_err(),
        ledger.apply_item_discount(&order_id, &item_id, None).unwrap_err(),
        ledger.remove_item(&order_id, &item_id).map(|_| ()).unwrap_err(),
        ledger
            .update_order_details(&order_id, OrderDetailsPatch::default())
            .unwrap_err(),
        ledger.send_to_kitchen(&order_id).map(|_| ()).unwrap_err(),
    ] {
        assert_eq!(err.kind(), ErrorKind::OrderClosed);
    }
}

#[test]
fn test_no_active_order() {
    let mut ledger = create_test_ledger();
    let err = ledger
        .add_item_to_active_order(LineItemRequest::catalog("soup", 1))
        .unwrap_err();
    assert_eq!(err, OrderError::NoActiveOrder);
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ========================================================================
// Opening conflicts
// ========================================================================

#[test]
fn test_unknown_table() {
    let mut ledger = create_test_ledger();
    let err = ledger.start_new_order(Some("T99"), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(ledger.active_orders().is_empty());
}

#[test]
fn test_second_order_on_table_conflicts() {
    let mut ledger = create_test_ledger();
    let first = open_table_with_items(&mut ledger, "T1", vec![]);
    let err = ledger.start_new_order(Some("T1"), None).unwrap_err();
    assert_eq!(
        err,
        OrderError::TableOccupied {
            table_id: "T1".to_string(),
            order_id: first,
        }
    );
    assert_eq!(ledger.active_orders().len(), 1);
}

#[test]
fn test_table_not_available() {
    let mut ledger = create_test_ledger();
    ledger
        .update_table_status("T3", TableStatus::NotInService)
        .unwrap();
    let err = ledger.start_new_order(Some("T3"), None).unwrap_err();
    assert!(matches!(err, OrderError::TableNotAvailable { .. }));
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_second_walkup_conflicts() {
    let mut ledger = create_test_ledger();
    let first = ledger.start_new_order(None, None).unwrap();
    let err = ledger.start_new_order(None, None).unwrap_err();
    assert_eq!(err, OrderError::WalkupOrderExists(first.id));
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_capacity_warn_vs_enforce() {
    let mut ledger = create_test_ledger();
    // T1 seats 2: allowed with a warning by default
    ledger.start_new_order(Some("T1"), Some(5)).unwrap();

    let config = Config {
        enforce_table_capacity: true,
        ..Config::default()
    };
    let mut strict = create_test_ledger_with(config);
    let err = strict.start_new_order(Some("T1"), Some(5)).unwrap_err();
    assert_eq!(
        err,
        OrderError::CapacityExceeded {
            table_id: "T1".to_string(),
            guests: 5,
            capacity: 2,
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    strict.start_new_order(Some("T1"), Some(2)).unwrap();
}

// ========================================================================
// Line item validation
// ========================================================================

#[test]
fn test_quantity_bounds() {
    let mut ledger = create_test_ledger();
    let order_id = open_table_with_items(&mut ledger, "T1", vec![]);

    for quantity in [0, 10_000] {
        let err = ledger
            .add_item(&order_id, LineItemRequest::catalog("fries", quantity))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
    ledger
        .add_item(&order_id, LineItemRequest::catalog("fries", 9999))
        .unwrap();

    let item_id = ledger.order(&order_id).unwrap().items[0].id.clone();
    assert_eq!(
        ledger
            .update_item_quantity(&order_id, &item_id, 0)
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidInput
    );
}

#[test]
fn test_unknown_catalog_ids() {
    let mut ledger = create_test_ledger();
    let order_id = open_table_with_items(&mut ledger, "T1", vec![]);

    let err = ledger
        .add_item(&order_id, LineItemRequest::catalog("pizza", 1))
        .unwrap_err();
    assert_eq!(err, OrderError::MenuItemNotFound("pizza".to_string()));

    let mut request = burger_request(1);
    if let LineItemRequest::Catalog { size_id, .. } = &mut request {
        *size_id = Some("XXL".to_string());
    }
    assert_eq!(
        ledger.add_item(&order_id, request).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert!(ledger.order(&order_id).unwrap().items.is_empty());
}

#[test]
fn test_too_many_modifier_options() {
    let mut ledger = create_test_ledger();
    let order_id = open_table_with_items(&mut ledger, "T1", vec![]);

    let request = LineItemRequest::Catalog {
        menu_item_id: "burger".to_string(),
        quantity: 1,
        size_id: None,
        add_on_ids: vec![],
        modifiers: vec![ModifierSelection {
            category_id: "sauce".to_string(),
            option_ids: vec!["bbq".to_string(), "mayo".to_string()],
        }],
        notes: None,
        discount: None,
    };
    assert_eq!(
        ledger.add_item(&order_id, request).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
}

#[test]
fn test_invalid_prices() {
    let mut ledger = create_test_ledger();
    let order_id = open_table_with_items(&mut ledger, "T1", vec![]);

    for price in ["0", "-4"] {
        let err = ledger
            .add_item(&order_id, LineItemRequest::open("Misc", dec(price), 1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPrice);
    }

    let bad_discount = LineItemRequest::Open {
        name: "Misc".to_string(),
        price: dec("5"),
        quantity: 1,
        notes: None,
        discount: Some(AppliedDiscount::percent(dec("1.2"))),
    };
    assert_eq!(
        ledger.add_item(&order_id, bad_discount).unwrap_err().kind(),
        ErrorKind::InvalidPrice
    );

    let item = ledger
        .add_item(&order_id, LineItemRequest::open("Misc", dec("5"), 1))
        .unwrap();
    let err = ledger
        .apply_item_discount(&order_id, &item.id, Some(AppliedDiscount::amount(dec("-1"))))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidPrice);
    assert!(ledger.order(&order_id).unwrap().items[0].applied_discount.is_none());
}

#[test]
fn test_blank_open_item_name() {
    let mut ledger = create_test_ledger();
    let order_id = open_table_with_items(&mut ledger, "T1", vec![]);
    let err = ledger
        .add_item(&order_id, LineItemRequest::open("   ", dec("5"), 1))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_amount_discount_floors_order_total() {
    let mut ledger = create_test_ledger();
    let order_id = open_table_with_items(&mut ledger, "T1", vec![LineItemRequest::catalog("fries", 1)]);
    let item_id = ledger.order(&order_id).unwrap().items[0].id.clone();

    ledger
        .apply_item_discount(&order_id, &item_id, Some(AppliedDiscount::amount(dec("100"))))
        .unwrap();
    assert_eq!(ledger.order_total(&order_id).unwrap(), Decimal::ZERO);
}

// ========================================================================
// Status transitions
// ========================================================================

#[test]
fn test_status_cannot_skip_or_repeat() {
    let mut ledger = create_test_ledger();
    let order_id = open_table_with_items(&mut ledger, "T1", vec![LineItemRequest::catalog("fries", 1)]);

    for status in [OrderStatus::Building, OrderStatus::Ready, OrderStatus::Closed] {
        let err = ledger.update_order_status(&order_id, status).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    }
    assert_eq!(ledger.order(&order_id).unwrap().status, OrderStatus::Building);

    ledger.send_to_kitchen(&order_id).unwrap();
    let err = ledger
        .update_order_status(&order_id, OrderStatus::Preparing)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
}

#[test]
fn test_send_empty_order() {
    let mut ledger = create_test_ledger();
    let order_id = open_table_with_items(&mut ledger, "T1", vec![]);
    let err = ledger.send_to_kitchen(&order_id).unwrap_err();
    assert_eq!(err, OrderError::EmptyOrder(order_id.clone()));
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    assert_eq!(ledger.order(&order_id).unwrap().status, OrderStatus::Building);
}

#[test]
fn test_double_send_without_new_items() {
    let mut ledger = create_test_ledger();
    let order_id = open_table_with_items(&mut ledger, "T1", vec![LineItemRequest::catalog("fries", 1)]);
    ledger.send_to_kitchen(&order_id).unwrap();

    let err = ledger.send_to_kitchen(&order_id).unwrap_err();
    assert_eq!(err, OrderError::NothingToSend(order_id.clone()));
    assert_eq!(
        ledger.coursing().assignment(&order_id).unwrap().current_course,
        2
    );
}

#[test]
fn test_send_from_ready_rejected() {
    let mut ledger = create_test_ledger();
    let order_id = open_table_with_items(&mut ledger, "T1", vec![LineItemRequest::catalog("fries", 1)]);
    ledger.send_to_kitchen(&order_id).unwrap();
    ledger.update_order_status(&order_id, OrderStatus::Ready).unwrap();

    ledger.add_item(&order_id, LineItemRequest::catalog("soup", 1)).unwrap();
    let err = ledger.send_to_kitchen(&order_id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
}

#[test]
fn test_remove_sent_item_rejected() {
    let mut ledger = create_test_ledger();
    let order_id = open_table_with_items(&mut ledger, "T1", vec![LineItemRequest::catalog("fries", 1)]);
    let item_id = ledger.order(&order_id).unwrap().items[0].id.clone();
    ledger.send_to_kitchen(&order_id).unwrap();

    let err = ledger.remove_item(&order_id, &item_id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    assert_eq!(ledger.order(&order_id).unwrap().items.len(), 1);

    assert_eq!(
        ledger.set_item_course(&order_id, &item_id, 3).unwrap_err().kind(),
        ErrorKind::InvalidTransition
    );
    assert_eq!(
        ledger.remove_item(&order_id, "missing").unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn test_reopen_rules() {
    let mut ledger = create_test_ledger();
    let open_id = open_table_with_items(&mut ledger, "T2", vec![]);
    assert_eq!(
        ledger.reopen_order(&open_id).unwrap_err().kind(),
        ErrorKind::InvalidTransition
    );

    let paid_id = open_table_with_items(&mut ledger, "T1", vec![LineItemRequest::catalog("fries", 1)]);
    ledger.bind_payment(&paid_id, None).unwrap();
    ledger.send_to_kitchen(&paid_id).unwrap();
    ledger.update_order_status(&paid_id, OrderStatus::Ready).unwrap();
    ledger.update_order_status(&paid_id, OrderStatus::Closed).unwrap();

    let err = ledger.reopen_order(&paid_id).unwrap_err();
    assert_eq!(err, OrderError::AlreadyPaid(paid_id.clone()));
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
}

// ========================================================================
// Payment
// ========================================================================

#[test]
fn test_paid_cannot_go_back() {
    let mut ledger = create_test_ledger();
    let order_id = open_table_with_items(&mut ledger, "T1", vec![]);
    ledger.bind_payment(&order_id, None).unwrap();

    assert_eq!(
        ledger.mark_payment_pending(&order_id).unwrap_err().kind(),
        ErrorKind::InvalidTransition
    );
    assert_eq!(
        ledger.cancel_pending_payment(&order_id).unwrap_err().kind(),
        ErrorKind::InvalidTransition
    );
    assert_eq!(ledger.order(&order_id).unwrap().paid_status, PaidStatus::Paid);
}

#[test]
fn test_bind_payment_validates_before_writing() {
    let mut ledger = create_test_ledger();
    let holder = open_table_with_items(&mut ledger, "T2", vec![]);
    let walkup = ledger
        .start_new_order_with_type(OrderType::DineIn, None, None)
        .unwrap();

    let err = ledger.bind_payment(&walkup.id, Some("T2")).unwrap_err();
    assert_eq!(
        err,
        OrderError::TableOccupied {
            table_id: "T2".to_string(),
            order_id: holder,
        }
    );
    let order = ledger.order(&walkup.id).unwrap();
    assert_eq!(order.paid_status, PaidStatus::Unpaid);
    assert!(order.table_id.is_none());
    assert_eq!(table_status(&ledger, "T2"), TableStatus::Available);
}

#[test]
fn test_bind_payment_table_rules() {
    let mut ledger = create_test_ledger();
    let takeaway = ledger.start_new_order(None, None).unwrap();
    assert_eq!(
        ledger.bind_payment(&takeaway.id, Some("T1")).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );

    let order_id = open_table_with_items(&mut ledger, "T3", vec![]);
    assert_eq!(
        ledger.bind_payment(&order_id, Some("T4")).unwrap_err().kind(),
        ErrorKind::Conflict
    );
    // Same table again is fine
    ledger.bind_payment(&order_id, Some("T3")).unwrap();
}

#[test]
fn test_update_details_table_rules() {
    let mut ledger = create_test_ledger();
    let takeaway = ledger.start_new_order(None, None).unwrap();
    let patch = OrderDetailsPatch {
        table_id: Some("T1".to_string()),
        ..Default::default()
    };
    assert_eq!(
        ledger
            .update_order_details(&takeaway.id, patch.clone())
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidInput
    );

    let holder = open_table_with_items(&mut ledger, "T1", vec![]);
    let other = open_table_with_items(&mut ledger, "T2", vec![]);
    let err = ledger.update_order_details(&other, patch).unwrap_err();
    assert_eq!(
        err,
        OrderError::TableOccupied {
            table_id: "T1".to_string(),
            order_id: holder,
        }
    );
    assert_eq!(ledger.order(&other).unwrap().table_id.as_deref(), Some("T2"));
}

// ========================================================================
// Archive
// ========================================================================

#[test]
fn test_archive_rules() {
    let mut ledger = create_test_ledger();
    let open_id = open_table_with_items(&mut ledger, "T2", vec![]);
    assert_eq!(
        ledger.archive_order(&open_id).unwrap_err().kind(),
        ErrorKind::InvalidTransition
    );
    assert_eq!(
        ledger.archive_order("missing").unwrap_err().kind(),
        ErrorKind::NotFound
    );

    let closed_id = closed_order(&mut ledger, "T1");
    ledger.archive_order(&closed_id).unwrap();
    ledger.archive_order(&closed_id).unwrap();
    assert!(ledger.archived_order(&closed_id).is_some());
    assert!(ledger.kitchen_ticket(&closed_id).is_err());
}

// ========================================================================
// Staff table actions
// ========================================================================

#[test]
fn test_manual_in_use_rejected() {
    let mut ledger = create_test_ledger();
    let err = ledger
        .update_table_status("T1", TableStatus::InUse)
        .unwrap_err();
    assert_eq!(err, OrderError::ManualInUse("T1".to_string()));
    assert_eq!(table_status(&ledger, "T1"), TableStatus::Available);
}

#[test]
fn test_bound_table_status_locked() {
    let mut ledger = create_test_ledger();
    open_table_with_items(&mut ledger, "T1", vec![]);
    let err = ledger
        .update_table_status("T1", TableStatus::NotInService)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_merge_guards_bound_members() {
    let mut ledger = create_test_ledger();
    open_table_with_items(&mut ledger, "T2", vec![]);

    let err = ledger
        .merge_tables(&["T1".to_string(), "T2".to_string()])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(!ledger.floor_plan().table("T1").unwrap().is_merged());

    // Bound table may become the primary
    ledger
        .merge_tables(&["T2".to_string(), "T3".to_string()])
        .unwrap();
    assert_eq!(ledger.order_for_table("T3").unwrap().table_id.as_deref(), Some("T2"));
    assert_eq!(
        ledger.unmerge_tables("T3").unwrap_err().kind(),
        ErrorKind::Conflict
    );
}

#[test]
fn test_remove_bound_table_rejected() {
    let mut ledger = create_test_ledger();
    let order_id = open_table_with_items(&mut ledger, "T2", vec![]);

    // Still Available until payment, but the order holds it
    assert_eq!(
        ledger.remove_table("T2").unwrap_err(),
        OrderError::TableOccupied {
            table_id: "T2".to_string(),
            order_id,
        }
    );
    assert!(ledger.floor_plan().table("T2").is_some());

    ledger.remove_table("T1").unwrap();
    assert!(ledger.floor_plan().table("T1").is_none());
    assert_eq!(
        ledger.remove_table("T1").unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn test_error_maps_to_app_error() {
    let mut ledger = create_test_ledger();
    let err = ledger.start_new_order(Some("T99"), None).unwrap_err();
    let app: shared::error::AppError = err.into();
    assert_eq!(app.code, shared::error::ErrorCode::TableNotFound);
}
