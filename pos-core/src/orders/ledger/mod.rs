//! OrderLedger - the session's order aggregate
//!
//! This module handles:
//! - Order lifecycle (`Building → Preparing → Ready → Closed`, reopen)
//! - Line items priced through [`crate::pricing`]
//! - Table binding, deferred to payment for dine-in
//! - Kitchen sends through the [`CoursingCoordinator`]
//! - Event broadcasting after commit
//!
//! # Operation Flow
//!
//! ```text
//! operation(args)
//!     ├─ 1. Look up order / tables (read-only)
//!     ├─ 2. Validate everything (pricing, transitions, table binding)
//!     ├─ 3. Apply writes (order, floor plan, coursing)
//!     └─ 4. Broadcast LedgerEvent(s)
//! ```
//!
//! Every operation validates fully before its first write, so an error
//! leaves the ledger unchanged.

use super::error::{OrderError, OrderResult};
use super::projection;
use crate::core::Config;
use crate::coursing::CoursingCoordinator;
use crate::pricing::{
    compute_line_total, open_item_price, price_catalog_item, validate_discount,
    validate_quantity,
};
use crate::services::CatalogLookup;
use crate::tables::{FloorPlanError, TableFloorPlan};
use rust_decimal::Decimal;
use shared::models::TableStatus;
use shared::order::{
    AppliedDiscount, CartLineItem, Customizations, KitchenTicket, LedgerEvent, LedgerEventPayload,
    LineItemRequest, Order, OrderDetailsPatch, OrderStatus, OrderType, PaidStatus, ReceiptView,
};
use shared::types::{OrderId, TableId};
use shared::util::{new_id, now_millis};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Menu item id recorded on open items
pub const OPEN_ITEM_MENU_ID: &str = "open-item";

/// Session service object owning orders, floor plan and coursing
pub struct OrderLedger {
    config: Config,
    catalog: Arc<dyn CatalogLookup>,
    floor_plan: TableFloorPlan,
    coursing: CoursingCoordinator,
    /// Working set (not archived)
    orders: HashMap<OrderId, Order>,
    /// Working set ids in creation order
    order_seq: Vec<OrderId>,
    archived: HashMap<OrderId, Order>,
    /// Tables freed by closing a DineIn order, primary first
    released_groups: HashMap<OrderId, Vec<TableId>>,
    active_order_id: Option<OrderId>,
    /// Tableless order still in `Building`
    walkup_order_id: Option<OrderId>,
    event_tx: broadcast::Sender<LedgerEvent>,
    sequence: u64,
}

impl std::fmt::Debug for OrderLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderLedger")
            .field("terminal_id", &self.config.terminal_id)
            .field("orders", &self.orders.len())
            .field("archived", &self.archived.len())
            .field("active_order_id", &self.active_order_id)
            .field("event_tx", &"<broadcast::Sender>")
            .finish()
    }
}

impl OrderLedger {
    /// Create a ledger with an empty floor plan
    pub fn new(config: Config, catalog: Arc<dyn CatalogLookup>) -> Self {
        Self::with_floor_plan(config, catalog, TableFloorPlan::new())
    }

    pub fn with_floor_plan(
        config: Config,
        catalog: Arc<dyn CatalogLookup>,
        floor_plan: TableFloorPlan,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        tracing::info!(terminal_id = %config.terminal_id, "OrderLedger started");
        Self {
            config,
            catalog,
            floor_plan,
            coursing: CoursingCoordinator::new(),
            orders: HashMap::new(),
            order_seq: Vec::new(),
            archived: HashMap::new(),
            released_groups: HashMap::new(),
            active_order_id: None,
            walkup_order_id: None,
            event_tx,
            sequence: 0,
        }
    }

    /// Subscribe to committed ledger events
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.event_tx.subscribe()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn floor_plan(&self) -> &TableFloorPlan {
        &self.floor_plan
    }

    /// Floor plan editor access: layouts, geometry and selection only
    ///
    /// Status, merge and removal of tables go through the ledger
    /// ([`Self::update_table_status`], [`Self::merge_tables`],
    /// [`Self::remove_table`]) so bound tables stay consistent.
    pub fn floor_plan_mut(&mut self) -> &mut TableFloorPlan {
        &mut self.floor_plan
    }

    pub fn coursing(&self) -> &CoursingCoordinator {
        &self.coursing
    }

    // ========== Opening orders ==========

    /// Open a DineIn order when a table is given, TakeAway otherwise
    pub fn start_new_order(
        &mut self,
        table_id: Option<&str>,
        guest_count: Option<u32>,
    ) -> OrderResult<Order> {
        let order_type = if table_id.is_some() {
            OrderType::DineIn
        } else {
            OrderType::TakeAway
        };
        self.start_new_order_with_type(order_type, table_id, guest_count)
    }

    pub fn start_new_order_with_type(
        &mut self,
        order_type: OrderType,
        table_id: Option<&str>,
        guest_count: Option<u32>,
    ) -> OrderResult<Order> {
        let primary_id = match table_id {
            Some(table_id) => {
                if order_type != OrderType::DineIn {
                    return Err(OrderError::TableRequiresDineIn(order_type));
                }
                Some(self.validate_table_binding(table_id, guest_count, None)?)
            }
            None => {
                if let Some(existing) = self.walkup_order_id() {
                    tracing::warn!(existing_order_id = %existing, "Walk-up order already in progress");
                    return Err(OrderError::WalkupOrderExists(existing.to_string()));
                }
                None
            }
        };

        let mut order = Order::new(new_id(), order_type, now_millis());
        order.table_id = primary_id.clone();
        order.guest_count = guest_count;
        let order_id = order.id.clone();

        self.coursing.initialize_for_order(&order_id);
        self.orders.insert(order_id.clone(), order.clone());
        self.order_seq.push(order_id.clone());
        self.active_order_id = Some(order_id.clone());
        if primary_id.is_none() {
            self.walkup_order_id = Some(order_id.clone());
        }

        tracing::info!(
            order_id = %order_id,
            order_type = ?order_type,
            table_id = ?primary_id,
            guest_count = ?guest_count,
            "Order opened"
        );
        self.emit(LedgerEventPayload::OrderOpened {
            order_id,
            table_id: primary_id,
        });
        Ok(order)
    }

    /// Switch the order that `add_item_to_active_order` targets
    pub fn set_active_order(&mut self, order_id: &str) -> OrderResult<()> {
        self.get_order(order_id)?;
        self.active_order_id = Some(order_id.to_string());
        Ok(())
    }

    // ========== Cart ==========

    pub fn add_item_to_active_order(&mut self, request: LineItemRequest) -> OrderResult<CartLineItem> {
        let order_id = self.active_order_id.clone().ok_or(OrderError::NoActiveOrder)?;
        self.add_item(&order_id, request)
    }

    /// Price `request` and append it to the order's cart
    pub fn add_item(&mut self, order_id: &str, request: LineItemRequest) -> OrderResult<CartLineItem> {
        self.get_open_order(order_id)?;

        let quantity = request.quantity();
        validate_quantity(quantity)?;

        let (menu_item_id, name, original_price, unit_price, customizations, is_open_item) =
            match &request {
                LineItemRequest::Catalog {
                    menu_item_id,
                    size_id,
                    add_on_ids,
                    modifiers,
                    notes,
                    ..
                } => {
                    let item = self
                        .catalog
                        .get_catalog_item(menu_item_id)
                        .ok_or_else(|| OrderError::MenuItemNotFound(menu_item_id.clone()))?;
                    let priced = price_catalog_item(
                        &item,
                        size_id.as_deref(),
                        add_on_ids,
                        modifiers,
                        notes.clone(),
                    )?;
                    (
                        item.id,
                        item.name,
                        priced.original_price,
                        priced.unit_price,
                        priced.customizations,
                        false,
                    )
                }
                LineItemRequest::Open {
                    name, price, notes, ..
                } => {
                    let name = name.trim();
                    if name.is_empty() {
                        return Err(OrderError::InvalidRequest(
                            "open item name must not be empty".to_string(),
                        ));
                    }
                    let price = open_item_price(*price)?;
                    (
                        OPEN_ITEM_MENU_ID.to_string(),
                        name.to_string(),
                        price,
                        price,
                        Customizations::notes_only(notes.clone()),
                        true,
                    )
                }
            };

        let discount = request.discount().cloned();
        compute_line_total(unit_price, quantity, discount.as_ref())?;

        let item = CartLineItem {
            id: new_id(),
            menu_item_id,
            name,
            quantity,
            original_price,
            price: unit_price,
            customizations,
            applied_discount: discount,
            is_open_item,
        };

        self.order_mut(order_id)?.items.push(item.clone());
        tracing::info!(
            order_id = %order_id,
            item_id = %item.id,
            name = %item.name,
            quantity,
            unit_price = %item.price,
            "Item added"
        );
        self.emit(LedgerEventPayload::ItemAdded {
            order_id: order_id.to_string(),
            item_id: item.id.clone(),
        });
        Ok(item)
    }

    pub fn update_item_quantity(
        &mut self,
        order_id: &str,
        item_id: &str,
        quantity: u32,
    ) -> OrderResult<()> {
        validate_quantity(quantity)?;
        let item = self.open_item_mut(order_id, item_id)?;
        item.quantity = quantity;

        tracing::info!(order_id = %order_id, item_id = %item_id, quantity, "Item quantity updated");
        self.emit(LedgerEventPayload::ItemUpdated {
            order_id: order_id.to_string(),
            item_id: item_id.to_string(),
        });
        Ok(())
    }

    /// Set or clear (`None`) a line discount
    pub fn apply_item_discount(
        &mut self,
        order_id: &str,
        item_id: &str,
        discount: Option<AppliedDiscount>,
    ) -> OrderResult<()> {
        if let Some(d) = &discount {
            validate_discount(d)?;
        }
        let item = self.open_item_mut(order_id, item_id)?;
        item.applied_discount = discount;

        tracing::info!(order_id = %order_id, item_id = %item_id, "Item discount updated");
        self.emit(LedgerEventPayload::ItemUpdated {
            order_id: order_id.to_string(),
            item_id: item_id.to_string(),
        });
        Ok(())
    }

    /// Remove a line that has not been finalized into a course
    pub fn remove_item(&mut self, order_id: &str, item_id: &str) -> OrderResult<CartLineItem> {
        let order = self.get_open_order(order_id)?;
        let index = order
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| OrderError::ItemNotFound(item_id.to_string()))?;
        if self.coursing.is_finalized(order_id, item_id) {
            return Err(OrderError::ItemAlreadySent {
                item_id: item_id.to_string(),
            });
        }

        let removed = self.order_mut(order_id)?.items.remove(index);
        self.coursing.forget_item(order_id, item_id);

        tracing::info!(order_id = %order_id, item_id = %item_id, "Item removed");
        self.emit(LedgerEventPayload::ItemRemoved {
            order_id: order_id.to_string(),
            item_id: item_id.to_string(),
        });
        Ok(removed)
    }

    /// Manual course override for a line
    pub fn set_item_course(&mut self, order_id: &str, item_id: &str, course: u32) -> OrderResult<()> {
        let order = self.get_open_order(order_id)?;
        if order.item(item_id).is_none() {
            return Err(OrderError::ItemNotFound(item_id.to_string()));
        }
        if self.coursing.is_finalized(order_id, item_id) {
            return Err(OrderError::ItemAlreadySent {
                item_id: item_id.to_string(),
            });
        }
        self.coursing.set_item_course(order_id, item_id, course);
        Ok(())
    }

    // ========== Status ==========

    /// Move an order one step forward; returns the resulting status
    ///
    /// `Preparing` routes through [`Self::send_to_kitchen`]. A TakeAway
    /// order reaching `Ready` closes itself when `takeaway_auto_close`.
    pub fn update_order_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
    ) -> OrderResult<OrderStatus> {
        let order = self.get_order(order_id)?;
        let from = order.status;
        let order_type = order.order_type;
        if from.next() != Some(status) {
            tracing::warn!(order_id = %order_id, from = %from, to = %status, "Rejected status transition");
            return Err(OrderError::InvalidStatusTransition {
                order_id: order_id.to_string(),
                from,
                to: status,
            });
        }

        match status {
            OrderStatus::Preparing => {
                self.send_to_kitchen(order_id)?;
            }
            OrderStatus::Ready => {
                self.set_status(order_id, OrderStatus::Ready)?;
                if order_type == OrderType::TakeAway && self.config.takeaway_auto_close {
                    self.close_order(order_id)?;
                }
            }
            OrderStatus::Closed => self.close_order(order_id)?,
            OrderStatus::Building => {}
        }
        Ok(self.get_order(order_id)?.status)
    }

    /// Finalize unsent lines as the current course; returns the next course
    ///
    /// `Building → Preparing` on first send. On a `Preparing` order only the
    /// lines not yet finalized are sent (delta send).
    pub fn send_to_kitchen(&mut self, order_id: &str) -> OrderResult<u32> {
        let order = self.get_order(order_id)?;
        let from = order.status;
        match from {
            OrderStatus::Building | OrderStatus::Preparing => {}
            OrderStatus::Closed => return Err(OrderError::OrderClosed(order_id.to_string())),
            OrderStatus::Ready => {
                return Err(OrderError::InvalidStatusTransition {
                    order_id: order_id.to_string(),
                    from,
                    to: OrderStatus::Preparing,
                });
            }
        }
        if order.items.is_empty() {
            return Err(OrderError::EmptyOrder(order_id.to_string()));
        }
        let pending = self
            .coursing
            .pending_items(order_id, order.items.iter().map(|i| &i.id));
        if pending.is_empty() {
            tracing::warn!(order_id = %order_id, "Send to kitchen with nothing new");
            return Err(OrderError::NothingToSend(order_id.to_string()));
        }

        let next_course = self.coursing.finalize_current_course(order_id, &pending);
        let courses: Vec<u32> = pending
            .iter()
            .filter_map(|id| self.coursing.course_of(order_id, id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        tracing::info!(
            order_id = %order_id,
            courses = ?courses,
            next_course,
            items = pending.len(),
            "Sent to kitchen"
        );
        self.emit(LedgerEventPayload::SentToKitchen {
            order_id: order_id.to_string(),
            courses,
        });
        if from == OrderStatus::Building {
            self.set_status(order_id, OrderStatus::Preparing)?;
        }
        Ok(next_course)
    }

    /// `Closed → Preparing` for an order that is not paid
    ///
    /// A DineIn order takes back the tables its close released: they return
    /// to `Available` and a former merge group is merged again. The reopen
    /// is refused when any of them went out of service, was merged elsewhere
    /// or now carries another order.
    pub fn reopen_order(&mut self, order_id: &str) -> OrderResult<()> {
        let order = self.get_order(order_id)?;
        if order.status != OrderStatus::Closed {
            return Err(OrderError::InvalidStatusTransition {
                order_id: order_id.to_string(),
                from: order.status,
                to: OrderStatus::Preparing,
            });
        }
        if order.paid_status == PaidStatus::Paid {
            return Err(OrderError::AlreadyPaid(order_id.to_string()));
        }
        let restore = match (order.order_type, &order.table_id) {
            (OrderType::DineIn, Some(table_id)) => self
                .released_groups
                .get(order_id)
                .cloned()
                .unwrap_or_else(|| vec![table_id.clone()]),
            _ => Vec::new(),
        };
        for id in &restore {
            let table = self
                .floor_plan
                .table(id)
                .ok_or_else(|| FloorPlanError::TableNotFound(id.clone()))?;
            if table.is_merged() {
                return Err(FloorPlanError::AlreadyMerged(id.clone()).into());
            }
            if !matches!(table.status, TableStatus::Available | TableStatus::NeedsCleaning) {
                return Err(OrderError::TableNotAvailable {
                    table_id: id.clone(),
                    status: table.status,
                });
            }
            if let Some(other) = self.bound_order(id, Some(order_id)) {
                return Err(OrderError::TableOccupied {
                    table_id: id.clone(),
                    order_id: other.id.clone(),
                });
            }
        }

        let mut cleared = Vec::new();
        for id in &restore {
            cleared.extend(self.floor_plan.update_table_status(id, TableStatus::Available)?);
        }
        if restore.len() > 1 {
            self.floor_plan.merge_selected(&restore)?;
        }
        self.released_groups.remove(order_id);

        self.order_mut(order_id)?.closed_at = None;
        self.set_status(order_id, OrderStatus::Preparing)?;
        if !cleared.is_empty() {
            self.emit(LedgerEventPayload::TableStatusChanged {
                table_ids: cleared,
                status: TableStatus::Available,
            });
        }
        tracing::info!(order_id = %order_id, tables = ?restore, "Order reopened");
        Ok(())
    }

    // ========== Details ==========

    /// Merge customer fields, guest count and table binding
    pub fn update_order_details(&mut self, order_id: &str, patch: OrderDetailsPatch) -> OrderResult<()> {
        let order = self.get_open_order(order_id)?;
        let guests = patch.guest_count.or(order.guest_count);

        let new_table = match &patch.table_id {
            Some(table_id) => {
                if order.order_type != OrderType::DineIn {
                    return Err(OrderError::TableRequiresDineIn(order.order_type));
                }
                let primary = self.floor_plan.resolve_primary(table_id)?;
                if order.table_id.as_deref() == Some(primary.as_str()) {
                    self.check_capacity(&primary, guests)?;
                    None
                } else {
                    if let Some(current) = &order.table_id
                        && order.paid_status == PaidStatus::Paid
                    {
                        return Err(OrderError::TableAlreadyBound {
                            order_id: order_id.to_string(),
                            table_id: current.clone(),
                        });
                    }
                    Some(self.validate_table_binding(&primary, guests, Some(order_id))?)
                }
            }
            None => {
                if patch.guest_count.is_some()
                    && let Some(table_id) = &order.table_id
                {
                    self.check_capacity(table_id, guests)?;
                }
                None
            }
        };

        let order = self.order_mut(order_id)?;
        if let Some(name) = patch.customer_name {
            order.customer_name = Some(name);
        }
        if let Some(phone) = patch.customer_phone {
            order.customer_phone = Some(phone);
        }
        if let Some(address) = patch.delivery_address {
            order.delivery_address = Some(address);
        }
        if let Some(count) = patch.guest_count {
            order.guest_count = Some(count);
        }
        if let Some(primary) = &new_table {
            order.table_id = Some(primary.clone());
        }
        if new_table.is_some() && self.walkup_order_id.as_deref() == Some(order_id) {
            self.walkup_order_id = None;
        }

        tracing::info!(order_id = %order_id, table_id = ?new_table, "Order details updated");
        self.emit(LedgerEventPayload::DetailsUpdated {
            order_id: order_id.to_string(),
        });
        Ok(())
    }

    // ========== Payment ==========

    /// Mark an order paid, binding its table first if given
    ///
    /// A DineIn order's table (group) goes `InUse` on first payment. Paying
    /// an already paid order is a no-op.
    pub fn bind_payment(&mut self, order_id: &str, table_id: Option<&str>) -> OrderResult<()> {
        let order = self.get_order(order_id)?;
        if order.paid_status == PaidStatus::Paid {
            tracing::debug!(order_id = %order_id, "Order already paid");
            return Ok(());
        }
        let from = order.paid_status;

        let new_table = match (table_id, &order.table_id) {
            (Some(_), _) if order.status.is_closed() => {
                return Err(OrderError::OrderClosed(order_id.to_string()));
            }
            (Some(requested), None) => {
                if order.order_type != OrderType::DineIn {
                    return Err(OrderError::TableRequiresDineIn(order.order_type));
                }
                Some(self.validate_table_binding(requested, order.guest_count, Some(order_id))?)
            }
            (Some(requested), Some(current)) => {
                let primary = self.floor_plan.resolve_primary(requested)?;
                if &primary != current {
                    return Err(OrderError::TableAlreadyBound {
                        order_id: order_id.to_string(),
                        table_id: current.clone(),
                    });
                }
                None
            }
            (None, _) => None,
        };

        let occupy = if order.order_type == OrderType::DineIn && !order.status.is_closed() {
            new_table.clone().or_else(|| order.table_id.clone())
        } else {
            None
        };

        // First write: the floor plan validates the whole group before writing
        let occupied = match &occupy {
            Some(primary) => self.floor_plan.update_table_status(primary, TableStatus::InUse)?,
            None => Vec::new(),
        };

        let order = self.order_mut(order_id)?;
        if let Some(primary) = &new_table {
            order.table_id = Some(primary.clone());
        }
        order.paid_status = PaidStatus::Paid;
        if new_table.is_some() && self.walkup_order_id.as_deref() == Some(order_id) {
            self.walkup_order_id = None;
        }

        tracing::info!(order_id = %order_id, table_id = ?occupy, "Payment bound");
        self.emit(LedgerEventPayload::PaymentStatusChanged {
            order_id: order_id.to_string(),
            from,
            to: PaidStatus::Paid,
        });
        if !occupied.is_empty() {
            self.emit(LedgerEventPayload::TableStatusChanged {
                table_ids: occupied,
                status: TableStatus::InUse,
            });
        }
        Ok(())
    }

    /// `Unpaid → Pending` while the payment screen is capturing
    pub fn mark_payment_pending(&mut self, order_id: &str) -> OrderResult<()> {
        self.set_paid_status(order_id, PaidStatus::Unpaid, PaidStatus::Pending)
    }

    /// `Pending → Unpaid` when capture is abandoned
    pub fn cancel_pending_payment(&mut self, order_id: &str) -> OrderResult<()> {
        self.set_paid_status(order_id, PaidStatus::Pending, PaidStatus::Unpaid)
    }

    // ========== Archive ==========

    /// Move a closed order out of the working set. Idempotent.
    pub fn archive_order(&mut self, order_id: &str) -> OrderResult<()> {
        if self.archived.contains_key(order_id) {
            return Ok(());
        }
        let order = self.get_order(order_id)?;
        if order.status != OrderStatus::Closed {
            return Err(OrderError::InvalidStatusTransition {
                order_id: order_id.to_string(),
                from: order.status,
                to: OrderStatus::Closed,
            });
        }

        let Some(order) = self.orders.remove(order_id) else {
            return Err(OrderError::OrderNotFound(order_id.to_string()));
        };
        self.order_seq.retain(|id| id != order_id);
        self.coursing.remove_order(order_id);
        self.released_groups.remove(order_id);
        if self.active_order_id.as_deref() == Some(order_id) {
            self.active_order_id = None;
        }
        if self.walkup_order_id.as_deref() == Some(order_id) {
            self.walkup_order_id = None;
        }
        self.archived.insert(order_id.to_string(), order);

        tracing::info!(order_id = %order_id, "Order archived");
        self.emit(LedgerEventPayload::OrderArchived {
            order_id: order_id.to_string(),
        });
        Ok(())
    }

    // ========== Staff table actions ==========

    /// Staff status change (cleaning done, out of service)
    ///
    /// `InUse` only comes from payment; tables bound to an open order are
    /// left alone.
    pub fn update_table_status(&mut self, table_id: &str, status: TableStatus) -> OrderResult<()> {
        if status == TableStatus::InUse {
            return Err(OrderError::ManualInUse(table_id.to_string()));
        }
        let primary = self.floor_plan.resolve_primary(table_id)?;
        if let Some(order) = self.bound_order(&primary, None) {
            return Err(OrderError::TableOccupied {
                table_id: primary,
                order_id: order.id.clone(),
            });
        }

        let changed = self.floor_plan.update_table_status(table_id, status)?;
        if !changed.is_empty() {
            self.emit(LedgerEventPayload::TableStatusChanged {
                table_ids: changed,
                status,
            });
        }
        Ok(())
    }

    /// Merge tables; only the first (future primary) may carry an order
    pub fn merge_tables(&mut self, table_ids: &[TableId]) -> OrderResult<TableId> {
        for id in table_ids.iter().skip(1) {
            if let Some(order) = self.bound_order(id, None) {
                return Err(OrderError::TableOccupied {
                    table_id: id.clone(),
                    order_id: order.id.clone(),
                });
            }
        }
        Ok(self.floor_plan.merge_selected(table_ids)?)
    }

    /// Remove an Available, unmerged table no open order is bound to
    pub fn remove_table(&mut self, table_id: &str) -> OrderResult<()> {
        if let Some(order) = self.bound_order(table_id, None) {
            return Err(OrderError::TableOccupied {
                table_id: table_id.to_string(),
                order_id: order.id.clone(),
            });
        }
        self.floor_plan.remove_table(table_id)?;
        Ok(())
    }

    /// Merge the floor plan's current selection
    pub fn merge_selection(&mut self) -> OrderResult<TableId> {
        let ids = self.floor_plan.selection().to_vec();
        self.merge_tables(&ids)
    }

    /// Dissolve a merge group that carries no open order
    pub fn unmerge_tables(&mut self, table_id: &str) -> OrderResult<Vec<TableId>> {
        let primary = self.floor_plan.resolve_primary(table_id)?;
        if let Some(order) = self.bound_order(&primary, None) {
            return Err(OrderError::TableOccupied {
                table_id: primary,
                order_id: order.id.clone(),
            });
        }
        Ok(self.floor_plan.unmerge(table_id)?)
    }

    pub fn mark_course_sent(&mut self, order_id: &str, course: u32) -> OrderResult<bool> {
        self.get_order(order_id)?;
        Ok(self.coursing.mark_course_sent(order_id, course))
    }

    // ========== Queries ==========

    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// Working set in creation order
    pub fn active_orders(&self) -> Vec<&Order> {
        self.order_seq
            .iter()
            .filter_map(|id| self.orders.get(id))
            .collect()
    }

    pub fn archived_order(&self, order_id: &str) -> Option<&Order> {
        self.archived.get(order_id)
    }

    pub fn active_order(&self) -> Option<&Order> {
        self.active_order_id
            .as_deref()
            .and_then(|id| self.orders.get(id))
    }

    /// The tableless order still in `Building`, if any
    pub fn walkup_order_id(&self) -> Option<&str> {
        let id = self.walkup_order_id.as_deref()?;
        self.orders
            .get(id)
            .filter(|o| o.is_walkup())
            .map(|o| o.id.as_str())
    }

    /// Open order bound to the table's group
    pub fn order_for_table(&self, table_id: &str) -> Option<&Order> {
        let primary = self.floor_plan.resolve_primary(table_id).ok()?;
        self.bound_order(&primary, None)
    }

    /// Full-precision order total
    pub fn order_total(&self, order_id: &str) -> OrderResult<Decimal> {
        Ok(projection::order_total(self.any_order(order_id)?))
    }

    pub fn receipt_view(&self, order_id: &str) -> OrderResult<ReceiptView> {
        Ok(projection::receipt_view(self.any_order(order_id)?))
    }

    pub fn kitchen_ticket(&self, order_id: &str) -> OrderResult<KitchenTicket> {
        let order = self.get_order(order_id)?;
        Ok(projection::kitchen_ticket(order, self.coursing.assignment(order_id)))
    }

    // ========== Internals ==========

    fn get_order(&self, order_id: &str) -> OrderResult<&Order> {
        self.orders
            .get(order_id)
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    /// Working set or archive
    fn any_order(&self, order_id: &str) -> OrderResult<&Order> {
        self.orders
            .get(order_id)
            .or_else(|| self.archived.get(order_id))
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    /// Order that still accepts mutations
    fn get_open_order(&self, order_id: &str) -> OrderResult<&Order> {
        let order = self.get_order(order_id)?;
        if order.status.is_closed() {
            tracing::warn!(order_id = %order_id, "Mutation on closed order rejected");
            return Err(OrderError::OrderClosed(order_id.to_string()));
        }
        Ok(order)
    }

    fn order_mut(&mut self, order_id: &str) -> OrderResult<&mut Order> {
        self.orders
            .get_mut(order_id)
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    fn open_item_mut(&mut self, order_id: &str, item_id: &str) -> OrderResult<&mut CartLineItem> {
        self.get_open_order(order_id)?;
        self.order_mut(order_id)?
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| OrderError::ItemNotFound(item_id.to_string()))
    }

    /// Non-closed order bound to `primary_id`, other than `exclude`
    fn bound_order(&self, primary_id: &str, exclude: Option<&str>) -> Option<&Order> {
        self.orders.values().find(|o| {
            !o.status.is_closed()
                && o.table_id.as_deref() == Some(primary_id)
                && Some(o.id.as_str()) != exclude
        })
    }

    /// Resolve to the primary and check it can take a new order
    fn validate_table_binding(
        &self,
        table_id: &str,
        guest_count: Option<u32>,
        exclude: Option<&str>,
    ) -> OrderResult<TableId> {
        let primary = self.floor_plan.resolve_primary(table_id)?;
        if let Some(other) = self.bound_order(&primary, exclude) {
            tracing::warn!(table_id = %primary, existing_order_id = %other.id, "Table already bound");
            return Err(OrderError::TableOccupied {
                table_id: primary,
                order_id: other.id.clone(),
            });
        }
        if let Some(table) = self.floor_plan.table(&primary)
            && table.status != TableStatus::Available
        {
            return Err(OrderError::TableNotAvailable {
                table_id: primary,
                status: table.status,
            });
        }
        self.check_capacity(&primary, guest_count)?;
        Ok(primary)
    }

    fn check_capacity(&self, primary_id: &str, guest_count: Option<u32>) -> OrderResult<()> {
        let Some(guests) = guest_count else {
            return Ok(());
        };
        let capacity = self.floor_plan.group_capacity(primary_id)?;
        if guests > capacity {
            if self.config.enforce_table_capacity {
                return Err(OrderError::CapacityExceeded {
                    table_id: primary_id.to_string(),
                    guests,
                    capacity,
                });
            }
            tracing::warn!(table_id = %primary_id, guests, capacity, "Guest count exceeds table capacity");
        }
        Ok(())
    }

    fn set_status(&mut self, order_id: &str, to: OrderStatus) -> OrderResult<()> {
        let order = self.order_mut(order_id)?;
        let from = order.status;
        order.status = to;
        let leaves_building = from == OrderStatus::Building;
        if leaves_building && self.walkup_order_id.as_deref() == Some(order_id) {
            self.walkup_order_id = None;
        }
        tracing::info!(order_id = %order_id, from = %from, to = %to, "Order status changed");
        self.emit(LedgerEventPayload::StatusChanged {
            order_id: order_id.to_string(),
            from,
            to,
        });
        Ok(())
    }

    /// `Ready → Closed`; releases a DineIn order's tables
    fn close_order(&mut self, order_id: &str) -> OrderResult<()> {
        let order = self.get_order(order_id)?;
        let release = match (order.order_type, &order.table_id) {
            (OrderType::DineIn, Some(table_id)) => Some(table_id.clone()),
            _ => None,
        };

        self.order_mut(order_id)?.closed_at = Some(now_millis());
        self.set_status(order_id, OrderStatus::Closed)?;

        if let Some(table_id) = release {
            let mut group = vec![table_id.clone()];
            if let Ok(members) = self.floor_plan.group_members(&table_id) {
                group.extend(members.into_iter().filter(|id| *id != table_id));
            }
            self.released_groups.insert(order_id.to_string(), group);

            let changed = self.floor_plan.release_tables(std::slice::from_ref(&table_id));
            if !changed.is_empty() {
                self.emit(LedgerEventPayload::TableStatusChanged {
                    table_ids: changed,
                    status: TableStatus::NeedsCleaning,
                });
            }
        }
        Ok(())
    }

    fn set_paid_status(&mut self, order_id: &str, from: PaidStatus, to: PaidStatus) -> OrderResult<()> {
        let order = self.get_order(order_id)?;
        if order.paid_status != from {
            return Err(OrderError::InvalidPaymentTransition {
                order_id: order_id.to_string(),
                from: order.paid_status,
                to,
            });
        }
        self.order_mut(order_id)?.paid_status = to;
        tracing::info!(order_id = %order_id, from = %from, to = %to, "Payment status changed");
        self.emit(LedgerEventPayload::PaymentStatusChanged {
            order_id: order_id.to_string(),
            from,
            to,
        });
        Ok(())
    }

    fn emit(&mut self, payload: LedgerEventPayload) {
        self.sequence += 1;
        let event = LedgerEvent {
            sequence: self.sequence,
            timestamp: now_millis(),
            payload,
        };
        if self.event_tx.send(event).is_err() {
            tracing::debug!(sequence = self.sequence, "Event broadcast skipped: no active receivers");
        }
    }
}

#[cfg(test)]
mod tests;
