//! Printable projections of an order
//!
//! Pure functions over an [`Order`]; printers and the kitchen display only
//! ever see these views.

use crate::pricing::item_line_total;
use crate::utils::money::{format_delta, format_money, round_money};
use rust_decimal::Decimal;
use shared::order::{
    CartLineItem, CourseAssignment, DiscountKind, KitchenCourse, KitchenTicket, KitchenTicketItem,
    Order, ReceiptLine, ReceiptView,
};
use std::collections::BTreeMap;

/// Order total at full precision
pub fn order_total(order: &Order) -> Decimal {
    order.items.iter().map(item_line_total).sum()
}

/// Receipt for the printer; money rounded to 2 places
pub fn receipt_view(order: &Order) -> ReceiptView {
    let lines = order
        .items
        .iter()
        .map(|item| ReceiptLine {
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: round_money(item.price),
            modifiers: modifier_lines(item, true),
            discount: item.applied_discount.as_ref().map(|d| match d.kind {
                DiscountKind::Percent => format!("-{}%", (d.value * Decimal::ONE_HUNDRED).normalize()),
                DiscountKind::Amount => format!("-{}", format_money(d.value)),
            }),
            line_total: round_money(item_line_total(item)),
        })
        .collect();

    ReceiptView {
        order_id: order.id.clone(),
        order_type: order.order_type,
        table_id: order.table_id.clone(),
        customer_name: order.customer_name.clone(),
        lines,
        order_total: round_money(order_total(order)),
    }
}

/// Kitchen ticket grouped by course; lines without a course are left out
pub fn kitchen_ticket(order: &Order, assignment: Option<&CourseAssignment>) -> KitchenTicket {
    let mut by_course: BTreeMap<u32, Vec<KitchenTicketItem>> = BTreeMap::new();
    if let Some(assignment) = assignment {
        for item in &order.items {
            if let Some(course) = assignment.item_course_map.get(&item.id) {
                by_course.entry(*course).or_default().push(KitchenTicketItem {
                    line_item_id: item.id.clone(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    modifiers: modifier_lines(item, false),
                    notes: item.customizations.notes.clone(),
                });
            }
        }
    }

    KitchenTicket {
        order_id: order.id.clone(),
        order_type: order.order_type,
        table_id: order.table_id.clone(),
        courses: by_course
            .into_iter()
            .map(|(course, items)| KitchenCourse {
                course,
                sent: assignment.is_some_and(|a| a.sent_courses.contains(&course)),
                items,
            })
            .collect(),
    }
}

/// Size, add-ons and modifiers as text; prices only on receipts
fn modifier_lines(item: &CartLineItem, with_prices: bool) -> Vec<String> {
    let priced = |label: String, price: Decimal| match format_delta(price) {
        Some(delta) if with_prices => format!("{} ({})", label, delta),
        _ => label,
    };

    let c = &item.customizations;
    let mut lines = Vec::new();
    if let Some(size) = &c.size {
        lines.push(priced(size.name.clone(), size.price_modifier));
    }
    for add_on in &c.add_ons {
        lines.push(priced(format!("+ {}", add_on.name), add_on.price));
    }
    for modifier in &c.modifiers {
        for option in &modifier.options {
            lines.push(priced(
                format!("{}: {}", modifier.category_name, option.name),
                option.price,
            ));
        }
    }
    lines
}
