//! Line Price Calculator
//!
//! Calculate line-level prices with support for:
//! - Size price modifiers
//! - Add-ons and structured modifier options
//! - Percentage and fixed-amount discounts at line-total time
//! - Open items with an operator-entered price
//!
//! Uses rust_decimal throughout; nothing is rounded here. Callers round
//! with [`round_money`](crate::utils::money::round_money) when presenting.

use super::error::{PricingError, PricingResult};
use rust_decimal::prelude::*;
use shared::order::{AddOnChoice, AppliedDiscount, CartLineItem, DiscountKind, ModifierChoice, SizeChoice};

/// Maximum allowed price per item (1,000,000 currency units)
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: u32 = 9999;

// ==================== Validation ====================

/// Validate a catalog base price: `0 <= price <= MAX_PRICE`
pub fn validate_base_price(price: Decimal) -> PricingResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(PricingError::InvalidPrice(format!(
            "base price must be non-negative, got {}",
            price
        )));
    }
    if price > MAX_PRICE {
        return Err(PricingError::InvalidPrice(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, price
        )));
    }
    Ok(())
}

/// Validate a line quantity: `1..=MAX_QUANTITY`
pub fn validate_quantity(quantity: u32) -> PricingResult<()> {
    if quantity == 0 || quantity > MAX_QUANTITY {
        return Err(PricingError::InvalidQuantity {
            quantity,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

/// Validate a discount.
///
/// Percent values are fractions in `[0, 1]`; anything above 1 would turn
/// the line negative before flooring. Amounts must be non-negative.
pub fn validate_discount(discount: &AppliedDiscount) -> PricingResult<()> {
    let value = discount.value;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PricingError::InvalidDiscount(format!(
            "discount value must be non-negative, got {}",
            value
        )));
    }
    match discount.kind {
        DiscountKind::Percent if value > Decimal::ONE => Err(PricingError::InvalidDiscount(
            format!("percent discount must be between 0 and 1, got {}", value),
        )),
        DiscountKind::Amount if value > MAX_PRICE => Err(PricingError::InvalidDiscount(
            format!("discount amount exceeds maximum allowed, got {}", value),
        )),
        _ => Ok(()),
    }
}

// ==================== Unit Price ====================

/// Calculate the effective unit price of a catalog line
///
/// `unit = base + size.price_modifier + Σ add_ons.price + Σ modifiers.options.price`
///
/// Fails with `NegativeUnitPrice` if negative modifiers push it below zero.
pub fn compute_line_price(
    base_price: Decimal,
    size: Option<&SizeChoice>,
    add_ons: &[AddOnChoice],
    modifiers: &[ModifierChoice],
) -> PricingResult<Decimal> {
    validate_base_price(base_price)?;

    let size_modifier = size.map(|s| s.price_modifier).unwrap_or(Decimal::ZERO);
    let add_on_total: Decimal = add_ons.iter().map(|a| a.price).sum();
    let modifier_total: Decimal = modifiers
        .iter()
        .flat_map(|m| m.options.iter())
        .map(|o| o.price)
        .sum();

    let unit_price = base_price + size_modifier + add_on_total + modifier_total;
    if unit_price.is_sign_negative() && !unit_price.is_zero() {
        return Err(PricingError::NegativeUnitPrice(unit_price));
    }
    Ok(unit_price)
}

/// Unit price of an open item; must be strictly positive
pub fn open_item_price(price: Decimal) -> PricingResult<Decimal> {
    if price <= Decimal::ZERO {
        return Err(PricingError::InvalidPrice(format!(
            "open item price must be greater than 0, got {}",
            price
        )));
    }
    validate_base_price(price)?;
    Ok(price)
}

// ==================== Line Total ====================

/// Calculate a line total: `unit × quantity`, then the discount
///
/// - `Percent`: `total - total × value`
/// - `Amount`: `total - value`, floored at 0
pub fn compute_line_total(
    unit_price: Decimal,
    quantity: u32,
    discount: Option<&AppliedDiscount>,
) -> PricingResult<Decimal> {
    validate_quantity(quantity)?;
    if let Some(d) = discount {
        validate_discount(d)?;
    }
    Ok(apply_discount(gross_total(unit_price, quantity), discount))
}

/// Discount delta for a line: `gross - line_total`
pub fn discount_amount(unit_price: Decimal, quantity: u32, discount: Option<&AppliedDiscount>) -> Decimal {
    let gross = gross_total(unit_price, quantity);
    gross - apply_discount(gross, discount)
}

/// Line total of an item already in a cart (validated on insert)
pub fn item_line_total(item: &CartLineItem) -> Decimal {
    apply_discount(
        gross_total(item.price, item.quantity),
        item.applied_discount.as_ref(),
    )
}

#[inline]
fn gross_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

fn apply_discount(gross: Decimal, discount: Option<&AppliedDiscount>) -> Decimal {
    match discount {
        None => gross,
        Some(d) => match d.kind {
            DiscountKind::Percent => gross - gross * d.value,
            DiscountKind::Amount => (gross - d.value).max(Decimal::ZERO),
        },
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::ModifierOptionChoice;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn size(modifier: &str) -> SizeChoice {
        SizeChoice {
            id: "L".to_string(),
            name: "Large".to_string(),
            price_modifier: dec(modifier),
        }
    }

    fn add_on(id: &str, price: &str) -> AddOnChoice {
        AddOnChoice {
            id: id.to_string(),
            name: id.to_string(),
            price: dec(price),
        }
    }

    fn modifier(category: &str, prices: &[&str]) -> ModifierChoice {
        ModifierChoice {
            category_id: category.to_string(),
            category_name: category.to_string(),
            options: prices
                .iter()
                .enumerate()
                .map(|(i, p)| ModifierOptionChoice {
                    id: format!("{}-{}", category, i),
                    name: format!("option {}", i),
                    price: dec(p),
                })
                .collect(),
        }
    }

    #[test]
    fn test_size_and_add_on() {
        let s = size("2");
        let unit = compute_line_price(dec("10"), Some(&s), &[add_on("cheese", "1.5")], &[]).unwrap();
        assert_eq!(unit, dec("13.5"));

        let total = compute_line_total(unit, 2, None).unwrap();
        assert_eq!(total, dec("27.0"));
    }

    #[test]
    fn test_percent_discount_on_line_total() {
        let s = size("2");
        let unit = compute_line_price(dec("10"), Some(&s), &[add_on("cheese", "1.5")], &[]).unwrap();
        let discount = AppliedDiscount::percent(dec("0.1"));

        let total = compute_line_total(unit, 2, Some(&discount)).unwrap();
        assert_eq!(total, dec("24.3"));
        assert_eq!(discount_amount(unit, 2, Some(&discount)), dec("2.7"));
    }

    #[test]
    fn test_modifier_options_summed() {
        let mods = vec![modifier("sauce", &["0.5", "0.25"]), modifier("side", &["2"])];
        let unit = compute_line_price(dec("8"), None, &[], &mods).unwrap();
        assert_eq!(unit, dec("10.75"));
    }

    #[test]
    fn test_amount_discount_floors_at_zero() {
        let discount = AppliedDiscount::amount(dec("50"));
        let total = compute_line_total(dec("12.5"), 2, Some(&discount)).unwrap();
        assert_eq!(total, Decimal::ZERO);

        let exact = AppliedDiscount::amount(dec("25"));
        assert_eq!(compute_line_total(dec("12.5"), 2, Some(&exact)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_amount_discount_partial() {
        let discount = AppliedDiscount::amount(dec("3"));
        assert_eq!(compute_line_total(dec("4.2"), 3, Some(&discount)).unwrap(), dec("9.6"));
    }

    #[test]
    fn test_total_is_quantity_times_unit_minus_delta() {
        let unit = dec("3.333");
        let discount = AppliedDiscount::percent(dec("0.15"));
        for q in [1u32, 2, 7, 40] {
            let total = compute_line_total(unit, q, Some(&discount)).unwrap();
            let gross = unit * Decimal::from(q);
            assert_eq!(total, gross - discount_amount(unit, q, Some(&discount)));
        }
    }

    #[test]
    fn test_deterministic() {
        let s = size("-1");
        let adds = [add_on("a", "0.1"), add_on("b", "0.2")];
        let first = compute_line_price(dec("5"), Some(&s), &adds, &[]).unwrap();
        let second = compute_line_price(dec("5"), Some(&s), &adds, &[]).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, dec("4.3"));
    }

    #[test]
    fn test_full_precision_kept() {
        // 1/3 percent of 10 units is not rounded here
        let discount = AppliedDiscount::percent(dec("0.333"));
        let total = compute_line_total(dec("1.01"), 10, Some(&discount)).unwrap();
        assert_eq!(total, dec("6.7367"));
    }

    #[test]
    fn test_negative_unit_price_rejected() {
        let s = size("-6");
        let err = compute_line_price(dec("5"), Some(&s), &[], &[]).unwrap_err();
        assert_eq!(err, PricingError::NegativeUnitPrice(dec("-1")));
    }

    #[test]
    fn test_negative_base_price_rejected() {
        assert!(matches!(
            compute_line_price(dec("-1"), None, &[], &[]),
            Err(PricingError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_open_item_price() {
        assert_eq!(open_item_price(dec("7.25")).unwrap(), dec("7.25"));
        assert!(matches!(open_item_price(Decimal::ZERO), Err(PricingError::InvalidPrice(_))));
        assert!(matches!(open_item_price(dec("-3")), Err(PricingError::InvalidPrice(_))));
        assert!(matches!(open_item_price(dec("2000000")), Err(PricingError::InvalidPrice(_))));
    }

    #[test]
    fn test_invalid_discounts() {
        let over = AppliedDiscount::percent(dec("1.5"));
        assert!(matches!(
            compute_line_total(dec("10"), 1, Some(&over)),
            Err(PricingError::InvalidDiscount(_))
        ));

        let negative = AppliedDiscount::amount(dec("-2"));
        assert!(matches!(
            compute_line_total(dec("10"), 1, Some(&negative)),
            Err(PricingError::InvalidDiscount(_))
        ));

        let full = AppliedDiscount::percent(Decimal::ONE);
        assert_eq!(compute_line_total(dec("10"), 1, Some(&full)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(matches!(
            compute_line_total(dec("1"), 0, None),
            Err(PricingError::InvalidQuantity { quantity: 0, .. })
        ));
        assert!(compute_line_total(dec("1"), MAX_QUANTITY, None).is_ok());
        assert!(compute_line_total(dec("1"), MAX_QUANTITY + 1, None).is_err());
    }
}
