//! Resolve a catalog selection (ids) into priced customization snapshots

use super::error::{PricingError, PricingResult};
use super::item_calculator::compute_line_price;
use rust_decimal::Decimal;
use shared::models::CatalogItem;
use shared::order::{
    AddOnChoice, Customizations, ModifierChoice, ModifierOptionChoice, ModifierSelection, SizeChoice,
};

/// A catalog selection resolved against its menu item
#[derive(Debug, Clone, PartialEq)]
pub struct PricedSelection {
    /// Catalog base price at the time of the snapshot
    pub original_price: Decimal,
    /// Effective unit price (full precision)
    pub unit_price: Decimal,
    pub customizations: Customizations,
}

/// Resolve size, add-on and modifier ids on `item` and price the result
///
/// Duplicate add-on ids collapse to one, and selections naming the same
/// modifier category are counted together. Unknown ids fail with
/// `OptionNotFound`; exceeding a group's `max_selections` fails with
/// `TooManyOptions`.
pub fn price_catalog_item(
    item: &CatalogItem,
    size_id: Option<&str>,
    add_on_ids: &[String],
    modifiers: &[ModifierSelection],
    notes: Option<String>,
) -> PricingResult<PricedSelection> {
    let size = match size_id {
        Some(id) => {
            let option = item.size(id).ok_or_else(|| PricingError::OptionNotFound {
                kind: "Size",
                id: id.to_string(),
            })?;
            Some(SizeChoice {
                id: option.id.clone(),
                name: option.name.clone(),
                price_modifier: option.price_modifier,
            })
        }
        None => None,
    };

    let mut add_ons: Vec<AddOnChoice> = Vec::with_capacity(add_on_ids.len());
    for id in add_on_ids {
        if add_ons.iter().any(|a| &a.id == id) {
            continue;
        }
        let option = item.add_on(id).ok_or_else(|| PricingError::OptionNotFound {
            kind: "Add-on",
            id: id.clone(),
        })?;
        add_ons.push(AddOnChoice {
            id: option.id.clone(),
            name: option.name.clone(),
            price: option.price,
        });
    }

    // Entries naming the same category merge into one choice
    let mut modifier_choices: Vec<ModifierChoice> = Vec::with_capacity(modifiers.len());
    for selection in modifiers {
        if selection.option_ids.is_empty() {
            continue;
        }
        let group = item
            .modifier_group(&selection.category_id)
            .ok_or_else(|| PricingError::OptionNotFound {
                kind: "Modifier group",
                id: selection.category_id.clone(),
            })?;

        let index = match modifier_choices.iter().position(|c| c.category_id == group.id) {
            Some(index) => index,
            None => {
                modifier_choices.push(ModifierChoice {
                    category_id: group.id.clone(),
                    category_name: group.name.clone(),
                    options: Vec::with_capacity(selection.option_ids.len()),
                });
                modifier_choices.len() - 1
            }
        };
        let options = &mut modifier_choices[index].options;
        for option_id in &selection.option_ids {
            if options.iter().any(|o| &o.id == option_id) {
                continue;
            }
            let option = group.option(option_id).ok_or_else(|| PricingError::OptionNotFound {
                kind: "Modifier option",
                id: option_id.clone(),
            })?;
            options.push(ModifierOptionChoice {
                id: option.id.clone(),
                name: option.name.clone(),
                price: option.price,
            });
        }

        if let Some(max) = group.max_selections
            && options.len() > max as usize
        {
            return Err(PricingError::TooManyOptions {
                category_id: group.id.clone(),
                max,
            });
        }
    }

    let unit_price = compute_line_price(item.base_price, size.as_ref(), &add_ons, &modifier_choices)?;

    Ok(PricedSelection {
        original_price: item.base_price,
        unit_price,
        customizations: Customizations {
            size,
            add_ons,
            modifiers: modifier_choices,
            notes: notes.filter(|n| !n.trim().is_empty()),
        },
    })
}
