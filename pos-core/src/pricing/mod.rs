//! Cart Pricing Module
//!
//! Pure price computation for cart lines: unit prices from catalog
//! selections, line totals with discounts, and open-item validation.
//! No state, no I/O.

mod customizations;
mod error;
mod item_calculator;

pub use customizations::*;
pub use error::*;
pub use item_calculator::*;
