//! Table Floor Plan
//!
//! Layouts, table geometry and status, multi-table merge groups and the
//! ephemeral selection used to start or merge orders.

mod error;
mod floor_plan;

pub use error::{FloorPlanError, FloorPlanResult};
pub use floor_plan::TableFloorPlan;
