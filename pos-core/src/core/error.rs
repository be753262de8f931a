use serde::{Deserialize, Serialize};

/// Distinct error conditions surfaced by every component of the core.
///
/// Component error enums (`PricingError`, `FloorPlanError`, `OrderError`)
/// each map onto exactly one kind so the UI can branch on it uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Status change not permitted from the current state
    InvalidTransition,
    /// Mutation attempted on a closed order
    OrderClosed,
    /// Table already bound / not available, duplicate names, second walk-up
    Conflict,
    /// Non-positive open item price, negative unit price, bad discount
    InvalidPrice,
    /// Referenced id does not exist
    NotFound,
    /// Malformed request
    InvalidInput,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::InvalidTransition => "invalid_transition",
            ErrorKind::OrderClosed => "order_closed",
            ErrorKind::Conflict => "conflict",
            ErrorKind::InvalidPrice => "invalid_price",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidInput => "invalid_input",
        };
        f.write_str(s)
    }
}
