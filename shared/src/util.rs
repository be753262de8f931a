use crate::types::Timestamp;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a new random identifier for orders and line items.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
