use crate::core::ErrorKind;
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use thiserror::Error;

/// Pricing errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Unit price would be negative: {0}")]
    NegativeUnitPrice(Decimal),

    #[error("Invalid discount: {0}")]
    InvalidDiscount(String),

    #[error("Quantity must be between 1 and {max}, got {quantity}")]
    InvalidQuantity { quantity: u32, max: u32 },

    #[error("{kind} not found: {id}")]
    OptionNotFound { kind: &'static str, id: String },

    #[error("Too many options for modifier {category_id}: at most {max}")]
    TooManyOptions { category_id: String, max: u32 },
}

impl PricingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PricingError::InvalidPrice(_)
            | PricingError::NegativeUnitPrice(_)
            | PricingError::InvalidDiscount(_) => ErrorKind::InvalidPrice,
            PricingError::InvalidQuantity { .. } | PricingError::TooManyOptions { .. } => {
                ErrorKind::InvalidInput
            }
            PricingError::OptionNotFound { .. } => ErrorKind::NotFound,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PricingError::InvalidPrice(_) | PricingError::NegativeUnitPrice(_) => {
                ErrorCode::ProductInvalidPrice
            }
            PricingError::InvalidDiscount(_) => ErrorCode::InvalidDiscount,
            PricingError::InvalidQuantity { .. } => ErrorCode::ValueOutOfRange,
            PricingError::OptionNotFound { .. } => ErrorCode::SpecNotFound,
            PricingError::TooManyOptions { .. } => ErrorCode::ValidationFailed,
        }
    }
}

pub type PricingResult<T> = Result<T, PricingError>;
