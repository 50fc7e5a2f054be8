//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart and pricing operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// A floating-point amount that cannot be held as whole cents.
    #[error("Amount out of range: {0}")]
    AmountOutOfRange(f64),

    /// A decimal string that is not a valid 2-decimal amount.
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Negative or non-finite unit price.
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
