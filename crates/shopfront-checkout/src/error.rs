//! Checkout error types.

use shopfront_commerce::CommerceError;
use thiserror::Error;

/// Errors raised while setting up or driving the place-order step.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Failed to read a config file.
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file contents are invalid.
    #[error("Invalid config: {0}")]
    Config(String),

    /// Pricing or cart error.
    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

impl From<toml::de::Error> for CheckoutError {
    fn from(e: toml::de::Error) -> Self {
        CheckoutError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for CheckoutError {
    fn from(e: toml::ser::Error) -> Self {
        CheckoutError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for CheckoutError {
    fn from(e: serde_json::Error) -> Self {
        CheckoutError::Config(e.to_string())
    }
}

/// Failure reported by the order service.
///
/// The `Display` output is the message shown to the shopper, verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderServiceError {
    /// The service refused the order and said why.
    #[error("{0}")]
    Rejected(String),

    /// The request never got a usable answer.
    #[error("{0}")]
    Transport(String),
}
