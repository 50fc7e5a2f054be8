//! Shopping cart module.
//!
//! Contains the cart slice, line items and order summary pricing.

mod cart;
mod pricing;

pub use cart::{CartLineItem, CartState};
pub use pricing::{
    derive_prices, PriceBreakdown, PricingRules, DEFAULT_FLAT_SHIPPING,
    DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_TAX_RATE,
};
