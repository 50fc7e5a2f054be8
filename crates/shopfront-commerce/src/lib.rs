//! Cart, pricing and order-draft types for the Shopfront checkout.
//!
//! - **Cart**: the cart slice with its line items, shipping address and
//!   payment method
//! - **Pricing**: the order summary (items, shipping, tax, total)
//! - **Checkout**: checkout steps, the order draft sent for creation and
//!   the order handed back
//!
//! # Example
//!
//! ```rust
//! use shopfront_commerce::prelude::*;
//!
//! let mut cart = CartState::new();
//! cart.add_item(CartLineItem::new(ProductId::new("p1"), "Mouse", "/images/mouse.jpg", 30.0, 2)?);
//!
//! let prices = cart.prices()?;
//! assert_eq!(prices.total_price.display(), "$74.92");
//! # Ok::<(), shopfront_commerce::CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Cart
    pub use crate::cart::{derive_prices, CartLineItem, CartState, PriceBreakdown, PricingRules};

    // Checkout
    pub use crate::checkout::{CheckoutStep, CreatedOrder, OrderDraft, ShippingAddress};
}
