//! # Shopfront Checkout
//!
//! The place-order step: review the cart with derived prices, submit it to
//! an order service, and leave for the order details page once the order
//! exists.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use shopfront_checkout::prelude::*;
//!
//! # async fn run() -> Result<(), CheckoutError> {
//! let mut cart = CartState::new();
//! cart.add_item(CartLineItem::new(ProductId::new("p1"), "Mouse", "/images/mouse.jpg", 30.0, 2)?);
//! cart.set_payment_method("PayPal");
//!
//! let navigator = Arc::new(RecordingNavigator::new());
//! let page = PlaceOrderPage::mount(
//!     checkout_store(cart),
//!     Arc::new(InMemoryOrderService::new()),
//!     navigator.clone(),
//!     CheckoutConfig::default(),
//! );
//!
//! println!("{}", page.view()?.render_text());
//! page.place_order().await?;
//! println!("now at {:?}", navigator.current());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod effect;
pub mod error;
pub mod gate;
pub mod navigation;
pub mod page;
pub mod service;
pub mod state;
pub mod view;

pub use config::{CheckoutConfig, LoggingConfig};
pub use effect::CompletionEffect;
pub use error::{CheckoutError, OrderServiceError};
pub use gate::{attempt_place_order, PlaceOrderDecision};
pub use navigation::{Navigator, RecordingNavigator, Route};
pub use page::{PlaceOrderOutcome, PlaceOrderPage};
pub use service::{InMemoryOrderService, OrderService};
pub use state::{
    checkout_store, Action, CartAction, CheckoutReducer, CheckoutStore, OrderCreateAction,
    OrderCreateState, RootState,
};
pub use view::{OrderSummaryView, ReviewLine, EMPTY_CART_MESSAGE};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        checkout_store, CheckoutConfig, CheckoutError, InMemoryOrderService, Navigator,
        OrderService, OrderServiceError, OrderSummaryView, PlaceOrderOutcome, PlaceOrderPage,
        RecordingNavigator, Route,
    };
    pub use shopfront_commerce::prelude::*;
}
