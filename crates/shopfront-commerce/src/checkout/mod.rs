//! Checkout module.
//!
//! Contains checkout steps, shipping addresses and order payloads.

mod address;
mod flow;
mod order;

pub use address::ShippingAddress;
pub use flow::CheckoutStep;
pub use order::{CreatedOrder, OrderDraft};
