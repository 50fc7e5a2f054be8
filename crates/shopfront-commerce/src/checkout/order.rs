//! Order draft submitted for creation, and the order handed back.

use crate::cart::{CartLineItem, CartState, PriceBreakdown};
use crate::checkout::ShippingAddress;
use crate::ids::OrderId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Payload submitted to create an order from the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// Cart lines, in cart order.
    pub order_items: Vec<CartLineItem>,
    /// Where to ship.
    pub shipping_address: ShippingAddress,
    /// Selected payment method (e.g., "PayPal").
    pub payment_method: String,
    /// Sum of line totals.
    pub items_price: Money,
    /// Shipping charge.
    pub shipping_price: Money,
    /// Tax charge.
    pub tax_price: Money,
    /// Grand total.
    pub total_price: Money,
}

impl OrderDraft {
    /// Build a draft from the cart's current fields and its derived prices.
    pub fn from_cart(
        cart: &CartState,
        payment_method: impl Into<String>,
        prices: PriceBreakdown,
    ) -> Self {
        Self {
            order_items: cart.cart_items.clone(),
            shipping_address: cart.shipping_address.clone(),
            payment_method: payment_method.into(),
            items_price: prices.items_price,
            shipping_price: prices.shipping_price,
            tax_price: prices.tax_price,
            total_price: prices.total_price,
        }
    }

    /// Get total item count.
    pub fn item_count(&self) -> u64 {
        self.order_items.iter().map(|i| u64::from(i.qty)).sum()
    }
}

/// An order persisted by the order service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    /// Order identifier.
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// Total the service recorded, if it echoes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Money>,
    /// Creation time as reported by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl CreatedOrder {
    /// Create an order reference with just an id.
    pub fn new(id: impl Into<OrderId>) -> Self {
        Self {
            id: id.into(),
            total_price: None,
            created_at: None,
        }
    }
}
