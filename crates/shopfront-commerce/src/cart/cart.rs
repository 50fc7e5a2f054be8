//! Cart and line item types.

use crate::cart::{derive_prices, PriceBreakdown};
use crate::checkout::ShippingAddress;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// The cart slice of the storefront state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    /// Items in the cart, in the order they were added.
    #[serde(default)]
    pub cart_items: Vec<CartLineItem>,
    /// Address saved by the shipping step.
    #[serde(default)]
    pub shipping_address: ShippingAddress,
    /// Payment method saved by the payment step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl CartState {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to the cart.
    ///
    /// A line for the same product is replaced in place, keeping its
    /// position; otherwise the item is appended.
    pub fn add_item(&mut self, item: CartLineItem) {
        match self.cart_items.iter_mut().find(|i| i.product == item.product) {
            Some(existing) => *existing = item,
            None => self.cart_items.push(item),
        }
    }

    /// Remove the line for a product.
    pub fn remove_item(&mut self, product: &ProductId) -> bool {
        let len_before = self.cart_items.len();
        self.cart_items.retain(|i| &i.product != product);
        self.cart_items.len() < len_before
    }

    /// Clear all items, keeping address and payment method.
    pub fn clear_items(&mut self) {
        self.cart_items.clear();
    }

    /// Save the shipping address.
    pub fn set_shipping_address(&mut self, address: ShippingAddress) {
        self.shipping_address = address;
    }

    /// Save the payment method.
    pub fn set_payment_method(&mut self, method: impl Into<String>) {
        self.payment_method = Some(method.into());
    }

    /// The payment method, treating an empty string as unset.
    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method.as_deref().filter(|m| !m.is_empty())
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.cart_items.iter().map(|i| u64::from(i.qty)).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart_items.is_empty()
    }

    /// Derive the order summary prices with the default rules.
    pub fn prices(&self) -> Result<PriceBreakdown, CommerceError> {
        derive_prices(&self.cart_items)
    }
}

/// A line item in the cart.
///
/// The price may arrive as a JSON number or as a decimal string. A string
/// price keeps its original text, which is what gets displayed and sent
/// back out; arithmetic always uses the parsed `f64`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawLineItem", into = "RawLineItem")]
pub struct CartLineItem {
    /// Product being purchased.
    pub product: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Image path, relative to the media host.
    pub image: String,
    /// Unit price.
    pub price: f64,
    /// Quantity.
    pub qty: u32,
    price_text: Option<String>,
}

impl CartLineItem {
    /// Create a new line item. The price must be finite and non-negative.
    pub fn new(
        product: ProductId,
        name: impl Into<String>,
        image: impl Into<String>,
        price: f64,
        qty: u32,
    ) -> Result<Self, CommerceError> {
        Ok(Self {
            product,
            name: name.into(),
            image: image.into(),
            price: validate_price(price)?,
            qty,
            price_text: None,
        })
    }

    /// Unit price as the cart holds it: the original text for string
    /// prices, the shortest round-trip form otherwise.
    pub fn price_label(&self) -> String {
        match self.source_price_text() {
            Some(text) => text.to_string(),
            None => self.price.to_string(),
        }
    }

    /// Unrounded `price * qty`.
    pub fn line_total_decimal(&self) -> f64 {
        self.price * f64::from(self.qty)
    }

    /// Line total rounded to cents.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        Money::from_decimal(self.line_total_decimal())
    }

    // Ignored once `price` has been changed away from the parsed text.
    fn source_price_text(&self) -> Option<&str> {
        self.price_text
            .as_deref()
            .filter(|text| text.trim().parse::<f64>().ok() == Some(self.price))
    }
}

fn validate_price(price: f64) -> Result<f64, CommerceError> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(CommerceError::InvalidPrice(price))
    }
}

/// Prices arrive as JSON numbers or as decimal strings ("89.99").
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

/// Wire form of [`CartLineItem`].
#[derive(Serialize, Deserialize)]
struct RawLineItem {
    product: ProductId,
    name: String,
    image: String,
    price: RawPrice,
    qty: u32,
}

impl TryFrom<RawLineItem> for CartLineItem {
    type Error = CommerceError;

    fn try_from(raw: RawLineItem) -> Result<Self, Self::Error> {
        let (price, price_text) = match raw.price {
            RawPrice::Number(n) => (n, None),
            RawPrice::Text(s) => {
                let n = s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| CommerceError::InvalidAmount(s.clone()))?;
                (n, Some(s))
            }
        };

        Ok(Self {
            product: raw.product,
            name: raw.name,
            image: raw.image,
            price: validate_price(price)?,
            qty: raw.qty,
            price_text,
        })
    }
}

impl From<CartLineItem> for RawLineItem {
    fn from(item: CartLineItem) -> Self {
        let price = match item.source_price_text() {
            Some(text) => RawPrice::Text(text.to_string()),
            None => RawPrice::Number(item.price),
        };
        Self {
            product: item.product,
            name: item.name,
            image: item.image,
            price,
            qty: item.qty,
        }
    }
}
