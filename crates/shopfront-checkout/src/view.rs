//! Read-only view model of the place-order page.

use serde::Serialize;
use shopfront_commerce::cart::{CartLineItem, PriceBreakdown};
use shopfront_commerce::checkout::CheckoutStep;
use shopfront_commerce::{CommerceError, Money};

use crate::navigation::Route;
use crate::state::RootState;

/// Shown in place of the item list when the cart has no lines.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// One reviewed cart line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewLine {
    pub name: String,
    /// Link to the product page.
    pub product_path: String,
    pub image_url: String,
    pub qty: u32,
    /// Unit price as the cart holds it ("30.00" stays "30.00").
    pub unit_price: String,
    pub line_total: Money,
}

impl ReviewLine {
    /// Build a row, resolving the image against `media_base_url`.
    pub fn from_item(item: &CartLineItem, media_base_url: &str) -> Result<Self, CommerceError> {
        Ok(Self {
            name: item.name.clone(),
            product_path: Route::Product(item.product.clone()).path(),
            image_url: resolve_media_url(media_base_url, &item.image),
            qty: item.qty,
            unit_price: item.price_label(),
            line_total: item.line_total()?,
        })
    }

    /// "2 X $30 = $60.00"
    pub fn label(&self) -> String {
        format!("{} X ${} = {}", self.qty, self.unit_price, self.line_total)
    }
}

/// Join a media host and an image path. Absolute URLs pass through.
pub fn resolve_media_url(base: &str, image: &str) -> String {
    if image.is_empty() || image.starts_with("http://") || image.starts_with("https://") {
        return image.to_string();
    }
    let base = base.trim_end_matches('/');
    if image.starts_with('/') {
        format!("{}{}", base, image)
    } else {
        format!("{}/{}", base, image)
    }
}

/// Everything the place-order page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummaryView {
    /// Checkout steps shown as reached.
    pub steps: Vec<CheckoutStep>,
    pub shipping: String,
    /// Every address field is filled in.
    pub shipping_complete: bool,
    /// Selected method, empty when none.
    pub payment_method: String,
    pub lines: Vec<ReviewLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_cart_message: Option<&'static str>,
    pub prices: PriceBreakdown,
    /// Last order-creation failure, rendered verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub place_order_disabled: bool,
}

impl OrderSummaryView {
    /// Build the view from state. Prices come from `prices`, which the
    /// caller derives from the same cart.
    pub fn build(
        state: &RootState,
        prices: PriceBreakdown,
        media_base_url: &str,
    ) -> Result<Self, CommerceError> {
        let cart = &state.cart;
        let lines = cart
            .cart_items
            .iter()
            .map(|item| ReviewLine::from_item(item, media_base_url))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            steps: CheckoutStep::PlaceOrder.reached().collect(),
            shipping: cart.shipping_address.one_line(),
            shipping_complete: cart.shipping_address.is_complete(),
            payment_method: cart.payment_method().unwrap_or_default().to_string(),
            empty_cart_message: lines.is_empty().then_some(EMPTY_CART_MESSAGE),
            lines,
            prices,
            error: state.order_create.error().map(str::to_string),
            place_order_disabled: place_order_disabled(state),
        })
    }

    /// Plain-text rendering for terminals.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let steps: Vec<&str> = self.steps.iter().map(|s| s.display_name()).collect();
        out.push_str(&format!("Steps: {}\n\n", steps.join(" > ")));
        out.push_str(&format!("Shipping: {}\n", self.shipping));
        out.push_str(&format!("Method: {}\n\n", self.payment_method));

        out.push_str("Order Items\n");
        if let Some(message) = self.empty_cart_message {
            out.push_str(&format!("  {}\n", message));
        }
        for line in &self.lines {
            out.push_str(&format!("  {:<30} {}\n", line.name, line.label()));
        }

        out.push_str("\nOrder Summary\n");
        for (label, amount) in self.prices.rows() {
            out.push_str(&format!("  {:<10} {:>12}\n", format!("{}:", label), amount.display()));
        }

        if let Some(error) = &self.error {
            out.push_str(&format!("\nError: {}\n", error));
        }
        out
    }
}

/// Place-order is disabled while the cart has no items.
pub fn place_order_disabled(state: &RootState) -> bool {
    state.cart.is_empty()
}
