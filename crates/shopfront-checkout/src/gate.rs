//! Submission gate for the place-order trigger.

use shopfront_commerce::cart::{CartState, PricingRules};
use shopfront_commerce::checkout::OrderDraft;
use shopfront_commerce::CommerceError;
use tracing::debug;

/// What to do when the shopper presses "Place Order".
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOrderDecision {
    /// No payment method chosen yet; send the shopper back to pick one.
    NavigateToPayment,
    /// Submit this draft to the order service.
    Submit(OrderDraft),
}

/// Decide between redirecting to payment and submitting the cart.
///
/// A missing or empty payment method always redirects, whatever else the
/// cart holds. Otherwise the draft carries the cart lines, the shipping
/// address, the method and prices derived with `rules` at this moment.
pub fn attempt_place_order(
    cart: &CartState,
    rules: &PricingRules,
) -> Result<PlaceOrderDecision, CommerceError> {
    let Some(method) = cart.payment_method() else {
        debug!("no payment method selected, redirecting to payment");
        return Ok(PlaceOrderDecision::NavigateToPayment);
    };

    let prices = rules.derive(&cart.cart_items)?;
    debug!(
        payment_method = method,
        items = cart.item_count(),
        total = %prices.total_price,
        "submitting order draft"
    );

    Ok(PlaceOrderDecision::Submit(OrderDraft::from_cart(
        cart, method, prices,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_commerce::cart::CartLineItem;
    use shopfront_commerce::checkout::ShippingAddress;
    use shopfront_commerce::{Money, ProductId};

    fn cart_with_mouse() -> CartState {
        let mut cart = CartState::new();
        cart.add_item(
            CartLineItem::new(ProductId::new("p1"), "Mouse", "/images/mouse.jpg", 30.0, 2).unwrap(),
        );
        cart.set_shipping_address(ShippingAddress::new("1 Main St", "Springfield", "12345", "USA"));
        cart
    }

    #[test]
    fn test_missing_payment_method_redirects() {
        let cart = cart_with_mouse();
        let decision = attempt_place_order(&cart, &PricingRules::default()).unwrap();
        assert_eq!(decision, PlaceOrderDecision::NavigateToPayment);
    }

    #[test]
    fn test_empty_payment_method_redirects() {
        let mut cart = cart_with_mouse();
        cart.set_payment_method("");
        let decision = attempt_place_order(&cart, &PricingRules::default()).unwrap();
        assert_eq!(decision, PlaceOrderDecision::NavigateToPayment);
    }

    #[test]
    fn test_redirect_wins_even_with_empty_cart() {
        let cart = CartState::new();
        let decision = attempt_place_order(&cart, &PricingRules::default()).unwrap();
        assert_eq!(decision, PlaceOrderDecision::NavigateToPayment);
    }

    #[test]
    fn test_submit_carries_cart_and_prices() {
        let mut cart = cart_with_mouse();
        cart.set_payment_method("PayPal");

        let PlaceOrderDecision::Submit(draft) =
            attempt_place_order(&cart, &PricingRules::default()).unwrap()
        else {
            panic!("expected a submission");
        };

        assert_eq!(draft.order_items, cart.cart_items);
        assert_eq!(draft.shipping_address, cart.shipping_address);
        assert_eq!(draft.payment_method, "PayPal");
        assert_eq!(draft.items_price, Money::from_cents(6000));
        assert_eq!(draft.shipping_price, Money::from_cents(1000));
        assert_eq!(draft.tax_price, Money::from_cents(492));
        assert_eq!(draft.total_price, Money::from_cents(7492));
    }

    #[test]
    fn test_custom_rules_apply() {
        let mut cart = cart_with_mouse();
        cart.set_payment_method("Stripe");
        let rules = PricingRules {
            free_shipping_threshold: Money::from_cents(5000),
            ..PricingRules::default()
        };

        let PlaceOrderDecision::Submit(draft) = attempt_place_order(&cart, &rules).unwrap() else {
            panic!("expected a submission");
        };
        assert!(draft.shipping_price.is_zero());
        assert_eq!(draft.total_price, Money::from_cents(6492));
    }
}
