//! Checkout steps and their routes.

use serde::{Deserialize, Serialize};

/// Steps in the checkout flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Sign in or register.
    SignIn,
    /// Shipping address.
    Shipping,
    /// Payment method selection.
    Payment,
    /// Order review and submission.
    PlaceOrder,
}

impl CheckoutStep {
    /// All steps in flow order.
    pub const ALL: [CheckoutStep; 4] = [
        CheckoutStep::SignIn,
        CheckoutStep::Shipping,
        CheckoutStep::Payment,
        CheckoutStep::PlaceOrder,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::SignIn => "Sign In",
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::PlaceOrder => "Place Order",
        }
    }

    /// Route path of the step's page.
    pub fn path(&self) -> &'static str {
        match self {
            CheckoutStep::SignIn => "/login",
            CheckoutStep::Shipping => "/shipping",
            CheckoutStep::Payment => "/payment",
            CheckoutStep::PlaceOrder => "/placeorder",
        }
    }

    /// Steps reachable once the shopper is on `self` (inclusive).
    pub fn reached(&self) -> impl Iterator<Item = CheckoutStep> + '_ {
        CheckoutStep::ALL.into_iter().filter(move |step| step <= self)
    }
}
