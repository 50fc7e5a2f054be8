//! Post-success effect: leave checkout once the order exists.

use std::sync::Arc;

use shopfront_store::Subscriber;
use tracing::info;

use crate::navigation::{Navigator, Route};
use crate::state::{Action, CartAction, OrderCreateAction, RootState};

/// Reacts to the create-order slice turning successful.
///
/// Fires once per transition into success: navigates to the order details
/// route and resets the slice so that returning to the page later does not
/// redirect again.
pub struct CompletionEffect {
    navigator: Arc<dyn Navigator>,
    clear_cart: bool,
    last_success: bool,
}

impl CompletionEffect {
    /// Create the effect.
    ///
    /// With `clear_cart` set, the cart items are emptied alongside the reset.
    pub fn new(navigator: Arc<dyn Navigator>, clear_cart: bool) -> Self {
        Self {
            navigator,
            clear_cart,
            last_success: false,
        }
    }
}

impl Subscriber<RootState, Action> for CompletionEffect {
    fn on_change(&mut self, state: &RootState) -> Vec<Action> {
        let success = state.order_create.success();
        let rising = success && !self.last_success;
        self.last_success = success;

        let Some(order) = state.order_create.order().filter(|_| rising) else {
            return Vec::new();
        };

        let route = Route::OrderDetails(order.id.clone());
        info!(order_id = %order.id, route = %route, "order created, leaving checkout");
        self.navigator.navigate(route);

        let mut follow_ups = vec![Action::from(OrderCreateAction::Reset)];
        if self.clear_cart {
            follow_ups.push(CartAction::ClearItems.into());
        }
        follow_ups
    }
}
