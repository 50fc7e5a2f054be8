//! Routes and the navigation seam.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use shopfront_commerce::checkout::CheckoutStep;
use shopfront_commerce::{OrderId, ProductId};

/// A storefront location the checkout can send the shopper to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// A checkout step page.
    Step(CheckoutStep),
    /// Detail view of a created order.
    OrderDetails(OrderId),
    /// Product page.
    Product(ProductId),
}

impl Route {
    /// The payment-selection step.
    pub fn payment() -> Self {
        Route::Step(CheckoutStep::Payment)
    }

    /// URL path.
    pub fn path(&self) -> String {
        match self {
            Route::Step(step) => step.path().to_string(),
            Route::OrderDetails(id) => format!("/order/{}", id),
            Route::Product(id) => format!("/product/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Routing collaborator.
pub trait Navigator: Send + Sync {
    /// Move the shopper to `route`.
    fn navigate(&self, route: Route);
}

/// Navigator that records where it was sent.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    /// Create a navigator with empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every route navigated to, oldest first.
    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent route.
    pub fn current(&self) -> Option<Route> {
        self.history().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}
