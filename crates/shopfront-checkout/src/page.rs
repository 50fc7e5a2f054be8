//! Place-order page controller.

use std::sync::Arc;

use shopfront_commerce::checkout::CreatedOrder;
use shopfront_commerce::CheckoutId;
use shopfront_observability::{LogLevel, StructuredLogger};
use shopfront_store::Subscription;

use crate::config::CheckoutConfig;
use crate::effect::CompletionEffect;
use crate::error::CheckoutError;
use crate::gate::{attempt_place_order, PlaceOrderDecision};
use crate::navigation::{Navigator, Route};
use crate::service::OrderService;
use crate::state::{CheckoutReducer, CheckoutStore, OrderCreateAction};
use crate::view::{place_order_disabled, OrderSummaryView};

/// Result of pressing "Place Order".
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOrderOutcome {
    /// The trigger was disabled; nothing happened.
    Disabled,
    /// No payment method; the shopper was sent to `/payment`.
    RedirectedToPayment,
    /// The order was created. The completion effect has already redirected.
    Submitted(CreatedOrder),
    /// The service failed with this message, now shown on the page.
    Failed(String),
}

/// The mounted place-order page.
///
/// Mounting registers the completion effect; dropping the page or calling
/// [`PlaceOrderPage::unmount`] removes it.
pub struct PlaceOrderPage {
    store: CheckoutStore,
    service: Arc<dyn OrderService>,
    navigator: Arc<dyn Navigator>,
    config: CheckoutConfig,
    logger: StructuredLogger,
    _completion: Subscription<CheckoutReducer>,
}

impl PlaceOrderPage {
    /// Mount the page on `store`.
    ///
    /// The completion effect runs once against the current state, so a
    /// success left over from before the mount still redirects.
    pub fn mount(
        store: CheckoutStore,
        service: Arc<dyn OrderService>,
        navigator: Arc<dyn Navigator>,
        config: CheckoutConfig,
    ) -> Self {
        let logger = StructuredLogger::new(CheckoutId::generate())
            .with_page("place_order")
            .with_min_level(config.logging.level);

        let completion = store.subscribe_immediate(CompletionEffect::new(
            Arc::clone(&navigator),
            config.clear_cart_on_success,
        ));
        logger.debug("place order page mounted");

        Self {
            store,
            service,
            navigator,
            config,
            logger,
            _completion: completion,
        }
    }

    /// Current view model.
    pub fn view(&self) -> Result<OrderSummaryView, CheckoutError> {
        let state = self.store.state();
        let prices = self.config.pricing.derive(&state.cart.cart_items)?;
        Ok(OrderSummaryView::build(
            &state,
            prices,
            &self.config.media_base_url,
        )?)
    }

    /// Whether the trigger is currently disabled.
    pub fn is_place_order_disabled(&self) -> bool {
        self.store.select(place_order_disabled)
    }

    /// Press "Place Order".
    ///
    /// Service failures are not errors here: they are stored in the
    /// create-order slice and returned as [`PlaceOrderOutcome::Failed`].
    pub async fn place_order(&self) -> Result<PlaceOrderOutcome, CheckoutError> {
        let state = self.store.state();
        if place_order_disabled(&state) {
            self.logger.debug("place order pressed while disabled");
            return Ok(PlaceOrderOutcome::Disabled);
        }

        let draft = match attempt_place_order(&state.cart, &self.config.pricing)? {
            PlaceOrderDecision::NavigateToPayment => {
                self.logger
                    .builder(LogLevel::Info, "payment method missing")
                    .field("route", Route::payment().path())
                    .emit();
                self.navigator.navigate(Route::payment());
                return Ok(PlaceOrderOutcome::RedirectedToPayment);
            }
            PlaceOrderDecision::Submit(draft) => draft,
        };

        self.logger
            .builder(LogLevel::Info, "submitting order")
            .field("payment_method", draft.payment_method.as_str())
            .field_u64("items", draft.item_count())
            .field("total", draft.total_price.display_amount())
            .emit();
        self.store.dispatch(OrderCreateAction::Request.into());

        match self.service.create_order(&draft).await {
            Ok(order) => {
                self.logger
                    .builder(LogLevel::Info, "order created")
                    .field("order_id", order.id.as_str())
                    .emit();
                self.store
                    .dispatch(OrderCreateAction::Success(order.clone()).into());
                Ok(PlaceOrderOutcome::Submitted(order))
            }
            Err(err) => {
                let message = err.to_string();
                self.logger
                    .builder(LogLevel::Warn, "order creation failed")
                    .field("error", message.as_str())
                    .emit();
                self.store
                    .dispatch(OrderCreateAction::Fail(message.clone()).into());
                Ok(PlaceOrderOutcome::Failed(message))
            }
        }
    }

    /// The store the page is mounted on.
    pub fn store(&self) -> &CheckoutStore {
        &self.store
    }

    /// Effective configuration.
    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Tear the page down, unregistering the completion effect.
    pub fn unmount(self) {
        self.logger.debug("place order page unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;
    use crate::service::InMemoryOrderService;
    use crate::state::checkout_store;
    use shopfront_commerce::cart::{CartLineItem, CartState};
    use shopfront_commerce::ProductId;

    fn cart(payment_method: Option<&str>) -> CartState {
        let mut cart = CartState::new();
        cart.add_item(CartLineItem::new(ProductId::new("p1"), "Mouse", "", 30.0, 2).unwrap());
        if let Some(method) = payment_method {
            cart.set_payment_method(method);
        }
        cart
    }

    fn mount(
        cart: CartState,
    ) -> (PlaceOrderPage, Arc<InMemoryOrderService>, Arc<RecordingNavigator>) {
        let service = Arc::new(InMemoryOrderService::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let page = PlaceOrderPage::mount(
            checkout_store(cart),
            service.clone(),
            navigator.clone(),
            CheckoutConfig::default(),
        );
        (page, service, navigator)
    }

    #[tokio::test]
    async fn test_disabled_on_empty_cart() {
        let (page, service, navigator) = mount(CartState::new());
        assert!(page.is_place_order_disabled());
        assert_eq!(page.place_order().await.unwrap(), PlaceOrderOutcome::Disabled);
        assert_eq!(service.submission_count(), 0);
        assert!(navigator.history().is_empty());
    }

    #[tokio::test]
    async fn test_submit_clears_cart_by_default() {
        let (page, _service, navigator) = mount(cart(Some("PayPal")));
        let PlaceOrderOutcome::Submitted(order) = page.place_order().await.unwrap() else {
            panic!("expected a submission");
        };

        assert_eq!(navigator.current(), Some(Route::OrderDetails(order.id)));
        assert!(page.store().select(|s| s.cart.is_empty()));
        assert!(page.is_place_order_disabled());
    }

    #[tokio::test]
    async fn test_unmount_removes_effect() {
        let (page, _service, _navigator) = mount(cart(Some("PayPal")));
        let store = page.store().clone();
        assert_eq!(store.subscriber_count(), 1);

        page.unmount();
        assert_eq!(store.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_view_uses_configured_pricing() {
        let service = Arc::new(InMemoryOrderService::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let config = CheckoutConfig::from_toml_str("[pricing]\ntax_rate = 0.0\n").unwrap();
        let page = PlaceOrderPage::mount(checkout_store(cart(None)), service, navigator, config);

        let view = page.view().unwrap();
        assert!(view.prices.tax_price.is_zero());
        assert_eq!(view.prices.total_price.display_amount(), "70.00");
    }
}
