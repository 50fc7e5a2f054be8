use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shopfront_checkout::prelude::*;
use shopfront_checkout::{Action, CartAction, OrderCreateAction, OrderCreateState, RootState};

/// Service that always hands back the same order id.
#[derive(Default)]
struct FixedIdService {
    drafts: Mutex<Vec<OrderDraft>>,
}

#[async_trait]
impl OrderService for FixedIdService {
    async fn create_order(&self, draft: &OrderDraft) -> Result<CreatedOrder, OrderServiceError> {
        self.drafts.lock().unwrap().push(draft.clone());
        Ok(CreatedOrder::new("abc123"))
    }
}

fn mouse_cart(payment_method: Option<&str>) -> CartState {
    let mut cart = CartState::new();
    cart.add_item(
        CartLineItem::new(ProductId::new("p1"), "Mouse", "/images/mouse.jpg", 30.0, 2).unwrap(),
    );
    cart.set_shipping_address(ShippingAddress::new("1 Main St", "Springfield", "12345", "USA"));
    if let Some(method) = payment_method {
        cart.set_payment_method(method);
    }
    cart
}

fn keep_cart() -> CheckoutConfig {
    CheckoutConfig {
        clear_cart_on_success: false,
        ..CheckoutConfig::default()
    }
}

#[tokio::test]
async fn test_missing_payment_method_redirects_without_submitting() {
    let service = Arc::new(InMemoryOrderService::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let page = PlaceOrderPage::mount(
        checkout_store(mouse_cart(None)),
        service.clone(),
        navigator.clone(),
        CheckoutConfig::default(),
    );

    let outcome = page.place_order().await.unwrap();

    assert_eq!(outcome, PlaceOrderOutcome::RedirectedToPayment);
    assert_eq!(navigator.history(), vec![Route::payment()]);
    assert_eq!(navigator.history()[0].path(), "/payment");
    assert_eq!(service.submission_count(), 0);
    assert_eq!(
        page.store().select(|s| s.order_create.clone()),
        OrderCreateState::Idle
    );
}

#[tokio::test]
async fn test_submitted_draft_carries_derived_prices() {
    let service = Arc::new(InMemoryOrderService::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let page = PlaceOrderPage::mount(
        checkout_store(mouse_cart(Some("PayPal"))),
        service.clone(),
        navigator,
        keep_cart(),
    );

    page.place_order().await.unwrap();

    let drafts = service.submissions();
    assert_eq!(drafts.len(), 1);
    let json = serde_json::to_value(&drafts[0]).unwrap();
    assert_eq!(json["paymentMethod"], "PayPal");
    assert_eq!(json["itemsPrice"], "60.00");
    assert_eq!(json["shippingPrice"], "10.00");
    assert_eq!(json["taxPrice"], "4.92");
    assert_eq!(json["totalPrice"], "74.92");
    assert_eq!(json["shippingAddress"]["postalCode"], "12345");
    assert_eq!(json["orderItems"][0]["qty"], 2);
}

#[tokio::test]
async fn test_success_redirects_once_and_resets_once() {
    let service = Arc::new(FixedIdService::default());
    let navigator = Arc::new(RecordingNavigator::new());
    let store = checkout_store(mouse_cart(Some("PayPal")));

    let resets = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&resets);
    let mut was_success = false;
    let _reset_watch = store.subscribe(move |state: &RootState| {
        if was_success && state.order_create == OrderCreateState::Idle {
            *counter.lock().unwrap() += 1;
        }
        was_success = state.order_create.success();
        Vec::<Action>::new()
    });

    let page = PlaceOrderPage::mount(store.clone(), service.clone(), navigator.clone(), keep_cart());
    let outcome = page.place_order().await.unwrap();

    assert_eq!(outcome, PlaceOrderOutcome::Submitted(CreatedOrder::new("abc123")));
    assert_eq!(navigator.history(), vec![Route::OrderDetails(OrderId::new("abc123"))]);
    assert_eq!(navigator.history()[0].path(), "/order/abc123");
    assert_eq!(*resets.lock().unwrap(), 1);

    // Unrelated dispatches after completion do not redirect again.
    store.dispatch(OrderCreateAction::Reset.into());
    store.dispatch(CartAction::SavePaymentMethod("Stripe".to_string()).into());
    assert_eq!(navigator.history().len(), 1);
    assert_eq!(service.drafts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_failure_is_shown_and_retry_clears_it() {
    let service = Arc::new(InMemoryOrderService::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let page = PlaceOrderPage::mount(
        checkout_store(mouse_cart(Some("PayPal"))),
        service.clone(),
        navigator.clone(),
        keep_cart(),
    );

    service.fail_next(OrderServiceError::Rejected("Order item out of stock".to_string()));
    let outcome = page.place_order().await.unwrap();
    assert_eq!(
        outcome,
        PlaceOrderOutcome::Failed("Order item out of stock".to_string())
    );
    assert_eq!(
        page.view().unwrap().error.as_deref(),
        Some("Order item out of stock")
    );
    assert!(navigator.history().is_empty());

    let outcome = page.place_order().await.unwrap();
    assert!(matches!(outcome, PlaceOrderOutcome::Submitted(_)));
    assert_eq!(page.view().unwrap().error, None);
    assert_eq!(navigator.history().len(), 1);
    assert_eq!(service.submission_count(), 2);
}

#[tokio::test]
async fn test_success_from_earlier_visit_redirects_on_mount() {
    let navigator = Arc::new(RecordingNavigator::new());
    let store = checkout_store(mouse_cart(Some("PayPal")));
    store.dispatch(OrderCreateAction::Success(CreatedOrder::new("old1")).into());

    let _page = PlaceOrderPage::mount(
        store.clone(),
        Arc::new(InMemoryOrderService::new()),
        navigator.clone(),
        keep_cart(),
    );

    assert_eq!(navigator.history(), vec![Route::OrderDetails(OrderId::new("old1"))]);
    assert_eq!(store.select(|s| s.order_create.clone()), OrderCreateState::Idle);
}
