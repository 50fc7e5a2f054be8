//! Checkout state slices, actions and reducer.

use shopfront_commerce::cart::{CartLineItem, CartState};
use shopfront_commerce::checkout::{CreatedOrder, ShippingAddress};
use shopfront_commerce::ProductId;
use shopfront_store::{Reducer, Store};

/// Progress of the create-order request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OrderCreateState {
    /// Nothing submitted, or the last result has been consumed.
    #[default]
    Idle,
    /// Request in flight.
    Pending,
    /// The service created the order.
    Succeeded(CreatedOrder),
    /// The service failed; the message is shown to the shopper.
    Failed(String),
}

impl OrderCreateState {
    /// Whether an order was created and not yet consumed.
    pub fn success(&self) -> bool {
        matches!(self, OrderCreateState::Succeeded(_))
    }

    /// Whether a request is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, OrderCreateState::Pending)
    }

    /// The created order, if any.
    pub fn order(&self) -> Option<&CreatedOrder> {
        match self {
            OrderCreateState::Succeeded(order) => Some(order),
            _ => None,
        }
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            OrderCreateState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Everything the place-order step reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    /// Cart slice.
    pub cart: CartState,
    /// Create-order slice.
    pub order_create: OrderCreateState,
}

impl RootState {
    /// State with the given cart and no order in flight.
    pub fn with_cart(cart: CartState) -> Self {
        Self {
            cart,
            order_create: OrderCreateState::Idle,
        }
    }
}

/// Cart slice actions.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add a line, replacing any line for the same product.
    AddItem(CartLineItem),
    /// Remove the line for a product.
    RemoveItem(ProductId),
    /// Save the shipping address.
    SaveShippingAddress(ShippingAddress),
    /// Save the payment method.
    SavePaymentMethod(String),
    /// Empty the cart after checkout.
    ClearItems,
}

/// Create-order slice actions.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderCreateAction {
    Request,
    Success(CreatedOrder),
    Fail(String),
    Reset,
}

/// Any action accepted by the checkout store.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Cart(CartAction),
    OrderCreate(OrderCreateAction),
}

impl From<CartAction> for Action {
    fn from(action: CartAction) -> Self {
        Action::Cart(action)
    }
}

impl From<OrderCreateAction> for Action {
    fn from(action: OrderCreateAction) -> Self {
        Action::OrderCreate(action)
    }
}

/// Reducer for [`RootState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutReducer;

impl CheckoutReducer {
    fn reduce_cart(cart: &mut CartState, action: CartAction) {
        match action {
            CartAction::AddItem(item) => cart.add_item(item),
            CartAction::RemoveItem(product) => {
                cart.remove_item(&product);
            }
            CartAction::SaveShippingAddress(address) => cart.set_shipping_address(address),
            CartAction::SavePaymentMethod(method) => cart.set_payment_method(method),
            CartAction::ClearItems => cart.clear_items(),
        }
    }

    fn reduce_order_create(slice: &mut OrderCreateState, action: OrderCreateAction) {
        *slice = match action {
            OrderCreateAction::Request => OrderCreateState::Pending,
            OrderCreateAction::Success(order) => OrderCreateState::Succeeded(order),
            OrderCreateAction::Fail(message) => OrderCreateState::Failed(message),
            OrderCreateAction::Reset => OrderCreateState::Idle,
        };
    }
}

impl Reducer for CheckoutReducer {
    type State = RootState;
    type Action = Action;

    fn reduce(&self, state: &mut RootState, action: Action) {
        match action {
            Action::Cart(action) => Self::reduce_cart(&mut state.cart, action),
            Action::OrderCreate(action) => {
                Self::reduce_order_create(&mut state.order_create, action)
            }
        }
    }
}

/// Store holding the checkout state.
pub type CheckoutStore = Store<CheckoutReducer>;

/// Create a checkout store seeded with a cart.
pub fn checkout_store(cart: CartState) -> CheckoutStore {
    Store::new(CheckoutReducer, RootState::with_cart(cart))
}
