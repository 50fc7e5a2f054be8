//! Summary command - print the order summary for a cart.

use std::sync::Arc;

use anyhow::Result;
use shopfront_checkout::{
    checkout_store, InMemoryOrderService, OrderSummaryView, PlaceOrderPage, RecordingNavigator,
};

use super::{load_cart, SummaryArgs};
use crate::context::Context;

/// Run the summary command.
pub async fn run(args: SummaryArgs, ctx: &Context) -> Result<()> {
    let cart_path = ctx.resolve_path(&args.cart);
    ctx.output.debug(&format!("Loading cart from {}", cart_path.display()));
    let cart = load_cart(&cart_path)?;

    let page = PlaceOrderPage::mount(
        checkout_store(cart),
        Arc::new(InMemoryOrderService::new()),
        Arc::new(RecordingNavigator::new()),
        ctx.config.clone(),
    );
    let view = page.view()?;

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    print_view(ctx, &view);
    Ok(())
}

/// Print a view model in human form.
pub fn print_view(ctx: &Context, view: &OrderSummaryView) {
    let steps: Vec<&str> = view.steps.iter().map(|s| s.display_name()).collect();
    ctx.output.info(&steps.join(" > "));

    ctx.output.header("Shipping");
    ctx.output.kv("Address", &view.shipping);
    if !view.shipping_complete {
        ctx.output.warn("Shipping address is incomplete");
    }

    ctx.output.header("Payment Method");
    ctx.output.kv("Method", &view.payment_method);

    ctx.output.header("Order Items");
    if let Some(message) = view.empty_cart_message {
        ctx.output.info(message);
    }
    for line in &view.lines {
        ctx.output
            .list_item(&format!("{} ({})  {}", line.name, line.product_path, line.label()));
    }

    ctx.output.header("Order Summary");
    for (label, amount) in view.prices.rows() {
        ctx.output.price_row(label, amount);
    }
    if view.prices.has_free_shipping() {
        ctx.output.success("Free shipping");
    }

    if let Some(error) = &view.error {
        ctx.output.warn(error);
    }
}
