//! Place command - run the place-order flow against the in-memory service.

use std::sync::Arc;

use anyhow::{bail, Result};
use dialoguer::Confirm;
use shopfront_checkout::{
    checkout_store, InMemoryOrderService, OrderServiceError, PlaceOrderOutcome, PlaceOrderPage,
    RecordingNavigator,
};

use super::summary::print_view;
use super::{load_cart, PlaceArgs};
use crate::context::Context;

/// Run the place command.
pub async fn run(args: PlaceArgs, ctx: &Context) -> Result<()> {
    let cart_path = ctx.resolve_path(&args.cart);
    let cart = load_cart(&cart_path)?;

    let service = Arc::new(InMemoryOrderService::new());
    if let Some(message) = args.fail {
        service.fail_next(OrderServiceError::Rejected(message));
    }
    let navigator = Arc::new(RecordingNavigator::new());

    let page = PlaceOrderPage::mount(
        checkout_store(cart),
        service.clone(),
        navigator.clone(),
        ctx.config.clone(),
    );

    if !ctx.output.is_json() {
        print_view(ctx, &page.view()?);
    }

    if page.is_place_order_disabled() {
        bail!("Cart is empty, nothing to order");
    }

    if !args.yes && !ctx.output.is_json() {
        println!();
        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.info("Order not placed");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let outcome = page.place_order().await;
    spinner.finish_and_clear();
    let outcome = outcome?;

    let route = navigator.current().map(|r| r.path());
    if ctx.output.is_json() {
        let (status, detail) = match &outcome {
            PlaceOrderOutcome::Disabled => ("disabled", None),
            PlaceOrderOutcome::RedirectedToPayment => ("payment_required", None),
            PlaceOrderOutcome::Submitted(order) => ("created", Some(order.id.to_string())),
            PlaceOrderOutcome::Failed(message) => ("failed", Some(message.clone())),
        };
        ctx.output.json(&serde_json::json!({
            "status": status,
            "detail": detail,
            "redirect": route,
            "submissions": service.submission_count(),
        }));
        return Ok(());
    }

    match outcome {
        PlaceOrderOutcome::Disabled => ctx.output.warn("Place order is disabled"),
        PlaceOrderOutcome::RedirectedToPayment => {
            ctx.output.warn("No payment method selected");
            ctx.output.kv("Redirect", route.as_deref().unwrap_or("/payment"));
        }
        PlaceOrderOutcome::Submitted(order) => {
            ctx.output.success(&format!("Order {} created", order.id));
            if let Some(total) = order.total_price {
                ctx.output.kv("Total", &total.display());
            }
            if let Some(route) = route {
                ctx.output.kv("Redirect", &route);
            }
        }
        PlaceOrderOutcome::Failed(message) => bail!("Order failed: {}", message),
    }

    Ok(())
}
