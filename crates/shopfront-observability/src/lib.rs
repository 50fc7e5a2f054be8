//! Observability for the Shopfront checkout.
//!
//! This crate provides:
//! - `StructuredLogger` - per-checkout structured log entries
//! - `init_tracing` - process-wide `tracing` subscriber setup

mod logging;
mod subscriber;

pub use logging::*;
pub use subscriber::*;

// Re-export CheckoutId for convenience
pub use shopfront_commerce::CheckoutId;
