//! CLI command implementations.

pub mod config;
pub mod place;
pub mod summary;

use std::path::Path;

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use shopfront_commerce::cart::CartState;

/// Arguments for the summary command.
#[derive(Args)]
pub struct SummaryArgs {
    /// Cart JSON file.
    #[arg(long)]
    pub cart: String,
}

/// Arguments for the place command.
#[derive(Args)]
pub struct PlaceArgs {
    /// Cart JSON file.
    #[arg(long)]
    pub cart: String,

    /// Make the order service reject the order with this message.
    #[arg(long)]
    pub fail: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
}

/// Read a cart saved as JSON (`cartItems`, `shippingAddress`, `paymentMethod`).
pub fn load_cart(path: &Path) -> Result<CartState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read cart file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse cart file {}", path.display()))
}
