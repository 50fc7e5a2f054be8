//! Shopfront CLI - review a cart and place the order from the terminal.
//!
//! Commands:
//! - `shopfront summary` - Print the order summary for a cart file
//! - `shopfront place` - Run the place-order flow for a cart file
//! - `shopfront config` - Show the effective configuration

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shopfront_observability::{init_tracing, LogLevel};

use commands::{ConfigArgs, PlaceArgs, SummaryArgs};

/// Shopfront CLI - Review and place orders
#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the order summary for a cart
    Summary(SummaryArgs),

    /// Place the order for a cart
    Place(PlaceArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = context::Context::load(cli.config.as_deref(), output)?;
    // Keep the terminal quiet below warn unless asked.
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        ctx.config.logging.level.max(LogLevel::Warn)
    };
    init_tracing(ctx.config.logging.format, level);

    let result = match cli.command {
        Commands::Summary(args) => commands::summary::run(args, &ctx).await,
        Commands::Place(args) => commands::place::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
