//! Orchard CLI - Persisted client state management tools.
//!
//! # Usage
//!
//! ```bash
//! # Show where client state lives
//! orchard-cli state path
//!
//! # Inspect the persisted cart
//! orchard-cli cart show
//!
//! # Drop the product list cache
//! orchard-cli cache clear
//!
//! # Inspect or clear the recent-search history
//! orchard-cli searches show
//! orchard-cli searches clear
//! ```
//!
//! # Commands
//!
//! - `state` - Locate the state directory
//! - `cart` - Inspect or clear the persisted cart
//! - `cache` - Clear the product list cache
//! - `searches` - Inspect or clear recent search terms

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "orchard-cli")]
#[command(author, version, about = "Orchard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate the client state directory
    State {
        #[command(subcommand)]
        action: StateAction,
    },
    /// Inspect or clear the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the product list cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Inspect or clear recent search terms
    Searches {
        #[command(subcommand)]
        action: SearchesAction,
    },
}

#[derive(Subcommand)]
enum StateAction {
    /// Print the resolved state directory
    Path,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show persisted cart lines and totals
    Show,
    /// Empty the persisted cart
    Clear,
}

#[derive(Subcommand)]
enum CacheAction {
    /// Drop all cached list pages
    Clear,
}

#[derive(Subcommand)]
enum SearchesAction {
    /// Show recent search terms, most recent first
    Show,
    /// Forget all recent search terms
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::State { action } => match action {
            StateAction::Path => commands::state::path()?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::state::cart_show()?,
            CartAction::Clear => commands::state::cart_clear()?,
        },
        Commands::Cache { action } => match action {
            CacheAction::Clear => commands::state::cache_clear()?,
        },
        Commands::Searches { action } => match action {
            SearchesAction::Show => commands::state::searches_show()?,
            SearchesAction::Clear => commands::state::searches_clear()?,
        },
    }
    Ok(())
}
