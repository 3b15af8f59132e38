//! Goblin Store CLI - maintenance tools for a storefront's persisted state.
//!
//! # Usage
//!
//! ```bash
//! # List the products in the persisted cart
//! gs-cli cart show --data-dir data
//!
//! # Empty the persisted cart
//! gs-cli cart clear
//!
//! # Load and validate a catalog file or URL
//! gs-cli catalog check crates/storefront/catalog.json
//! ```
//!
//! # Commands
//!
//! - `cart show` - Print the persisted cart and its total
//! - `cart clear` - Empty the persisted cart
//! - `catalog check` - Validate a catalog source

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gs-cli")]
#[command(author, version, about = "Goblin Store CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or reset the persisted cart
    Cart {
        /// Directory of the storefront's persistent store
        #[arg(long, env = "STORE_DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        #[command(subcommand)]
        action: CartAction,
    },
    /// Work with catalog sources
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the products in the cart and the total
    Show,
    /// Remove every product from the cart
    Clear,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Load a catalog and report problems
    Check {
        /// Catalog file path or http(s) URL
        source: String,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Cart { data_dir, action } => match action {
            CartAction::Show => commands::cart::show(&data_dir)?,
            CartAction::Clear => commands::cart::clear(&data_dir)?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Check { source } => {
                commands::catalog::check(&source).await?;
            }
        },
    }
    Ok(())
}
