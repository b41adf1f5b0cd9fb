//! Fake Store Cart CLI - drive the cart widget from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog with cart membership
//! cart products
//!
//! # Add, adjust and remove
//! cart add 3
//! cart adjust 3 -- -1
//! cart remove 3
//!
//! # Show the cart and order summary
//! cart show
//!
//! # Write the full HTML page
//! cart render --out cart.html
//!
//! # Forget the stored cart
//! cart clear
//! ```
//!
//! # Environment Variables
//!
//! See `fakestore_cart_widget::config` (`CART_CATALOG_URL`,
//! `CART_STORAGE_DIR`, ...). `RUST_LOG` controls log output on stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fakestore_cart_core::ProductId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about = "Fake Store shopping cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show cart lines and the order summary
    Show,
    /// List catalog products with their quantity in the cart
    Products,
    /// Add one unit of a product
    Add {
        /// Catalog product id
        product_id: ProductId,
    },
    /// Change a product's quantity by a signed delta
    Adjust {
        /// Catalog product id
        product_id: ProductId,

        /// Amount to add (negative to remove units)
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product id
        product_id: ProductId,
    },
    /// Render the full HTML page
    Render {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Delete the stored cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fakestore_cart_widget=info,fakestore_cart_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let config = fakestore_cart_widget::WidgetConfig::from_env()?;

    match cli.command {
        Commands::Show => commands::cart::show(&config).await?,
        Commands::Products => commands::cart::products(&config).await?,
        Commands::Add { product_id } => commands::cart::add(&config, product_id).await?,
        Commands::Adjust { product_id, delta } => {
            commands::cart::adjust(&config, product_id, delta).await?;
        }
        Commands::Remove { product_id } => commands::cart::remove(&config, product_id).await?,
        Commands::Render { out } => commands::render::page(&config, out.as_deref()).await?,
        Commands::Clear => commands::cart::clear(&config)?,
    }
    Ok(())
}
