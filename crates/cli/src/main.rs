//! GoMarketplace CLI - Inspect and edit the stored cart.
//!
//! # Usage
//!
//! ```bash
//! # Add a product (or bump its quantity if already in the cart)
//! gm-cli add --id sku-1 --title "Camiseta" --image-url https://cdn.example.com/1.png --price 49.90
//!
//! # Change quantities
//! gm-cli increment sku-1
//! gm-cli decrement sku-1
//!
//! # Remove one line or everything
//! gm-cli remove sku-1
//! gm-cli clear
//!
//! # Show the cart
//! gm-cli list
//! gm-cli list --json
//! gm-cli summary
//! ```
//!
//! # Commands
//!
//! - `add`, `increment`, `decrement`, `remove`, `clear` - Edit the cart
//! - `list`, `summary` - Show the cart and its totals

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use gomarketplace_cart::CartConfig;
use gomarketplace_core::ProductId;
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "gm-cli")]
#[command(author, version, about = "GoMarketplace cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product to the cart
    Add {
        /// Product identifier
        #[arg(long)]
        id: ProductId,

        /// Product display title
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long)]
        image_url: String,

        /// Unit price
        #[arg(long)]
        price: Decimal,
    },
    /// Increase a line's quantity by one
    Increment {
        /// Product identifier
        id: ProductId,
    },
    /// Decrease a line's quantity by one (never below one)
    Decrement {
        /// Product identifier
        id: ProductId,
    },
    /// Remove a line from the cart
    Remove {
        /// Product identifier
        id: ProductId,
    },
    /// Remove every line from the cart
    Clear,
    /// List the cart's line items
    List {
        /// Print the stored JSON snapshot instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show total price and item count
    Summary,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gomarketplace_cli=info,gomarketplace_cart=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let config = CartConfig::from_env()?;
    let store = commands::open_store(&config).await?;

    match cli.command {
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => commands::cart::add(&store, id, title, image_url, price).await?,
        Commands::Increment { id } => commands::cart::increment(&store, &id).await?,
        Commands::Decrement { id } => commands::cart::decrement(&store, &id).await?,
        Commands::Remove { id } => commands::cart::remove(&store, &id).await?,
        Commands::Clear => commands::cart::clear(&store).await?,
        Commands::List { json } => commands::show::list(&store, json)?,
        Commands::Summary => commands::show::summary(&store, config.currency),
    }

    store.flush().await?;
    Ok(())
}
