//! Fishmarket CLI - Browse the catalog and place orders from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products and prices
//! fishmarket catalog
//!
//! # Place an order for 2 kg Fresh Tilapia and 1 kg Fresh Catfish
//! fishmarket order -i 1=2 -i 4=1 \
//!     --name "John Doe" --email john@example.com --phone 1234567890 \
//!     --address "123 Main Street" --city Accra --state "Greater Accra" --zip 00233
//!
//! # Use a custom catalog file and print the order as JSON
//! fishmarket order --catalog catalog.json --json -i a=1 ...
//! ```
//!
//! # Commands
//!
//! - `catalog` - List products
//! - `order` - Validate and submit an order

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fishmarket_ordering::CustomerForm;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::order::ItemArg;

#[derive(Parser)]
#[command(name = "fishmarket")]
#[command(author, version, about = "Fishmarket order tools")]
struct Cli {
    /// Catalog JSON file (overrides `ORDER_CATALOG_PATH`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products and prices
    Catalog,
    /// Validate and submit an order
    Order {
        /// Product and quantity as `ID=QTY` (repeatable)
        #[arg(short, long = "item", value_name = "ID=QTY", required = true)]
        items: Vec<ItemArg>,

        #[command(flatten)]
        customer: CustomerArgs,

        /// Print the placed order as JSON instead of the text summary
        #[arg(long)]
        json: bool,
    },
}

/// Contact and delivery details.
#[derive(Args)]
struct CustomerArgs {
    /// Full name
    #[arg(long)]
    name: String,
    /// Email address
    #[arg(long)]
    email: String,
    /// Phone number
    #[arg(long)]
    phone: String,
    /// Street address
    #[arg(long)]
    address: String,
    /// City
    #[arg(long)]
    city: String,
    /// State or region
    #[arg(long)]
    state: String,
    /// ZIP or postal code
    #[arg(long)]
    zip: String,
}

impl From<CustomerArgs> for CustomerForm {
    fn from(args: CustomerArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            phone: args.phone,
            address: args.address,
            city: args.city,
            state: args.state,
            zip: args.zip,
        }
    }
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fishmarket=info,fishmarket_ordering=info".into());

    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog => commands::catalog::list(cli.catalog).await?,
        Commands::Order {
            items,
            customer,
            json,
        } => {
            commands::order::place(cli.catalog, &items, customer.into(), json).await?;
        }
    }
    Ok(())
}
