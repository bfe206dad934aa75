//! Maison CLI - browse the catalog, price a cart and place orders.
//!
//! # Usage
//!
//! ```bash
//! # List dresses under $200, cheapest first
//! maison catalog --category dresses --max 200 --sort price-low
//!
//! # Show a product with its reviews and related items
//! maison product 3
//!
//! # Price a cart
//! maison quote --item 1:M:Black --item 2:S:White:2
//!
//! # Place an order
//! maison checkout --item 6:28:Blue --email you@example.com ...
//! ```
//!
//! # Commands
//!
//! - `categories` - Product counts per category
//! - `catalog` - Filter and sort the catalog
//! - `product` - Product details
//! - `quote` - Order summary for a cart
//! - `checkout` - Run shipping and payment and print the confirmation

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::error::Error;
use std::io::Write;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use maison_storefront::{AppError, AppState};

mod commands;

use commands::{CatalogArgs, CheckoutArgs, ProductArgs, QuoteArgs};

#[derive(Parser)]
#[command(name = "maison")]
#[command(author, version, about = "Maison storefront from the terminal")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show product counts per category
    Categories,
    /// Filter and sort the catalog
    Catalog(CatalogArgs),
    /// Show a product's details
    Product(ProductArgs),
    /// Price a cart
    Quote(QuoteArgs),
    /// Place an order
    Checkout(Box<CheckoutArgs>),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Err(e) = run(cli.command) {
        let _ = writeln!(std::io::stderr().lock(), "{}", failure_message(e.as_ref()));
        std::process::exit(1);
    }
}

/// What to tell the shopper when a command fails.
///
/// Storefront errors go through [`AppError::user_message`], which hides setup
/// and data problems; anything else is logged and shown as is.
fn failure_message(err: &(dyn Error + 'static)) -> String {
    if let Some(app_err) = err.downcast_ref::<AppError>() {
        return app_err.user_message();
    }
    tracing::error!("Command failed: {err}");
    err.to_string()
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "maison_storefront=info,maison_cli=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(command: Commands) -> Result<(), Box<dyn Error>> {
    let app = AppState::from_env()?;

    match command {
        Commands::Categories => commands::catalog::categories(&app)?,
        Commands::Catalog(args) => commands::catalog::list(&app, &args)?,
        Commands::Product(args) => commands::product::show(&app, &args)?,
        Commands::Quote(args) => commands::quote::quote(&app, &args)?,
        Commands::Checkout(args) => commands::checkout::checkout(&app, &args)?,
    }
    Ok(())
}
