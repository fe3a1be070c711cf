//! Carrito CLI - Drive the cart dropdown from a terminal.
//!
//! Plays the part of the browser page: a JSON file stands in for page
//! storage and the dropdown is printed instead of drawn.
//!
//! # Usage
//!
//! ```bash
//! # Log in (stores the user object the login page would)
//! carrito login ana@tienda.cl
//!
//! # Show the dropdown (or its HTML fragment)
//! carrito show
//! carrito show --html
//!
//! # Add, remove and clear
//! carrito add --name "Polera" --price 12990 --image https://cdn.tienda.cl/polera.png
//! carrito remove 665f1c2e9b1d8a0012345678
//! carrito remove --row 0
//! carrito clear
//!
//! # Log out (forgets the identity and empties the dropdown)
//! carrito logout
//! ```
//!
//! # Environment Variables
//!
//! - `CARRITO_API_BASE_URL`, `CARRITO_FETCH_FALLBACK`, `CARRITO_HTTP_TIMEOUT_SECS` -
//!   see `carrito_widget::config`
//! - `CARRITO_STORE_PATH` - Page storage file (default: `.carrito-store.json`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `RUST_LOG` - Log filter (default: `carrito_widget=info,carrito_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use carrito_widget::{FetchFailurePolicy, WidgetConfig};
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "carrito")]
#[command(author, version, about = "Cart dropdown tools")]
struct Cli {
    /// Page storage file
    #[arg(long, env = "CARRITO_STORE_PATH", default_value = ".carrito-store.json", global = true)]
    store: PathBuf,

    /// Override the cart backend base URL
    #[arg(long, global = true)]
    api: Option<String>,

    /// Override what to show when the cart cannot be fetched (`empty` or `mirror`)
    #[arg(long, global = true)]
    fallback: Option<FetchFailurePolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the cart and show the dropdown
    Show {
        /// Print the dropdown's HTML fragment instead of a summary
        #[arg(long)]
        html: bool,
    },
    /// Add a product to the cart
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price in whole pesos
        #[arg(short, long)]
        price: u64,

        /// Product image URL
        #[arg(short, long)]
        image: Option<String>,
    },
    /// Remove an item from the cart
    Remove {
        /// Backend id of the item
        #[arg(required_unless_present = "row", conflicts_with = "row")]
        id: Option<String>,

        /// Press the delete button of this dropdown row instead (0-based)
        #[arg(long)]
        row: Option<usize>,
    },
    /// Empty the cart
    Clear,
    /// Store a logged-in user
    Login {
        /// User email
        email: String,
    },
    /// Forget the logged-in user and empty the dropdown
    Logout,
    /// Print the identity cart requests are scoped to
    Whoami,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok().filter(|dsn| !dsn.is_empty())?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (also loads .env for SENTRY_DSN)
    let config = match WidgetConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "carrito_widget=info,carrito_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: WidgetConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config;
    if let Some(api) = cli.api.as_deref() {
        config = config.with_api_base_url(api)?;
    }
    if let Some(policy) = cli.fallback {
        config = config.with_fetch_fallback(policy);
    }

    match cli.command {
        Commands::Show { html } => commands::cart::show(&config, &cli.store, html).await?,
        Commands::Add { name, price, image } => {
            commands::cart::add(&config, &cli.store, name, price, image).await?;
        }
        Commands::Remove { id, row } => {
            let target = match (id, row) {
                (Some(id), _) => commands::cart::RemoveTarget::Id(id),
                (None, Some(row)) => commands::cart::RemoveTarget::Row(row),
                (None, None) => return Err("an item id or --row is required".into()),
            };
            commands::cart::remove(&config, &cli.store, target).await?;
        }
        Commands::Clear => commands::cart::clear(&config, &cli.store).await?,
        Commands::Login { email } => commands::session::login(&cli.store, &email)?,
        Commands::Logout => commands::session::logout(&config, &cli.store)?,
        Commands::Whoami => commands::session::whoami(&cli.store)?,
    }
    Ok(())
}
