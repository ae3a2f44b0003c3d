//! Art gallery CLI - browse the catalog, manage the cart and check out.
//!
//! # Usage
//!
//! ```bash
//! # List nature prints, cheapest first
//! gallery catalog --category nature --sort price-low
//!
//! # Add two large prints of artwork 7 to the cart
//! gallery cart add 7 --size large --quantity 2
//!
//! # Change the quantity of the first cart line
//! gallery cart update 1 3
//!
//! # Place the order using a JSON checkout form
//! gallery checkout --form order.json
//! ```
//!
//! # Commands
//!
//! - `catalog` - List artworks with filters and sorting
//! - `artwork` - Show one artwork and its print sizes
//! - `cart` - Show or modify the persisted cart
//! - `checkout` - Validate a checkout form and place the order

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use art_gallery_core::ArtworkId;
use art_gallery_storefront::catalog::{DEFAULT_SIZE, SortOrder};
use art_gallery_storefront::config::StorefrontConfig;
use art_gallery_storefront::error::AppError;
use art_gallery_storefront::state::AppState;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "gallery")]
#[command(author, version, about = "Art gallery storefront")]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List artworks
    Catalog {
        /// Category to show (`all`, `abstract`, `landscape`, `urban`, `nature`)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Lowest listing price to include
        #[arg(long, default_value = "0")]
        min_price: Decimal,

        /// Highest listing price to include
        #[arg(long, default_value = "1000")]
        max_price: Decimal,

        /// Ordering (`featured`, `price-low`, `price-high`, `newest`, `popular`)
        #[arg(short, long, default_value = "featured")]
        sort: SortOrder,
    },
    /// Show an artwork and its print sizes
    Artwork {
        /// Artwork ID
        id: ArtworkId,
    },
    /// Show or modify the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order
    Checkout {
        /// JSON file with the checkout form
        #[arg(short, long)]
        form: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum CartAction {
    /// Show cart contents and order summary
    Show,
    /// Add an artwork print to the cart
    Add {
        /// Artwork ID
        id: ArtworkId,

        /// Print size (`small`, `medium`, `large`)
        #[arg(short, long, default_value = DEFAULT_SIZE)]
        size: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a cart line
    Remove {
        /// Line number as shown by `cart show`
        position: usize,
    },
    /// Change the quantity of a cart line
    Update {
        /// Line number as shown by `cart show`
        position: usize,

        quantity: u32,
    },
    /// Empty the cart
    Clear,
    /// Toggle the cart panel
    Toggle,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
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
    let cli = Cli::parse();

    let code = match StorefrontConfig::from_env() {
        Ok(config) => {
            // Initialize Sentry (must be done before tracing subscriber)
            let _sentry_guard = init_sentry(&config);
            init_tracing();

            let state = AppState::new(config);
            match run(cli, &state).await {
                Ok(()) => 0,
                Err(e) => fail(&e),
            }
        }
        Err(e) => {
            init_tracing();
            fail(&AppError::from(e))
        }
    };

    std::process::exit(code);
}

/// Initialize tracing with `EnvFilter` and Sentry integration.
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "art_gallery_storefront=info,art_gallery_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[allow(clippy::print_stderr)]
fn fail(error: &AppError) -> i32 {
    error.report();
    eprintln!("error: {}", error.user_message());
    error.exit_code()
}

async fn run(cli: Cli, state: &AppState) -> Result<(), AppError> {
    let json = cli.json;
    match cli.command {
        Commands::Catalog {
            category,
            min_price,
            max_price,
            sort,
        } => commands::catalog::list(state, &category, min_price, max_price, sort, json)?,
        Commands::Artwork { id } => commands::catalog::show(state, id, json)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(state, json)?,
            CartAction::Add { id, size, quantity } => {
                commands::cart::add(state, id, &size, quantity)?;
            }
            CartAction::Remove { position } => commands::cart::remove(state, position)?,
            CartAction::Update { position, quantity } => {
                commands::cart::update(state, position, quantity)?;
            }
            CartAction::Clear => commands::cart::clear(state)?,
            CartAction::Toggle => commands::cart::toggle(state)?,
        },
        Commands::Checkout { form } => commands::checkout::run(state, &form, json).await?,
    }
    Ok(())
}
