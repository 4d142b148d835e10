//! Product Dashboard CLI - manage products from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products, filtered and sorted
//! pd-cli list --filter lamp --sort price_desc
//!
//! # Create a product
//! pd-cli create -n "Desk Lamp" -p 19.99 -d "Warm light" -c Blue
//!
//! # Change some fields of an existing product
//! pd-cli update 42 -p 24.50
//!
//! # Delete a product
//! pd-cli delete 42
//! ```
//!
//! Every command logs in with `DASHBOARD_USERNAME` / `DASHBOARD_PASSWORD`,
//! loads the product list, runs, and prints the resulting table.
//!
//! # Environment Variables
//!
//! - `DASHBOARD_*` - see `product_dashboard::config`
//! - `DASHBOARD_LOG_FORMAT` - `json` for structured logs, text otherwise
//! - `SENTRY_DSN` - enables error reporting when set
//! - `RUST_LOG` - log filter (default: `product_dashboard=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use product_dashboard::{DashboardConfig, SortKey};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

use commands::{CliError, ProductArgs};

#[derive(Parser)]
#[command(name = "pd-cli")]
#[command(author, version, about = "Product dashboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the product table
    List {
        /// Only show products whose name or description contains this text
        #[arg(short, long, default_value = "")]
        filter: String,

        /// Sort order (`name_asc`, `name_desc`, `price_asc`, `price_desc`)
        #[arg(short, long, default_value = "name_asc")]
        sort: SortKey,
    },
    /// Create a product
    Create {
        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Update a product; omitted fields keep their current value
    Update {
        /// Product ID
        id: String,

        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok().filter(|s| !s.is_empty())?;

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

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "product_dashboard=info,pd_cli=info".into());

    let json = std::env::var("DASHBOARD_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Sentry has to exist before the subscriber that forwards to it
    let _sentry_guard = init_sentry();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("{}", e.user_message());
        tracing::debug!(error = %e, "Command failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = DashboardConfig::from_env()?;
    let mut dashboard = commands::connect(&config).await?;

    match cli.command {
        Commands::List { filter, sort } => {
            dashboard.set_filter(filter);
            dashboard.set_sort(sort);
        }
        Commands::Create { fields } => commands::create(&mut dashboard, fields).await?,
        Commands::Update { id, fields } => commands::update(&mut dashboard, &id, fields).await?,
        Commands::Delete { id } => commands::delete(&mut dashboard, &id).await?,
    }

    render::print(&dashboard);
    Ok(())
}
