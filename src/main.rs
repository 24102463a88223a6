//! # Shop Search CLI (`shop-search`)
//!
//! ## Usage
//!
//! ```bash
//! shop-search --config ./config/shop-search.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `shop-search serve` | Load reference data and start the HTTP server |
//! | `shop-search search` | Run one query and print the JSON result |
//! | `shop-search stats` | Load reference data and print a summary |
//!
//! ## Examples
//!
//! ```bash
//! # Ten most popular products
//! shop-search search
//!
//! # Products from coffee shops within 2 km
//! shop-search search --lat 59.33 --lng 18.06 --radius 2000 --tags coffee
//!
//! # Serve the API
//! shop-search serve
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use shop_search::search::SearchParams;
use shop_search::{config, data, search, server, stats};

/// Shop Search — popularity-ranked product search over in-memory reference data.
#[derive(Parser)]
#[command(name = "shop-search", version)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/shop-search.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the reference data and start the HTTP server.
    ///
    /// Binds to `[server].bind` only after the data has loaded; a load
    /// error exits without serving.
    Serve,

    /// Run a single search and print `{"products": [...]}` as JSON.
    ///
    /// Options are coerced exactly like `GET /search` query parameters.
    Search {
        /// Latitude of the query point.
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,

        /// Longitude of the query point.
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<String>,

        /// Radius around the query point, in metres.
        #[arg(long, allow_hyphen_values = true)]
        radius: Option<String>,

        /// Comma-separated tag names; shops with any of them match.
        #[arg(long)]
        tags: Option<String>,

        /// Maximum number of products to return.
        #[arg(long, allow_hyphen_values = true)]
        count: Option<String>,
    },

    /// Load the reference data and print counts and top tags.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shop_search=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            let store = data::load_store(&cfg.data)?;
            server::run_server(&cfg, store).await?;
        }
        Commands::Search {
            lat,
            lng,
            radius,
            tags,
            count,
        } => {
            let params = SearchParams {
                count,
                lat,
                lng,
                radius,
                tags,
            };
            search::run_search(&cfg, params)?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg)?;
        }
    }

    Ok(())
}
