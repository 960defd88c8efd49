use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pricelens_core::{parse_site_list, Site};
use pricelens_scraper::{parse_results, AdapterRegistry, Aggregator, HttpFetcher};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricelens")]
#[command(about = "Search Amazon, Flipkart, Snapdeal and Croma from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch and parse live search results from the selected sites
    Search {
        /// Search keyword, e.g. "iphone 15"
        query: String,
        /// Comma-separated sites to search (default: all)
        #[arg(long)]
        sites: Option<String>,
        /// Maximum records per site, 1-50 (default: each site's own limit)
        #[arg(long, value_parser = parse_limit)]
        limit: Option<usize>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Extract records from a saved search-results page
    Parse {
        /// Site the page was saved from
        #[arg(long)]
        site: Site,
        /// Path to the saved HTML page
        #[arg(long)]
        file: PathBuf,
        /// Maximum records, 1-50 (default: the site's own limit)
        #[arg(long, value_parser = parse_limit)]
        limit: Option<usize>,
    },
}

/// Upper bound on a caller-supplied result limit, shared with the HTTP API.
const MAX_LIMIT: usize = 50;

fn parse_limit(raw: &str) -> Result<usize, String> {
    let limit: usize = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a positive whole number"))?;
    if (1..=MAX_LIMIT).contains(&limit) {
        Ok(limit)
    } else {
        Err(format!("limit must be between 1 and {MAX_LIMIT}"))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pricelens_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let adapters = AdapterRegistry::new()?;

    match cli.command {
        Commands::Search {
            query,
            sites,
            limit,
            pretty,
        } => {
            let sites = parse_site_list(sites.as_deref())?;
            let aggregator = Aggregator::new(
                HttpFetcher::from_config(&config)?,
                Arc::new(adapters),
                Duration::from_secs(config.site_timeout_secs),
            );
            let response = aggregator.search(&query, &sites, limit).await;
            let json = if pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            println!("{json}");
        }
        Commands::Parse { site, file, limit } => {
            let markup = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let records = parse_results(adapters.get(site), &markup, limit);
            tracing::info!(%site, count = records.len(), "parsed saved page");
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}
