mod config;
mod logging;
mod models;
mod pipeline;
mod report;
mod scraper;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::pipeline::Pipeline;
use crate::scraper::error::ScrapeError;
use crate::scraper::http_client::HttpClient;

#[derive(Parser)]
#[command(name = "rankings-scraper", about = "Scrape ranking tables and price history", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Extra TOML config file layered over config/default and config/local
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Top countries per year from the World Happiness Report article (default)
    Happiness {
        /// Page to scrape instead of the configured article
        #[arg(long)]
        url: Option<String>,

        /// Maximum countries per year
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Daily close prices for one ticker from the finance chart feed
    Prices {
        /// Ticker symbol (default: AAPL)
        #[arg(short, long)]
        symbol: Option<String>,

        /// Feed range, e.g. 5d, 1mo, 1y
        #[arg(short, long)]
        range: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;

    let command = cli.command.unwrap_or(Command::Happiness { url: None, limit: None });
    match &command {
        Command::Happiness { url, limit } => {
            if let Some(url) = url {
                config.scraper.happiness_url = url.clone();
            }
            if let Some(limit) = limit {
                config.ranking.limit = *limit;
            }
        }
        Command::Prices { symbol, range } => {
            if let Some(symbol) = symbol {
                config.prices.symbol = symbol.clone();
            }
            if let Some(range) = range {
                config.prices.range = range.clone();
            }
        }
    }

    let dispatch = logging::build_dispatch(&config.logging, cli.verbose)?;
    let _log_guard = tracing::dispatcher::set_default(&dispatch);

    let client = HttpClient::new(&config.scraper).context("Failed to build HTTP client")?;
    let limit = config.ranking.limit;
    let symbol = config.prices.symbol.clone();
    let pipeline = Pipeline::new(client, config);

    match command {
        Command::Happiness { .. } => match pipeline.run_rankings().await {
            Ok(results) => {
                info!("{} years ranked", results.len());
                print!("{}", report::render_rankings(&results, limit));
            }
            Err(e) => report_failure(e)?,
        },

        Command::Prices { .. } => match pipeline.run_prices().await {
            Ok(prices) => print!("{}", report::render_prices(&symbol, &prices)),
            Err(e) => report_failure(e)?,
        },
    }

    Ok(())
}

/// Fetch failures end the run with a printed message and a zero exit status.
/// Anything else is a genuine error.
fn report_failure(err: ScrapeError) -> Result<()> {
    if let Some(code) = err.status_code() {
        warn!("Page fetch rejected with status {}", code);
        println!("Failed to load page. Status code: {}", code);
        return Ok(());
    }

    match err {
        ScrapeError::Http(e) => {
            warn!("Page fetch failed: {}", e);
            println!("Failed to load page: {}", e);
            Ok(())
        }
        other => Err(other.into()),
    }
}
