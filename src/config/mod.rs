use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub ranking: RankingConfig,
    pub prices: PricesConfig,
    pub logging: LoggingConfig,
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScraperConfig {
    #[serde(default = "default_happiness_url")]
    pub happiness_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// No timeout unless set; the fetch blocks until the server answers.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Ranking table detection and extraction
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankingConfig {
    #[serde(default = "default_table_class")]
    pub table_class: String,

    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Finance chart feed
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricesConfig {
    #[serde(default = "default_chart_url")]
    pub chart_url: String,

    #[serde(default = "default_symbol")]
    pub symbol: String,

    #[serde(default = "default_range")]
    pub range: String,

    #[serde(default = "default_interval")]
    pub interval: String,
}

/// Log file side channel
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `false` turns the log file off; console output is unaffected.
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_log_file")]
    pub file: PathBuf,

    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_happiness_url() -> String {
    "https://en.wikipedia.org/wiki/World_Happiness_Report".to_string()
}
fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}
fn default_table_class() -> String {
    "wikitable".to_string()
}
fn default_limit() -> usize {
    10
}
fn default_chart_url() -> String {
    "https://query1.finance.yahoo.com/v8/finance/chart".to_string()
}
fn default_symbol() -> String {
    "AAPL".to_string()
}
fn default_range() -> String {
    "1mo".to_string()
}
fn default_interval() -> String {
    "1d".to_string()
}
fn default_true() -> bool {
    true
}
fn default_log_file() -> PathBuf {
    PathBuf::from("scraper_debug.log")
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            happiness_url: default_happiness_url(),
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            table_class: default_table_class(),
            limit: default_limit(),
        }
    }
}

impl Default for PricesConfig {
    fn default() -> Self {
        Self {
            chart_url: default_chart_url(),
            symbol: default_symbol(),
            range: default_range(),
            interval: default_interval(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from files + environment overrides.
    ///
    /// Later sources win: `config/default`, `config/local`, the explicit
    /// `extra` file, then `RANKINGS__*` variables.
    pub fn load(extra: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let mut builder = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            );

        if let Some(path) = extra {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let cfg = builder
            .add_source(
                config::Environment::with_prefix("RANKINGS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration sources")?;

        cfg.try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
