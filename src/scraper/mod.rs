pub mod chart;
pub mod context;
pub mod error;
pub mod http_client;
pub mod rows;
pub mod tables;

use async_trait::async_trait;
use scraper::{ElementRef, Selector};

use self::error::ScrapeError;

// ── Source trait ──────────────────────────────────────────────────────────────

/// Where page bodies come from. The live implementation is [`http_client::HttpClient`].
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch `url` and return its body; any non-200 status is an error.
    async fn fetch_text(&self, url: &str) -> Result<String, ScrapeError>;
}

// ── Shared DOM helpers ────────────────────────────────────────────────────────

pub(crate) fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{css}: {e:?}")))
}

/// Text of every descendant text node, each trimmed and glued together
/// with no separator: `In <a>2019</a>, x` reads `In2019,x`.
pub(crate) fn stripped_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}
