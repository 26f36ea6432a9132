use crate::config::ScraperConfig;
use crate::scraper::error::ScrapeError;
use crate::scraper::PageSource;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Single-shot HTTP client: one GET, no retry, no pacing.
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true);

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            inner: builder.build()?,
        })
    }
}

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch_text(&self, url: &str) -> Result<String, ScrapeError> {
        debug!("GET {}", url);

        let resp = self.inner.get(url).send().await?;
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(ScrapeError::Status(status.as_u16()));
        }

        Ok(resp.text().await?)
    }
}
