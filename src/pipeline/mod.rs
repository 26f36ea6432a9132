//! Orchestrator: fetch → parse → select → resolve/extract → sort.
//!
//! Everything after the fetch is synchronous and lives in [`rank_document`],
//! so the whole heuristic chain can be run against a stored page.

use crate::config::{AppConfig, RankingConfig};
use crate::models::{ClosePrice, YearedRanking};
use crate::scraper::chart::{chart_url, parse_chart, parse_close_prices, render_html_table};
use crate::scraper::context::resolve_year;
use crate::scraper::error::ScrapeError;
use crate::scraper::rows::extract_countries;
use crate::scraper::tables::select_ranking_tables;
use crate::scraper::PageSource;
use scraper::Html;
use tracing::info;

pub struct Pipeline<S> {
    source: S,
    config: AppConfig,
}

impl<S: PageSource> Pipeline<S> {
    pub fn new(source: S, config: AppConfig) -> Self {
        Self { source, config }
    }

    /// One fetch of the happiness article, then ranked results by year.
    pub async fn run_rankings(&self) -> Result<Vec<YearedRanking>, ScrapeError> {
        let url = &self.config.scraper.happiness_url;
        info!("Fetching {}", url);

        let html = self.source.fetch_text(url).await?;
        rank_document(&html, &self.config.ranking)
    }

    /// One fetch of the chart feed, round-tripped through an HTML table.
    pub async fn run_prices(&self) -> Result<Vec<ClosePrice>, ScrapeError> {
        let url = chart_url(&self.config.prices)?;
        info!("Fetching {}", url);

        let body = self.source.fetch_text(url.as_str()).await?;
        let bars = parse_chart(&body)?;
        parse_close_prices(&render_html_table(&bars))
    }
}

/// Ranking tables of `html`, each paired with its year, newest year first.
/// Tables that yield no country are logged and dropped.
pub fn rank_document(html: &str, config: &RankingConfig) -> Result<Vec<YearedRanking>, ScrapeError> {
    let doc = Html::parse_document(html);
    let tables = select_ranking_tables(&doc, &config.table_class)?;
    info!("{} ranking tables found", tables.len());

    let mut results = Vec::new();
    for table in tables {
        let year = resolve_year(table);
        let countries = extract_countries(table, config.limit)?;

        if countries.is_empty() {
            info!("No valid countries found for year: {}", year);
            continue;
        }

        if countries.len() < config.limit {
            info!("Only {} countries found for {}", countries.len(), year);
        }

        results.push(YearedRanking { year, countries });
    }

    sort_by_year_desc(&mut results);
    Ok(results)
}

/// Newest first; non-numeric years rank as -1 and sink to the end.
/// Stable, so equal keys keep document order.
pub fn sort_by_year_desc(results: &mut [YearedRanking]) {
    results.sort_by(|a, b| b.year.sort_key().cmp(&a.year.sort_key()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture;
    use crate::models::Year;
    use async_trait::async_trait;

    struct FixedPage(Result<String, u16>);

    #[async_trait]
    impl PageSource for FixedPage {
        async fn fetch_text(&self, _url: &str) -> Result<String, ScrapeError> {
            self.0.clone().map_err(ScrapeError::Status)
        }
    }

    const ARTICLE: &str = r#"<html><body>
        <h2>2021 report</h2>
        <table class="wikitable">
          <tr><th>Rank</th><th>Country</th><th>Score</th></tr>
          <tr><td>1</td><td>Finland</td><td>7.8</td></tr>
          <tr><td>2</td><td>Finland</td><td>7.8</td></tr>
        </table>
        <h2>2023 report</h2>
        <table class="wikitable">
          <tr><th>Overall rank</th><th>Country or region</th></tr>
          <tr><td>1</td><td>Denmark</td></tr>
          <tr><td>2</td><td>Iceland</td></tr>
        </table>
        <h2>Methodology</h2>
        <div><table class="wikitable">
          <tr><th>Country</th><th>Score</th></tr>
          <tr><td>1</td><td>7.1</td></tr>
        </table></div>
        <table class="wikitable">
          <tr><th>Country</th><th>Population</th></tr>
          <tr><td>Norway</td><td>5</td></tr>
        </table>
      </body></html>"#;

    fn ranking(year: &str, countries: &[&str]) -> YearedRanking {
        YearedRanking {
            year: Year::new(year),
            countries: countries.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_sort_puts_sentinel_last() {
        let mut results = vec![
            ranking("2023", &["A"]),
            YearedRanking { year: Year::unknown(), countries: vec!["B".into()] },
            ranking("2021", &["C"]),
        ];
        sort_by_year_desc(&mut results);

        let order: Vec<&str> = results.iter().map(|r| r.year.as_str()).collect();
        assert_eq!(order, vec!["2023", "2021", "Unknown Year"]);
    }

    #[test]
    fn test_rank_document_end_to_end() {
        let (dispatch, logs) = capture::dispatch();
        let results = tracing::dispatcher::with_default(&dispatch, || {
            rank_document(ARTICLE, &RankingConfig::default()).unwrap()
        });

        assert_eq!(
            results,
            vec![
                ranking("2023", &["Denmark", "Iceland"]),
                ranking("2021", &["Finland"]),
            ]
        );

        let logs = logs.contents();
        assert!(logs.contains("Only 1 countries found for 2021"));
        assert!(logs.contains("No valid countries found for year: Unknown Year"));
        assert!(logs.contains("Year not found in parent tree"));
    }

    #[test]
    fn test_run_rankings_through_source() {
        let pipeline = Pipeline::new(FixedPage(Ok(ARTICLE.to_string())), AppConfig::default());
        let results = tokio_test::block_on(pipeline.run_rankings()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].year.as_str(), "2023");
    }

    #[test]
    fn test_non_200_aborts_run() {
        let pipeline = Pipeline::new(FixedPage(Err(503)), AppConfig::default());
        let err = tokio_test::block_on(pipeline.run_rankings()).unwrap_err();
        assert_eq!(err.status_code(), Some(503));
    }

    #[test]
    fn test_run_prices_reparses_feed() {
        let feed = r#"{"chart":{"result":[{"meta":{"gmtoffset":0},
            "timestamp":[1704153600],
            "indicators":{"quote":[{"open":[187.15],"high":[188.44],"low":[183.89],
            "close":[185.64],"volume":[82488700]}]}}],"error":null}}"#;
        let pipeline = Pipeline::new(FixedPage(Ok(feed.to_string())), AppConfig::default());

        let prices = tokio_test::block_on(pipeline.run_prices()).unwrap();
        assert_eq!(
            prices,
            vec![ClosePrice { date: "2024-01-02".into(), close: "185.64".into() }]
        );
    }
}
