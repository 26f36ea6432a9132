//! Historical prices from the finance chart feed.
//!
//! The feed's JSON is turned into [`PriceBar`]s, rendered as a plain HTML
//! table and read back through the HTML parser, so the printed close prices
//! come out of the same table machinery as the rankings.

use crate::config::PricesConfig;
use crate::models::{ClosePrice, PriceBar};
use crate::scraper::error::ScrapeError;
use crate::scraper::{selector, stripped_text};
use chrono::{DateTime, Duration};
use scraper::Html;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

// ── Feed shape ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
    #[serde(default)]
    symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

// ── Feed URL ──────────────────────────────────────────────────────────────────

/// `<chart_url>/<SYMBOL>?range=..&interval=..`
pub fn chart_url(config: &PricesConfig) -> Result<Url, ScrapeError> {
    let base = format!(
        "{}/{}",
        config.chart_url.trim_end_matches('/'),
        config.symbol.trim().to_uppercase()
    );
    let mut url = Url::parse(&base)?;
    url.query_pairs_mut()
        .append_pair("range", &config.range)
        .append_pair("interval", &config.interval);
    Ok(url)
}

// ── JSON → bars ───────────────────────────────────────────────────────────────

pub fn parse_chart(body: &str) -> Result<Vec<PriceBar>, ScrapeError> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;

    if let Some(err) = envelope.chart.error {
        return Err(ScrapeError::Chart(format!("{}: {}", err.code, err.description)));
    }

    let result = envelope
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| ScrapeError::Chart("empty result".to_string()))?;

    let offset = Duration::seconds(result.meta.gmtoffset);
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let at = |v: &[Option<f64>], i: usize| v.get(i).copied().flatten();

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        let Some(instant) = DateTime::from_timestamp(*ts, 0) else {
            warn!("Skipping out-of-range timestamp {}", ts);
            continue;
        };

        bars.push(PriceBar {
            date: (instant + offset).date_naive(),
            open: at(&quote.open, i),
            high: at(&quote.high, i),
            low: at(&quote.low, i),
            close: at(&quote.close, i),
            volume: quote.volume.get(i).copied().flatten(),
        });
    }

    debug!(
        symbol = result.meta.symbol.as_deref().unwrap_or("?"),
        bars = bars.len(),
        "Decoded chart feed"
    );
    Ok(bars)
}

// ── bars → HTML → close prices ────────────────────────────────────────────────

fn price_cell(v: Option<f64>) -> String {
    v.map(|p| format!("{p:.2}")).unwrap_or_else(|| "NaN".to_string())
}

pub fn render_html_table(bars: &[PriceBar]) -> String {
    let mut html = String::from(
        "<table class=\"prices\">\n  <tr><th>Date</th><th>Open</th><th>High</th>\
         <th>Low</th><th>Close</th><th>Volume</th></tr>\n",
    );

    for bar in bars {
        html.push_str(&format!(
            "  <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            bar.date,
            price_cell(bar.open),
            price_cell(bar.high),
            price_cell(bar.low),
            price_cell(bar.close),
            bar.volume.map(|v| v.to_string()).unwrap_or_else(|| "NaN".to_string()),
        ));
    }

    html.push_str("</table>\n");
    html
}

/// Date (cell 0) and close (cell 4) of every data row with at least five cells.
pub fn parse_close_prices(html: &str) -> Result<Vec<ClosePrice>, ScrapeError> {
    let doc = Html::parse_fragment(html);
    let tr_sel = selector("tr")?;
    let td_sel = selector("td")?;

    let prices = doc
        .select(&tr_sel)
        .skip(1)
        .filter_map(|tr| {
            let cols: Vec<String> = tr.select(&td_sel).map(stripped_text).collect();
            (cols.len() >= 5).then(|| ClosePrice {
                date: cols[0].clone(),
                close: cols[4].clone(),
            })
        })
        .collect();

    Ok(prices)
}
