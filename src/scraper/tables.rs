//! Ranking table detection.
//!
//! A table qualifies when its joined, lowercased header text mentions
//! "country" and at least one of "score" / "rank". Nothing smarter than that:
//! differently worded tables are missed and unrelated ones may slip through.

use crate::scraper::error::ScrapeError;
use crate::scraper::selector;
use scraper::{ElementRef, Html};
use tracing::debug;

/// Header cell texts of `table`, in document order (nested tables included).
pub fn header_texts(table: ElementRef<'_>) -> Result<Vec<String>, ScrapeError> {
    let th_sel = selector("th")?;
    Ok(table
        .select(&th_sel)
        .map(|th| th.text().collect::<String>())
        .collect())
}

pub fn is_ranking_header<S: AsRef<str>>(headers: &[S]) -> bool {
    let joined = headers
        .iter()
        .map(|h| h.as_ref().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    joined.contains("country") && (joined.contains("score") || joined.contains("rank"))
}

/// All `table.<class_marker>` elements that look like ranking tables.
pub fn select_ranking_tables<'a>(
    doc: &'a Html,
    class_marker: &str,
) -> Result<Vec<ElementRef<'a>>, ScrapeError> {
    let table_sel = selector(&format!("table.{class_marker}"))?;

    let mut tables = Vec::new();
    for table in doc.select(&table_sel) {
        let headers = header_texts(table)?;
        if is_ranking_header(&headers) {
            tables.push(table);
        } else {
            debug!(headers = ?headers, "Skipping non-ranking table");
        }
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_is_mandatory() {
        assert!(!is_ranking_header(&["Rank", "Nation", "Score"]));
        assert!(!is_ranking_header(&["Score", "Rank"]));
    }

    #[test]
    fn test_rank_without_score_qualifies() {
        assert!(is_ranking_header(&["Rank", "Country"]));
        assert!(is_ranking_header(&["COUNTRY", "Happiness score"]));
        assert!(!is_ranking_header(&["Country", "Population"]));
    }

    #[test]
    fn test_select_keeps_document_order_and_class() {
        let html = r#"
            <html><body>
              <table class="wikitable"><tr><th>Country</th><th>Score</th></tr></table>
              <table class="infobox"><tr><th>Country</th><th>Rank</th></tr></table>
              <table class="wikitable sortable" id="second">
                <tr><th>Overall rank</th><th>Country or region</th></tr>
              </table>
              <table class="wikitable"><tr><th>Year</th><th>Edition</th></tr></table>
            </body></html>"#;
        let doc = Html::parse_document(html);

        let tables = select_ranking_tables(&doc, "wikitable").unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].value().attr("id"), None);
        assert_eq!(tables[1].value().attr("id"), Some("second"));
    }
}
