use crate::scraper::error::ScrapeError;
use crate::scraper::{selector, stripped_text};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

static PURE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)?$").unwrap());

/// Whether a cell's text can stand in as a country name.
fn is_country_text(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
        && !text.eq_ignore_ascii_case("n/a")
        && !PURE_NUMBER_RE.is_match(text)
}

/// Up to `limit` distinct country names from `table`.
///
/// The first row is taken as the header. Each later row contributes at most
/// one name: its first `td` that has a letter, is not `N/A`, is not a bare
/// number and has not been seen yet. Rows with no such cell are passed over.
pub fn extract_countries(table: ElementRef<'_>, limit: usize) -> Result<Vec<String>, ScrapeError> {
    let tr_sel = selector("tr")?;
    let td_sel = selector("td")?;

    let mut countries: Vec<String> = Vec::new();

    for row in table.select(&tr_sel).skip(1) {
        if countries.len() >= limit {
            break;
        }

        let pick = row
            .select(&td_sel)
            .map(stripped_text)
            .find(|text| is_country_text(text) && !countries.contains(text));

        if let Some(country) = pick {
            countries.push(country);
        }
    }

    Ok(countries)
}
