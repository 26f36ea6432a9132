use crate::models::{ClosePrice, YearedRanking};
use std::fmt::Write;

/// Console report for ranked years. Years short of `limit` get a
/// `[DEBUG]` shortfall line.
pub fn render_rankings(results: &[YearedRanking], limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Top {} Happiest Countries (Sorted by Year Descending):", limit);

    for ranking in results {
        let _ = writeln!(out, "\nYear: {}", ranking.year);
        for country in &ranking.countries {
            let _ = writeln!(out, "- {}", country);
        }
        if ranking.countries.len() < limit {
            let _ = writeln!(
                out,
                "[DEBUG] Only {} countries found for {}.",
                ranking.countries.len(),
                ranking.year
            );
        }
    }

    out
}

pub fn render_prices(symbol: &str, prices: &[ClosePrice]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} Historical Close Prices:", symbol.to_uppercase());
    for p in prices {
        let _ = writeln!(out, "{}: {}", p.date, p.close);
    }
    out
}
